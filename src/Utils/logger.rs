use crate::numerical::trajectory::Trajectory;
use csv::Writer;
use std::fs::File;
use std::io::{self, Write};

/// Writes the trajectory as a tab-separated table with a header row `arg<TAB>value`.
pub fn save_trajectory_to_file(
    filename: &str,
    trajectory: &Trajectory,
    arg: &str,
    value: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}\t{}", arg, value)?;
    for (x, y) in trajectory.iter() {
        writeln!(file, "{}\t{}", x, y)?;
    }
    Ok(())
}

/// Writes the trajectory as csv with a header row `arg,value`.
pub fn save_trajectory_to_csv(
    filename: &str,
    trajectory: &Trajectory,
    arg: &str,
    value: &str,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([arg, value])?;
    for (x, y) in trajectory.iter() {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(0.0, 1.0, 2);
        trajectory.push(0.5, 1.5);
        trajectory.push(1.0, 2.25);
        trajectory
    }

    #[test]
    fn test_save_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("res.csv");
        save_trajectory_to_csv(path.to_str().unwrap(), &sample(), "x", "y").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x,y\n0,1\n0.5,1.5\n1,2.25\n");
    }

    #[test]
    fn test_save_tab_separated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("res.txt");
        save_trajectory_to_file(path.to_str().unwrap(), &sample(), "t", "u").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["t\tu", "0\t1", "0.5\t1.5", "1\t2.25"]);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("res.csv");
        assert!(save_trajectory_to_csv(path.to_str().unwrap(), &sample(), "x", "y").is_err());
    }
}
