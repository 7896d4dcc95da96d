//! Task file for the command line calculator.
//!
//! ```toml
//! [equation]
//! text = "y' = 2*x + y"
//! method = "linear"        # optional: rk4 | linear | homogeneous | bernoulli | riccati
//! [parameters]
//! x0 = 0.0
//! y0 = 1.0
//! x_end = 1.0
//! h = 0.001                # optional, 0.01 by default
//! [output]                 # optional
//! loglevel = "info"
//! log_file = false
//! save_csv = "solution.csv"
//! ```
use crate::numerical::ODE_calculator_api::{DEFAULT_STEP, ScalarODE, Strategy};
use crate::numerical::ODE_error::ODEError;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use toml::{Table, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    pub equation: String,
    pub strategy: Strategy,
    pub x0: f64,
    pub y0: f64,
    pub x_end: f64,
    pub h: f64,
    pub loglevel: Option<String>,
    pub log_file: bool,
    pub save_csv: Option<String>,
}

fn invalid(msg: String) -> ODEError {
    ODEError::InvalidInput(msg)
}

fn section<'a>(doc: &'a Table, name: &str) -> Result<&'a Table, ODEError> {
    doc.get(name)
        .and_then(Value::as_table)
        .ok_or_else(|| invalid(format!("section [{}] not found in the task file", name)))
}

/// floats and integers are both accepted
fn number(table: &Table, section: &str, key: &str) -> Result<Option<f64>, ODEError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(f)) => Ok(Some(*f)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(other) => Err(invalid(format!(
            "[{}] {} must be a number, got {}",
            section, key, other
        ))),
    }
}

fn required_number(table: &Table, section: &str, key: &str) -> Result<f64, ODEError> {
    number(table, section, key)?
        .ok_or_else(|| invalid(format!("[{}] {} is required", section, key)))
}

fn string(table: &Table, section: &str, key: &str) -> Result<Option<String>, ODEError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(format!(
            "[{}] {} must be a string, got {}",
            section, key, other
        ))),
    }
}

impl FromStr for TaskConfig {
    type Err = ODEError;

    fn from_str(content: &str) -> Result<TaskConfig, ODEError> {
        let doc: Table = content
            .parse()
            .map_err(|e: toml::de::Error| invalid(format!("task file is not valid TOML: {}", e)))?;

        let equation_section = section(&doc, "equation")?;
        let equation = string(equation_section, "equation", "text")?
            .ok_or_else(|| invalid("[equation] text is required".to_string()))?;
        let strategy = match string(equation_section, "equation", "method")? {
            // the linear method is the calculator's default choice
            None => Strategy::Linear,
            Some(name) => Strategy::from_str(name.trim())
                .map_err(|_| invalid(format!("unknown method '{}'", name)))?,
        };

        let parameters = section(&doc, "parameters")?;
        let x0 = required_number(parameters, "parameters", "x0")?;
        let y0 = required_number(parameters, "parameters", "y0")?;
        let x_end = required_number(parameters, "parameters", "x_end")?;
        let h = number(parameters, "parameters", "h")?.unwrap_or(DEFAULT_STEP);

        let (loglevel, log_file, save_csv) = match doc.get("output") {
            None => (None, false, None),
            Some(Value::Table(output)) => {
                let log_file = match output.get("log_file") {
                    None => false,
                    Some(Value::Boolean(b)) => *b,
                    Some(other) => {
                        return Err(invalid(format!(
                            "[output] log_file must be true or false, got {}",
                            other
                        )));
                    }
                };
                (
                    string(output, "output", "loglevel")?,
                    log_file,
                    string(output, "output", "save_csv")?,
                )
            }
            Some(_) => return Err(invalid("[output] must be a section".to_string())),
        };

        Ok(TaskConfig {
            equation,
            strategy,
            x0,
            y0,
            x_end,
            h,
            loglevel,
            log_file,
            save_csv,
        })
    }
}

impl TaskConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<TaskConfig, ODEError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| invalid(format!("cannot read {}: {}", path.display(), e)))?;
        TaskConfig::from_str(&content)
    }

    /// Solver instance configured from the task.
    pub fn to_solver(&self) -> Result<ScalarODE, ODEError> {
        let mut solver = ScalarODE::new(
            &self.equation,
            self.strategy,
            self.x0,
            self.y0,
            self.x_end,
            self.h,
        );
        solver.set_solver_params(
            self.loglevel.clone(),
            Some(self.log_file),
            self.save_csv.clone(),
        )?;
        Ok(solver)
    }
}
