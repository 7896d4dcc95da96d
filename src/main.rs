#![allow(non_snake_case)]
use RustedODEcalc::Examples::ode_examples::ode_examples;
use RustedODEcalc::Utils::task_config::TaskConfig;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    // with a task file: solve it, otherwise run the built-in examples
    let Some(path) = env::args().nth(1) else {
        for example in 0..8 {
            ode_examples(example);
        }
        return ExitCode::SUCCESS;
    };
    let mut solver = match TaskConfig::from_file(&path).and_then(|task| task.to_solver()) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = solver.solve() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    if let Some(solution) = solver.get_result() {
        println!("{}", solution.summary());
    }
    if solver.save_path.is_some() {
        if let Err(e) = solver.save_result() {
            eprintln!("result not saved: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
