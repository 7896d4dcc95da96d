use crate::numerical::ODE_calculator_api::{ScalarODE, Strategy, solve};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_traits::{ExpressionEvaluator, NativeEvaluator};

/// equation, method and (x0, y0, x_end, h) of every built-in example
pub const ODE_EXAMPLES: [(&str, Strategy, [f64; 4]); 6] = [
    ("y' = 2*x + y", Strategy::Linear, [0.0, 1.0, 1.0, 0.001]),
    ("dy/dx = (x + y)/x", Strategy::Homogeneous, [1.0, 0.0, 2.0, 0.01]),
    ("y' = y - y^2", Strategy::Bernoulli, [0.0, 0.5, 2.0, 0.001]),
    ("y' = y^2 + x", Strategy::RiccatiGated, [0.0, 0.0, 1.0, 0.01]),
    ("y' = x*y*y", Strategy::Linear, [0.0, 1.0, 1.0, 0.01]),
    ("y' = sin(x)*y - exp(x)", Strategy::Generic, [0.0, 1.0, 3.0, 0.01]),
];

pub fn ode_examples(example: usize) {
    match example {
        0..=5 => {
            let (equation, strategy, [x0, y0, x_end, h]) = ODE_EXAMPLES[example];
            match solve(equation, strategy, x0, y0, x_end, h) {
                Ok(solution) => {
                    println!("{}\n", solution.summary());
                    let (xs, ys) = solution.trajectory.to_dvectors();
                    println!("{} points, max y = {}", xs.len(), ys.max());
                }
                Err(e) => println!("{}: {}", equation, e),
            }
        }
        6 => {
            // the same linear example through the solver struct: logger, statistics, csv
            let mut ode = ScalarODE::new("y' = 2*x + y", Strategy::Linear, 0.0, 1.0, 1.0, 0.001);
            if let Err(e) = ode.set_solver_params(Some("info".to_string()), None, None) {
                println!("{}", e);
                return;
            }
            match ode.solve() {
                Ok(()) => {
                    if let Some(solution) = ode.get_result() {
                        println!("{}", solution.summary());
                    }
                    if let Err(e) = ode.save_result() {
                        println!("result not saved: {}", e);
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        7 => {
            // what the classifier sees: ∂f/∂y and the powers of y
            let ev = NativeEvaluator;
            for text in ["2*x + y", "x*y*y", "y/x + x*y^3", "y^2 + x"] {
                match ev.parse(text) {
                    Ok(ast) => {
                        let dfdy: Expr = ev.derivative(&ast, "y");
                        println!(
                            "f = {}, arguments {:?}: df/dy = {}, powers of y: {:?}",
                            ast,
                            ast.all_arguments_are_variables(),
                            dfdy,
                            ev.power_exponents(&ast, "y")
                        );
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
        _ => {
            println!("example not found");
        }
    }
}
