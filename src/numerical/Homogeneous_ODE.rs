//! Homogeneous equation y' = F(y/x) solved with the substitution y = v*x.
//!
//! The right-hand side is rewritten textually (y -> (v*x)), which for a homogeneous f
//! leaves a function of v only, and dv/dx = (F(v) - v)/x is integrated with RK4.
//! x = 0 is replaced by a small epsilon wherever it appears as a divisor.
use crate::numerical::ODE_classifier::check_homogeneous;
use crate::numerical::ODE_error::{ODEError, check_finite};
use crate::numerical::RK4::rk4_step;
use crate::numerical::step_planner::StepPlanner;
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::symbolic_traits::ExpressionEvaluator;
use log::{debug, info};

/// replacement of x = 0 in 1/x
pub const EPS: f64 = 1e-8;

fn nonzero(x: f64) -> f64 {
    if x == 0.0 { EPS } else { x }
}

/// Solves y' = f(x,y) assuming f(x, v*x) does not depend on x.
///
/// `rhs_text` is the preprocessed right-hand side, `rhs` its parsed tree.
pub fn solve_homogeneous<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs_text: &str,
    rhs: &E::Ast,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
) -> Result<Trajectory, ODEError> {
    let f = evaluator.compile(rhs, &["x", "y"])?;
    check_homogeneous(&*f)?;

    let substituted = evaluator.substitute(rhs_text, "y", "v*x")?;
    debug!("f(x, v*x) = {}", substituted);
    let reduced = evaluator.parse(&substituted).map_err(|e| {
        ODEError::ClassificationError(format!(
            "substitution y = v*x produced an unparsable expression '{}': {}",
            substituted, e
        ))
    })?;
    info!("homogeneous equation, reduced right-hand side: {}", reduced);
    let f_reduced = evaluator.compile(&reduced, &["x", "v"])?;
    let dv_dx = |x: f64, v: f64| {
        let x = nonzero(x);
        (f_reduced(&[x, v]) - v) / x
    };

    let v0 = check_finite(x0, y0 / nonzero(x0), "v0 = y0/x0")?;
    let planner = StepPlanner::new(x0, x_end, h);
    let mut trajectory = Trajectory::with_capacity(x0, y0, planner.n_steps());
    let mut v = v0;
    for step in planner {
        v = check_finite(step.x_next, rk4_step(&dv_dx, step.x, v, step.h), "v = y/x")?;
        let y = check_finite(step.x_next, v * step.x_next, "y = v*x")?;
        trajectory.push(step.x_next, y);
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_traits::NativeEvaluator;
    use approx::assert_relative_eq;

    fn homogeneous(text: &str, x0: f64, y0: f64, x_end: f64, h: f64) -> Result<Trajectory, ODEError> {
        let ev = NativeEvaluator;
        let ast = ev.parse(text).unwrap();
        solve_homogeneous(&ev, text, &ast, x0, y0, x_end, h)
    }

    #[test]
    fn test_homogeneous_x_ln_x() {
        // y' = (x + y)/x, y(1) = 0 -> y = x ln x
        let res = homogeneous("(x + y)/x", 1.0, 0.0, 2.0, 0.01).unwrap();
        for (x, y) in res.iter() {
            assert_relative_eq!(y, x * x.ln(), epsilon = 1e-8);
        }
        assert_eq!(res.last().unwrap().0, 2.0);
    }

    #[test]
    fn test_homogeneous_ratio_form() {
        // y' = y/x + (y/x)^2, y(1) = 1 -> v = 1/(1 - ln x), y = x/(1 - ln x)
        let res = homogeneous("y/x + (y/x)^2", 1.0, 1.0, 1.5, 0.001).unwrap();
        let (x_last, y_last) = res.last().unwrap();
        assert_relative_eq!(y_last, x_last / (1.0 - x_last.ln()), epsilon = 1e-6);
    }

    #[test]
    fn test_first_sample_is_initial_condition() {
        let res = homogeneous("y/x", 2.0, 3.0, 3.0, 0.1).unwrap();
        assert_eq!(res.xs[0], 2.0);
        assert_eq!(res.ys[0], 3.0);
        // y' = y/x keeps v constant
        assert_relative_eq!(res.last().unwrap().1, 4.5, epsilon = 1e-10);
    }

    #[test]
    fn test_start_at_origin() {
        // v0 = y0/EPS
        let res = homogeneous("y/x", 0.0, 0.0, 1.0, 0.1).unwrap();
        assert_eq!(res.len(), 11);
        assert!(res.ys.iter().all(|y| *y == 0.0));
        let res = homogeneous("(x + y)/x", 0.0, 0.0, 1.0, 0.1).unwrap();
        assert!(res.ys.iter().all(|y| y.is_finite()));
        assert!(res.ys.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_backward_steps_through_origin() {
        // x = 1, 0.5, 0, -0.5, -1: the step landing on x = 0 samples dv/dx there
        let res = homogeneous("y/x", 1.0, 2.0, -1.0, -0.5).unwrap();
        assert_eq!(res.xs, vec![1.0, 0.5, 0.0, -0.5, -1.0]);
        for (x, y) in res.iter() {
            assert_relative_eq!(y, 2.0 * x, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_non_homogeneous_rejected() {
        assert!(matches!(
            homogeneous("x + y^2", 1.0, 1.0, 2.0, 0.1),
            Err(ODEError::ClassificationError(_))
        ));
    }

    #[test]
    fn test_identifiers_containing_y_are_kept() {
        // only the whole identifier y is substituted
        let ev = NativeEvaluator;
        let s = ev.substitute("y/x + ya", "y", "v*x").unwrap();
        assert_eq!(s, "(v*x)/x + ya");
    }
}
