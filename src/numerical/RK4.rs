//! Classical fixed-step 4th order Runge-Kutta for a scalar equation y' = f(x,y).
//!
//! The universal fallback of the calculator: no structural assumptions on f, no error
//! estimation. Step sizes come from [`StepPlanner`] so the last sample sits on x_end.
use crate::numerical::ODE_error::{ODEError, check_finite};
use crate::numerical::step_planner::StepPlanner;
use crate::numerical::trajectory::Trajectory;
use log::debug;

/// One RK4 update of size `h` from (x, y).
#[inline]
pub fn rk4_step<F>(f: &F, x: f64, y: f64, h: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = f(x, y);
    let k2 = f(x + h / 2.0, y + h * k1 / 2.0);
    let k3 = f(x + h / 2.0, y + h * k2 / 2.0);
    let k4 = f(x + h, y + h * k3);
    y + (h / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}

/// Integrates y' = f(x,y) from (x0, y0) to x_end.
///
/// A non-finite y (for example f divides by zero at some x) stops the integration with
/// `ODEError::NumericalFault`.
pub fn solve_rk4<F>(f: F, x0: f64, y0: f64, x_end: f64, h: f64) -> Result<Trajectory, ODEError>
where
    F: Fn(f64, f64) -> f64,
{
    let planner = StepPlanner::new(x0, x_end, h);
    debug!("RK4: {} steps planned with h = {}", planner.n_steps(), planner.h());
    let mut trajectory = Trajectory::with_capacity(x0, y0, planner.n_steps());
    let mut y = y0;
    for step in planner {
        y = check_finite(step.x_next, rk4_step(&f, step.x, y, step.h), "y")?;
        trajectory.push(step.x_next, y);
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rk4_exponential_decay() {
        // y' = -y, y(0) = 1, y(1) = exp(-1)
        let res = solve_rk4(|_x, y| -y, 0.0, 1.0, 1.0, 0.01).unwrap();
        let (x_last, y_last) = res.last().unwrap();
        assert_eq!(x_last, 1.0);
        assert_relative_eq!(y_last, (-1.0_f64).exp(), epsilon = 1e-9);
        assert_eq!(res.len(), 101);
    }

    #[test]
    fn test_rk4_backward_integration() {
        // y' = y, y(1) = e, integrate back to 0
        let e = 1.0_f64.exp();
        let res = solve_rk4(|_x, y| y, 1.0, e, 0.0, 0.01).unwrap();
        let (x_last, y_last) = res.last().unwrap();
        assert_eq!(x_last, 0.0);
        assert_relative_eq!(y_last, 1.0, epsilon = 1e-8);
        assert!(res.xs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_rk4_is_exact_for_cubic_in_x() {
        // y' = 3x^2 -> y = x^3, RK4 integrates polynomials of degree 3 exactly
        let res = solve_rk4(|x, _y| 3.0 * x * x, 0.0, 0.0, 2.0, 0.5).unwrap();
        for (x, y) in res.iter() {
            assert_relative_eq!(y, x * x * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rk4_reports_singularity() {
        // y' = 1/x hits x = 0 when starting at -1
        let err = solve_rk4(|x, _y| 1.0 / x, -1.0, 0.0, 1.0, 0.5).unwrap_err();
        assert!(matches!(err, ODEError::NumericalFault { .. }));
    }
}
