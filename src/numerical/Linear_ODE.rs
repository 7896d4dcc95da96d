//! Linear equation y' = a(x)*y + b(x) solved with an integrating factor.
//!
//! a(x) = ∂f/∂y (free of y for a linear equation, evaluated with y = 0) and b(x) = f(x, 0).
//! The cumulative integral A(x) = ∫a and the integral of μ(s)*b(s), μ = exp(-A), are both
//! accumulated with the trapezoidal rule on the planner's steps, then
//!
//! y(x) = (μ(x0)*y0 + ∫ μ(s) b(s) ds) / μ(x)
//!
//! The result is exact for the trapezoid-approximated integrals, so accuracy is bounded by the
//! step size just like RK4, but without RK4's local slope approximation of the linear structure.
use crate::numerical::ODE_classifier::check_linear;
use crate::numerical::ODE_error::{ODEError, check_finite};
use crate::numerical::step_planner::StepPlanner;
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::symbolic_traits::ExpressionEvaluator;
use log::info;

/// Integrating-factor quadrature for z' = alpha(x)*z + beta(x), z(x0) = z0.
///
/// Shared by the linear solver (z = y) and the Bernoulli solver (z = y^(1-n)).
/// Returns z sampled on the planner's mesh.
pub fn integrating_factor_quadrature<A, B>(
    alpha: A,
    beta: B,
    x0: f64,
    z0: f64,
    x_end: f64,
    h: f64,
) -> Result<Trajectory, ODEError>
where
    A: Fn(f64) -> f64,
    B: Fn(f64) -> f64,
{
    let planner = StepPlanner::new(x0, x_end, h);
    let mut trajectory = Trajectory::with_capacity(x0, z0, planner.n_steps());
    // μ(x0) = exp(-0)
    let mu0 = 1.0;
    let mut cum_alpha = 0.0;
    let mut cum_mu_beta = 0.0;
    let mut prev_alpha = check_finite(x0, alpha(x0), "a(x)")?;
    let mut prev_mu_beta = check_finite(x0, beta(x0), "b(x)")? * mu0;
    for step in planner {
        let alpha_next = check_finite(step.x_next, alpha(step.x_next), "a(x)")?;
        cum_alpha += 0.5 * (prev_alpha + alpha_next) * step.h;
        let mu = (-cum_alpha).exp();
        let beta_next = check_finite(step.x_next, beta(step.x_next), "b(x)")?;
        let mu_beta_next = mu * beta_next;
        cum_mu_beta += 0.5 * (prev_mu_beta + mu_beta_next) * step.h;
        let z = check_finite(
            step.x_next,
            (1.0 / mu) * (mu0 * z0 + cum_mu_beta),
            "integrating-factor solution",
        )?;
        trajectory.push(step.x_next, z);
        prev_alpha = alpha_next;
        prev_mu_beta = mu_beta_next;
    }
    Ok(trajectory)
}

/// Solves y' = f(x,y) as a linear equation. Fails with `ClassificationError` when ∂f/∂y
/// depends on y, and with `NumericalFault` on non-finite coefficients or samples.
pub fn solve_linear<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
) -> Result<Trajectory, ODEError> {
    let a_expr = check_linear(evaluator, rhs, "y")?;
    info!("linear equation: a(x) = {}", a_expr);
    let a_fun = evaluator.compile(&a_expr, &["x", "y"])?;
    let f = evaluator.compile(rhs, &["x", "y"])?;
    let a = |x: f64| a_fun(&[x, 0.0]);
    let b = |x: f64| f(&[x, 0.0]);
    integrating_factor_quadrature(a, b, x0, y0, x_end, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::RK4::solve_rk4;
    use crate::symbolic::symbolic_traits::NativeEvaluator;
    use approx::assert_relative_eq;

    fn linear(text: &str, x0: f64, y0: f64, x_end: f64, h: f64) -> Result<Trajectory, ODEError> {
        let ev = NativeEvaluator;
        let ast = ev.parse(text).unwrap();
        solve_linear(&ev, &ast, x0, y0, x_end, h)
    }

    #[test]
    fn test_linear_matches_analytic_solution() {
        // y' = 2x + y, y(0) = 1 -> y = 3e^x - 2x - 2
        let res = linear("2*x + y", 0.0, 1.0, 1.0, 0.001).unwrap();
        let (x_last, y_last) = res.last().unwrap();
        assert_eq!(x_last, 1.0);
        let exact = 3.0 * 1.0_f64.exp() - 4.0;
        assert_relative_eq!(y_last, exact, epsilon = 1e-5);
        for (x, y) in res.iter() {
            assert_relative_eq!(y, 3.0 * x.exp() - 2.0 * x - 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_linear_agrees_with_rk4() {
        let ev = NativeEvaluator;
        let ast = ev.parse("2*x + y").unwrap();
        let f = ev.compile(&ast, &["x", "y"]).unwrap();
        let rk = solve_rk4(|x, y| f(&[x, y]), 0.0, 1.0, 1.0, 0.001).unwrap();
        let lin = solve_linear(&ev, &ast, 0.0, 1.0, 1.0, 0.001).unwrap();
        assert_eq!(rk.len(), lin.len());
        assert_relative_eq!(
            rk.last().unwrap().1,
            lin.last().unwrap().1,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_variable_coefficient() {
        // y' = -2x*y, y(0) = 1 -> y = exp(-x^2)
        let res = linear("-2*x*y", 0.0, 1.0, 1.5, 0.001).unwrap();
        let (_, y_last) = res.last().unwrap();
        assert_relative_eq!(y_last, (-2.25_f64).exp(), epsilon = 1e-5);
    }

    #[test]
    fn test_backward_linear() {
        // y' = y, y(0) = 1, integrate to -1
        let res = linear("y", 0.0, 1.0, -1.0, 0.001).unwrap();
        let (x_last, y_last) = res.last().unwrap();
        assert_eq!(x_last, -1.0);
        assert_relative_eq!(y_last, (-1.0_f64).exp(), epsilon = 1e-5);
    }

    #[test]
    fn test_nonlinear_rejected() {
        assert!(matches!(
            linear("x*y*y", 0.0, 1.0, 1.0, 0.1),
            Err(ODEError::ClassificationError(_))
        ));
    }

    #[test]
    fn test_singular_coefficient_is_a_numerical_fault() {
        // b(x) = 1/x is infinite at the start point
        assert!(matches!(
            linear("y + 1/x", 0.0, 1.0, 1.0, 0.1),
            Err(ODEError::NumericalFault { .. })
        ));
    }
}
