//! Bernoulli equation y' = a(x)*y + b(x)*y^n, n != 1.
//!
//! With z = y^(1-n) the equation becomes linear, z' = (1-n)*(a*z + b), and is solved by the
//! same integrating-factor quadrature as the linear case. a(x) is ∂f/∂y at y = 0 and
//! b(x) = f(x, 1) - a(x).
//!
//! For an even integer 1-n the map y -> z forgets the sign of y, so the branch of y0 is
//! restored when going back. For an odd integer 1-n the real root of z keeps its sign.
use crate::numerical::Linear_ODE::integrating_factor_quadrature;
use crate::numerical::ODE_classifier::bernoulli_exponent;
use crate::numerical::ODE_error::{ODEError, check_finite};
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::symbolic_traits::ExpressionEvaluator;
use log::info;

/// y = z^(1/m) with m = 1-n, on the branch of `sign` = sign(y0)
fn back_substitute(z: f64, m: f64, sign: f64) -> f64 {
    let integer = m.fract() == 0.0;
    if integer && m.rem_euclid(2.0) == 1.0 {
        z.signum() * z.abs().powf(1.0 / m)
    } else if integer {
        // negative z has no real even root, NaN is reported as a fault
        sign * z.powf(1.0 / m)
    } else {
        z.powf(1.0 / m)
    }
}

pub fn solve_bernoulli<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
) -> Result<Trajectory, ODEError> {
    let n = bernoulli_exponent(evaluator, rhs, "y")?;
    info!("Bernoulli equation with n = {}", n);
    let dfdy = evaluator.compile(&evaluator.derivative(rhs, "y"), &["x", "y"])?;
    let f = evaluator.compile(rhs, &["x", "y"])?;
    let a = |x: f64| dfdy(&[x, 0.0]);
    let b = |x: f64| f(&[x, 1.0]) - a(x);
    let alpha = |x: f64| (1.0 - n) * a(x);
    let beta = |x: f64| (1.0 - n) * b(x);

    let z0 = check_finite(x0, y0.powf(1.0 - n), "z0 = y0^(1-n)")?;
    let z = integrating_factor_quadrature(alpha, beta, x0, z0, x_end, h)?;

    let sign = if y0 < 0.0 { -1.0 } else { 1.0 };
    let ys = z
        .iter()
        .map(|(x, z)| check_finite(x, back_substitute(z, 1.0 - n, sign), "y = z^(1/(1-n))"))
        .collect::<Result<Vec<f64>, ODEError>>()?;
    Ok(Trajectory { xs: z.xs, ys })
}
