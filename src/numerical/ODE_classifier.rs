//! Structural gates deciding whether a specialized method applies to y' = f(x,y).
//!
//! The tests are advisory, not proofs: a false negative sends the equation to the RK4
//! fallback, a false positive at worst gives a numerically poor trajectory.
use crate::numerical::ODE_error::ODEError;
use crate::symbolic::symbolic_traits::ExpressionEvaluator;
use log::debug;

/// sample abscissas of the homogeneity test
const HOMOGENEOUS_X: [f64; 2] = [1.234, 2.345];
/// ratios v = y/x sampled by the homogeneity test
const HOMOGENEOUS_RATIOS: [f64; 3] = [2.5, 0.5, 1.75];
const HOMOGENEOUS_TOL: f64 = 1e-8;

/// Linear test: returns a(x) = ∂f/∂y, rejected if the derivative still references y.
pub fn check_linear<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    value: &str,
) -> Result<E::Ast, ODEError> {
    let coefficient = evaluator.derivative(rhs, value);
    debug!("∂f/∂{} = {}", value, coefficient);
    if evaluator.references(&coefficient, value) {
        return Err(ODEError::ClassificationError(format!(
            "equation does not look linear: coefficient ∂f/∂{} = {} depends on {}",
            value, coefficient, value
        )));
    }
    Ok(coefficient)
}

/// Homogeneity test: f(x1, v*x1) must equal f(x2, v*x2) for every sampled ratio v.
///
/// `f` takes the argument slice `[x, y]`.
pub fn check_homogeneous(f: &dyn Fn(&[f64]) -> f64) -> Result<(), ODEError> {
    for v in HOMOGENEOUS_RATIOS {
        let [x1, x2] = HOMOGENEOUS_X;
        let val1 = f(&[x1, v * x1]);
        let val2 = f(&[x2, v * x2]);
        debug!("homogeneity sample v = {}: {} vs {}", v, val1, val2);
        if !val1.is_finite() || !val2.is_finite() {
            return Err(ODEError::ClassificationError(format!(
                "cannot test homogeneity, f is not finite along y = {}*x",
                v
            )));
        }
        if (val1 - val2).abs() > HOMOGENEOUS_TOL {
            return Err(ODEError::ClassificationError(
                "equation does not look homogeneous (not reducible by y = v*x)".to_string(),
            ));
        }
    }
    Ok(())
}

/// Bernoulli test: exponent n != 1 of the single `y^n` term family.
pub fn bernoulli_exponent<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    value: &str,
) -> Result<f64, ODEError> {
    let mut exponents: Vec<f64> = evaluator
        .power_exponents(rhs, value)
        .into_iter()
        .filter(|n| *n != 1.0)
        .collect();
    exponents.sort_by(f64::total_cmp);
    exponents.dedup();
    match exponents.as_slice() {
        [] => Err(ODEError::ClassificationError(format!(
            "no {}^n term with n != 1 found for a Bernoulli equation",
            value
        ))),
        [n] => Ok(*n),
        _ => Err(ODEError::ClassificationError(format!(
            "several different powers of {} found: {:?}, not a Bernoulli equation",
            value, exponents
        ))),
    }
}

/// Riccati gate: some `y^k` with k >= 2 must be present. Returns the largest k.
pub fn riccati_gate<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    value: &str,
) -> Result<f64, ODEError> {
    let max_pow = evaluator
        .power_exponents(rhs, value)
        .into_iter()
        .fold(0.0_f64, f64::max);
    if max_pow >= 2.0 {
        Ok(max_pow)
    } else {
        Err(ODEError::RiccatiGateError(format!(
            "no {}^2 term found in {}",
            value, rhs
        )))
    }
}
