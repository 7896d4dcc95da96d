//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of [`Expr`] trees. The classifier differentiates the right-hand
//! side with respect to the dependent variable to obtain the coefficient a(x) = ∂f/∂y of the
//! linear and Bernoulli forms, and to decide whether that coefficient still depends on y.
//!
//! Implements the usual calculus rules:
//! - Power rule, including variable exponents: d(u^w) = u^w * (w' * ln(u) + w * u'/u)
//! - Product rule: d/dx(f*g) = f'*g + f*g'
//! - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
//! - Chain rule for every elementary function

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// The raw result is not simplified; use [`Expr::diff_simplified`] when the shape of the
    /// derivative matters (for example to check whether a variable survived differentiation).
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// let df_dx = f.diff("x"); // 2*x^(2-1)*1
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * *rhs.clone() + *lhs.clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                (lhs.diff(var) * *rhs.clone() - rhs.diff(var) * *lhs.clone())
                    / (*rhs.clone() * *rhs.clone())
            }
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    // n * u^(n-1) * u'
                    *exp.clone()
                        * base.as_ref().clone().pow(*exp.clone() - Expr::Const(1.0))
                        * base.diff(var)
                } else if !base.contains_variable(var) {
                    // a^w * ln(a) * w'
                    self.clone() * base.as_ref().clone().ln() * exp.diff(var)
                } else {
                    self.clone()
                        * (exp.diff(var) * base.as_ref().clone().ln()
                            + *exp.clone() * base.diff(var) / *base.clone())
                }
            }
            Expr::Exp(expr) => self.clone() * expr.diff(var),
            Expr::Ln(expr) => expr.diff(var) / *expr.clone(),
            Expr::sin(expr) => Expr::cos(expr.clone()) * expr.diff(var),
            Expr::cos(expr) => Expr::Const(-1.0) * Expr::sin(expr.clone()) * expr.diff(var),
            Expr::tg(expr) => {
                expr.diff(var) / Expr::cos(expr.clone()).pow(Expr::Const(2.0))
            }
            Expr::ctg(expr) => {
                Expr::Const(-1.0) * expr.diff(var) / Expr::sin(expr.clone()).pow(Expr::Const(2.0))
            }
            Expr::arcsin(expr) => {
                expr.diff(var)
                    / (Expr::Const(1.0) - expr.as_ref().clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5))
            }
            Expr::arccos(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / (Expr::Const(1.0) - expr.as_ref().clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5))
            }
            Expr::arctg(expr) => {
                expr.diff(var) / (Expr::Const(1.0) + expr.as_ref().clone().pow(Expr::Const(2.0)))
            }
            Expr::arcctg(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / (Expr::Const(1.0) + expr.as_ref().clone().pow(Expr::Const(2.0)))
            }
        }
    }

    /// Derivative followed by `simplify_()`, so that terms multiplied by the derivative of a
    /// foreign variable disappear: d/dy (x*y) gives `x`, not `0*y + x*1`.
    pub fn diff_simplified(&self, var: &str) -> Expr {
        self.diff(var).simplify_()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(s: &str) -> Expr {
        Expr::parse_expression(s).unwrap()
    }

    #[test]
    fn test_diff_polynomial() {
        let f = parse("x^3 + 2*x");
        let df = f.diff_simplified("x");
        // 3x^2 + 2 at x = 2
        assert_relative_eq!(df.eval_expression(&["x"], &[2.0]), 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_with_respect_to_other_variable_vanishes() {
        let f = parse("sin(x)*exp(x) + x^2");
        assert_eq!(f.diff_simplified("y"), Expr::Const(0.0));
    }

    #[test]
    fn test_linear_coefficient_is_free_of_y() {
        let f = parse("2*x + y");
        assert_eq!(f.diff_simplified("y"), Expr::Const(1.0));
        let g = parse("x*y - cos(x)");
        let dg = g.diff_simplified("y");
        assert!(!dg.contains_variable("y"));
        assert_eq!(dg, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_nonlinear_coefficient_keeps_y() {
        let f = parse("x*y*y");
        assert!(f.diff_simplified("y").contains_variable("y"));
        let g = parse("y - y^2");
        assert!(g.diff_simplified("y").contains_variable("y"));
    }

    #[test]
    fn test_diff_quotient_and_chain_rule() {
        let f = parse("ln(x^2 + 1)/x");
        let df = f.diff_simplified("x");
        // d/dx = (2x/(x^2+1) * x - ln(x^2+1)) / x^2
        let x: f64 = 1.5;
        let expected = (2.0 * x / (x * x + 1.0) * x - (x * x + 1.0).ln()) / (x * x);
        assert_relative_eq!(df.eval_expression(&["x"], &[x]), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_variable_exponent() {
        let f = parse("2^y");
        let df = f.diff_simplified("y");
        let y: f64 = 0.7;
        assert_relative_eq!(
            df.eval_expression(&["y"], &[y]),
            2f64.powf(y) * 2f64.ln(),
            epsilon = 1e-12
        );
    }
}
