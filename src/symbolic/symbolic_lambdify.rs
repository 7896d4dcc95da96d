//! Turns a symbolic expression into an evaluable tree.
//!
//! Variables are resolved to argument positions once, at compile time, so evaluation inside the
//! integration loops is a plain recursive walk without string comparisons.
use crate::numerical::ODE_error::ODEError;
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

/// Compiled form of [`Expr`]: variables are indices into the argument slice.
#[derive(Clone, Debug)]
pub enum Lambda {
    Var(usize),
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
}

impl Expr {
    /// Compiles the expression for the ordered argument list `vars`.
    ///
    /// A variable that is not in `vars` is a user error (for example `z` in an equation in x
    /// and y), reported as `ODEError::ParseError`.
    pub fn compile(&self, vars: &[&str]) -> Result<Lambda, ODEError> {
        let unary = |e: &Expr, wrap: fn(Box<Lambda>) -> Lambda| -> Result<Lambda, ODEError> {
            Ok(wrap(Box::new(e.compile(vars)?)))
        };
        let res = match self {
            Expr::Var(name) => {
                let idx = vars.iter().position(|v| *v == name.as_str()).ok_or_else(|| {
                    ODEError::ParseError(format!(
                        "unknown symbol '{}', expected one of {:?}",
                        name, vars
                    ))
                })?;
                Lambda::Var(idx)
            }
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => Lambda::Add(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Sub(a, b) => Lambda::Sub(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Mul(a, b) => Lambda::Mul(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Div(a, b) => Lambda::Div(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Pow(a, b) => Lambda::Pow(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Exp(e) => unary(e.as_ref(), Lambda::Exp)?,
            Expr::Ln(e) => unary(e.as_ref(), Lambda::Ln)?,
            Expr::sin(e) => unary(e.as_ref(), Lambda::Sin)?,
            Expr::cos(e) => unary(e.as_ref(), Lambda::Cos)?,
            Expr::tg(e) => unary(e.as_ref(), Lambda::Tg)?,
            Expr::ctg(e) => unary(e.as_ref(), Lambda::Ctg)?,
            Expr::arcsin(e) => unary(e.as_ref(), Lambda::ArcSin)?,
            Expr::arccos(e) => unary(e.as_ref(), Lambda::ArcCos)?,
            Expr::arctg(e) => unary(e.as_ref(), Lambda::ArcTg)?,
            Expr::arcctg(e) => unary(e.as_ref(), Lambda::ArcCtg)?,
        };
        Ok(res)
    }

    /// Closure of (argument values) -> f64, arguments ordered as in `vars`.
    pub fn lambdify(&self, vars: &[&str]) -> Result<Box<dyn Fn(&[f64]) -> f64>, ODEError> {
        let compiled = self.compile(vars)?;
        Ok(Box::new(compiled.as_closure()))
    }
}

impl Lambda {
    #[inline(always)]
    pub fn eval(&self, args: &[f64]) -> f64 {
        match self {
            Lambda::Var(i) => args[*i],
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(args) + b.eval(args),
            Lambda::Sub(a, b) => a.eval(args) - b.eval(args),
            Lambda::Mul(a, b) => a.eval(args) * b.eval(args),
            Lambda::Div(a, b) => a.eval(args) / b.eval(args),
            Lambda::Pow(a, b) => a.eval(args).powf(b.eval(args)),
            Lambda::Exp(e) => e.eval(args).exp(),
            Lambda::Ln(e) => e.eval(args).ln(),
            Lambda::Sin(e) => e.eval(args).sin(),
            Lambda::Cos(e) => e.eval(args).cos(),
            Lambda::Tg(e) => e.eval(args).tan(),
            Lambda::Ctg(e) => 1.0 / e.eval(args).tan(),
            Lambda::ArcSin(e) => e.eval(args).asin(),
            Lambda::ArcCos(e) => e.eval(args).acos(),
            Lambda::ArcTg(e) => e.eval(args).atan(),
            Lambda::ArcCtg(e) => (PI / 2.0) - e.eval(args).atan(),
        }
    }

    pub fn as_closure(self) -> impl Fn(&[f64]) -> f64 {
        move |args| self.eval(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambdify_two_arguments() {
        let expr = Expr::parse_expression("2*x + y").unwrap();
        let f = expr.lambdify(&["x", "y"]).unwrap();
        assert_relative_eq!(f(&[1.0, 3.0]), 5.0);
        // order of arguments follows the slice, not the expression
        let g = expr.lambdify(&["y", "x"]).unwrap();
        assert_relative_eq!(g(&[1.0, 3.0]), 7.0);
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let expr = Expr::parse_expression("x + z").unwrap();
        assert!(matches!(expr.compile(&["x", "y"]), Err(ODEError::ParseError(_))));
    }

    #[test]
    fn test_domain_fault_gives_non_finite() {
        let expr = Expr::parse_expression("1/x").unwrap();
        let f = expr.lambdify(&["x", "y"]).unwrap();
        assert!(!f(&[0.0, 1.0]).is_finite());
    }

    #[test]
    fn test_compiled_matches_direct_evaluation() {
        let expr = Expr::parse_expression("sin(x)*y^2 - arctg(x/y) + ctg(y)").unwrap();
        let f = expr.lambdify(&["x", "y"]).unwrap();
        let direct = expr.eval_expression(&["x", "y"], &[0.3, 1.7]);
        assert_relative_eq!(f(&[0.3, 1.7]), direct, epsilon = 1e-14);
    }
}
