//! # Symbolic Engine Module
//!
//! Core expression tree of the calculator. The right-hand side of y' = f(x,y) typed by the user
//! is parsed into an [`Expr`], differentiated symbolically with respect to y, queried for powers
//! of the dependent variable and finally compiled into a numeric closure.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbolic variables like "x", "y", "v"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, etc. - mathematical functions
//!
//! ### Key Methods
//! - `parse_expression(input)` - string to symbolic expression (see `parse_expr`)
//! - `diff(var)` - analytical differentiation (see `symbolic_engine_derivatives`)
//! - `simplify_()` - algebraic simplification (see `symbolic_simplify`)
//! - `compile(vars)` - conversion to an evaluable tree (see `symbolic_lambdify`)
//! - `contains_variable()`, `all_arguments_are_variables()` - tree queries
//! - `power_exponents(var)` - constant exponents applied directly to a variable
//!
//! Trigonometric functions keep the mathematical notation (tg, ctg, arctg, arcctg).

#![allow(non_camel_case_types)]

use std::f64::consts::PI;
use std::fmt;

/// Symbolic expression as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// tangent
    tg(Box<Expr>),
    /// cotangent
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// arctangent
    arctg(Box<Expr>),
    /// arccotangent
    arcctg(Box<Expr>),
}

/// Pretty printing with explicit parentheses around every binary operation.
///
/// The output is valid input for `Expr::parse_expression`, so an expression can travel
/// through a textual substitution and be parsed back.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => {
                if *val < 0.0 {
                    write!(f, "({})", val)
                } else {
                    write!(f, "{}", val)
                }
            }
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Expr::Const(-1.0).boxed(), self.boxed())
    }
}

impl Expr {
    /// Direct children of the node, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr) => vec![expr.as_ref()],
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            _ => self
                .children()
                .iter()
                .any(|child| child.contains_variable(var_name)),
        }
    }

    /// Names of all variables met in the expression, sorted and without repetitions.
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        fn collect(expr: &Expr, acc: &mut Vec<String>) {
            if let Expr::Var(name) = expr {
                acc.push(name.clone());
            }
            for child in expr.children() {
                collect(child, acc);
            }
        }
        let mut vars = Vec::new();
        collect(self, &mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    /// Constant exponents of every `var ^ c` node in the tree, in traversal order.
    ///
    /// Only powers whose base is exactly the variable and whose exponent is a numerical
    /// constant are reported: `y^2` gives `[2.0]`, `(2*y)^2` and `y^x` give nothing.
    pub fn power_exponents(&self, var: &str) -> Vec<f64> {
        let mut exponents = Vec::new();
        self.collect_power_exponents(var, &mut exponents);
        exponents
    }

    fn collect_power_exponents(&self, var: &str, acc: &mut Vec<f64>) {
        if let Expr::Pow(base, exp) = self {
            if let (Expr::Var(name), Expr::Const(n)) = (base.as_ref(), exp.as_ref()) {
                if name == var {
                    acc.push(*n);
                }
            }
        }
        for child in self.children() {
            child.collect_power_exponents(var, acc);
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if the expression is the constant zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if the expression is the constant one.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    /// Direct numerical evaluation with named arguments, no closure creation.
    ///
    /// Variables missing from `vars` evaluate to NaN.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> f64 {
        match self {
            Expr::Var(name) => vars
                .iter()
                .position(|v| *v == name.as_str())
                .and_then(|i| values.get(i).copied())
                .unwrap_or(f64::NAN),
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval_expression(vars, values) + rhs.eval_expression(vars, values),
            Expr::Sub(lhs, rhs) => lhs.eval_expression(vars, values) - rhs.eval_expression(vars, values),
            Expr::Mul(lhs, rhs) => lhs.eval_expression(vars, values) * rhs.eval_expression(vars, values),
            Expr::Div(lhs, rhs) => lhs.eval_expression(vars, values) / rhs.eval_expression(vars, values),
            Expr::Pow(base, exp) => base
                .eval_expression(vars, values)
                .powf(exp.eval_expression(vars, values)),
            Expr::Exp(expr) => expr.eval_expression(vars, values).exp(),
            Expr::Ln(expr) => expr.eval_expression(vars, values).ln(),
            Expr::sin(expr) => expr.eval_expression(vars, values).sin(),
            Expr::cos(expr) => expr.eval_expression(vars, values).cos(),
            Expr::tg(expr) => expr.eval_expression(vars, values).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval_expression(vars, values).tan(),
            Expr::arcsin(expr) => expr.eval_expression(vars, values).asin(),
            Expr::arccos(expr) => expr.eval_expression(vars, values).acos(),
            Expr::arctg(expr) => expr.eval_expression(vars, values).atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.eval_expression(vars, values).atan(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_variable_queries() {
        // v*x/x + (v*x/x)^2
        let vx = var("v") * var("x");
        let f = vx.clone() / var("x") + (vx / var("x")).pow(Expr::Const(2.0));
        assert!(!f.contains_variable("y"));
        assert!(f.contains_variable("v"));
        assert_eq!(f.all_arguments_are_variables(), vec!["v".to_string(), "x".to_string()]);
        assert_eq!(f.eval_expression(&["v", "x"], &[2.0, 1.0]), 6.0);
    }

    #[test]
    fn test_power_exponents_only_direct_powers() {
        let f = var("y").pow(Expr::Const(3.0))
            + (Expr::Const(2.0) * var("y")).pow(Expr::Const(2.0))
            + var("y").pow(var("x"));
        assert_eq!(f.power_exponents("y"), vec![3.0]);
        assert!(f.power_exponents("x").is_empty());
    }

    #[test]
    fn test_display_of_negative_constant() {
        let f = var("x") * Expr::Const(-2.0);
        assert_eq!(f.to_string(), "(x * (-2))");
        assert!(f.eval_expression(&["y"], &[1.0]).is_nan());
    }
}
