// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// Capability interface between the ODE solvers and whatever engine parses, differentiates
// and evaluates the right-hand side. The solvers only talk to this trait.
// The native engine (Expr) implements it below; add other engines here as needed

use crate::numerical::ODE_error::ODEError;
use crate::symbolic::equation_text::substitute_symbol;
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// Compiled expression: argument values in the order given at compile time -> f64.
/// Domain faults (division by zero, ln of a negative number) show up as non-finite results.
pub type Evaluable = Box<dyn Fn(&[f64]) -> f64>;

pub trait ExpressionEvaluator {
    type Ast: Clone + fmt::Display + fmt::Debug;
    /// text -> tree, fails with `ParseError` on malformed syntax
    fn parse(&self, text: &str) -> Result<Self::Ast, ODEError>;
    /// tree -> callable over the ordered variable names
    fn compile(&self, ast: &Self::Ast, vars: &[&str]) -> Result<Evaluable, ODEError>;
    /// symbolic derivative
    fn derivative(&self, ast: &Self::Ast, var: &str) -> Self::Ast;
    /// textual substitution of a symbol
    fn substitute(&self, text: &str, var: &str, replacement: &str) -> Result<String, ODEError>;
    /// does the tree still reference `var`
    fn references(&self, ast: &Self::Ast, var: &str) -> bool;
    /// constant exponents c of every `var ^ c` node
    fn power_exponents(&self, ast: &Self::Ast, var: &str) -> Vec<f64>;
}

///////////////// IMPLEMENTATION OF THE TRAIT FOR THE NATIVE ENGINE /////////////////////////
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEvaluator;

impl ExpressionEvaluator for NativeEvaluator {
    type Ast = Expr;

    fn parse(&self, text: &str) -> Result<Expr, ODEError> {
        Expr::parse_expression(text)
    }

    fn compile(&self, ast: &Expr, vars: &[&str]) -> Result<Evaluable, ODEError> {
        ast.lambdify(vars)
    }

    fn derivative(&self, ast: &Expr, var: &str) -> Expr {
        ast.diff_simplified(var)
    }

    fn substitute(&self, text: &str, var: &str, replacement: &str) -> Result<String, ODEError> {
        substitute_symbol(text, var, replacement)
    }

    fn references(&self, ast: &Expr, var: &str) -> bool {
        ast.contains_variable(var)
    }

    fn power_exponents(&self, ast: &Expr, var: &str) -> Vec<f64> {
        ast.power_exponents(var)
    }
}
