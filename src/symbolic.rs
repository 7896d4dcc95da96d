#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedODEcalc::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3*ln(x + y + y^2.6)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(&[1.0, 2.0]));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree of the right-hand side
/// 2) differentiates it (symbolic_engine_derivatives) and simplifies the result (symbolic_simplify)
/// 3) turns it into a Rust closure (symbolic_lambdify)
///# Example
/// ```
/// use RustedODEcalc::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x*y + y^2").unwrap();
/// // ∂f/∂y still depends on y: the equation is not linear
/// let df_dy = f.diff_simplified("y");
/// assert!(df_dy.contains_variable("y"));
/// assert_eq!(f.power_exponents("y"), vec![2.0]);
/// let value = f.eval_expression(&["x", "y"], &[1.0, 2.0]);
/// assert_eq!(value, 6.0);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
pub mod symbolic_lambdify;
pub mod symbolic_simplify;
/// capability interface used by the solvers and its implementation for the native engine
pub mod symbolic_traits;
///______________________________________________________________________________________________________________________________________________
/// text preprocessing: right-hand side extraction and whole-word substitution
/// _____________________________________________________________________________________________________________________________________________
pub mod equation_text;
