//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedODEcalc::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2.3 * ln(x + y + y^2)").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
//!
//! Grammar, lowest precedence first:
//!
//!   sum     := product (('+' | '-') product)*
//!   product := unary (('*' | '/') unary)*
//!   unary   := ('-' | '+') unary | power
//!   power   := atom (('^' | '**') unary)?        right associative
//!   atom    := number | name '(' sum ')' | name | '(' sum ')'
//!
//! so `-y^2` is `-(y^2)` and `2^-1` is `2^(-1)`.
use crate::numerical::ODE_error::ODEError;
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0, one_of},
    combinator::{all_consuming, map, opt, recognize},
    error::{Error, ErrorKind},
    multi::{fold_many0, many0},
    number::complete::double,
    sequence::{delimited, pair, preceded},
};
use std::f64::consts::{E, PI};

/// Wraps a parser so that it ignores surrounding whitespace.
fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a name (word characters without spaces)
fn parse_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn function_by_name(name: &str, arg: Expr) -> Option<Expr> {
    let boxed = arg.boxed();
    let res = match name {
        "exp" => Expr::Exp(boxed),
        "ln" | "log" => Expr::Ln(boxed),
        "sqrt" => Expr::Pow(boxed, Expr::Const(0.5).boxed()),
        "sin" => Expr::sin(boxed),
        "cos" => Expr::cos(boxed),
        "tg" | "tan" => Expr::tg(boxed),
        "ctg" | "cot" => Expr::ctg(boxed),
        "arcsin" | "asin" => Expr::arcsin(boxed),
        "arccos" | "acos" => Expr::arccos(boxed),
        "arctg" | "atan" | "arctan" => Expr::arctg(boxed),
        "arcctg" | "acot" | "arccot" => Expr::arcctg(boxed),
        _ => return None,
    };
    Some(res)
}

/// name(...) is a function call, bare name is a constant or a variable
fn parse_name_or_call(input: &str) -> IResult<&str, Expr> {
    let (rest, name) = parse_name(input)?;
    let (rest, argument) =
        opt(delimited(ws(char('(')), parse_sum, char(')'))).parse(rest)?;
    match argument {
        Some(arg) => match function_by_name(name, arg) {
            Some(expr) => Ok((rest, expr)),
            None => Err(nom::Err::Failure(Error::new(input, ErrorKind::Tag))),
        },
        None => {
            let expr = match name {
                "pi" => Expr::Const(PI),
                "e" => Expr::Const(E),
                _ => Expr::Var(name.to_string()),
            };
            Ok((rest, expr))
        }
    }
}

fn parse_atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        map(double, Expr::Const),
        parse_name_or_call,
        delimited(char('('), parse_sum, char(')')),
    )))
    .parse(input)
}

fn parse_power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = parse_atom(input)?;
    let (input, exponent) = opt(preceded(alt((tag("**"), tag("^"))), parse_unary)).parse(input)?;
    match exponent {
        Some(exp) => Ok((input, base.pow(exp))),
        None => Ok((input, base)),
    }
}

fn parse_unary(input: &str) -> IResult<&str, Expr> {
    let (rest, sign) = opt(ws(one_of("+-"))).parse(input)?;
    match sign {
        Some('-') => map(parse_unary, |expr| -expr).parse(rest),
        Some(_) => parse_unary(rest),
        None => parse_power(rest),
    }
}

fn parse_product(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        // a lone '*' only: '**' belongs to parse_power
        pair(ws(one_of("*/")), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| if op == '*' { acc * rhs } else { acc / rhs },
    )
    .parse(input)
}

fn parse_sum(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_product(input)?;
    fold_many0(
        pair(ws(one_of("+-")), parse_product),
        move || init.clone(),
        |acc, (op, rhs)| if op == '+' { acc + rhs } else { acc - rhs },
    )
    .parse(input)
}

/// Parses the whole input into an expression. Trailing garbage, unbalanced brackets and
/// unknown function names are reported as `ODEError::ParseError`.
pub fn parse_expression_func(input: &str) -> Result<Expr, ODEError> {
    if input.trim().is_empty() {
        return Err(ODEError::ParseError("empty expression".to_string()));
    }
    match all_consuming(parse_sum).parse(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ODEError::ParseError(
            format!("cannot parse '{}': unexpected input at '{}'", input.trim(), e.input.trim()),
        )),
        Err(nom::Err::Incomplete(_)) => Err(ODEError::ParseError(format!(
            "cannot parse '{}': incomplete input",
            input.trim()
        ))),
    }
}

impl Expr {
    /// String to symbolic expression
    pub fn parse_expression(input: &str) -> Result<Expr, ODEError> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression_func("2.5").unwrap(), Expr::Const(2.5));
        assert_eq!(parse_expression_func("1e-3").unwrap(), Expr::Const(1e-3));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression_func(" y ").unwrap(), var("y"));
    }

    #[test]
    fn test_parse_addition_is_left_associative() {
        let expr = parse_expression_func("x - y + 1").unwrap();
        let expected = (var("x") - var("y")) + Expr::Const(1.0);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_precedence() {
        let expr = parse_expression_func("2*x + y").unwrap();
        let expected = Expr::Const(2.0) * var("x") + var("y");
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_power_both_notations() {
        let caret = parse_expression_func("y^2").unwrap();
        let stars = parse_expression_func("y**2").unwrap();
        assert_eq!(caret, var("y").pow(Expr::Const(2.0)));
        assert_eq!(caret, stars);
    }

    #[test]
    fn test_unary_minus_binds_weaker_than_power() {
        let expr = parse_expression_func("-y^2").unwrap();
        assert_eq!(expr, -(var("y").pow(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_functions_and_constants() {
        let expr = parse_expression_func("exp(x) + ln(pi)").unwrap();
        let expected = var("x").exp() + Expr::Const(PI).ln();
        assert_eq!(expr, expected);
        let sq = parse_expression_func("sqrt(x)").unwrap();
        assert_eq!(sq, var("x").pow(Expr::Const(0.5)));
    }

    #[test]
    fn test_parse_brackets() {
        let expr = parse_expression_func("(x + y)/x").unwrap();
        assert_eq!(expr, (var("x") + var("y")) / var("x"));
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        let expr = parse_expression_func("x*y*y - 3*sin(x)/(1 + y^2)").unwrap();
        let again = parse_expression_func(&expr.to_string()).unwrap();
        assert_eq!(expr, again);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(matches!(parse_expression_func("2*+"), Err(ODEError::ParseError(_))));
        assert!(matches!(parse_expression_func(""), Err(ODEError::ParseError(_))));
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(parse_expression_func("(x + y").is_err());
        assert!(parse_expression_func("x + y)").is_err());
    }

    #[test]
    fn test_unknown_function() {
        assert!(parse_expression_func("foo(x)").is_err());
    }
}
