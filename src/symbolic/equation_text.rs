//! Pure text transforms applied to the equation before and during parsing.
use crate::numerical::ODE_error::ODEError;
use regex::Regex;

/// Extracts the right-hand side from what the user typed.
///
/// - everything after the first `=` is kept, text without `=` is already the right-hand side
/// - `y'` and `dy/dx` (any case) are removed
/// - `**` is normalized to `^`
///
/// # Examples
/// ```
/// use RustedODEcalc::symbolic::equation_text::rhs_from_equation;
/// assert_eq!(rhs_from_equation("y' = 2*x + y").unwrap(), "2*x + y");
/// assert_eq!(rhs_from_equation("dy/dx = x**2").unwrap(), "x^2");
/// ```
pub fn rhs_from_equation(equation: &str) -> Result<String, ODEError> {
    let equation = equation.trim();
    if equation.is_empty() {
        return Err(ODEError::ParseError(
            "enter an equation, for example: y' = 2*x + y".to_string(),
        ));
    }
    let rhs = match equation.find('=') {
        Some(idx) => &equation[idx + 1..],
        None => equation,
    };
    let derivative_notation = Regex::new(r"(?i)dy\s*/\s*dx|y\s*'")
        .map_err(|e| ODEError::ParseError(e.to_string()))?;
    let rhs = derivative_notation.replace_all(rhs, "");
    let rhs = rhs.replace("**", "^");
    let rhs = rhs.trim().to_string();
    if rhs.is_empty() {
        return Err(ODEError::ParseError(
            "right-hand side of the equation not found".to_string(),
        ));
    }
    Ok(rhs)
}

/// Replaces every whole-word occurrence of `var` in `text` by `(replacement)`.
///
/// Identifiers that merely contain `var` are left alone: substituting `y` leaves `ytop` and
/// `my_y` intact.
pub fn substitute_symbol(text: &str, var: &str, replacement: &str) -> Result<String, ODEError> {
    let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(var)))
        .map_err(|e| ODEError::ParseError(e.to_string()))?;
    let wrapped = format!("({})", replacement);
    Ok(pattern
        .replace_all(text, regex::NoExpand(wrapped.as_str()))
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rhs_after_equal_sign() {
        assert_eq!(rhs_from_equation("y' = x*y").unwrap(), "x*y");
        assert_eq!(rhs_from_equation("dY/dX= y - y^2").unwrap(), "y - y^2");
    }

    #[test]
    fn test_text_without_equal_sign_is_rhs() {
        assert_eq!(rhs_from_equation("  (x + y)/x ").unwrap(), "(x + y)/x");
    }

    #[test]
    fn test_power_notation_normalized() {
        assert_eq!(rhs_from_equation("y' = y**2 + x").unwrap(), "y^2 + x");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(rhs_from_equation("   "), Err(ODEError::ParseError(_))));
        assert!(matches!(rhs_from_equation("y' = "), Err(ODEError::ParseError(_))));
    }

    #[test]
    fn test_substitute_whole_words_only() {
        let res = substitute_symbol("y + ytop*exp(y)", "y", "v*x").unwrap();
        assert_eq!(res, "(v*x) + ytop*exp((v*x))");
    }
}
