use std::fmt;

/// Error types of the scalar ODE calculator
#[derive(Debug, Clone, PartialEq)]
pub enum ODEError {
    /// malformed equation text or unknown symbol
    ParseError(String),
    /// structural test failed for the requested family
    ClassificationError(String),
    /// non-finite value produced during evaluation
    NumericalFault { x: f64, detail: String },
    /// Riccati requested explicitly but no y^k term with k >= 2
    RiccatiGateError(String),
    /// bad integration parameters or task file
    InvalidInput(String),
}

impl ODEError {
    /// Errors raised inside a specialized solver that the orchestrator downgrades to a warning
    /// before switching to RK4. Everything else reaches the caller unchanged.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ODEError::ClassificationError(_) | ODEError::NumericalFault { .. }
        )
    }

    pub fn numerical_fault(x: f64, detail: impl Into<String>) -> Self {
        ODEError::NumericalFault {
            x,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ODEError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ODEError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ODEError::ClassificationError(msg) => write!(f, "Classification error: {}", msg),
            ODEError::NumericalFault { x, detail } => {
                write!(f, "Numerical fault at x = {}: {}", x, detail)
            }
            ODEError::RiccatiGateError(msg) => write!(f, "Riccati form not detected: {}", msg),
            ODEError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ODEError {}

/// Checks a freshly computed sample and turns NaN/inf into `NumericalFault`.
pub fn check_finite(x: f64, value: f64, what: &str) -> Result<f64, ODEError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ODEError::numerical_fault(
            x,
            format!("{} evaluated to {}", what, value),
        ))
    }
}
