use thiserror::Error;

/// Errors raised by the pharmacokinetic core.
///
/// Every operation validates its inputs before computing anything, so an error
/// always means no partial result was produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PkError {
    /// A parameter violated its physical or structural constraint
    #[error("Invalid parameter: {field} {constraint}")]
    InvalidParameter {
        /// Name of the offending field, e.g. `kel`
        field: String,
        /// The violated constraint, e.g. `must be > 0`
        constraint: String,
    },
}

impl PkError {
    pub(crate) fn invalid(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        PkError::InvalidParameter {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            PkError::InvalidParameter { field, .. } => field,
        }
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<(), PkError> {
    if !value.is_finite() {
        return Err(PkError::invalid(field, "must be finite"));
    }
    if value <= 0.0 {
        return Err(PkError::invalid(field, "must be > 0"));
    }
    Ok(())
}
