use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImmoError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Undefined metric: {metric} — {reason}")]
    UndefinedMetric { metric: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Comparison entry not found: {id}")]
    NotFound { id: u64 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ImmoError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ImmoError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn undefined(metric: &str, reason: impl Into<String>) -> Self {
        ImmoError::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ImmoError {
    fn from(e: serde_json::Error) -> Self {
        ImmoError::SerializationError(e.to_string())
    }
}
