use std::sync::Arc;

use thiserror::Error;

use crate::model::employee::EmployeeId;

pub type PayrollResult<T> = Result<T, PayrollError>;

#[derive(Debug, Error, Clone)]
pub enum PayrollError {
    #[error("{0}")]
    Parse(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Employee not found.")]
    NotFound(EmployeeId),
    #[error("Employee type not selected. Cancelled.")]
    SelectionCancelled,
    #[error("{0:#}")]
    Persistence(Arc<anyhow::Error>),
}

impl PayrollError {
    pub fn parse(field: &str, raw: &str) -> Self {
        Self::Parse(format!("Invalid {field}: {raw:?}"))
    }

    pub fn persistence(err: anyhow::Error) -> Self {
        Self::Persistence(Arc::new(err))
    }

    pub fn code(&self) -> &'static str {
        match self {
            PayrollError::Parse(_) => "PARSE_ERROR",
            PayrollError::InvalidInput(_) => "INVALID_INPUT",
            PayrollError::NotFound(_) => "NOT_FOUND",
            PayrollError::SelectionCancelled => "SELECTION_CANCELLED",
            PayrollError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn persistence_message_keeps_context_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: anyhow::Result<()> = Err(io).context("Failed to write data.json");
        let err = PayrollError::persistence(err.unwrap_err());
        assert_eq!(err.to_string(), "Failed to write data.json: denied");
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
    }

    #[test]
    fn parse_error_names_field() {
        let err = PayrollError::parse("salary", "12x");
        assert_eq!(err.to_string(), "Invalid salary: \"12x\"");
    }
}
