use sea_orm::error::DbErr;
use sea_orm::TransactionError;
use serde::Serialize;

use crate::tree::TreeError;

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<TreeError> for ServiceError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::UnknownNode(_) => ServiceError::NotFound(err.to_string()),
            TreeError::SelfParent(_) | TreeError::Cycle { .. } => {
                ServiceError::ValidationError(err.to_string())
            }
        }
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
            TransactionError::Transaction(service_err) => service_err,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl ServiceError {
    pub fn not_found(kind: &str, id: i32) -> Self {
        ServiceError::NotFound(format!("{} {} not found", kind, id))
    }

    /// True for errors caused by the caller's input rather than the system.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::ValidationError(_)
                | Self::InvalidOperation(_)
                | Self::InvalidStatus(_)
                | Self::Conflict(_)
        )
    }
}

pub type AppError = ServiceError;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn tree_errors_map_to_rejections() {
        let err: ServiceError = TreeError::Cycle { node: 1, parent: 3 }.into();
        assert_matches!(err, ServiceError::ValidationError(_));
        assert!(err.is_rejection());

        let err: ServiceError = TreeError::UnknownNode(9).into();
        assert_matches!(err, ServiceError::NotFound(_));
    }

    #[test]
    fn transaction_errors_unwrap_service_error() {
        let err: ServiceError =
            TransactionError::Transaction(ServiceError::InvalidOperation("nope".into())).into();
        assert_matches!(err, ServiceError::InvalidOperation(msg) if msg == "nope");

        let err: ServiceError =
            TransactionError::<ServiceError>::Connection(DbErr::Custom("gone".into())).into();
        assert_matches!(err, ServiceError::DatabaseError(_));
        assert!(!err.is_rejection());
    }

    #[test]
    fn not_found_message_names_the_record() {
        assert_eq!(
            ServiceError::not_found("Stock item", 42).to_string(),
            "Not found: Stock item 42 not found"
        );
    }
}
