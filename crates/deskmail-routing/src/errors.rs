//! Error types for the routing engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Alias not found: {0}")]
    AliasNotFound(i32),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RoutingError {
    fn from(err: serde_json::Error) -> Self {
        RoutingError::Serialization(err.to_string())
    }
}

impl RoutingError {
    /// Whether the request was rejected before anything was resolved or stored
    pub fn is_validation(&self) -> bool {
        matches!(self, RoutingError::Validation(_))
    }
}
