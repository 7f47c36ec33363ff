//! Type-safe error codes for API responses.
//!
//! Single source of truth for error codes used across the application. Each
//! code carries a string identifier for clients, an integer code for logging
//! and monitoring, and a default human-readable message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::messages;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in a path or query parameter
    InvalidUuid,

    /// JSON extraction from the request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Authenticated account lacks sufficient permissions
    Forbidden,

    /// Request conflicts with current resource state (e.g. duplicate resource)
    Conflict,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Infrastructure errors (2000-5999)
    /// Database connection or query error
    DatabaseError,

    /// Database migration error
    MigrationError,

    /// I/O error
    IoError,

    /// JSON serialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// String identifier for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::MigrationError => "MIGRATION_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => messages::CODE_VALIDATION,
            ErrorCode::InvalidUuid => messages::CODE_UUID,
            ErrorCode::JsonExtraction => messages::CODE_JSON_EXTRACTION,
            ErrorCode::NotFound => messages::CODE_NOT_FOUND,
            ErrorCode::Unauthorized => messages::CODE_UNAUTHORIZED,
            ErrorCode::Forbidden => messages::CODE_FORBIDDEN,
            ErrorCode::Conflict => messages::CODE_CONFLICT,
            ErrorCode::InternalError => messages::CODE_INTERNAL,
            ErrorCode::ServiceUnavailable => messages::CODE_SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError => messages::CODE_DATABASE,
            ErrorCode::MigrationError => messages::CODE_MIGRATION,
            ErrorCode::IoError => messages::CODE_IO,
            ErrorCode::SerdeJsonError => messages::CODE_SERDE_JSON,
        }
    }

    /// Default human-readable message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => messages::VALIDATION_FAILED,
            ErrorCode::InvalidUuid => messages::INVALID_UUID,
            ErrorCode::JsonExtraction => messages::INVALID_JSON,
            ErrorCode::NotFound => messages::NOT_FOUND_RESOURCE,
            ErrorCode::Unauthorized => messages::UNAUTHORIZED,
            ErrorCode::Forbidden => messages::FORBIDDEN,
            ErrorCode::Conflict => messages::CONFLICT,
            ErrorCode::InternalError => messages::INTERNAL_ERROR,
            ErrorCode::ServiceUnavailable => messages::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError => messages::DB_ERROR,
            ErrorCode::MigrationError => messages::DB_MIGRATION_ERROR,
            ErrorCode::IoError => messages::IO_ERROR,
            ErrorCode::SerdeJsonError => messages::SERDE_JSON_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_string_and_integer_agree() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2001);
    }
}
