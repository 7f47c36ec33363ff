//! Application state management.
//!
//! The shared state passed to all request handlers: configuration, the
//! PostgreSQL connection pool, and the JWT signer/verifier.

use axum_helpers::JwtAuth;

/// Shared application state.
///
/// Cloning is cheap: the connection pool is Arc-backed.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// JWT token issuer and verifier
    pub jwt_auth: JwtAuth,
}
