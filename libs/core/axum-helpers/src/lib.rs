//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the Eventline HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT authentication (HS256 access/refresh tokens)
//! - **[`server`]**: server setup, health checks, graceful shutdown
//! - **[`http`]**: security header middleware
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`audit`]**: audit logging for security-relevant events

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, JwtConfig, REFRESH_TOKEN_TTL, jwt_auth_middleware,
    optional_jwt_auth_middleware,
};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export audit types
pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
