//! Standard error messages and codes for consistent error responses.

// Message constants
pub const VALIDATION_FAILED: &str = "Request validation failed";
pub const INVALID_UUID: &str = "Invalid UUID format";
pub const INVALID_JSON: &str = "Invalid JSON format";
pub const NOT_FOUND_RESOURCE: &str = "Requested resource was not found";
pub const UNAUTHORIZED: &str = "Authentication required";
pub const FORBIDDEN: &str = "Access forbidden";
pub const CONFLICT: &str = "Resource already exists";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred";
pub const SERVICE_UNAVAILABLE: &str = "Service is temporarily unavailable";
pub const DB_ERROR: &str = "A database error occurred";
pub const DB_MIGRATION_ERROR: &str = "Database migration error";
pub const IO_ERROR: &str = "I/O error";
pub const SERDE_JSON_ERROR: &str = "JSON serialization error";

// Error codes for observability and debugging
pub const CODE_VALIDATION: i32 = 1001;
pub const CODE_UUID: i32 = 1002;
pub const CODE_JSON_EXTRACTION: i32 = 1003;
pub const CODE_NOT_FOUND: i32 = 1004;
pub const CODE_INTERNAL: i32 = 1005;
pub const CODE_UNAUTHORIZED: i32 = 1006;
pub const CODE_FORBIDDEN: i32 = 1007;
pub const CODE_CONFLICT: i32 = 1008;
pub const CODE_SERVICE_UNAVAILABLE: i32 = 1009;

// Infrastructure error codes
pub const CODE_DATABASE: i32 = 2001;
pub const CODE_MIGRATION: i32 = 3001;
pub const CODE_IO: i32 = 4001;
pub const CODE_SERDE_JSON: i32 = 5001;
