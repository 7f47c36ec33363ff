//! Accounts Domain
//!
//! This module provides account management and authentication:
//! registration, login with JWT token issuance, and account CRUD.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │  Handlers / Auth        │  ← HTTP endpoints (CRUD + login/register)
//! └──────────┬──────────────┘
//!            │
//! ┌──────────▼──────────────┐
//! │        Service          │  ← Business logic, password hashing
//! └──────────┬──────────────┘
//!            │
//! ┌──────────▼──────────────┐
//! │       Repository        │  ← Data access (trait + implementations)
//! └──────────┬──────────────┘
//!            │
//! ┌──────────▼──────────────┐
//! │        Models           │  ← Entities, DTOs, roles
//! └─────────────────────────┘
//! ```

pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::{AuthState, auth_router};
pub use error::{AccountError, AccountResult};
pub use models::{
    Account, AccountFilter, AccountResponse, CreateAccount, LoginRequest, LoginResponse,
    RegisterRequest, Role, UpdateAccount,
};
pub use postgres::PgAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
