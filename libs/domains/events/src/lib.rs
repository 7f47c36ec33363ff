//! Events Domain
//!
//! This module provides a complete domain implementation for managing events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{
//!     handlers,
//!     repository::InMemoryEventRepository,
//!     service::EventService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryEventRepository::new();
//! let service = std::sync::Arc::new(EventService::new(repository));
//!
//! // Create Axum routers
//! let public = handlers::public_router(service.clone());
//! let protected = handlers::protected_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EventError, EventResult};
pub use models::{CreateEvent, Event, EventFilter, EventStatus, UpdateEvent};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
