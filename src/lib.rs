//! # Contacts API
//!
//! Paginated REST API over contact records.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Contact entity, write DTOs, repository trait, field rules
//! - **application**: `ContactService` use cases (existence, uniqueness)
//! - **infrastructure**: SeaORM entities, migrations and repository
//! - **interfaces**: axum handlers, pagination envelope, Swagger docs
//! - **server**: runtime lifecycle shared by the CLI and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, init_in_memory_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
