//! # Movie Catalog
//!
//! REST API over a catalog of films: paginated, filterable listing plus
//! create, read, update and delete.
//!
//! ## Architecture
//!
//! - **domain**: the Movie entity, validation rules, list query model and store trait
//! - **application**: use cases (`MovieService`)
//! - **infrastructure**: SeaORM persistence, migrations and seed data
//! - **interfaces**: HTTP router, handlers and response envelope
//! - **server**: process lifecycle shared by the CLI and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmMovieRepository};

// Re-export API router
pub use interfaces::http::create_api_router;
