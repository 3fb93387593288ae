//! PostgreSQL database connector and utilities
//!
//! Provides connection management and migration running on top of SeaORM.

mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{connect_from_config_with_retry, run_migrations};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
