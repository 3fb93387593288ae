//! # Axum Helpers
//!
//! Shared building blocks for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, server startup, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: JSON extractor rendering rejections as [`AppError`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router(Router::new());
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {})
//!         .await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::AppJson;
pub use server::{ShutdownCoordinator, create_production_app, create_router, shutdown_signal};
