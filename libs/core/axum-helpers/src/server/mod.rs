//! Server infrastructure module.
//!
//! - Router assembly with request tracing and a JSON 404 fallback
//! - Server startup with graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let router = create_router(api_routes);
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
