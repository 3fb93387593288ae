//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations
//!   applied and automatic cleanup (feature: "postgres")
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestDatabase;
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let connection = db.connection();
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;
