//! Products Domain
//!
//! Creation of catalog products. The handler accepts a product, the service
//! discards any client-supplied identifier and persists it inside a unit of
//! work, and the store assigns the identifier.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST endpoint, 201 Created
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Clears the id, begin → insert → commit
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Unit-of-work traits + Postgres / in-memory stores
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, Sea-ORM entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::Product;
pub use postgres::{PgProductRepository, PgProductTransaction};
pub use repository::{
    InMemoryProductRepository, InMemoryProductTransaction, ProductRepository, ProductTransaction,
};
pub use service::ProductService;
