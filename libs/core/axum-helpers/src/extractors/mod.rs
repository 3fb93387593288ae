//! Custom extractors for Axum handlers.

pub mod json;

pub use json::AppJson;
