//! Custom extractors for Axum handlers.

pub mod json;
pub mod query;

pub use json::AppJson;
pub use query::AppQuery;
