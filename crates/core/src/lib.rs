//! Core types and shared functionality for gndcache.
//!
//! This crate provides:
//! - The document store with SQLite backend
//! - The RDF namespace envelope applied at render time
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod render;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use render::wrap_fragment;
pub use store::StoreDb;
