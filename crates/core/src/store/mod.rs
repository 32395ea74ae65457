//! SQLite-backed document store.
//!
//! This module provides the persistent key-value mapping from GND identifier
//! to raw fragment bytes, with async access via tokio-rusqlite:
//!
//! - One row per identifier, enforced by the primary key
//! - Insert-if-absent only; cached content is never overwritten
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod documents;
pub mod migrations;

pub use crate::Error;

pub use connection::StoreDb;
