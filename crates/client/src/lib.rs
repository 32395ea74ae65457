//! Client code for gndcache.
//!
//! This crate provides the upstream fetcher that retrieves RDF/XML
//! fragments from the GND registry.

pub mod upstream;

pub use upstream::{UpstreamClient, UpstreamConfig, UpstreamDocument};
