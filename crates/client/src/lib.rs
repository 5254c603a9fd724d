//! Typed client for the marketplace backend services consumed by the
//! moderation dashboard.
//!
//! Provides the service contracts (media listing, moderation decisions,
//! context lookups), the wire types they exchange, and the reqwest-based
//! HTTP implementation used against the real backend.

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;
