//! Framework-free domain layer for the HeavyHire moderation dashboard.
//!
//! Holds the media item model, the moderation vocabulary (statuses, media
//! kinds, context kinds), the reviewer filter set, and the validation
//! helpers shared by the service client and the queue engine.

pub mod error;
pub mod filters;
pub mod media;
pub mod types;
