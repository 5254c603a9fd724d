//! Media moderation queue engine for the HeavyHire operator dashboard.
//!
//! The dashboard shell renders the queue; this crate owns its semantics:
//! page fetching behind a single-flight guard, incremental loading from the
//! reviewer's scroll position, single and bulk moderation actions with
//! per-item in-flight tracking, preview navigation to the next actionable
//! item, and context detail resolution with stale-result discard.
//!
//! The engine consumes the marketplace backend through the
//! `heavyhire-client` service contracts and exposes its own state through
//! [`state::QueueSnapshot`] and the [`events::ModerationEvent`] stream.

pub mod actions;
pub mod bulk;
pub mod context;
pub mod error;
pub mod events;
pub mod fetch;
pub mod preview;
pub mod queue;
pub mod scroll;
pub mod state;
