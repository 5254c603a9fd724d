/// Media identifiers are opaque strings assigned by the marketplace backend.
pub type MediaId = String;

/// Identifier of the business entity a media file is attached to.
pub type ContextId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
