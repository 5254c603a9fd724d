//! Media item model and moderation vocabulary.
//!
//! Defines the review statuses, media kinds, and context kinds used across
//! the moderation queue, plus the validation helpers shared by the service
//! client and the queue engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ContextId, MediaId, Timestamp};

// ---------------------------------------------------------------------------
// Moderation vocabulary
// ---------------------------------------------------------------------------

/// Review status of an uploaded media file.
///
/// The statuses are mutually exclusive and drive reviewability: only
/// `Pending` and `Flagged` items can still be approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    /// Uploaded and awaiting review.
    Pending,
    /// Marked suspicious by the automated moderation pass.
    Flagged,
    /// Cleared by a reviewer.
    Approved,
    /// Removed by a reviewer.
    Rejected,
}

impl MediaStatus {
    /// Whether an item with this status can still be approved or rejected.
    pub fn is_actionable(self) -> bool {
        matches!(self, MediaStatus::Pending | MediaStatus::Flagged)
    }

    /// Wire name of the status, matching its JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaStatus::Pending => "pending",
            MediaStatus::Flagged => "flagged",
            MediaStatus::Approved => "approved",
            MediaStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File format category of an uploaded media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
    Document,
}

impl MediaKind {
    /// Wire name of the kind, matching its JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Pdf => "pdf",
            MediaKind::Document => "document",
        }
    }
}

/// The kind of business entity a media file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextKind {
    RentalRequest,
    Equipment,
    EquipmentType,
    Chat,
    Profile,
    Dispute,
    VideoThumbnail,
    Unknown,
}

impl ContextKind {
    /// Whether a detail record can be looked up for this context kind.
    ///
    /// Only rental requests, equipment, and equipment types have a lookup
    /// endpoint; the remaining kinds resolve locally to an "other" payload.
    pub fn has_detail_lookup(self) -> bool {
        matches!(
            self,
            ContextKind::RentalRequest | ContextKind::Equipment | ContextKind::EquipmentType
        )
    }

    /// Wire name of the kind, matching its JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ContextKind::RentalRequest => "rentalRequest",
            ContextKind::Equipment => "equipment",
            ContextKind::EquipmentType => "equipmentType",
            ContextKind::Chat => "chat",
            ContextKind::Profile => "profile",
            ContextKind::Dispute => "dispute",
            ContextKind::VideoThumbnail => "videoThumbnail",
            ContextKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MediaItem
// ---------------------------------------------------------------------------

/// A single label produced by the automated moderation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationLabel {
    pub name: String,
    pub confidence: f32,
}

/// An uploaded file under review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaId,
    pub status: MediaStatus,
    pub media_kind: MediaKind,
    pub context_kind: ContextKind,
    pub context_id: ContextId,
    /// Automated moderation score on the 0-100 scale, when the pass ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_score: Option<u8>,
    /// Labels from the automated pass, in server order.
    #[serde(default)]
    pub moderation_labels: Vec<ModerationLabel>,
    /// Set only when `status` is `Rejected`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// The server may rewrite this when the status changes.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaItem {
    /// Whether this item may still be targeted by moderation actions.
    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Highest moderation score the automated pass can assign.
pub const MAX_MODERATION_SCORE: u8 = 100;

/// Validate that a moderation score is on the 0-100 scale.
pub fn validate_moderation_score(score: u8) -> Result<(), CoreError> {
    if score > MAX_MODERATION_SCORE {
        return Err(CoreError::Validation(format!(
            "Moderation score {score} exceeds the maximum of {MAX_MODERATION_SCORE}"
        )));
    }
    Ok(())
}

/// Validate that a rejection reason, when given, is non-empty.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<(), CoreError> {
    if let Some(reason) = reason {
        if reason.trim().is_empty() {
            return Err(CoreError::Validation(
                "Rejection reason must not be blank when provided".to_string(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
