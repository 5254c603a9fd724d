//! Reviewer filter set for the moderation queue.

use serde::{Deserialize, Serialize};

use crate::media::{ContextKind, MediaKind, MediaStatus};

/// Sort key for the queue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    ModerationScore,
}

impl SortKey {
    /// Wire name of the key, matching its JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::UpdatedAt => "updatedAt",
            SortKey::ModerationScore => "moderationScore",
        }
    }
}

/// Sort direction for the queue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire name of the direction, matching its JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// The active filter set for the reviewer's queue view.
///
/// Any change to these is applied by replacing the whole view from page 1;
/// the server performs the actual filtering and sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFilters {
    pub status: Option<MediaStatus>,
    pub context: Option<ContextKind>,
    /// Free-text search over file names and uploader names.
    pub search: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub sort: SortKey,
    pub direction: SortDirection,
    /// When set, the listing also returns per-context buckets.
    pub group_by_context: bool,
}

impl Default for MediaFilters {
    /// Fresh reviewer view: everything, newest uploads first.
    fn default() -> Self {
        Self {
            status: None,
            context: None,
            search: None,
            media_kind: None,
            sort: SortKey::CreatedAt,
            direction: SortDirection::Desc,
            group_by_context: false,
        }
    }
}

impl MediaFilters {
    /// The trimmed search term, or `None` when the box is empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}
