//! Wire types for the moderation and context lookup endpoints.

use serde::{Deserialize, Serialize};

use heavyhire_core::filters::MediaFilters;
use heavyhire_core::media::{ContextKind, MediaItem, MediaStatus};
use heavyhire_core::types::{ContextId, MediaId, Timestamp};

use crate::error::ServiceError;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Query parameters for the media listing endpoint.
#[derive(Debug, Clone)]
pub struct ListMediaQuery {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Active reviewer filters; the server applies them.
    pub filters: MediaFilters,
}

impl ListMediaQuery {
    /// Render as query pairs for the listing request.
    ///
    /// Unset filters are omitted; `groupByContext` is only sent when on.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(status) = self.filters.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(context) = self.filters.context {
            query.push(("context", context.as_str().to_string()));
        }
        if let Some(term) = self.filters.search_term() {
            query.push(("search", term.to_string()));
        }
        if let Some(kind) = self.filters.media_kind {
            query.push(("mediaKind", kind.as_str().to_string()));
        }
        query.push(("sort", self.filters.sort.as_str().to_string()));
        query.push(("direction", self.filters.direction.as_str().to_string()));
        if self.filters.group_by_context {
            query.push(("groupByContext", "true".to_string()));
        }
        query
    }
}

/// A per-context bucket returned when the listing is grouped by context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextGroup {
    pub kind: ContextKind,
    pub id: ContextId,
    /// Number of queue items attached to this context.
    pub count: u64,
}

/// One page of the moderation queue as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    #[serde(default)]
    pub context_groups: Vec<ContextGroup>,
}

// ---------------------------------------------------------------------------
// Moderation decisions
// ---------------------------------------------------------------------------

/// Response to a single approve/reject call.
///
/// The server may rewrite `url` when the status changes (approval moves the
/// file to its public location).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationDecision {
    pub id: MediaId,
    pub status: MediaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Outcome of one member of a bulk moderation call.
#[derive(Debug, Clone)]
pub struct BulkItemOutcome {
    pub id: MediaId,
    /// The member's decision, or the failure message for this id alone.
    pub result: Result<ModerationDecision, String>,
}

/// Aggregate result of a bulk moderation call.
///
/// Every requested id appears in `results` exactly once; `success` is true
/// only when every member succeeded. A partially-failed batch still carries
/// each member's individual outcome.
#[derive(Debug, Clone)]
pub struct BulkOutcome {
    pub success: bool,
    pub results: Vec<BulkItemOutcome>,
}

impl BulkOutcome {
    /// Pair each requested id with its settled result and compute the
    /// aggregate flag.
    pub fn collect(
        ids: &[MediaId],
        settled: Vec<Result<ModerationDecision, ServiceError>>,
    ) -> Self {
        let results: Vec<BulkItemOutcome> = ids
            .iter()
            .cloned()
            .zip(settled)
            .map(|(id, result)| BulkItemOutcome {
                id,
                result: result.map_err(|e| e.to_string()),
            })
            .collect();
        let success = results.iter().all(|member| member.result.is_ok());
        Self { success, results }
    }

    /// Decisions of the members that succeeded.
    pub fn succeeded(&self) -> impl Iterator<Item = &ModerationDecision> {
        self.results
            .iter()
            .filter_map(|member| member.result.as_ref().ok())
    }

    /// Ids of the members that failed.
    pub fn failed_ids(&self) -> Vec<MediaId> {
        self.results
            .iter()
            .filter(|member| member.result.is_err())
            .map(|member| member.id.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Context lookups
// ---------------------------------------------------------------------------

/// Booking request summary shown beside a previewed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequestDetail {
    pub id: ContextId,
    pub equipment_name: String,
    pub renter_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
}

/// Equipment summary shown beside a previewed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetail {
    pub id: ContextId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub owner_name: String,
    pub equipment_type: String,
}

/// Equipment type summary shown beside a previewed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentTypeDetail {
    pub id: ContextId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Resolved context payload for a previewed item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextPayload {
    RentalRequest(RentalRequestDetail),
    Equipment(EquipmentDetail),
    EquipmentType(EquipmentTypeDetail),
    /// Context kinds with no dedicated lookup (chat, profile, dispute, ...).
    Other,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
