//! Service contracts consumed by the moderation queue engine.
//!
//! The engine never talks HTTP directly; it holds these traits so that the
//! real backend ([`crate::http::BackendClient`]) and the in-memory doubles
//! used in tests are interchangeable.

use async_trait::async_trait;
use futures::future::join_all;

use heavyhire_core::types::{ContextId, MediaId};

use crate::error::ServiceError;
use crate::types::{
    BulkOutcome, EquipmentDetail, EquipmentTypeDetail, ListMediaQuery, MediaPage,
    ModerationDecision, RentalRequestDetail,
};

/// Moderation operations offered by the marketplace backend.
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Fetch one page of the moderation queue.
    async fn list_media(&self, query: &ListMediaQuery) -> Result<MediaPage, ServiceError>;

    /// Approve a single media file.
    async fn approve_media(&self, id: &MediaId) -> Result<ModerationDecision, ServiceError>;

    /// Reject a single media file with an optional reviewer reason.
    async fn reject_media(
        &self,
        id: &MediaId,
        reason: Option<&str>,
    ) -> Result<ModerationDecision, ServiceError>;

    /// Approve a batch of media files.
    ///
    /// Every member is attempted independently and runs to completion; one
    /// member's failure neither aborts nor rolls back the others. The
    /// aggregate `success` flag is true only when every member succeeded.
    async fn bulk_approve(&self, ids: &[MediaId]) -> BulkOutcome {
        let settled = join_all(ids.iter().map(|id| self.approve_media(id))).await;
        BulkOutcome::collect(ids, settled)
    }

    /// Reject a batch of media files with a shared reason.
    ///
    /// Same settle-all semantics as [`bulk_approve`](Self::bulk_approve).
    async fn bulk_reject(&self, ids: &[MediaId], reason: Option<&str>) -> BulkOutcome {
        let settled = join_all(ids.iter().map(|id| self.reject_media(id, reason))).await;
        BulkOutcome::collect(ids, settled)
    }
}

/// Lookups for the business entity a media file is attached to.
///
/// Each call returns the entity's summary record or fails; the caller
/// decides what a failure means for its own state.
#[async_trait]
pub trait ContextLookupService: Send + Sync {
    /// Look up a booking request by id.
    async fn rental_request(&self, id: &ContextId) -> Result<RentalRequestDetail, ServiceError>;

    /// Look up an equipment listing by id.
    async fn equipment(&self, id: &ContextId) -> Result<EquipmentDetail, ServiceError>;

    /// Look up an equipment type by id.
    async fn equipment_type(&self, id: &ContextId) -> Result<EquipmentTypeDetail, ServiceError>;
}
