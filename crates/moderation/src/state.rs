//! In-memory state for the reviewer's moderation queue view.

use std::collections::HashSet;

use serde::Serialize;

use heavyhire_client::types::ContextGroup;
use heavyhire_core::filters::MediaFilters;
use heavyhire_core::media::MediaItem;
use heavyhire_core::types::MediaId;

use crate::context::ContextDetail;

/// Mutable queue state guarded by the engine's mutex.
///
/// Mutated only by the fetch controller, the action executor, and the bulk
/// aggregator; every other component reads it. The single-flight flag and
/// the in-flight id set live here so each engine instance carries its own
/// guards, never ambient globals.
#[derive(Debug)]
pub(crate) struct QueueState {
    /// Loaded page(s), in server order. Appends extend, never reorder.
    pub items: Vec<MediaItem>,
    /// 1-based page number of the most recent fetch; 0 before the first.
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    /// Whether another page can be appended.
    pub has_more: bool,
    pub filters: MediaFilters,
    /// Per-context buckets from the last grouped listing.
    pub context_groups: Vec<ContextGroup>,
    /// Single-flight guard shared by replace and append fetches.
    pub fetch_in_flight: bool,
    /// Ids currently undergoing a moderation action; an id stays in this
    /// set for the whole lifetime of its call and gates resubmission.
    pub actions_in_flight: HashSet<MediaId>,
    /// Reviewer selection for bulk actions. Holds actionable ids only.
    pub selection: HashSet<MediaId>,
    /// Currently previewed item, if any.
    pub preview: Option<MediaId>,
    /// Bumped on every preview identity change; in-flight context lookups
    /// compare against it before applying their result.
    pub preview_epoch: u64,
    /// Context detail for the previewed item.
    pub context: Option<ContextDetail>,
}

impl Default for QueueState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            total: 0,
            has_more: true,
            filters: MediaFilters::default(),
            context_groups: Vec::new(),
            fetch_in_flight: false,
            actions_in_flight: HashSet::new(),
            selection: HashSet::new(),
            preview: None,
            preview_epoch: 0,
            context: None,
        }
    }
}

impl QueueState {
    pub fn item(&self, id: &MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_mut(&mut self, id: &MediaId) -> Option<&mut MediaItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

/// Read-only projection of the queue state for the rendering layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub items: Vec<MediaItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub has_more: bool,
    pub filters: MediaFilters,
    pub context_groups: Vec<ContextGroup>,
    /// Whether a page fetch is in flight.
    pub fetching: bool,
    /// Ids mid-action, sorted for stable rendering.
    pub actions_in_flight: Vec<MediaId>,
    /// Selected ids, sorted for stable rendering.
    pub selection: Vec<MediaId>,
    pub preview: Option<MediaId>,
    pub context: Option<ContextDetail>,
}

impl QueueSnapshot {
    pub(crate) fn of(state: &QueueState) -> Self {
        let mut actions_in_flight: Vec<MediaId> =
            state.actions_in_flight.iter().cloned().collect();
        actions_in_flight.sort();
        let mut selection: Vec<MediaId> = state.selection.iter().cloned().collect();
        selection.sort();

        Self {
            items: state.items.clone(),
            page: state.page,
            total_pages: state.total_pages,
            total: state.total,
            has_more: state.has_more,
            filters: state.filters.clone(),
            context_groups: state.context_groups.clone(),
            fetching: state.fetch_in_flight,
            actions_in_flight,
            selection,
            preview: state.preview.clone(),
            context: state.context.clone(),
        }
    }
}
