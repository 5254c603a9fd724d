//! Shared test doubles and builders for the moderation engine tests.
//!
//! The mocks are hand-rolled and channel-gated: a test can hold any
//! service call open at its await point and release it later, which makes
//! interleaving-sensitive properties (single-flight, stale discard,
//! out-of-order bulk completion) deterministic.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use heavyhire_client::error::ServiceError;
use heavyhire_client::service::{ContextLookupService, ModerationService};
use heavyhire_client::types::{
    EquipmentDetail, EquipmentTypeDetail, ListMediaQuery, MediaPage, ModerationDecision,
    RentalRequestDetail,
};
use heavyhire_core::media::{ContextKind, MediaItem, MediaKind, MediaStatus};
use heavyhire_core::types::{ContextId, MediaId};
use heavyhire_moderation::queue::ModerationQueue;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build a media item with the given id and status.
///
/// The item is attached to an equipment context `ctx-{id}` so the default
/// lookup path is exercised.
pub fn media_item(id: &str, status: MediaStatus) -> MediaItem {
    media_item_with_context(id, status, ContextKind::Equipment, &format!("ctx-{id}"))
}

/// Build a media item attached to a specific context.
pub fn media_item_with_context(
    id: &str,
    status: MediaStatus,
    context_kind: ContextKind,
    context_id: &str,
) -> MediaItem {
    let now = chrono::Utc::now();
    MediaItem {
        id: id.to_string(),
        status,
        media_kind: MediaKind::Image,
        context_kind,
        context_id: context_id.to_string(),
        moderation_score: Some(12),
        moderation_labels: Vec::new(),
        rejection_reason: None,
        url: format!("https://cdn.heavyhire.test/media/{id}"),
        thumbnail_url: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build a listing page.
pub fn page_of(items: Vec<MediaItem>, page: u32, total_pages: u32) -> MediaPage {
    let total = items.len() as u64 * total_pages as u64;
    MediaPage {
        items,
        page,
        total_pages,
        total,
        context_groups: Vec::new(),
    }
}

/// Build an engine over the given mocks.
pub fn engine(backend: Arc<MockBackend>, lookup: Arc<MockLookup>) -> Arc<ModerationQueue> {
    ModerationQueue::new(backend, lookup)
}

/// Collect every event already delivered to the receiver.
pub fn drain_events(
    rx: &mut tokio::sync::broadcast::Receiver<heavyhire_moderation::events::ModerationEvent>,
) -> Vec<heavyhire_moderation::events::ModerationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Install a test subscriber once so failures print engine logs.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn api_error(message: &str) -> ServiceError {
    ServiceError::Api {
        status: 500,
        body: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Holds a mock call open until the test releases it.
///
/// `entered`/`open` each carry a stored permit, so the orderings
/// "open before pass" and "pass before entered" are both safe.
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Called by the mock inside the gated service call.
    pub async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }

    /// Wait until the gated call has reached its await point.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the gated call proceed.
    pub fn open(&self) {
        self.release.notify_one();
    }
}

// ---------------------------------------------------------------------------
// MockBackend
// ---------------------------------------------------------------------------

/// In-memory [`ModerationService`] with scripted pages and per-id failures.
#[derive(Default)]
pub struct MockBackend {
    /// Scripted responses for successive list calls (front = next). An
    /// exhausted script returns an empty final page.
    pages: Mutex<VecDeque<Result<MediaPage, String>>>,
    /// Ids whose approve/reject calls fail.
    failing: Mutex<HashSet<MediaId>>,
    /// Optional gate for list calls.
    list_gate: Mutex<Option<Arc<Gate>>>,
    /// Optional gates keyed by media id for action calls.
    action_gates: Mutex<HashMap<MediaId, Arc<Gate>>>,
    /// Every listing query the engine issued.
    pub queries: Mutex<Vec<ListMediaQuery>>,
    /// Every id an action call was issued for.
    pub action_calls: Mutex<Vec<MediaId>>,
    pub list_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_page(&self, page: MediaPage) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_list_error(&self, message: &str) {
        self.pages.lock().unwrap().push_back(Err(message.to_string()));
    }

    pub fn fail_action(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Gate the next list calls; they block until the gate opens.
    pub fn gate_list(&self) -> Arc<Gate> {
        let gate = Gate::new();
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Gate action calls for one id.
    pub fn gate_action(&self, id: &str) -> Arc<Gate> {
        let gate = Gate::new();
        self.action_gates
            .lock()
            .unwrap()
            .insert(id.to_string(), gate.clone());
        gate
    }

    fn decide(&self, id: &MediaId, status: MediaStatus, reason: Option<&str>) -> Result<ModerationDecision, ServiceError> {
        if self.failing.lock().unwrap().contains(id) {
            return Err(api_error(&format!("decision rejected upstream for {id}")));
        }
        let url = match status {
            // Approval moves the file to its public location.
            MediaStatus::Approved => Some(format!("https://cdn.heavyhire.test/public/{id}")),
            _ => None,
        };
        Ok(ModerationDecision {
            id: id.clone(),
            status,
            url,
            rejection_reason: reason.map(str::to_string),
        })
    }
}

#[async_trait]
impl ModerationService for MockBackend {
    async fn list_media(&self, query: &ListMediaQuery) -> Result<MediaPage, ServiceError> {
        self.queries.lock().unwrap().push(query.clone());
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }

        let scripted = self.pages.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(page)) => Ok(page),
            Some(Err(message)) => Err(api_error(&message)),
            None => Ok(MediaPage {
                items: Vec::new(),
                page: query.page,
                total_pages: query.page,
                total: 0,
                context_groups: Vec::new(),
            }),
        }
    }

    async fn approve_media(&self, id: &MediaId) -> Result<ModerationDecision, ServiceError> {
        self.action_calls.lock().unwrap().push(id.clone());
        let gate = self.action_gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.decide(id, MediaStatus::Approved, None)
    }

    async fn reject_media(
        &self,
        id: &MediaId,
        reason: Option<&str>,
    ) -> Result<ModerationDecision, ServiceError> {
        self.action_calls.lock().unwrap().push(id.clone());
        let gate = self.action_gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.decide(id, MediaStatus::Rejected, reason)
    }
}

// ---------------------------------------------------------------------------
// MockLookup
// ---------------------------------------------------------------------------

/// In-memory [`ContextLookupService`] with per-context gates and failures.
#[derive(Default)]
pub struct MockLookup {
    gates: Mutex<HashMap<ContextId, Arc<Gate>>>,
    failing: Mutex<HashSet<ContextId>>,
    /// Every context id a lookup was issued for.
    pub calls: Mutex<Vec<ContextId>>,
}

impl MockLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Gate lookups for one context id.
    pub fn gate(&self, context_id: &str) -> Arc<Gate> {
        let gate = Gate::new();
        self.gates
            .lock()
            .unwrap()
            .insert(context_id.to_string(), gate.clone());
        gate
    }

    pub fn fail(&self, context_id: &str) {
        self.failing.lock().unwrap().insert(context_id.to_string());
    }

    async fn enter(&self, id: &ContextId) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(id.clone());
        let gate = self.gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if self.failing.lock().unwrap().contains(id) {
            return Err(api_error(&format!("lookup failed for {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ContextLookupService for MockLookup {
    async fn rental_request(&self, id: &ContextId) -> Result<RentalRequestDetail, ServiceError> {
        self.enter(id).await?;
        let now = chrono::Utc::now();
        Ok(RentalRequestDetail {
            id: id.clone(),
            equipment_name: "Liebherr LTM 1060".to_string(),
            renter_name: "Aldridge Civil Ltd".to_string(),
            start_date: now,
            end_date: now,
            status: "confirmed".to_string(),
        })
    }

    async fn equipment(&self, id: &ContextId) -> Result<EquipmentDetail, ServiceError> {
        self.enter(id).await?;
        Ok(EquipmentDetail {
            id: id.clone(),
            name: "CAT 320 Excavator".to_string(),
            model: Some("320-07A".to_string()),
            owner_name: "Harber Plant Hire".to_string(),
            equipment_type: "Excavator".to_string(),
        })
    }

    async fn equipment_type(&self, id: &ContextId) -> Result<EquipmentTypeDetail, ServiceError> {
        self.enter(id).await?;
        Ok(EquipmentTypeDetail {
            id: id.clone(),
            name: "Telehandler".to_string(),
            category: Some("Lifting".to_string()),
        })
    }
}
