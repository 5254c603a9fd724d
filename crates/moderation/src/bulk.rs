//! Bulk moderation over the reviewer selection.

use heavyhire_client::service::ModerationService;
use heavyhire_client::types::{BulkItemOutcome, BulkOutcome};
use heavyhire_core::types::MediaId;

use crate::actions::ModerationAction;
use crate::events::ModerationEvent;
use crate::queue::ModerationQueue;

impl ModerationQueue {
    // ------------------------------------------------------------------
    // Selection management
    // ------------------------------------------------------------------

    /// Toggle an item in the bulk selection; returns whether it is now
    /// selected.
    ///
    /// Only actionable items that are not mid-action can enter the
    /// selection; toggling anything else is a no-op that returns `false`.
    pub async fn toggle_selected(&self, id: &MediaId) -> bool {
        let mut state = self.state.lock().await;
        if state.selection.remove(id) {
            return false;
        }
        let selectable = state
            .item(id)
            .map(|item| item.is_actionable())
            .unwrap_or(false)
            && !state.actions_in_flight.contains(id);
        if selectable {
            state.selection.insert(id.clone());
        }
        selectable
    }

    /// Select every actionable item currently in the view; returns the
    /// selection size.
    pub async fn select_all_actionable(&self) -> usize {
        let mut state = self.state.lock().await;
        let ids: Vec<MediaId> = state
            .items
            .iter()
            .filter(|item| item.is_actionable())
            .map(|item| item.id.clone())
            .filter(|id| !state.actions_in_flight.contains(id))
            .collect();
        state.selection.extend(ids);
        state.selection.len()
    }

    /// Clear the bulk selection.
    pub async fn clear_selection(&self) {
        self.state.lock().await.selection.clear();
    }

    /// Selected ids, sorted.
    pub async fn selection(&self) -> Vec<MediaId> {
        let state = self.state.lock().await;
        let mut ids: Vec<MediaId> = state.selection.iter().cloned().collect();
        ids.sort();
        ids
    }

    // ------------------------------------------------------------------
    // Bulk actions
    // ------------------------------------------------------------------

    /// Apply one decision to every id in `ids`.
    ///
    /// All ids join the in-flight set before any member starts; members
    /// then settle independently (one failure neither aborts nor rolls
    /// back the others) and the store is updated only for the ids that
    /// succeeded, keyed by id so completion order does not matter. Ids
    /// that already had an action in flight are reported as failed members
    /// without a service call.
    ///
    /// The returned outcome always carries every member's result and the
    /// aggregate `success` flag; the same information goes out as a
    /// [`ModerationEvent::BulkCompleted`], so a partially-failed batch is
    /// reviewer-visible even if the caller drops the return value. The
    /// in-flight entries and the reviewer selection are cleared either
    /// way.
    pub async fn bulk_act(
        &self,
        ids: &[MediaId],
        action: ModerationAction,
        reason: Option<&str>,
    ) -> BulkOutcome {
        let (fresh, busy): (Vec<MediaId>, Vec<MediaId>) = {
            let mut state = self.state.lock().await;
            let mut fresh = Vec::new();
            let mut busy = Vec::new();
            for id in ids {
                if state.actions_in_flight.insert(id.clone()) {
                    fresh.push(id.clone());
                } else {
                    busy.push(id.clone());
                }
            }
            (fresh, busy)
        };

        let outcome = match action {
            ModerationAction::Approve => self.service.bulk_approve(&fresh).await,
            ModerationAction::Reject => self.service.bulk_reject(&fresh, reason).await,
        };

        {
            let mut state = self.state.lock().await;
            for member in &outcome.results {
                if let Ok(decision) = &member.result {
                    Self::apply_decision(&mut state, decision);
                }
            }
            for id in &fresh {
                state.actions_in_flight.remove(id);
            }
            state.selection.clear();
        }

        let mut results = outcome.results;
        results.extend(busy.into_iter().map(|id| BulkItemOutcome {
            id,
            result: Err("action already in flight".to_string()),
        }));
        let success = results.iter().all(|member| member.result.is_ok());
        let outcome = BulkOutcome { success, results };

        let failed_ids = outcome.failed_ids();
        let succeeded = outcome.results.len() - failed_ids.len();
        if outcome.success {
            tracing::info!(
                requested = ids.len(),
                decision = action.as_str(),
                "Bulk moderation completed"
            );
        } else {
            tracing::warn!(
                requested = ids.len(),
                failed = failed_ids.len(),
                decision = action.as_str(),
                "Bulk moderation completed with failures"
            );
        }
        self.publish(ModerationEvent::BulkCompleted {
            requested: ids.len(),
            succeeded,
            failed_ids,
            success: outcome.success,
        });

        outcome
    }

    /// Apply one decision to the current selection.
    ///
    /// This is the dashboard's bulk entry point: the selection is already
    /// restricted to actionable items by [`toggle_selected`] and
    /// [`select_all_actionable`].
    ///
    /// [`toggle_selected`]: Self::toggle_selected
    /// [`select_all_actionable`]: Self::select_all_actionable
    pub async fn bulk_act_selected(
        &self,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> BulkOutcome {
        let ids = self.selection().await;
        self.bulk_act(&ids, action, reason).await
    }
}
