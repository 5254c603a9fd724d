//! Preview navigation over the queue's visible order.

use heavyhire_core::media::MediaItem;
use heavyhire_core::types::MediaId;

use crate::actions::ModerationAction;
use crate::context::ContextDetail;
use crate::error::QueueError;
use crate::events::ModerationEvent;
use crate::queue::ModerationQueue;

/// Where the preview landed after an act-and-advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The preview moved to the next actionable item.
    Advanced(MediaId),
    /// No actionable item remained; the preview closed.
    Closed,
}

impl ModerationQueue {
    /// Open the preview on `id` and resolve its context detail.
    ///
    /// Bumps the preview epoch, which invalidates any context lookup still
    /// in flight for the previous target. The context detail is primed as
    /// loading before the lookup is issued; if `id` is not in the view the
    /// detail is simply cleared.
    pub async fn open_preview(&self, id: &MediaId) {
        let target = {
            let mut state = self.state.lock().await;
            state.preview = Some(id.clone());
            state.preview_epoch += 1;
            let epoch = state.preview_epoch;

            let context_ref = state
                .item(id)
                .map(|item| (item.context_kind, item.context_id.clone()));
            match context_ref {
                Some((kind, context_id)) => {
                    state.context = Some(ContextDetail {
                        kind,
                        context_id: context_id.clone(),
                        payload: None,
                        loading: true,
                        error: None,
                    });
                    Some((kind, context_id, epoch))
                }
                None => {
                    state.context = None;
                    None
                }
            }
        };

        self.publish(ModerationEvent::PreviewOpened { id: id.clone() });

        if let Some((kind, context_id, epoch)) = target {
            self.resolve_context(id.clone(), kind, context_id, epoch)
                .await;
        }
    }

    /// Close the preview and drop its context detail.
    ///
    /// Also bumps the epoch so that a lookup still in flight for the closed
    /// target cannot write into a preview that no longer exists.
    pub async fn close_preview(&self) {
        {
            let mut state = self.state.lock().await;
            state.preview = None;
            state.preview_epoch += 1;
            state.context = None;
        }
        self.publish(ModerationEvent::PreviewClosed);
    }

    /// Approve the previewed item and advance to the next actionable one.
    ///
    /// On action failure the preview stays where it is and the error
    /// propagates. When no other actionable item remains the preview
    /// closes.
    pub async fn approve_and_advance(&self, id: &MediaId) -> Result<AdvanceOutcome, QueueError> {
        self.act_and_advance(id, ModerationAction::Approve, None).await
    }

    /// Reject the previewed item with an optional reason and advance.
    pub async fn reject_and_advance(
        &self,
        id: &MediaId,
        reason: Option<&str>,
    ) -> Result<AdvanceOutcome, QueueError> {
        self.act_and_advance(id, ModerationAction::Reject, reason).await
    }

    async fn act_and_advance(
        &self,
        id: &MediaId,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<AdvanceOutcome, QueueError> {
        self.act(id, action, reason).await?;

        let next = {
            let state = self.state.lock().await;
            first_actionable_after(&state.items, id)
        };
        match next {
            Some(next_id) => {
                self.open_preview(&next_id).await;
                Ok(AdvanceOutcome::Advanced(next_id))
            }
            None => {
                self.close_preview().await;
                Ok(AdvanceOutcome::Closed)
            }
        }
    }
}

/// Find the next actionable item after `id` in the visible order.
///
/// Scans strictly after `id`'s position, then wraps around to the start,
/// and never returns `id` itself. Returns `None` when `id` is absent from
/// the view (e.g. a concurrent filter change removed it) or no other
/// actionable entry exists.
pub(crate) fn first_actionable_after(items: &[MediaItem], id: &MediaId) -> Option<MediaId> {
    let position = items.iter().position(|item| &item.id == id)?;
    items[position + 1..]
        .iter()
        .chain(items[..position].iter())
        .find(|item| item.is_actionable())
        .map(|item| item.id.clone())
}
