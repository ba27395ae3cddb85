use std::sync::Arc;

use sp_core::page::plan_paste;
use sp_core::ports::{ClockPort, PageDocumentPort};
use sp_core::{ClipboardItemId, PasteRecord, SnippetId};
use tracing::{debug, warn};

use crate::managers::PasteHistory;

/// Where pasted content came from, for the history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOrigin {
    Direct,
    ClipboardItem(Option<ClipboardItemId>),
    Snippet(SnippetId),
}

/// Inserts text into the focused element of the page.
pub struct PasteHandler {
    page: Arc<dyn PageDocumentPort>,
    history: Arc<PasteHistory>,
    clock: Arc<dyn ClockPort>,
}

impl PasteHandler {
    pub fn new(
        page: Arc<dyn PageDocumentPort>,
        history: Arc<PasteHistory>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            page,
            history,
            clock,
        }
    }

    /// Paste `content` at the caret. Returns whether anything was inserted.
    pub async fn paste(&self, content: &str, origin: PasteOrigin) -> bool {
        let Some(element) = self.page.active_element() else {
            debug!("paste skipped, nothing focused");
            return false;
        };

        let plan = match plan_paste(&element, content) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                debug!(tag = %element.tag_name, "paste skipped, element is not editable");
                return false;
            }
            Err(e) => {
                warn!(tag = %element.tag_name, error = %e, "paste failed");
                return false;
            }
        };

        if let Err(e) = self.page.commit_element(&plan.element, &plan.events) {
            warn!(tag = %element.tag_name, error = %e, "paste failed");
            return false;
        }

        self.record(element.tag_name, origin).await;
        true
    }

    async fn record(&self, element_type: String, origin: PasteOrigin) {
        let (snippet_id, item_id) = match origin {
            PasteOrigin::Direct => (None, None),
            PasteOrigin::ClipboardItem(item_id) => (None, item_id),
            PasteOrigin::Snippet(snippet_id) => (Some(snippet_id), None),
        };
        let record = PasteRecord {
            snippet_id,
            item_id,
            timestamp: self.clock.now_ms(),
            url: self.page.location_href(),
            element_type,
        };
        if let Err(e) = self.history.append(record).await {
            warn!(error = %format!("{e:#}"), "failed to record paste history");
        }
    }
}
