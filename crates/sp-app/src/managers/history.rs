use anyhow::Result;
use sp_core::storage_keys;
use sp_core::PasteRecord;

use crate::storage::TypedStore;

/// Paste history, newest first, capped.
pub struct PasteHistory {
    store: TypedStore,
    max_entries: usize,
}

impl PasteHistory {
    pub fn new(store: TypedStore, max_entries: usize) -> Self {
        Self { store, max_entries }
    }

    pub async fn list(&self) -> Result<Vec<PasteRecord>> {
        self.store.load_list(storage_keys::PASTE_HISTORY).await
    }

    pub async fn append(&self, record: PasteRecord) -> Result<()> {
        let mut records = self.list().await?;
        records.insert(0, record);
        records.truncate(self.max_entries);
        self.store.save(storage_keys::PASTE_HISTORY, &records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;
    use sp_core::SnippetId;

    fn record(ts: i64) -> PasteRecord {
        PasteRecord {
            snippet_id: Some(SnippetId::from("s")),
            item_id: None,
            timestamp: ts,
            url: "https://example.com".into(),
            element_type: "INPUT".into(),
        }
    }

    #[tokio::test]
    async fn keeps_newest_entries_up_to_cap() {
        let history = PasteHistory::new(memory_store(), 3);
        for ts in 0..5 {
            history.append(record(ts)).await.unwrap();
        }

        let stamps: Vec<_> = history.list().await.unwrap().iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![4, 3, 2]);
    }
}
