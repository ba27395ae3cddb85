use std::sync::Arc;

use anyhow::Result;
use sp_core::ids::SnippetId;
use sp_core::ports::ClockPort;
use sp_core::snippet::{filter_snippets, NewSnippet, SnippetPatch};
use sp_core::storage_keys;
use sp_core::Snippet;
use tracing::debug;

use crate::storage::TypedStore;

/// Snippet collection stored under `shortcutpaste_snippets`, in creation order.
pub struct SnippetManager {
    store: TypedStore,
    clock: Arc<dyn ClockPort>,
}

impl SnippetManager {
    pub fn new(store: TypedStore, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn list(&self) -> Result<Vec<Snippet>> {
        self.store.load_list(storage_keys::SNIPPETS).await
    }

    pub async fn get(&self, id: &SnippetId) -> Result<Option<Snippet>> {
        Ok(self.list().await?.into_iter().find(|s| &s.id == id))
    }

    pub async fn create(&self, fields: NewSnippet) -> Result<Snippet> {
        let mut snippets = self.list().await?;
        let snippet = Snippet::create(SnippetId::new(), fields, self.clock.now_ms());
        snippets.push(snippet.clone());
        self.save(&snippets).await?;
        debug!(snippet_id = %snippet.id, "snippet created");
        Ok(snippet)
    }

    /// Apply `patch` to the snippet; `None` when no snippet has this id.
    pub async fn update(&self, id: &SnippetId, patch: SnippetPatch) -> Result<Option<Snippet>> {
        let mut snippets = self.list().await?;
        let Some(snippet) = snippets.iter_mut().find(|s| &s.id == id) else {
            return Ok(None);
        };
        snippet.apply(patch, self.clock.now_ms());
        let updated = snippet.clone();
        self.save(&snippets).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: &SnippetId) -> Result<bool> {
        let mut snippets = self.list().await?;
        let before = snippets.len();
        snippets.retain(|s| &s.id != id);
        if snippets.len() == before {
            return Ok(false);
        }
        self.save(&snippets).await?;
        Ok(true)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Snippet>> {
        let snippets = self.list().await?;
        Ok(filter_snippets(&snippets, term).into_iter().cloned().collect())
    }

    async fn save(&self, snippets: &[Snippet]) -> Result<()> {
        self.store.save(storage_keys::SNIPPETS, snippets).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_store, FixedClock};

    fn manager() -> (SnippetManager, Arc<FixedClock>) {
        let clock = FixedClock::new(1_000);
        (SnippetManager::new(memory_store(), clock.clone()), clock)
    }

    fn fields(title: &str) -> NewSnippet {
        NewSnippet {
            title: title.to_string(),
            content: format!("{title} body"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_appends_with_timestamps() {
        let (manager, _) = manager();

        let first = manager.create(fields("Foo")).await.unwrap();
        manager.create(fields("Bar")).await.unwrap();

        let titles: Vec<_> = manager.list().await.unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Foo", "Bar"]);
        assert_eq!(first.created_at, 1_000);
        assert_eq!(first.updated_at, 1_000);
    }

    #[tokio::test]
    async fn update_bumps_updated_at() {
        let (manager, clock) = manager();
        let snippet = manager.create(fields("Foo")).await.unwrap();
        clock.advance(500);

        let updated = manager
            .update(
                &snippet.id,
                SnippetPatch {
                    content: Some("new".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "new");
        assert_eq!(updated.updated_at, 1_500);
        assert_eq!(manager.get(&snippet.id).await.unwrap().unwrap().content, "new");
    }

    #[tokio::test]
    async fn update_of_missing_snippet_is_none() {
        let (manager, _) = manager();

        let result = manager
            .update(&SnippetId::from("ghost"), SnippetPatch::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let (manager, _) = manager();
        let snippet = manager.create(fields("Foo")).await.unwrap();

        assert!(manager.delete(&snippet.id).await.unwrap());
        assert!(!manager.delete(&snippet.id).await.unwrap());
        assert!(manager.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let (manager, _) = manager();
        manager.create(fields("Foo")).await.unwrap();
        manager.create(fields("Bar")).await.unwrap();

        let hits = manager.search("FO").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Foo");
        assert_eq!(manager.search("  ").await.unwrap().len(), 2);
    }
}
