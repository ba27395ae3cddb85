//! Snippet domain model.

use serde::{Deserialize, Serialize};

use crate::ids::SnippetId;

/// Reusable text fragment pasted through shortcuts or the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields supplied by the caller when creating a snippet.
///
/// `id`, `createdAt` and `updatedAt` are assigned by the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update. `None` leaves a field untouched; for the optional fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub shortcut: Option<Option<String>>,
    pub category: Option<Option<String>>,
}

impl Snippet {
    pub fn create(id: SnippetId, fields: NewSnippet, now_ms: i64) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            shortcut: fields.shortcut,
            category: fields.category,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Overwrite the patched fields and bump `updated_at`.
    pub fn apply(&mut self, patch: SnippetPatch, now_ms: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(shortcut) = patch.shortcut {
            self.shortcut = shortcut;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.updated_at = now_ms;
    }

    /// Case-insensitive match on title, content or category.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle_lower))
    }
}

/// Filter snippets for a search term. A blank term keeps every snippet in
/// its original order.
pub fn filter_snippets<'a>(snippets: &'a [Snippet], term: &str) -> Vec<&'a Snippet> {
    if term.trim().is_empty() {
        return snippets.iter().collect();
    }

    let needle = term.to_lowercase();
    snippets.iter().filter(|s| s.matches(&needle)).collect()
}

/// Shortcut strings bound to the indexed paste command `n`.
pub fn indexed_shortcuts(n: usize) -> [String; 2] {
    [format!("Ctrl+Shift+{n}"), format!("Command+Shift+{n}")]
}

/// Resolve the snippet for `paste_snippet_<n>`.
///
/// A snippet that explicitly declares the matching shortcut wins; otherwise
/// the 1-based position `n` in the collection is used.
pub fn resolve_indexed_snippet(snippets: &[Snippet], n: usize) -> Option<&Snippet> {
    let bindings = indexed_shortcuts(n);
    snippets
        .iter()
        .find(|s| {
            s.shortcut
                .as_deref()
                .is_some_and(|shortcut| bindings.iter().any(|b| b == shortcut))
        })
        .or_else(|| n.checked_sub(1).and_then(|idx| snippets.get(idx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: &str, title: &str, shortcut: Option<&str>) -> Snippet {
        Snippet {
            id: SnippetId::from(id),
            title: title.to_string(),
            content: format!("{title} body"),
            shortcut: shortcut.map(str::to_string),
            category: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_order() {
        let snippets = vec![snippet("1", "Foo", None), snippet("2", "Bar", None)];

        let hits: Vec<_> = filter_snippets(&snippets, "fo")
            .into_iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(hits, vec!["Foo"]);

        let all: Vec<_> = filter_snippets(&snippets, "")
            .into_iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(all, vec!["Foo", "Bar"]);
    }

    #[test]
    fn filter_matches_category() {
        let mut s = snippet("1", "Greeting", None);
        s.category = Some("Email".to_string());
        let snippets = vec![s];

        assert_eq!(filter_snippets(&snippets, "EMAIL").len(), 1);
    }

    #[test]
    fn positional_resolution_is_one_based() {
        let snippets = vec![
            snippet("a", "A", None),
            snippet("b", "B", None),
            snippet("c", "C", None),
        ];

        assert_eq!(resolve_indexed_snippet(&snippets, 2).unwrap().id, "b");
        assert!(resolve_indexed_snippet(&snippets, 4).is_none());
        assert!(resolve_indexed_snippet(&snippets, 0).is_none());
    }

    #[test]
    fn explicit_shortcut_beats_position() {
        let snippets = vec![
            snippet("a", "A", None),
            snippet("b", "B", None),
            snippet("c", "C", Some("Ctrl+Shift+2")),
        ];

        assert_eq!(resolve_indexed_snippet(&snippets, 2).unwrap().id, "c");
    }

    #[test]
    fn command_shortcut_variant_is_recognized() {
        let snippets = vec![snippet("a", "A", None), snippet("mac", "M", Some("Command+Shift+1"))];

        assert_eq!(resolve_indexed_snippet(&snippets, 1).unwrap().id, "mac");
    }

    #[test]
    fn patch_bumps_updated_at_and_clears_optionals() {
        let mut s = snippet("a", "A", Some("Ctrl+Shift+1"));
        s.apply(
            SnippetPatch {
                title: Some("Renamed".to_string()),
                shortcut: Some(None),
                ..Default::default()
            },
            42,
        );

        assert_eq!(s.title, "Renamed");
        assert_eq!(s.shortcut, None);
        assert_eq!(s.updated_at, 42);
        assert_eq!(s.created_at, 0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let s = snippet("a", "A", None);
        let json = serde_json::to_value(&s).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("shortcut").is_none());
    }
}
