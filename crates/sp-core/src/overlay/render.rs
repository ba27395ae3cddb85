use std::fmt::Write as _;

use crate::ids::SnippetId;
use crate::page::escape_html;
use crate::snippet::Snippet;

pub const OVERLAY_CLASS: &str = "shortcutpaste-overlay";
pub const EMPTY_PLACEHOLDER: &str = "No snippets found";

/// One list row. `title` and `content` hold raw text; escaping happens in
/// [`OverlayView::markup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    pub snippet_id: SnippetId,
    pub title: String,
    pub content: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub rows: Vec<OverlayRow>,
}

impl OverlayView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_id(&self) -> Option<&SnippetId> {
        self.rows.iter().find(|r| r.selected).map(|r| &r.snippet_id)
    }

    /// Full overlay markup: header, search box and the list body.
    pub fn markup(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            concat!(
                "<div class=\"{cls}\">",
                "<div class=\"{cls}-header\"><span>Select Snippet</span><span>Esc to close</span></div>",
                "<div class=\"{cls}-search\"><input type=\"text\" placeholder=\"Search snippets...\" /></div>",
                "<div class=\"{cls}-list\">"
            ),
            cls = OVERLAY_CLASS
        );

        if self.rows.is_empty() {
            let _ = write!(html, "<div class=\"{OVERLAY_CLASS}-empty\">{EMPTY_PLACEHOLDER}</div>");
        }
        for row in &self.rows {
            let selected = if row.selected { " selected" } else { "" };
            let _ = write!(
                html,
                concat!(
                    "<div class=\"{cls}-item{selected}\" data-id=\"{id}\">",
                    "<div class=\"{cls}-item-title\">{title}</div>",
                    "<div class=\"{cls}-item-content\">{content}</div>",
                    "</div>"
                ),
                cls = OVERLAY_CLASS,
                selected = selected,
                id = escape_html(row.snippet_id.as_str()),
                title = escape_html(&row.title),
                content = escape_html(&row.content),
            );
        }

        html.push_str("</div></div>");
        html
    }
}

pub fn render_overlay(visible: &[&Snippet], selected_index: usize) -> OverlayView {
    OverlayView {
        rows: visible
            .iter()
            .enumerate()
            .map(|(idx, snippet)| OverlayRow {
                snippet_id: snippet.id.clone(),
                title: snippet.title.clone(),
                content: snippet.content.clone(),
                selected: idx == selected_index,
            })
            .collect(),
    }
}
