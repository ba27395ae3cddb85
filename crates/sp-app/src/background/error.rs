use thiserror::Error;

/// Failure to reach the content script of a tab.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("no active tab")]
    NoActiveTab,

    #[error("content scripts are not allowed on this page: {url}")]
    UnsupportedTab { url: String },

    #[error("content script injection failed: {0}")]
    Injection(String),

    /// Message delivery failed after every attempt; carries the last host error.
    #[error("{0}")]
    Delivery(String),

    #[error("host error: {0}")]
    Host(String),
}

/// Paste request rejected before any page is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasteValidationError {
    #[error("No favorite clipboard item found")]
    NoFavorite,

    #[error("Favorite clipboard item has no text content")]
    EmptyContent,

    #[error("No snippet bound to shortcut {0}")]
    NoSnippetForShortcut(usize),
}
