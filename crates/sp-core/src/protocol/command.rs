use std::str::FromStr;

use super::error::ProtocolError;

pub const OPEN_OVERLAY_COMMAND: &str = "open_snippet_overlay";
pub const PASTE_FAVORITE_COMMAND: &str = "paste_favorite_clipboard";
pub const PASTE_SNIPPET_PREFIX: &str = "paste_snippet_";

/// Host keyboard-shortcut command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    OpenOverlay,
    PasteFavorite,
    /// `paste_snippet_<n>`, `n` as written (1-based).
    PasteSnippet(usize),
}

impl FromStr for ShortcutCommand {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            OPEN_OVERLAY_COMMAND => Ok(Self::OpenOverlay),
            PASTE_FAVORITE_COMMAND => Ok(Self::PasteFavorite),
            _ => s
                .strip_prefix(PASTE_SNIPPET_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .map(Self::PasteSnippet)
                .ok_or_else(|| ProtocolError::UnknownCommand(s.to_string())),
        }
    }
}
