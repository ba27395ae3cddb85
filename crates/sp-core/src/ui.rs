//! Popup/settings UI state.

use serde::{Deserialize, Serialize};

/// Panel shown when the extension page opens; the last choice is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UiPanel {
    #[default]
    Dashboard,
    BookmarkManager,
    TaskManager,
    HabitManager,
    MoneyManager,
}

impl UiPanel {
    /// Panel bound to the digit hotkeys `1`..`5` on the extension page.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::Dashboard),
            2 => Some(Self::BookmarkManager),
            3 => Some(Self::TaskManager),
            4 => Some(Self::HabitManager),
            5 => Some(Self::MoneyManager),
            _ => None,
        }
    }
}
