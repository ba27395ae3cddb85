use serde::{Deserialize, Serialize};

use super::element::{ActiveElement, ElementKind};

/// Focused element summary returned by `getActiveElementInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveElementInfo {
    pub tag_name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub can_paste: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_end: Option<usize>,
}

impl ActiveElementInfo {
    pub fn describe(element: &ActiveElement) -> Self {
        match &element.kind {
            ElementKind::TextControl(control) => Self {
                tag_name: element.tag_name.clone(),
                element_type: control
                    .input_type
                    .clone()
                    .unwrap_or_else(|| element.tag_name.to_ascii_lowercase()),
                can_paste: !control.disabled && !control.read_only,
                selection_start: Some(control.selection_start),
                selection_end: Some(control.selection_end),
            },
            ElementKind::RichText(_) => Self {
                tag_name: element.tag_name.clone(),
                element_type: "contenteditable".to_string(),
                can_paste: true,
                selection_start: None,
                selection_end: None,
            },
            ElementKind::NonEditable => Self {
                tag_name: element.tag_name.clone(),
                element_type: "unknown".to_string(),
                can_paste: false,
                selection_start: None,
                selection_end: None,
            },
        }
    }
}
