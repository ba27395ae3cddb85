//! Snapshot model of the focused page element.
//!
//! Adapters read the live DOM into an [`ActiveElement`], the paste algorithm
//! computes the new state, and the adapter writes it back together with the
//! synthesized events. All offsets are character offsets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveElement {
    /// Upper-case tag name, as reported by the DOM.
    pub tag_name: String,
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ElementKind {
    /// `<input>` or `<textarea>`.
    TextControl(TextControl),
    /// Element with `contentEditable` in effect.
    RichText(RichTextEditor),
    NonEditable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextControl {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
    /// `type` attribute of an `<input>`; `None` for textareas.
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextEditor {
    /// Serialized inner markup.
    pub markup: String,
    /// Active selection range inside `markup`, if the document has one.
    #[serde(default)]
    pub selection: Option<TextRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEventKind {
    Input,
    Change,
}

/// Event synthesized after a programmatic mutation so page frameworks observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomEvent {
    pub kind: DomEventKind,
    pub bubbles: bool,
}

impl DomEvent {
    pub fn input() -> Self {
        Self {
            kind: DomEventKind::Input,
            bubbles: true,
        }
    }

    pub fn change() -> Self {
        Self {
            kind: DomEventKind::Change,
            bubbles: true,
        }
    }
}

impl ActiveElement {
    /// Single-line `<input type="text">` with the caret at the end.
    pub fn input(value: &str) -> Self {
        Self::text_control("INPUT", value, Some("text".to_string()))
    }

    /// `<textarea>` with the caret at the end.
    pub fn textarea(value: &str) -> Self {
        Self::text_control("TEXTAREA", value, None)
    }

    fn text_control(tag: &str, value: &str, input_type: Option<String>) -> Self {
        let end = value.chars().count();
        Self {
            tag_name: tag.to_string(),
            kind: ElementKind::TextControl(TextControl {
                value: value.to_string(),
                selection_start: end,
                selection_end: end,
                input_type,
                disabled: false,
                read_only: false,
            }),
        }
    }

    /// `contentEditable` element without an active selection.
    pub fn content_editable(tag: &str, markup: &str) -> Self {
        Self {
            tag_name: tag.to_ascii_uppercase(),
            kind: ElementKind::RichText(RichTextEditor {
                markup: markup.to_string(),
                selection: None,
            }),
        }
    }

    pub fn non_editable(tag: &str) -> Self {
        Self {
            tag_name: tag.to_ascii_uppercase(),
            kind: ElementKind::NonEditable,
        }
    }

    /// Set the selection range (text controls and rich-text elements).
    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        match &mut self.kind {
            ElementKind::TextControl(control) => {
                control.selection_start = start;
                control.selection_end = end;
            }
            ElementKind::RichText(editor) => {
                editor.selection = Some(TextRange { start, end });
            }
            ElementKind::NonEditable => {}
        }
        self
    }

    pub fn with_input_type(mut self, input_type: &str) -> Self {
        if let ElementKind::TextControl(control) = &mut self.kind {
            control.input_type = Some(input_type.to_string());
        }
        self
    }

    pub fn disabled(mut self) -> Self {
        if let ElementKind::TextControl(control) = &mut self.kind {
            control.disabled = true;
        }
        self
    }

    pub fn read_only(mut self) -> Self {
        if let ElementKind::TextControl(control) = &mut self.kind {
            control.read_only = true;
        }
        self
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::TextControl(control) => Some(&control.value),
            _ => None,
        }
    }

    pub fn markup(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::RichText(editor) => Some(&editor.markup),
            _ => None,
        }
    }
}
