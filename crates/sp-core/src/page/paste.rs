//! Content insertion into the focused element.

use super::element::{
    ActiveElement, DomEvent, ElementKind, RichTextEditor, TextControl, TextRange,
};
use super::error::DomError;
use super::escape::escape_html;

/// New element state plus the events to dispatch after writing it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePlan {
    pub element: ActiveElement,
    pub events: Vec<DomEvent>,
}

/// Compute the result of pasting `content` into `element`.
///
/// Returns `Ok(None)` when the element does not accept text. Text controls
/// splice `content` over `[start, end)` and put the caret right after it;
/// rich-text elements either append raw markup (no selection) or replace the
/// selected range with a text node and collapse the selection after it.
pub fn plan_paste(element: &ActiveElement, content: &str) -> Result<Option<PastePlan>, DomError> {
    let (kind, events) = match &element.kind {
        ElementKind::TextControl(control) => (
            ElementKind::TextControl(splice_text_control(control, content)?),
            vec![DomEvent::input(), DomEvent::change()],
        ),
        ElementKind::RichText(editor) => match editor.selection {
            None => (
                ElementKind::RichText(RichTextEditor {
                    markup: format!("{}{}", editor.markup, content),
                    selection: None,
                }),
                Vec::new(),
            ),
            Some(range) => (
                ElementKind::RichText(replace_rich_selection(editor, range, content)?),
                vec![DomEvent::input()],
            ),
        },
        ElementKind::NonEditable => return Ok(None),
    };

    Ok(Some(PastePlan {
        element: ActiveElement {
            tag_name: element.tag_name.clone(),
            kind,
        },
        events,
    }))
}

fn splice_text_control(control: &TextControl, content: &str) -> Result<TextControl, DomError> {
    let (value, caret) = splice(
        &control.value,
        control.selection_start,
        control.selection_end,
        content,
    )?;
    Ok(TextControl {
        value,
        selection_start: caret,
        selection_end: caret,
        ..control.clone()
    })
}

fn replace_rich_selection(
    editor: &RichTextEditor,
    range: TextRange,
    content: &str,
) -> Result<RichTextEditor, DomError> {
    let text_node = escape_html(content);
    let (markup, caret) = splice(&editor.markup, range.start, range.end, &text_node)?;
    Ok(RichTextEditor {
        markup,
        selection: Some(TextRange::collapsed(caret)),
    })
}

/// `value[0:start] + insert + value[end:]`, with the caret offset after `insert`.
fn splice(value: &str, start: usize, end: usize, insert: &str) -> Result<(String, usize), DomError> {
    let len = value.chars().count();
    if start > end || end > len {
        return Err(DomError::IndexSize { start, end, len });
    }
    let start_byte = byte_offset(value, start);
    let end_byte = byte_offset(value, end);

    let mut out = String::with_capacity(value.len() + insert.len());
    out.push_str(&value[..start_byte]);
    out.push_str(insert);
    out.push_str(&value[end_byte..]);
    Ok((out, start + insert.chars().count()))
}

fn byte_offset(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map_or(value.len(), |(byte, _)| byte)
}
