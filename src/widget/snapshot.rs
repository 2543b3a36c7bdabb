//! Owned view of a widget for rendering.

use super::chat::ChatWidget;
use super::message::{Turn, TurnId};

/// Everything the markup components need, detached from the live widget so
/// it can be rendered without holding a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    /// Transcript turns in order.
    pub turns: Vec<Turn>,
    /// Turn the view is scrolled to.
    pub scrolled_to: Option<TurnId>,
    /// Current input value.
    pub input_value: String,
    /// Whether the input field has focus.
    pub input_focused: bool,
    /// Name of the staged file.
    pub attachment_name: Option<String>,
    /// Whether the file picker is offered at all.
    pub attachments_enabled: bool,
    /// Whether a request is outstanding.
    pub pending: bool,
}

impl From<&ChatWidget> for WidgetSnapshot {
    fn from(widget: &ChatWidget) -> Self {
        Self {
            turns: widget.transcript().turns().to_vec(),
            scrolled_to: widget.transcript().scrolled_to(),
            input_value: widget.input().value().to_string(),
            input_focused: widget.input().is_focused(),
            attachment_name: widget.attachment().display_name().map(str::to_string),
            attachments_enabled: widget.options().attachments_enabled,
            pending: widget.is_pending(),
        }
    }
}
