//! Chat widget components.
//!
//! These components render a [`crate::widget::WidgetSnapshot`] and wire the
//! controls to the host's `/chat/{id}/...` endpoints with HTMX attributes.

mod attachment;
mod header;
mod input_area;
mod shell;
mod transcript;

pub use attachment::{AttachmentChip, AttachmentPicker};
pub use header::ChatHeader;
pub use input_area::ChatInputArea;
pub use shell::ChatShell;
pub use transcript::{ChatTranscript, TranscriptTurn};

/// Path of a widget endpoint, e.g. `/chat/{id}/send`.
#[must_use]
pub fn widget_path(widget_id: &str, action: &str) -> String {
    format!("/chat/{widget_id}/{action}")
}
