//! File picker and staged attachment chip.

use leptos::prelude::*;

use super::widget_path;
use crate::ui::components::{ButtonVariant, PaperclipIcon};

/// File picker plus the name of the staged file and its removal control.
///
/// The picker input is rendered fresh every time, so after a removal or a
/// send it holds no value and the same file can be picked again.
#[component]
pub fn AttachmentPicker(
    /// Widget the picker posts to.
    widget_id: String,
    /// Name of the staged file.
    file_name: Option<String>,
    /// Whether a request is outstanding.
    #[prop(default = false)]
    pending: bool,
) -> impl IntoView {
    let attach_url = widget_path(&widget_id, "attachment");
    let remove_url = widget_path(&widget_id, "attachment/remove");

    view! {
        <div class="flex items-center gap-2 mt-2 text-sm">
            <form hx-post=attach_url hx-encoding="multipart/form-data" hx-trigger="change">
                <label
                    id="upload-file-button"
                    class="inline-flex items-center gap-1 cursor-pointer text-textMuted hover:text-textPrimary"
                    title="Attach a file"
                >
                    <PaperclipIcon class="h-4 w-4" />
                    <span>"Attach"</span>
                    <input id="file-input" type="file" name="file" class="hidden" disabled=pending />
                </label>
            </form>

            <div id="file-display-area" class="flex items-center gap-1">
                {file_name.map(|name| view! {
                    <AttachmentChip name=name remove_url=remove_url pending=pending />
                })}
            </div>
        </div>
    }
}

/// Name of the staged file with a remove button.
#[component]
pub fn AttachmentChip(
    /// File name.
    name: String,
    /// Endpoint that clears the attachment.
    remove_url: String,
    /// Whether a request is outstanding.
    #[prop(default = false)]
    pending: bool,
) -> impl IntoView {
    let remove_classes = format!(
        "remove-file-btn rounded-full px-2 {}",
        ButtonVariant::Ghost.classes()
    );

    view! {
        <span class="attachment-name rounded-full px-2 py-0.5 bg-panel border border-panelBorder">
            {name}
        </span>
        <button
            id="remove-file-button"
            type="button"
            class=remove_classes
            title="Remove file"
            hx-post=remove_url
            disabled=pending
        >
            "×"
        </button>
    }
}
