//! Chat shell layout component.

use leptos::prelude::*;

use super::{AttachmentPicker, ChatHeader, ChatInputArea, ChatTranscript, widget_path};
use crate::widget::WidgetSnapshot;

/// The whole widget: header, transcript, input area and file picker.
///
/// Every form inside targets the shell itself, so each response replaces the
/// widget wholesale. While a request is outstanding the shell carries a
/// loader that waits on the `settled` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <ChatShell widget_id=id snapshot=WidgetSnapshot::from(&widget) />
/// }
/// ```
#[component]
pub fn ChatShell(
    /// Widget identity in the host.
    widget_id: String,
    /// State to render.
    snapshot: WidgetSnapshot,
    /// Title displayed in the header.
    #[prop(default = "AI Assistant")]
    title: &'static str,
    /// Why the last file pick was refused.
    #[prop(default = None)]
    notice: Option<String>,
) -> impl IntoView {
    let WidgetSnapshot {
        turns,
        scrolled_to,
        input_value,
        input_focused,
        attachment_name,
        attachments_enabled,
        pending,
    } = snapshot;

    let settled_url = widget_path(&widget_id, "settled");
    let picker_id = widget_id.clone();

    view! {
        <div
            id="chat-widget"
            class="chat-shell flex flex-col h-[calc(100vh-6rem)] bg-panel border border-panelBorder rounded-2xl overflow-hidden"
            hx-target="this"
            hx-swap="outerHTML"
        >
            <ChatHeader title=title pending=pending />

            <ChatTranscript turns=turns scrolled_to=scrolled_to />

            <div class="border-t border-panelBorder p-4 bg-panel/50 backdrop-blur-sm">
                <ChatInputArea
                    widget_id=widget_id
                    value=input_value
                    focused=input_focused
                    pending=pending
                />

                {attachments_enabled.then(|| view! {
                    <AttachmentPicker
                        widget_id=picker_id
                        file_name=attachment_name
                        pending=pending
                    />
                })}

                {notice.map(|notice| view! {
                    <p id="attachment-notice" class="text-xs text-red-400 mt-2" role="alert">
                        {notice}
                    </p>
                })}

                <p class="text-xs text-textMuted mt-2 text-center">
                    "Press Enter to send, Shift+Enter for new line"
                </p>
            </div>

            {pending.then(|| view! {
                <div class="hidden" hx-get=settled_url hx-trigger="load"></div>
            })}
        </div>
    }
}
