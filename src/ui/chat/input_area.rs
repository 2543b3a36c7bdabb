//! Chat input area component.

use leptos::prelude::*;

use super::widget_path;
use crate::ui::components::{Button, ButtonSize, ButtonVariant, SendIcon};

/// Text input and send control, submitted with HTMX.
///
/// Enter without shift submits the form with the key recorded in the hidden
/// `key` and `shift` fields, so the host decides what the press does. That
/// binding lives in `static/widget.js` and keys off the `user-input` id.
#[component]
pub fn ChatInputArea(
    /// Widget the form posts to.
    widget_id: String,
    /// Current input value.
    #[prop(optional)]
    value: String,
    /// Whether the field should take focus.
    #[prop(default = false)]
    focused: bool,
    /// Whether a request is outstanding.
    #[prop(default = false)]
    pending: bool,
) -> impl IntoView {
    let send_url = widget_path(&widget_id, "send");

    view! {
        <form id="chat-form" class="flex gap-2" hx-post=send_url hx-trigger="submit">
            <input type="hidden" id="key-input" name="key" value="" />
            <input type="hidden" id="shift-input" name="shift" value="false" />
            <div class="flex-1 relative">
                <textarea
                    id="user-input"
                    name="question"
                    placeholder="Type your message..."
                    class="w-full min-h-[44px] max-h-[200px] px-4 py-3 rounded-xl \
                           border border-panelBorder bg-background text-textPrimary \
                           placeholder:text-textMuted resize-none \
                           focus:outline-none focus:ring-2 focus:ring-primary focus:border-transparent"
                    rows="1"
                    autofocus=focused
                >
                    {value}
                </textarea>
            </div>

            <Button
                variant=ButtonVariant::Primary
                size=ButtonSize::Icon
                button_type="submit"
                id="send-button"
                title="Send"
                disabled=pending
                class="shrink-0 h-11 w-11 rounded-xl"
            >
                <SendIcon class="h-5 w-5" />
            </Button>
        </form>
    }
}
