//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::{Badge, BadgeVariant, SparklesIcon};

/// Chat header with title and request status.
#[component]
pub fn ChatHeader(
    /// Title displayed in the header.
    #[prop(default = "Chat")]
    title: &'static str,
    /// Whether a request is outstanding.
    #[prop(default = false)]
    pending: bool,
) -> impl IntoView {
    let (variant, status) = if pending {
        (BadgeVariant::Warning, "Waiting for reply")
    } else {
        (BadgeVariant::Secondary, "Ready")
    };

    view! {
        <header class="flex items-center justify-between px-4 py-3 border-b border-panelBorder bg-panel/50 backdrop-blur-sm">
            <div class="flex items-center gap-2">
                <SparklesIcon class="h-5 w-5 text-primary" />
                <h2 class="font-semibold text-lg">{title}</h2>
            </div>

            <Badge variant=variant>
                <span id="chat-status" class="text-xs">{status}</span>
            </Badge>
        </header>
    }
}
