//! Transcript component.

use leptos::prelude::*;

use crate::widget::{Turn, TurnBody, TurnId};

/// The scrolling list of turns.
#[component]
pub fn ChatTranscript(
    /// Turns in order.
    turns: Vec<Turn>,
    /// Turn the view is scrolled to.
    scrolled_to: Option<TurnId>,
) -> impl IntoView {
    let scroll_target = scrolled_to.map(|id| id.0.to_string());

    view! {
        <div
            id="chat-output"
            class="flex-1 overflow-y-auto px-4 py-4 space-y-3"
            data-scroll-to=scroll_target
            aria-live="polite"
            aria-label="Chat messages"
        >
            {turns.into_iter().map(|turn| view! { <TranscriptTurn turn=turn /> }).collect_view()}
        </div>
    }
}

/// A single turn.
///
/// AI turns are inserted as markup; user turns are text and get escaped.
#[component]
pub fn TranscriptTurn(turn: Turn) -> impl IntoView {
    let classes = turn.classes();
    let element_id = turn.element_id;
    let turn_id = turn.id.0.to_string();

    match turn.body {
        TurnBody::Markup(html) => view! {
            <div class=classes id=element_id data-turn=turn_id>
                <p inner_html=html></p>
            </div>
        }
        .into_any(),
        TurnBody::Text(text) => view! {
            <div class=classes id=element_id data-turn=turn_id>
                <p>{text}</p>
            </div>
        }
        .into_any(),
    }
}
