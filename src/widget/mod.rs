//! Headless chat widget.
//!
//! This module holds the widget's document model and every user-facing
//! operation, independent of how the widget is rendered. The [`crate::ui`]
//! components render a [`WidgetSnapshot`] of it; the [`crate::server`] host
//! drives it from browser requests.
//!
//! # Structure
//!
//! - [`ChatWidget`]: the widget and its send sequence
//! - [`Transcript`]: append-only turns plus the loading indicator
//! - [`AttachmentSlot`]: the file picker and its single staged file
//! - [`InputField`] / [`KeyPress`]: the text field and Enter handling
//! - [`Reply`]: how an `/ask` response is reported in the transcript
//! - [`RequestState`]: `Idle | Sending | Awaiting`

mod attachment;
mod chat;
mod input;
mod message;
mod reply;
mod snapshot;
mod state;
mod transcript;

pub use attachment::{AttachmentError, AttachmentSlot, PendingAttachment};
pub use chat::{
    ChatWidget, PendingSend, SendOutcome, SendSkipped, WidgetOptions, compose_user_text,
};
pub use input::{InputField, Key, KeyAction, KeyPress, classify_key};
pub use message::{Message, Sender, Turn, TurnBody, TurnId};
pub use reply::{CONNECTION_FAILED, NO_VALID_RESPONSE, Reply, SERVER_ERROR_FALLBACK};
pub use snapshot::WidgetSnapshot;
pub use state::{RequestState, SendTicket};
pub use transcript::{DEFAULT_LOADING_TEXT, LOADING_INDICATOR_ID, Transcript};
