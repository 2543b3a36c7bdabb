//! Messages and rendered transcript turns.

use serde::{Deserialize, Serialize};

/// Who a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The backend answering through `/ask`.
    Ai,
}

impl Sender {
    /// CSS classes for a turn attributed to this sender.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::User => "message user-message",
            Self::Ai => "message ai-message",
        }
    }
}

/// A conversation message before it is placed in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message content. Markup for [`Sender::Ai`], plain text for [`Sender::User`].
    pub text: String,
    /// Message author.
    pub sender: Sender,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create an AI message.
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Ai,
        }
    }
}

/// Monotonic identity of a turn within one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

/// How a turn's content is rendered.
///
/// AI content comes from the backend as HTML and is rendered as-is so answers
/// can carry formatting and links. User content is always escaped so that the
/// user's own input is never interpreted as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnBody {
    /// Trusted markup, rendered unescaped.
    Markup(String),
    /// Plain text, rendered escaped.
    Text(String),
}

impl TurnBody {
    /// The raw content, regardless of how it renders.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Markup(s) | Self::Text(s) => s,
        }
    }

    /// Whether this body is rendered without escaping.
    #[must_use]
    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

/// One rendered message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Identity within the transcript.
    pub id: TurnId,
    /// Author.
    pub sender: Sender,
    /// Well-known element id, only set for singleton turns such as the
    /// loading indicator.
    pub element_id: Option<&'static str>,
    /// Content.
    pub body: TurnBody,
}

impl Turn {
    /// Build a turn from a message, choosing the body by sender.
    #[must_use]
    pub fn from_message(id: TurnId, message: Message) -> Self {
        let body = match message.sender {
            Sender::Ai => TurnBody::Markup(message.text),
            Sender::User => TurnBody::Text(message.text),
        };
        Self {
            id,
            sender: message.sender,
            element_id: None,
            body,
        }
    }

    /// Raw text of the turn.
    #[must_use]
    pub fn text(&self) -> &str {
        self.body.as_str()
    }

    /// CSS classes for this turn.
    #[must_use]
    pub fn classes(&self) -> String {
        match self.element_id {
            Some(element_id) => format!("{} {element_id}", self.sender.classes()),
            None => self.sender.classes().to_string(),
        }
    }
}
