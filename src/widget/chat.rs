//! The chat widget and its send sequence.

use tracing::{debug, info, warn};

use super::attachment::{AttachmentError, AttachmentSlot, PendingAttachment};
use super::input::{InputField, KeyAction, KeyPress, classify_key};
use super::message::{Sender, TurnId};
use super::reply::Reply;
use super::state::{RequestState, SendTicket};
use super::transcript::{DEFAULT_LOADING_TEXT, Transcript};
use crate::transport::{AskRequest, AskResponse, AskTransport, TransportError};

/// Construction-time capabilities of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Whether a file can be staged and sent as multipart.
    pub attachments_enabled: bool,
    /// Text of the loading indicator.
    pub loading_text: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            attachments_enabled: true,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
        }
    }
}

impl WidgetOptions {
    /// Options for a widget without file support.
    #[must_use]
    pub fn text_only() -> Self {
        Self {
            attachments_enabled: false,
            ..Self::default()
        }
    }
}

/// Why a send did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendSkipped {
    /// No text and no staged file.
    #[error("nothing to send")]
    Empty,
    /// Another request is still outstanding.
    #[error("a request is already outstanding")]
    Busy,
    /// The key press does not submit.
    #[error("the key press does not send")]
    NotRequested,
}

/// A send that has rendered its user turn and awaits the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Ticket to settle the send with.
    pub ticket: SendTicket,
    /// Request to hand to the transport.
    pub request: AskRequest,
}

/// Which path a send took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// An answer was rendered.
    Answered,
    /// A non-2xx status was rendered as an error turn.
    ServerError,
    /// A 2xx body carrying `error` was rendered.
    ApplicationError,
    /// A 2xx body without a usable field was rendered.
    NoValidResponse,
    /// The request never completed.
    ConnectionFailed,
    /// Nothing was sent.
    Skipped(SendSkipped),
    /// The ticket did not match the outstanding send; nothing changed.
    Discarded,
}

impl SendOutcome {
    fn from_reply(reply: &Reply) -> Self {
        match reply {
            Reply::Answer(_) => Self::Answered,
            Reply::ApplicationError(_) => Self::ApplicationError,
            Reply::NoValidResponse => Self::NoValidResponse,
            Reply::ServerError(_) => Self::ServerError,
            Reply::ConnectionFailed => Self::ConnectionFailed,
        }
    }
}

/// Text of the user turn for a question and an optional attachment.
#[must_use]
pub fn compose_user_text(question: &str, attachment: Option<&PendingAttachment>) -> String {
    match attachment {
        Some(file) if !question.is_empty() => {
            format!("{question} (Attached file: {})", file.name)
        }
        Some(file) => format!("Attached file: {}", file.name),
        None => question.to_string(),
    }
}

/// A chat widget: transcript, input field, file picker and one request slot.
///
/// # Example
///
/// ```rust
/// use ask_widget::widget::{ChatWidget, SendSkipped, WidgetOptions};
///
/// let mut widget = ChatWidget::new(WidgetOptions::default());
/// assert_eq!(widget.begin_send().unwrap_err(), SendSkipped::Empty);
///
/// widget.set_input("  What is Rust?  ");
/// let pending = widget.begin_send().unwrap();
/// assert_eq!(pending.request.question(), "What is Rust?");
/// assert!(widget.transcript().has_loading_indicator());
/// ```
#[derive(Debug, Clone)]
pub struct ChatWidget {
    options: WidgetOptions,
    transcript: Transcript,
    input: InputField,
    attachment: AttachmentSlot,
    state: RequestState,
    next_ticket: u64,
}

impl ChatWidget {
    /// Create a widget with an empty transcript.
    #[must_use]
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            options,
            transcript: Transcript::new(),
            input: InputField::default(),
            attachment: AttachmentSlot::default(),
            state: RequestState::Idle,
            next_ticket: 0,
        }
    }

    /// Construction options.
    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// The transcript.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The text input field.
    #[must_use]
    pub fn input(&self) -> &InputField {
        &self.input
    }

    /// The file picker and staged attachment.
    #[must_use]
    pub fn attachment(&self) -> &AttachmentSlot {
        &self.attachment
    }

    /// Request lifecycle state.
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Append a turn and scroll to it.
    pub fn add_message(&mut self, text: impl Into<String>, sender: Sender) -> TurnId {
        self.transcript.add_message(text, sender)
    }

    /// Append the loading indicator.
    pub fn show_loading_indicator(&mut self) -> TurnId {
        self.transcript
            .show_loading_indicator(&self.options.loading_text)
    }

    /// Remove the loading indicator if present.
    pub fn remove_loading_indicator(&mut self) -> bool {
        self.transcript.remove_loading_indicator()
    }

    /// Replace the text in the input field.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input.set_value(value);
    }

    /// Handle a picker `change`; `None` means the picker was cancelled.
    pub fn select_file(&mut self, file: Option<PendingAttachment>) -> Result<(), AttachmentError> {
        if !self.options.attachments_enabled {
            return Err(AttachmentError::Disabled);
        }
        if let Some(file) = &file {
            debug!(file = %file.name, size = file.size(), "Attachment staged");
        }
        self.attachment.select(file);
        Ok(())
    }

    /// Drop the staged attachment and reset the picker.
    pub fn remove_attachment(&mut self) {
        self.attachment.clear();
    }

    /// Classify a key press in the input field.
    #[must_use]
    pub fn handle_key(&self, press: &KeyPress) -> KeyAction {
        classify_key(press)
    }

    /// Apply a key press: Enter sends, Shift+Enter breaks the line.
    pub fn press_key(&mut self, press: &KeyPress) -> Result<PendingSend, SendSkipped> {
        match self.handle_key(press) {
            KeyAction::Send => self.begin_send(),
            KeyAction::InsertNewline => {
                self.input.insert_newline();
                self.input.focus();
                Err(SendSkipped::NotRequested)
            }
            KeyAction::Ignore => Err(SendSkipped::NotRequested),
        }
    }

    /// Render the user turn, show the loading indicator and build the request.
    pub fn begin_send(&mut self) -> Result<PendingSend, SendSkipped> {
        if let Some(ticket) = self.state.ticket() {
            debug!(ticket = %ticket, "Send refused while a request is outstanding");
            return Err(SendSkipped::Busy);
        }

        let question = self.input.trimmed().to_string();
        let file = self
            .attachment
            .staged()
            .filter(|_| self.options.attachments_enabled)
            .cloned();

        if question.is_empty() && file.is_none() {
            self.input.focus();
            return Err(SendSkipped::Empty);
        }

        self.add_message(compose_user_text(&question, file.as_ref()), Sender::User);
        self.input.clear();
        self.input.focus();
        self.show_loading_indicator();

        let request = match file {
            None => AskRequest::Json { question },
            Some(file) => AskRequest::Multipart { question, file },
        };

        self.next_ticket += 1;
        let ticket = SendTicket(self.next_ticket);
        self.state = RequestState::Sending { ticket };

        info!(
            name: "widget.send.begin",
            ticket = %ticket,
            multipart = request.attachment().is_some(),
            "Send started"
        );

        Ok(PendingSend { ticket, request })
    }

    /// Record that the request was handed to the transport.
    pub fn mark_dispatched(&mut self, ticket: SendTicket) -> bool {
        if self.state == (RequestState::Sending { ticket }) {
            self.state = RequestState::Awaiting { ticket };
            true
        } else {
            false
        }
    }

    /// Settle a send: remove the indicator, clear the attachment, render the reply.
    pub fn complete_send(
        &mut self,
        ticket: SendTicket,
        result: Result<AskResponse, TransportError>,
    ) -> SendOutcome {
        if self.state.ticket() != Some(ticket) {
            warn!(
                ticket = %ticket,
                state = self.state.as_str(),
                "Discarding result for a send that is not outstanding"
            );
            return SendOutcome::Discarded;
        }

        self.remove_loading_indicator();
        self.attachment.clear();
        self.state = RequestState::Idle;

        let reply = match result {
            Ok(response) => {
                debug!(ticket = %ticket, status = response.status, "Response received");
                Reply::from_response(&response)
            }
            Err(e) => {
                warn!(ticket = %ticket, error = %e, "Error sending message");
                Reply::ConnectionFailed
            }
        };

        let outcome = SendOutcome::from_reply(&reply);
        self.add_message(reply.to_text(), Sender::Ai);

        info!(
            name: "widget.send.settled",
            ticket = %ticket,
            outcome = ?outcome,
            "Send settled"
        );

        outcome
    }

    /// Run the whole send sequence against a transport.
    pub async fn send<T>(&mut self, transport: &T) -> SendOutcome
    where
        T: AskTransport + ?Sized,
    {
        let pending = match self.begin_send() {
            Ok(pending) => pending,
            Err(skipped) => return SendOutcome::Skipped(skipped),
        };

        self.mark_dispatched(pending.ticket);
        let result = transport.ask(pending.request).await;
        self.complete_send(pending.ticket, result)
    }
}
