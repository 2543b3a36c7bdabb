//! Request lifecycle of a widget.

use std::fmt;

/// Identifies one send, from `begin_send` to `complete_send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SendTicket(pub(crate) u64);

impl fmt::Display for SendTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send-{}", self.0)
    }
}

/// Where the widget is in its single-request lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    /// No request outstanding.
    #[default]
    Idle,
    /// Request composed, not yet handed to the transport.
    Sending {
        /// The outstanding send.
        ticket: SendTicket,
    },
    /// Request handed to the transport, response not yet settled.
    Awaiting {
        /// The outstanding send.
        ticket: SendTicket,
    },
}

impl RequestState {
    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_pending(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Ticket of the outstanding send.
    #[must_use]
    pub fn ticket(self) -> Option<SendTicket> {
        match self {
            Self::Idle => None,
            Self::Sending { ticket } | Self::Awaiting { ticket } => Some(ticket),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending { .. } => "sending",
            Self::Awaiting { .. } => "awaiting",
        }
    }
}
