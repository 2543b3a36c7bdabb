//! Append-only transcript of conversation turns.

use super::message::{Message, Sender, Turn, TurnBody, TurnId};

/// Element id of the loading indicator turn.
pub const LOADING_INDICATOR_ID: &str = "loading-indicator";

/// Default placeholder text shown while a request is outstanding.
pub const DEFAULT_LOADING_TEXT: &str = "Thinking... 🤔";

/// Ordered list of rendered turns.
///
/// Turns are only ever appended; the one exception is the loading indicator,
/// which is removed by identity once its request settles.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    next_id: u64,
    /// Turn the view is scrolled to, if any.
    scrolled_to: Option<TurnId>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and scroll to it.
    pub fn add_message(&mut self, text: impl Into<String>, sender: Sender) -> TurnId {
        let message = Message {
            text: text.into(),
            sender,
        };
        let id = self.allocate_id();
        self.push(Turn::from_message(id, message))
    }

    /// Append the loading indicator with the given text.
    ///
    /// Returns the existing indicator's id if one is already present.
    pub fn show_loading_indicator(&mut self, text: &str) -> TurnId {
        if let Some(existing) = self.loading_indicator() {
            return existing.id;
        }
        let id = self.allocate_id();
        self.push(Turn {
            id,
            sender: Sender::Ai,
            element_id: Some(LOADING_INDICATOR_ID),
            body: TurnBody::Text(text.to_string()),
        })
    }

    /// Remove the loading indicator. Returns whether one was present.
    pub fn remove_loading_indicator(&mut self) -> bool {
        let before = self.turns.len();
        self.turns
            .retain(|turn| turn.element_id != Some(LOADING_INDICATOR_ID));
        let removed = self.turns.len() != before;
        if removed && self.scrolled_to.is_some_and(|id| !self.contains(id)) {
            self.scrolled_to = self.turns.last().map(|turn| turn.id);
        }
        removed
    }

    /// The loading indicator turn, if present.
    #[must_use]
    pub fn loading_indicator(&self) -> Option<&Turn> {
        self.turns
            .iter()
            .find(|turn| turn.element_id == Some(LOADING_INDICATOR_ID))
    }

    /// Whether the loading indicator is present.
    #[must_use]
    pub fn has_loading_indicator(&self) -> bool {
        self.loading_indicator().is_some()
    }

    /// All turns in chronological order.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Newest turn.
    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Turn the view is scrolled to.
    #[must_use]
    pub fn scrolled_to(&self) -> Option<TurnId> {
        self.scrolled_to
    }

    /// Number of turns, including the loading indicator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the transcript has no turns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn contains(&self, id: TurnId) -> bool {
        self.turns.iter().any(|turn| turn.id == id)
    }

    fn allocate_id(&mut self) -> TurnId {
        self.next_id += 1;
        TurnId(self.next_id)
    }

    fn push(&mut self, turn: Turn) -> TurnId {
        let id = turn.id;
        self.turns.push(turn);
        self.scrolled_to = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_and_scroll() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        let first = transcript.add_message("hello", Sender::User);
        let second = transcript.add_message("<p>hi</p>", Sender::Ai);

        assert_eq!(transcript.len(), 2);
        assert!(first < second);
        assert_eq!(transcript.turns()[0].text(), "hello");
        assert_eq!(transcript.turns()[1].sender, Sender::Ai);
        assert_eq!(transcript.scrolled_to(), Some(second));
    }

    #[test]
    fn test_loading_indicator_lifecycle() {
        let mut transcript = Transcript::new();
        transcript.add_message("question", Sender::User);

        let indicator = transcript.show_loading_indicator(DEFAULT_LOADING_TEXT);
        assert!(transcript.has_loading_indicator());
        assert_eq!(transcript.scrolled_to(), Some(indicator));

        let turn = transcript.loading_indicator().unwrap();
        assert_eq!(turn.element_id, Some(LOADING_INDICATOR_ID));
        assert_eq!(turn.text(), DEFAULT_LOADING_TEXT);
        assert!(!turn.body.is_markup());

        assert!(transcript.remove_loading_indicator());
        assert!(!transcript.has_loading_indicator());
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.scrolled_to(), transcript.last().map(|t| t.id));
    }

    #[test]
    fn test_loading_indicator_is_singleton() {
        let mut transcript = Transcript::new();
        let first = transcript.show_loading_indicator("wait");
        let second = transcript.show_loading_indicator("wait");
        assert_eq!(first, second);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_remove_without_indicator_is_noop() {
        let mut transcript = Transcript::new();
        transcript.add_message("hello", Sender::User);
        assert!(!transcript.remove_loading_indicator());
        assert_eq!(transcript.len(), 1);
    }
}
