//! Text input field and key handling.

/// A key as reported by the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// The Enter / Return key.
    Enter,
    /// Any other key, by its `KeyboardEvent.key` name.
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A key press in the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Which key.
    pub key: Key,
    /// Whether shift was held.
    pub shift: bool,
}

impl KeyPress {
    /// Enter without modifiers.
    #[must_use]
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    /// Shift+Enter.
    #[must_use]
    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }
}

/// What a key press should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the message. The default newline must be suppressed.
    Send,
    /// Let the field insert a line break.
    InsertNewline,
    /// Not handled by the widget.
    Ignore,
}

/// Classify a key press.
#[must_use]
pub fn classify_key(press: &KeyPress) -> KeyAction {
    match (&press.key, press.shift) {
        (Key::Enter, false) => KeyAction::Send,
        (Key::Enter, true) => KeyAction::InsertNewline,
        (Key::Other(_), _) => KeyAction::Ignore,
    }
}

/// The widget's text input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    focused: bool,
}

impl InputField {
    /// Current raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Replace the value, as typing would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Give the field keyboard focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Append a line break, as Shift+Enter does.
    pub fn insert_newline(&mut self) {
        self.value.push('\n');
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}
