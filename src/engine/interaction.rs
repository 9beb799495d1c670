//! Inbound interaction events
//!
//! A single transport-agnostic event type. Whether the transport delivered a
//! plain message or a structured button press, the engine only ever sees an
//! `Interaction` carrying the user id, optional text and an optional
//! selection token.

use serde::{Deserialize, Serialize};

/// One inbound user event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: i64,
    /// Free text typed by the user, if any
    pub text: Option<String>,
    /// Structured selection token (button press), if any
    pub selection: Option<String>,
}

impl Interaction {
    /// A plain text message.
    pub fn message(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: Some(text.into()),
            selection: None,
        }
    }

    /// A structured selection (button press).
    pub fn selection(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            text: None,
            selection: Some(token.into()),
        }
    }

    /// The effective input: a selection token takes precedence over text.
    pub fn input(&self) -> Option<&str> {
        self.selection.as_deref().or(self.text.as_deref())
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn has_input(&self) -> bool {
        self.has_text() || self.has_selection()
    }
}

/// Selection tokens understood by the engine.
pub mod tokens {
    pub const FIELD_NAME: &str = "field:name";
    pub const FIELD_AGE: &str = "field:age";
    pub const FIELD_GRADE: &str = "field:grade";
    pub const EDIT_CANCEL: &str = "edit:cancel";
    pub const DELETE_CONFIRM: &str = "delete:confirm";
    pub const DELETE_CANCEL: &str = "delete:cancel";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_takes_precedence() {
        let interaction = Interaction {
            user_id: 1,
            text: Some("typed".to_string()),
            selection: Some("picked".to_string()),
        };
        assert_eq!(interaction.input(), Some("picked"));
    }

    #[test]
    fn test_constructors() {
        let message = Interaction::message(1, "hello");
        assert!(message.has_text());
        assert!(!message.has_selection());
        assert_eq!(message.input(), Some("hello"));

        let selection = Interaction::selection(1, tokens::DELETE_CONFIRM);
        assert!(selection.has_selection());
        assert_eq!(selection.input(), Some(tokens::DELETE_CONFIRM));
    }
}
