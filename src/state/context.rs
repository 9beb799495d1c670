//! Conversation context management
//!
//! This module handles user conversation context, tracking the active flow,
//! the current step, and the partial-form fields accumulated so far.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::state::flows::{FlowKind, FlowStep};
use crate::utils::errors::{Result, StudyBuddyError};

/// Per-user conversation context.
///
/// Invariant: exactly one active flow per user at a time. Starting a new flow,
/// reaching a terminal step, an unrecoverable error, or an explicit cancel
/// clears flow, step and accumulated data entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// User ID this context belongs to
    pub user_id: i64,
    /// Active flow, if any
    pub flow: Option<FlowKind>,
    /// Current step within the flow
    pub step: Option<FlowStep>,
    /// Partial-form fields accumulated so far
    pub data: HashMap<String, serde_json::Value>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a new conversation context for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            flow: None,
            step: None,
            data: HashMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Start a new flow, discarding any previous state
    pub fn start_flow(&mut self, flow: FlowKind, initial_step: FlowStep) {
        self.flow = Some(flow);
        self.step = Some(initial_step);
        self.data.clear();
        self.updated_at = Utc::now();
    }

    /// Move to the next step in the current flow
    pub fn next_step(&mut self, step: FlowStep) -> Result<()> {
        if self.flow.is_none() {
            return Err(StudyBuddyError::InvalidStateTransition {
                from: "no_flow".to_string(),
                to: format!("{:?}", step),
            });
        }

        self.step = Some(step);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Set data for the current context
    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Get data from the current context
    pub fn get_data<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        if let Some(value) = self.data.get(key) {
            let result: T = serde_json::from_value(value.clone())?;
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }

    /// Get string data (convenience method)
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_data::<String>(key).unwrap_or(None)
    }

    /// Get integer data (convenience method)
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_data::<i64>(key).unwrap_or(None)
    }

    /// Check if user is in a specific flow
    pub fn is_in_flow(&self, flow: FlowKind) -> bool {
        self.flow == Some(flow)
    }

    /// Check if user is at a specific step
    pub fn is_at_step(&self, step: FlowStep) -> bool {
        self.step == Some(step)
    }

    /// Check if context has any accumulated data
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let context = ConversationContext::new(123);
        assert_eq!(context.user_id, 123);
        assert!(context.flow.is_none());
        assert!(context.step.is_none());
        assert!(context.data.is_empty());
    }

    #[test]
    fn test_start_flow() {
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);

        assert_eq!(context.flow, Some(FlowKind::Add));
        assert_eq!(context.step, Some(FlowStep::WaitingName));
    }

    #[test]
    fn test_start_flow_discards_previous_state() {
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);
        context.set_data("name", "Anna").unwrap();

        context.start_flow(FlowKind::Delete, FlowStep::WaitingSelect);
        assert_eq!(context.flow, Some(FlowKind::Delete));
        assert!(!context.has_data());
    }

    #[test]
    fn test_next_step_without_flow_fails() {
        let mut context = ConversationContext::new(123);
        assert!(context.next_step(FlowStep::WaitingAge).is_err());
    }

    #[test]
    fn test_data_operations() {
        let mut context = ConversationContext::new(123);

        context.set_data("name", "Anna").unwrap();
        context.set_data("age", 10).unwrap();

        assert_eq!(context.get_string("name"), Some("Anna".to_string()));
        assert_eq!(context.get_i64("age"), Some(10));
        assert_eq!(context.get_string("nonexistent"), None);
    }

    #[test]
    fn test_flow_checks() {
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);

        assert!(context.is_in_flow(FlowKind::Add));
        assert!(!context.is_in_flow(FlowKind::Delete));
        assert!(context.is_at_step(FlowStep::WaitingName));
        assert!(!context.is_at_step(FlowStep::WaitingAge));
    }
}
