//! Conversation state tracker
//!
//! In-memory per-user storage of conversation contexts. State does not survive
//! a process restart: in-flight forms are abandoned, which is acceptable for
//! this design. Different users' flows never share mutable state here; each
//! user's context is replaced wholesale on every step transition.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::state::context::ConversationContext;
use crate::utils::errors::Result;

/// In-memory state tracker keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    contexts: Arc<RwLock<HashMap<i64, ConversationContext>>>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the conversation context for a user.
    pub async fn load_context(&self, user_id: i64) -> Option<ConversationContext> {
        let contexts = self.contexts.read().await;
        let context = contexts.get(&user_id).cloned();
        debug!(user_id = user_id, has_context = context.is_some(), "Loaded context");
        context
    }

    /// Save (replace) a user's conversation context.
    pub async fn save_context(&self, context: &ConversationContext) -> Result<()> {
        debug!(user_id = context.user_id, flow = ?context.flow, step = ?context.step,
               "Saving context");
        let mut contexts = self.contexts.write().await;
        contexts.insert(context.user_id, context.clone());
        Ok(())
    }

    /// Delete a user's conversation context.
    pub async fn delete_context(&self, user_id: i64) -> Result<()> {
        let mut contexts = self.contexts.write().await;
        if contexts.remove(&user_id).is_some() {
            debug!(user_id = user_id, "Deleted context");
        } else {
            debug!(user_id = user_id, "No context to delete");
        }
        Ok(())
    }

    /// Check if a context exists for a user.
    pub async fn context_exists(&self, user_id: i64) -> bool {
        self.contexts.read().await.contains_key(&user_id)
    }

    /// Users with an active context (for monitoring).
    pub async fn active_users(&self) -> Vec<i64> {
        self.contexts.read().await.keys().copied().collect()
    }

    /// Tracker statistics.
    pub async fn stats(&self) -> TrackerStats {
        let contexts = self.contexts.read().await;
        let mut flows_count: HashMap<&'static str, u32> = HashMap::new();
        for context in contexts.values() {
            if let Some(flow) = context.flow {
                *flows_count.entry(flow.as_str()).or_insert(0) += 1;
            }
        }

        TrackerStats {
            total_contexts: contexts.len(),
            flows_count,
        }
    }
}

/// Tracker statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrackerStats {
    pub total_contexts: usize,
    pub flows_count: HashMap<&'static str, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::flows::{FlowKind, FlowStep};

    #[tokio::test]
    async fn test_context_save_load() {
        let tracker = StateTracker::new();

        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);
        context.set_data("name", "Anna").unwrap();

        tracker.save_context(&context).await.unwrap();

        let loaded = tracker.load_context(123).await.unwrap();
        assert_eq!(loaded.user_id, 123);
        assert_eq!(loaded.flow, Some(FlowKind::Add));
        assert_eq!(loaded.step, Some(FlowStep::WaitingName));
        assert_eq!(loaded.get_string("name"), Some("Anna".to_string()));
    }

    #[tokio::test]
    async fn test_context_deletion() {
        let tracker = StateTracker::new();
        let context = ConversationContext::new(789);

        tracker.save_context(&context).await.unwrap();
        assert!(tracker.context_exists(789).await);

        tracker.delete_context(789).await.unwrap();
        assert!(!tracker.context_exists(789).await);
    }

    #[tokio::test]
    async fn test_contexts_are_isolated_per_user() {
        let tracker = StateTracker::new();

        let mut first = ConversationContext::new(1);
        first.start_flow(FlowKind::Add, FlowStep::WaitingName);
        let mut second = ConversationContext::new(2);
        second.start_flow(FlowKind::Delete, FlowStep::WaitingSelect);

        tracker.save_context(&first).await.unwrap();
        tracker.save_context(&second).await.unwrap();

        assert_eq!(tracker.load_context(1).await.unwrap().flow, Some(FlowKind::Add));
        assert_eq!(tracker.load_context(2).await.unwrap().flow, Some(FlowKind::Delete));

        let stats = tracker.stats().await;
        assert_eq!(stats.total_contexts, 2);
        assert_eq!(stats.flows_count.get("add"), Some(&1));
        assert_eq!(stats.flows_count.get("delete"), Some(&1));
    }
}
