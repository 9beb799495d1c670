//! Conversation state management module

pub mod context;
pub mod flows;
pub mod tracker;

pub use context::ConversationContext;
pub use flows::{FlowKind, FlowManager, FlowStep, InputType};
pub use tracker::{StateTracker, TrackerStats};
