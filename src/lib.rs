//! StudyBuddy Telegram Bot
//!
//! A Telegram bot for managing a student roster through guided conversation
//! flows. The core (form flow engine, conversation state tracker and record
//! store abstraction) is transport-agnostic; the telegram module adapts it to
//! a real chat frontend.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod engine;
pub mod models;
pub mod presentation;
pub mod state;
pub mod telegram;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, StudyBuddyError};

// Re-export main components for easy access
pub use database::StudentStore;
pub use engine::{Advance, FlowEngine, Interaction, SideEffect};
pub use state::{FlowKind, FlowManager, FlowStep, StateTracker};
