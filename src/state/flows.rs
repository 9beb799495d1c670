//! Flow definitions
//!
//! This module defines the guided conversation flows users can go through
//! (add, find-by-name, find-by-grade, edit, delete) as fixed step sequences
//! with per-step prompts, expected input and legal transitions.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::state::context::ConversationContext;
use crate::utils::errors::{Result, StudyBuddyError};

/// The guided record operations offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Add,
    FindByName,
    FindByGrade,
    Edit,
    Delete,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Add => "add",
            FlowKind::FindByName => "find_by_name",
            FlowKind::FindByGrade => "find_by_grade",
            FlowKind::Edit => "edit",
            FlowKind::Delete => "delete",
        }
    }
}

/// A single state within a flow, awaiting one specific piece of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// Add: collecting the student's name
    WaitingName,
    /// Add: collecting the age
    WaitingAge,
    /// Add: collecting the grade
    WaitingGrade,
    /// Find flows: collecting the search query
    WaitingQuery,
    /// Edit/Delete: selecting the target record by id or name substring
    WaitingSelect,
    /// Edit: picking which field to change
    WaitingField,
    /// Edit: collecting the new field value
    WaitingValue,
    /// Delete: confirming the deletion
    WaitingConfirm,
}

/// Input expected at a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    /// Any non-empty text
    Text,
    /// Text that may be empty (empty means "match everything")
    Query,
    /// A non-negative integer
    Number,
    /// A selection token or one of a fixed set of labels
    Choice,
}

/// A step definition within a flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step identifier
    pub id: FlowStep,
    /// Prompt shown when entering this step
    pub prompt: String,
    /// Input expected at this step
    pub input: InputType,
    /// Message shown when validation fails
    pub error_message: String,
    /// Legal successor steps (a step listing itself may re-prompt in place)
    pub next_steps: Vec<FlowStep>,
}

/// A complete flow definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSpec {
    pub kind: FlowKind,
    pub initial_step: FlowStep,
    pub steps: HashMap<FlowStep, StepSpec>,
}

/// Registry of all flow definitions.
#[derive(Debug, Clone)]
pub struct FlowManager {
    flows: HashMap<FlowKind, FlowSpec>,
}

impl FlowManager {
    pub fn new() -> Self {
        let mut manager = Self { flows: HashMap::new() };

        manager.register_flow(create_add_flow());
        manager.register_flow(create_find_by_name_flow());
        manager.register_flow(create_find_by_grade_flow());
        manager.register_flow(create_edit_flow());
        manager.register_flow(create_delete_flow());
        manager
    }

    fn register_flow(&mut self, flow: FlowSpec) {
        self.flows.insert(flow.kind, flow);
    }

    pub fn flow(&self, kind: FlowKind) -> &FlowSpec {
        // All kinds are registered in new(); the map is total over FlowKind.
        &self.flows[&kind]
    }

    /// Initial step for a flow kind.
    pub fn initial_step(&self, kind: FlowKind) -> FlowStep {
        self.flow(kind).initial_step
    }

    /// Look up a step definition.
    pub fn step_spec(&self, kind: FlowKind, step: FlowStep) -> Result<&StepSpec> {
        self.flow(kind)
            .steps
            .get(&step)
            .ok_or_else(|| StudyBuddyError::InvalidInput(format!(
                "Flow {} has no step {:?}",
                kind.as_str(),
                step
            )))
    }

    /// Prompt text shown when entering a step.
    pub fn prompt(&self, kind: FlowKind, step: FlowStep) -> Result<&str> {
        Ok(self.step_spec(kind, step)?.prompt.as_str())
    }

    /// Validation message for a step.
    pub fn error_message(&self, kind: FlowKind, step: FlowStep) -> Result<&str> {
        Ok(self.step_spec(kind, step)?.error_message.as_str())
    }

    /// Validate user input against the current step's expected input type.
    ///
    /// A failure here is recoverable: the engine re-prompts at the same step
    /// without touching state.
    pub fn validate_input(&self, kind: FlowKind, step: FlowStep, input: &str) -> Result<()> {
        let spec = self.step_spec(kind, step)?;
        let trimmed = input.trim();

        match spec.input {
            InputType::Query => Ok(()),
            InputType::Text | InputType::Choice => {
                if trimmed.is_empty() {
                    Err(StudyBuddyError::Validation(spec.error_message.clone()))
                } else {
                    Ok(())
                }
            }
            InputType::Number => match trimmed.parse::<i32>() {
                Ok(n) if n >= 0 => Ok(()),
                _ => Err(StudyBuddyError::Validation(spec.error_message.clone())),
            },
        }
    }

    /// Move the context to the next step, validating the transition.
    pub fn next_step(&self, context: &mut ConversationContext, to: FlowStep) -> Result<()> {
        let kind = context.flow.ok_or_else(|| StudyBuddyError::InvalidStateTransition {
            from: "no_flow".to_string(),
            to: format!("{:?}", to),
        })?;

        let current = context.step.ok_or_else(|| StudyBuddyError::InvalidStateTransition {
            from: "no_step".to_string(),
            to: format!("{:?}", to),
        })?;

        let spec = self.step_spec(kind, current)?;
        if !spec.next_steps.contains(&to) {
            return Err(StudyBuddyError::InvalidStateTransition {
                from: format!("{:?}", current),
                to: format!("{:?}", to),
            });
        }

        if !self.flow(kind).steps.contains_key(&to) {
            return Err(StudyBuddyError::InvalidInput(format!(
                "Flow {} has no step {:?}",
                kind.as_str(),
                to
            )));
        }

        context.next_step(to)
    }
}

impl Default for FlowManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the add-student flow
fn create_add_flow() -> FlowSpec {
    let mut steps = HashMap::new();

    steps.insert(FlowStep::WaitingName, StepSpec {
        id: FlowStep::WaitingName,
        prompt: "Enter the student's name:".to_string(),
        input: InputType::Text,
        error_message: "Please enter a non-empty name.".to_string(),
        next_steps: vec![FlowStep::WaitingAge],
    });

    steps.insert(FlowStep::WaitingAge, StepSpec {
        id: FlowStep::WaitingAge,
        prompt: "Thanks! Now enter the age:".to_string(),
        input: InputType::Number,
        error_message: "Age must be a non-negative whole number, try again:".to_string(),
        next_steps: vec![FlowStep::WaitingGrade],
    });

    steps.insert(FlowStep::WaitingGrade, StepSpec {
        id: FlowStep::WaitingGrade,
        prompt: "Great! Now enter the grade (e.g. 5B):".to_string(),
        input: InputType::Text,
        error_message: "Please enter a non-empty grade.".to_string(),
        next_steps: vec![],
    });

    FlowSpec {
        kind: FlowKind::Add,
        initial_step: FlowStep::WaitingName,
        steps,
    }
}

/// Create the find-by-name flow
fn create_find_by_name_flow() -> FlowSpec {
    let mut steps = HashMap::new();

    steps.insert(FlowStep::WaitingQuery, StepSpec {
        id: FlowStep::WaitingQuery,
        prompt: "Enter a name to search for (or an empty query to list everyone):".to_string(),
        input: InputType::Query,
        error_message: String::new(),
        next_steps: vec![],
    });

    FlowSpec {
        kind: FlowKind::FindByName,
        initial_step: FlowStep::WaitingQuery,
        steps,
    }
}

/// Create the find-by-grade flow
fn create_find_by_grade_flow() -> FlowSpec {
    let mut steps = HashMap::new();

    steps.insert(FlowStep::WaitingQuery, StepSpec {
        id: FlowStep::WaitingQuery,
        prompt: "Enter the grade (e.g. 8A):".to_string(),
        input: InputType::Text,
        error_message: "Please enter a non-empty grade.".to_string(),
        next_steps: vec![],
    });

    FlowSpec {
        kind: FlowKind::FindByGrade,
        initial_step: FlowStep::WaitingQuery,
        steps,
    }
}

/// Create the edit-student flow
fn create_edit_flow() -> FlowSpec {
    let mut steps = HashMap::new();

    steps.insert(FlowStep::WaitingSelect, StepSpec {
        id: FlowStep::WaitingSelect,
        prompt: "Enter the name or ID of the student to edit:".to_string(),
        input: InputType::Text,
        error_message: "Please enter a name or an ID.".to_string(),
        // Re-enters itself while disambiguating between multiple candidates.
        next_steps: vec![FlowStep::WaitingSelect, FlowStep::WaitingField],
    });

    steps.insert(FlowStep::WaitingField, StepSpec {
        id: FlowStep::WaitingField,
        prompt: "What should change?".to_string(),
        input: InputType::Choice,
        error_message: "Pick one of: name, age, grade.".to_string(),
        next_steps: vec![FlowStep::WaitingValue],
    });

    steps.insert(FlowStep::WaitingValue, StepSpec {
        id: FlowStep::WaitingValue,
        prompt: "Enter the new value:".to_string(),
        input: InputType::Text,
        error_message: "Please enter a non-empty value.".to_string(),
        next_steps: vec![],
    });

    FlowSpec {
        kind: FlowKind::Edit,
        initial_step: FlowStep::WaitingSelect,
        steps,
    }
}

/// Create the delete-student flow
fn create_delete_flow() -> FlowSpec {
    let mut steps = HashMap::new();

    steps.insert(FlowStep::WaitingSelect, StepSpec {
        id: FlowStep::WaitingSelect,
        prompt: "Enter the name or ID of the student to delete:".to_string(),
        input: InputType::Text,
        error_message: "Please enter a name or an ID.".to_string(),
        next_steps: vec![FlowStep::WaitingSelect, FlowStep::WaitingConfirm],
    });

    steps.insert(FlowStep::WaitingConfirm, StepSpec {
        id: FlowStep::WaitingConfirm,
        prompt: "Are you sure?".to_string(),
        input: InputType::Choice,
        error_message: "Please confirm or cancel.".to_string(),
        next_steps: vec![],
    });

    FlowSpec {
        kind: FlowKind::Delete,
        initial_step: FlowStep::WaitingSelect,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_flows_registered() {
        let manager = FlowManager::new();

        assert_eq!(manager.initial_step(FlowKind::Add), FlowStep::WaitingName);
        assert_eq!(manager.initial_step(FlowKind::FindByName), FlowStep::WaitingQuery);
        assert_eq!(manager.initial_step(FlowKind::FindByGrade), FlowStep::WaitingQuery);
        assert_eq!(manager.initial_step(FlowKind::Edit), FlowStep::WaitingSelect);
        assert_eq!(manager.initial_step(FlowKind::Delete), FlowStep::WaitingSelect);
    }

    #[test]
    fn test_add_flow_transitions() {
        let manager = FlowManager::new();
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);

        manager.next_step(&mut context, FlowStep::WaitingAge).unwrap();
        assert_eq!(context.step, Some(FlowStep::WaitingAge));

        manager.next_step(&mut context, FlowStep::WaitingGrade).unwrap();
        assert_eq!(context.step, Some(FlowStep::WaitingGrade));
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let manager = FlowManager::new();
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Add, FlowStep::WaitingName);

        // Cannot skip the age step
        assert!(manager.next_step(&mut context, FlowStep::WaitingGrade).is_err());
        assert_eq!(context.step, Some(FlowStep::WaitingName));
    }

    #[test]
    fn test_select_step_may_reenter_itself() {
        let manager = FlowManager::new();
        let mut context = ConversationContext::new(123);
        context.start_flow(FlowKind::Edit, FlowStep::WaitingSelect);

        manager.next_step(&mut context, FlowStep::WaitingSelect).unwrap();
        assert_eq!(context.step, Some(FlowStep::WaitingSelect));
    }

    #[test]
    fn test_number_validation() {
        let manager = FlowManager::new();

        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingAge, "10").is_ok());
        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingAge, " 0 ").is_ok());
        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingAge, "ten").is_err());
        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingAge, "-3").is_err());
        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingAge, "").is_err());
    }

    #[test]
    fn test_text_and_query_validation() {
        let manager = FlowManager::new();

        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingName, "Anna").is_ok());
        assert!(manager.validate_input(FlowKind::Add, FlowStep::WaitingName, "  ").is_err());
        // Find-by-name accepts the empty query (meaning "everyone")
        assert!(manager.validate_input(FlowKind::FindByName, FlowStep::WaitingQuery, "").is_ok());
        // Find-by-grade does not
        assert!(manager.validate_input(FlowKind::FindByGrade, FlowStep::WaitingQuery, "").is_err());
    }
}
