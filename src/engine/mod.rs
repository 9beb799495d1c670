//! Form flow engine
//!
//! Sequences the guided record operations: each flow is a fixed series of
//! prompts, every answer is validated, and exactly one store mutation or
//! query runs at the terminal step. State is cleared on completion,
//! cancellation, and on any terminal error — a failed mutation still clears
//! state and reports the error, there is no resumption of a failed flow.

pub mod interaction;
pub mod router;

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::database::StudentStore;
use crate::models::{FieldValue, NewStudent, Student, StudentField};
use crate::presentation::{self, Menu, PresentationSink};
use crate::state::context::ConversationContext;
use crate::state::flows::{FlowKind, FlowManager, FlowStep};
use crate::state::tracker::StateTracker;
use crate::utils::errors::{Result, StudyBuddyError};
use crate::utils::logging::{log_flow_completed, log_user_action};

pub use interaction::{tokens, Interaction};
pub use router::{InputPredicate, Route, RouteHandler, Router};

/// Cap on candidates listed while disambiguating an edit/delete selection.
const DISAMBIGUATION_LIMIT: usize = 5;

// Keys under which partial-form fields accumulate in the context data map.
const KEY_NAME: &str = "name";
const KEY_AGE: &str = "age";
const KEY_STUDENT_ID: &str = "student_id";
const KEY_FIELD: &str = "field";

/// The observable result of advancing a conversation by one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// Step the user is waiting at after this interaction, if any
    pub step: Option<FlowStep>,
    /// What happened
    pub effect: SideEffect,
}

impl Advance {
    /// No active flow; nothing happened.
    pub fn idle() -> Self {
        Self {
            step: None,
            effect: SideEffect::None,
        }
    }
}

/// Terminal action (or lack thereof) triggered by an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// No active flow
    None,
    /// Moved to the next prompt, or re-prompted at the same step
    Prompted,
    /// Add flow completed with an insert
    Inserted(Student),
    /// Edit flow completed with a field update
    Updated(Student),
    /// Delete flow completed
    Deleted(i64),
    /// Find flow completed
    Found(Vec<Student>),
    /// Selection matched nothing; flow terminated
    NotFound,
    /// Flow cancelled without mutation
    Cancelled,
}

/// The form flow engine.
///
/// Owns the route table, the flow definitions, the per-user state tracker,
/// and references to the record store and the presentation sink.
pub struct FlowEngine {
    store: Arc<dyn StudentStore>,
    tracker: StateTracker,
    sink: Arc<dyn PresentationSink>,
    flows: FlowManager,
    router: Router,
}

impl FlowEngine {
    pub fn new(
        store: Arc<dyn StudentStore>,
        tracker: StateTracker,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            store,
            tracker,
            sink,
            flows: FlowManager::new(),
            router: build_router(),
        }
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn flows(&self) -> &FlowManager {
        &self.flows
    }

    /// Start a flow for a user, discarding any flow already in progress.
    pub async fn start_flow(&self, user_id: i64, kind: FlowKind) -> Result<Advance> {
        let initial = self.flows.initial_step(kind);
        let mut context = self
            .tracker
            .load_context(user_id)
            .await
            .unwrap_or_else(|| ConversationContext::new(user_id));
        context.start_flow(kind, initial);
        self.tracker.save_context(&context).await?;

        log_user_action(user_id, "flow_started", Some(kind.as_str()));
        self.prompt_step(user_id, kind, initial).await?;

        Ok(Advance {
            step: Some(initial),
            effect: SideEffect::Prompted,
        })
    }

    /// Advance a user's conversation by one interaction.
    pub async fn advance(&self, interaction: Interaction) -> Result<Advance> {
        let user_id = interaction.user_id;

        let Some(context) = self.tracker.load_context(user_id).await else {
            return Ok(Advance::idle());
        };
        let (Some(flow), Some(step)) = (context.flow, context.step) else {
            self.tracker.delete_context(user_id).await?;
            return Ok(Advance::idle());
        };

        match self.router.resolve(flow, step, &interaction) {
            Some(route) => {
                debug!(user_id = user_id, route = route.name, "Dispatching interaction");
                (route.handler)(self, interaction, context).await
            }
            None if self.router.has_routes(flow, step) => {
                // Input shape not accepted at this step; re-prompt in place.
                let mut message = self.flows.error_message(flow, step)?;
                if message.is_empty() {
                    message = self.flows.prompt(flow, step)?;
                }
                let message = message.to_string();
                self.sink
                    .send(user_id, &message, Self::step_menu(flow, step))
                    .await?;
                Ok(Advance {
                    step: Some(step),
                    effect: SideEffect::Prompted,
                })
            }
            None => {
                warn!(user_id = user_id, flow = ?flow, step = ?step, "Unknown conversation state, clearing");
                self.tracker.delete_context(user_id).await?;
                Ok(Advance::idle())
            }
        }
    }

    /// Send the prompt for a step, with its menu where one applies.
    async fn prompt_step(&self, user_id: i64, flow: FlowKind, step: FlowStep) -> Result<()> {
        let text = self.flows.prompt(flow, step)?;
        self.sink.send(user_id, text, Self::step_menu(flow, step)).await
    }

    /// Menu attached to a step's prompt, if any.
    fn step_menu(flow: FlowKind, step: FlowStep) -> Option<Menu> {
        match (flow, step) {
            (FlowKind::Edit, FlowStep::WaitingField) => Some(presentation::field_menu()),
            (FlowKind::Delete, FlowStep::WaitingConfirm) => Some(presentation::confirm_menu()),
            _ => None,
        }
    }

    /// Handle a recoverable validation failure: re-prompt, state untouched.
    async fn reject(&self, context: &ConversationContext, err: StudyBuddyError) -> Result<Advance> {
        match err {
            StudyBuddyError::Validation(message) => {
                let menu = match (context.flow, context.step) {
                    (Some(flow), Some(step)) => Self::step_menu(flow, step),
                    _ => None,
                };
                self.sink.send(context.user_id, &message, menu).await?;
                Ok(Advance {
                    step: context.step,
                    effect: SideEffect::Prompted,
                })
            }
            other => Err(other),
        }
    }

    /// Terminate a flow because the store failed: state is already cleared,
    /// tell the user and propagate the error. No retry.
    async fn report_store_failure(&self, user_id: i64, err: StudyBuddyError) -> Result<Advance> {
        warn!(user_id = user_id, error = %err, "Store operation failed, flow discarded");
        self.sink
            .send(
                user_id,
                "Something went wrong; the form was discarded.",
                Some(presentation::main_menu()),
            )
            .await?;
        Err(err)
    }

    /// Resolve an edit/delete selection input into candidate records.
    ///
    /// A purely numeric input is an exact id lookup; anything else is a
    /// case-insensitive name substring search capped at the
    /// disambiguation limit.
    async fn select_candidates(&self, input: &str) -> Result<Vec<Student>> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            match trimmed.parse::<i64>() {
                Ok(id) => Ok(self.store.find_by_id(id).await?.into_iter().collect()),
                Err(_) => Ok(Vec::new()),
            }
        } else {
            let mut candidates = self.store.find_by_name_substring(trimmed).await?;
            candidates.truncate(DISAMBIGUATION_LIMIT);
            Ok(candidates)
        }
    }
}

impl std::fmt::Debug for FlowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowEngine")
            .field("routes", &self.router.len())
            .finish_non_exhaustive()
    }
}

/// Build the route table: one route per (flow, step) the engine understands.
fn build_router() -> Router {
    Router::new()
        .route("add_name", FlowKind::Add, FlowStep::WaitingName, |i| i.has_text(), add_name)
        .route("add_age", FlowKind::Add, FlowStep::WaitingAge, |i| i.has_text(), add_age)
        .route("add_grade", FlowKind::Add, FlowStep::WaitingGrade, |i| i.has_text(), add_grade)
        .route("find_by_name", FlowKind::FindByName, FlowStep::WaitingQuery, |i| i.has_text(), find_by_name)
        .route("find_by_grade", FlowKind::FindByGrade, FlowStep::WaitingQuery, |i| i.has_text(), find_by_grade)
        .route("edit_select", FlowKind::Edit, FlowStep::WaitingSelect, |i| i.has_text(), edit_select)
        .route("edit_field", FlowKind::Edit, FlowStep::WaitingField, |i| i.has_input(), edit_field)
        .route("edit_value", FlowKind::Edit, FlowStep::WaitingValue, |i| i.has_text(), edit_value)
        .route("delete_select", FlowKind::Delete, FlowStep::WaitingSelect, |i| i.has_text(), delete_select)
        .route("delete_confirm", FlowKind::Delete, FlowStep::WaitingConfirm, |i| i.has_selection(), delete_confirm)
}

// Route entry points. Plain functions returning boxed futures so they fit the
// router's fn-pointer handler type.

fn add_name(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_add_name(engine, i, c))
}
fn add_age(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_add_age(engine, i, c))
}
fn add_grade(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_add_grade(engine, i, c))
}
fn find_by_name(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_find_by_name(engine, i, c))
}
fn find_by_grade(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_find_by_grade(engine, i, c))
}
fn edit_select(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_select(engine, i, c, FlowKind::Edit))
}
fn edit_field(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_edit_field(engine, i, c))
}
fn edit_value(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_edit_value(engine, i, c))
}
fn delete_select(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_select(engine, i, c, FlowKind::Delete))
}
fn delete_confirm(engine: &FlowEngine, i: Interaction, c: ConversationContext) -> BoxFuture<'_, Result<Advance>> {
    Box::pin(handle_delete_confirm(engine, i, c))
}

/// Add flow: collect the name.
async fn handle_add_name(
    engine: &FlowEngine,
    interaction: Interaction,
    mut context: ConversationContext,
) -> Result<Advance> {
    let input = interaction.input().unwrap_or_default();
    if let Err(e) = engine.flows.validate_input(FlowKind::Add, FlowStep::WaitingName, input) {
        return engine.reject(&context, e).await;
    }

    context.set_data(KEY_NAME, input.trim())?;
    engine.flows.next_step(&mut context, FlowStep::WaitingAge)?;
    engine.tracker.save_context(&context).await?;
    engine.prompt_step(context.user_id, FlowKind::Add, FlowStep::WaitingAge).await?;

    Ok(Advance {
        step: Some(FlowStep::WaitingAge),
        effect: SideEffect::Prompted,
    })
}

/// Add flow: collect the age. Non-numeric or negative input re-prompts
/// without advancing state.
async fn handle_add_age(
    engine: &FlowEngine,
    interaction: Interaction,
    mut context: ConversationContext,
) -> Result<Advance> {
    let input = interaction.input().unwrap_or_default();
    if let Err(e) = engine.flows.validate_input(FlowKind::Add, FlowStep::WaitingAge, input) {
        return engine.reject(&context, e).await;
    }

    // validate_input guarantees a non-negative i32 here
    let age: i32 = input.trim().parse().map_err(|_| {
        StudyBuddyError::InvalidInput(format!("Unparseable age after validation: {}", input))
    })?;

    context.set_data(KEY_AGE, age)?;
    engine.flows.next_step(&mut context, FlowStep::WaitingGrade)?;
    engine.tracker.save_context(&context).await?;
    engine.prompt_step(context.user_id, FlowKind::Add, FlowStep::WaitingGrade).await?;

    Ok(Advance {
        step: Some(FlowStep::WaitingGrade),
        effect: SideEffect::Prompted,
    })
}

/// Add flow terminal step: collect the grade and insert the record.
async fn handle_add_grade(
    engine: &FlowEngine,
    interaction: Interaction,
    context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;
    let input = interaction.input().unwrap_or_default();
    if let Err(e) = engine.flows.validate_input(FlowKind::Add, FlowStep::WaitingGrade, input) {
        return engine.reject(&context, e).await;
    }

    let (name, age) = match (context.get_string(KEY_NAME), context.get_i64(KEY_AGE)) {
        (Some(name), Some(age)) => (name, age as i32),
        _ => {
            // Accumulated fields are gone; the flow cannot complete.
            engine.tracker.delete_context(user_id).await?;
            return Err(StudyBuddyError::InvalidInput(
                "Add flow reached its terminal step without name and age".to_string(),
            ));
        }
    };

    let new = NewStudent {
        name,
        age,
        grade: input.trim().to_string(),
    };

    let result = engine.store.insert(new).await;
    engine.tracker.delete_context(user_id).await?;

    match result {
        Ok(student) => {
            log_flow_completed(user_id, FlowKind::Add.as_str(), "inserted");
            let text = format!("Student added!\n{}", presentation::format_student(&student));
            engine
                .sink
                .send(user_id, &text, Some(presentation::main_menu()))
                .await?;
            Ok(Advance {
                step: None,
                effect: SideEffect::Inserted(student),
            })
        }
        Err(e) => engine.report_store_failure(user_id, e).await,
    }
}

/// Find-by-name terminal step: an empty query lists everyone.
async fn handle_find_by_name(
    engine: &FlowEngine,
    interaction: Interaction,
    context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;
    let query = interaction.input().unwrap_or_default().trim().to_string();

    let result = engine.store.find_by_name_substring(&query).await;
    engine.tracker.delete_context(user_id).await?;

    let students = match result {
        Ok(students) => students,
        Err(e) => return engine.report_store_failure(user_id, e).await,
    };

    log_flow_completed(user_id, FlowKind::FindByName.as_str(), "queried");
    engine
        .sink
        .send(
            user_id,
            &presentation::format_search_results(&students),
            Some(presentation::main_menu()),
        )
        .await?;

    Ok(Advance {
        step: None,
        effect: SideEffect::Found(students),
    })
}

/// Find-by-grade terminal step: exact, case-insensitive grade match.
async fn handle_find_by_grade(
    engine: &FlowEngine,
    interaction: Interaction,
    context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;
    let input = interaction.input().unwrap_or_default();
    if let Err(e) = engine.flows.validate_input(FlowKind::FindByGrade, FlowStep::WaitingQuery, input) {
        return engine.reject(&context, e).await;
    }

    let result = engine.store.find_by_grade_exact(input.trim()).await;
    engine.tracker.delete_context(user_id).await?;

    let students = match result {
        Ok(students) => students,
        Err(e) => return engine.report_store_failure(user_id, e).await,
    };

    log_flow_completed(user_id, FlowKind::FindByGrade.as_str(), "queried");
    engine
        .sink
        .send(
            user_id,
            &presentation::format_search_results(&students),
            Some(presentation::main_menu()),
        )
        .await?;

    Ok(Advance {
        step: None,
        effect: SideEffect::Found(students),
    })
}

/// Shared selection step for the edit and delete flows.
///
/// Zero candidates terminates with NotFound, one advances, several re-enter
/// the same step listing the candidates.
async fn handle_select(
    engine: &FlowEngine,
    interaction: Interaction,
    mut context: ConversationContext,
    flow: FlowKind,
) -> Result<Advance> {
    let user_id = context.user_id;
    let input = interaction.input().unwrap_or_default();
    if let Err(e) = engine.flows.validate_input(flow, FlowStep::WaitingSelect, input) {
        return engine.reject(&context, e).await;
    }

    let candidates = match engine.select_candidates(input).await {
        Ok(candidates) => candidates,
        Err(e) => {
            engine.tracker.delete_context(user_id).await?;
            return engine.report_store_failure(user_id, e).await;
        }
    };

    match candidates.len() {
        0 => {
            engine.tracker.delete_context(user_id).await?;
            log_flow_completed(user_id, flow.as_str(), "not_found");
            engine
                .sink
                .send(user_id, "No student matched.", Some(presentation::main_menu()))
                .await?;
            Ok(Advance {
                step: None,
                effect: SideEffect::NotFound,
            })
        }
        1 => {
            let student = candidates[0].clone();
            context.set_data(KEY_STUDENT_ID, student.id)?;

            let next = match flow {
                FlowKind::Edit => FlowStep::WaitingField,
                _ => FlowStep::WaitingConfirm,
            };
            engine.flows.next_step(&mut context, next)?;
            engine.tracker.save_context(&context).await?;

            let text = match flow {
                FlowKind::Edit => format!(
                    "Editing {}\n{}",
                    presentation::format_candidate(&student),
                    engine.flows.prompt(FlowKind::Edit, FlowStep::WaitingField)?
                ),
                _ => format!(
                    "Delete {}?",
                    presentation::format_candidate(&student)
                ),
            };
            engine
                .sink
                .send(user_id, &text, FlowEngine::step_menu(flow, next))
                .await?;

            Ok(Advance {
                step: Some(next),
                effect: SideEffect::Prompted,
            })
        }
        _ => {
            // Disambiguation: stay at the selection step and narrow on the
            // next input.
            engine.flows.next_step(&mut context, FlowStep::WaitingSelect)?;
            engine.tracker.save_context(&context).await?;
            engine
                .sink
                .send(user_id, &presentation::format_candidates(&candidates), None)
                .await?;
            Ok(Advance {
                step: Some(FlowStep::WaitingSelect),
                effect: SideEffect::Prompted,
            })
        }
    }
}

/// Edit flow: pick which field to change, or cancel.
async fn handle_edit_field(
    engine: &FlowEngine,
    interaction: Interaction,
    mut context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;
    let input = interaction.input().unwrap_or_default();

    if input == tokens::EDIT_CANCEL {
        engine.tracker.delete_context(user_id).await?;
        log_flow_completed(user_id, FlowKind::Edit.as_str(), "cancelled");
        engine
            .sink
            .send(user_id, "Edit cancelled.", Some(presentation::main_menu()))
            .await?;
        return Ok(Advance {
            step: None,
            effect: SideEffect::Cancelled,
        });
    }

    let field_name = input.strip_prefix("field:").unwrap_or(input);
    let Some(field) = StudentField::parse(field_name) else {
        let message = engine.flows.error_message(FlowKind::Edit, FlowStep::WaitingField)?.to_string();
        return engine.reject(&context, StudyBuddyError::Validation(message)).await;
    };

    context.set_data(KEY_FIELD, field)?;
    engine.flows.next_step(&mut context, FlowStep::WaitingValue)?;
    engine.tracker.save_context(&context).await?;
    engine.prompt_step(user_id, FlowKind::Edit, FlowStep::WaitingValue).await?;

    Ok(Advance {
        step: Some(FlowStep::WaitingValue),
        effect: SideEffect::Prompted,
    })
}

/// Edit flow terminal step: validate the new value and update the field.
async fn handle_edit_value(
    engine: &FlowEngine,
    interaction: Interaction,
    context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;
    let input = interaction.input().unwrap_or_default();
    let trimmed = input.trim();

    let (field, id) = match (context.get_data::<StudentField>(KEY_FIELD)?, context.get_i64(KEY_STUDENT_ID)) {
        (Some(field), Some(id)) => (field, id),
        _ => {
            engine.tracker.delete_context(user_id).await?;
            return Err(StudyBuddyError::InvalidInput(
                "Edit flow reached its terminal step without a target".to_string(),
            ));
        }
    };

    let value = match field {
        StudentField::Age => match trimmed.parse::<i32>() {
            Ok(n) if n >= 0 => FieldValue::Number(n),
            _ => {
                return engine
                    .reject(
                        &context,
                        StudyBuddyError::Validation(
                            "Age must be a non-negative whole number, try again:".to_string(),
                        ),
                    )
                    .await;
            }
        },
        StudentField::Name | StudentField::Grade => {
            if trimmed.is_empty() {
                return engine
                    .reject(
                        &context,
                        StudyBuddyError::Validation("Please enter a non-empty value.".to_string()),
                    )
                    .await;
            }
            FieldValue::Text(trimmed.to_string())
        }
    };

    let result = engine.store.update_field(id, field, value).await;
    engine.tracker.delete_context(user_id).await?;

    match result {
        Ok(student) => {
            log_flow_completed(user_id, FlowKind::Edit.as_str(), "updated");
            let text = format!(
                "Updated the {} of {}",
                field.label(),
                presentation::format_student(&student)
            );
            engine
                .sink
                .send(user_id, &text, Some(presentation::main_menu()))
                .await?;
            Ok(Advance {
                step: None,
                effect: SideEffect::Updated(student),
            })
        }
        Err(StudyBuddyError::StudentNotFound { .. }) => {
            log_flow_completed(user_id, FlowKind::Edit.as_str(), "not_found");
            engine
                .sink
                .send(
                    user_id,
                    "That student no longer exists.",
                    Some(presentation::main_menu()),
                )
                .await?;
            Ok(Advance {
                step: None,
                effect: SideEffect::NotFound,
            })
        }
        Err(e) => engine.report_store_failure(user_id, e).await,
    }
}

/// Delete flow terminal step: delete on confirmation, abort on cancel.
async fn handle_delete_confirm(
    engine: &FlowEngine,
    interaction: Interaction,
    context: ConversationContext,
) -> Result<Advance> {
    let user_id = context.user_id;

    match interaction.selection.as_deref() {
        Some(tokens::DELETE_CONFIRM) => {
            let Some(id) = context.get_i64(KEY_STUDENT_ID) else {
                engine.tracker.delete_context(user_id).await?;
                return Err(StudyBuddyError::InvalidInput(
                    "Delete flow reached its confirmation step without a target".to_string(),
                ));
            };

            let result = engine.store.delete_by_id(id).await;
            engine.tracker.delete_context(user_id).await?;

            match result {
                Ok(()) => {
                    log_flow_completed(user_id, FlowKind::Delete.as_str(), "deleted");
                    engine
                        .sink
                        .send(user_id, "Student deleted.", Some(presentation::main_menu()))
                        .await?;
                    Ok(Advance {
                        step: None,
                        effect: SideEffect::Deleted(id),
                    })
                }
                Err(StudyBuddyError::StudentNotFound { .. }) => {
                    log_flow_completed(user_id, FlowKind::Delete.as_str(), "not_found");
                    engine
                        .sink
                        .send(
                            user_id,
                            "That student no longer exists.",
                            Some(presentation::main_menu()),
                        )
                        .await?;
                    Ok(Advance {
                        step: None,
                        effect: SideEffect::NotFound,
                    })
                }
                Err(e) => engine.report_store_failure(user_id, e).await,
            }
        }
        Some(tokens::DELETE_CANCEL) => {
            engine.tracker.delete_context(user_id).await?;
            log_flow_completed(user_id, FlowKind::Delete.as_str(), "cancelled");
            engine
                .sink
                .send(user_id, "Deletion cancelled.", Some(presentation::main_menu()))
                .await?;
            Ok(Advance {
                step: None,
                effect: SideEffect::Cancelled,
            })
        }
        _ => {
            let message = engine
                .flows
                .error_message(FlowKind::Delete, FlowStep::WaitingConfirm)?
                .to_string();
            engine.reject(&context, StudyBuddyError::Validation(message)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_covers_every_step() {
        let router = build_router();
        assert_eq!(router.len(), 10);

        assert!(router.has_routes(FlowKind::Add, FlowStep::WaitingName));
        assert!(router.has_routes(FlowKind::Add, FlowStep::WaitingAge));
        assert!(router.has_routes(FlowKind::Add, FlowStep::WaitingGrade));
        assert!(router.has_routes(FlowKind::FindByName, FlowStep::WaitingQuery));
        assert!(router.has_routes(FlowKind::FindByGrade, FlowStep::WaitingQuery));
        assert!(router.has_routes(FlowKind::Edit, FlowStep::WaitingSelect));
        assert!(router.has_routes(FlowKind::Edit, FlowStep::WaitingField));
        assert!(router.has_routes(FlowKind::Edit, FlowStep::WaitingValue));
        assert!(router.has_routes(FlowKind::Delete, FlowStep::WaitingSelect));
        assert!(router.has_routes(FlowKind::Delete, FlowStep::WaitingConfirm));
    }

    #[test]
    fn test_confirm_step_only_accepts_selections() {
        let router = build_router();

        let typed = Interaction::message(1, "yes");
        assert!(router
            .resolve(FlowKind::Delete, FlowStep::WaitingConfirm, &typed)
            .is_none());

        let pressed = Interaction::selection(1, tokens::DELETE_CONFIRM);
        assert!(router
            .resolve(FlowKind::Delete, FlowStep::WaitingConfirm, &pressed)
            .is_some());
    }
}
