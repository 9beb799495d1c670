//! Explicit interaction routing
//!
//! A router structure mapping (flow, step, input-predicate) to a handler
//! function. It is constructed once and handed to the interaction loop;
//! there is no hidden global registry and no implicit state injection.

use futures::future::BoxFuture;

use crate::engine::interaction::Interaction;
use crate::engine::{Advance, FlowEngine};
use crate::state::context::ConversationContext;
use crate::state::flows::{FlowKind, FlowStep};
use crate::utils::errors::Result;

/// Handler invoked when a route matches.
pub type RouteHandler =
    for<'a> fn(&'a FlowEngine, Interaction, ConversationContext) -> BoxFuture<'a, Result<Advance>>;

/// Predicate deciding whether an interaction's shape is accepted.
pub type InputPredicate = fn(&Interaction) -> bool;

/// One (flow, step, predicate) -> handler mapping.
pub struct Route {
    pub name: &'static str,
    pub flow: FlowKind,
    pub step: FlowStep,
    pub accepts: InputPredicate,
    pub handler: RouteHandler,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("flow", &self.flow)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

/// The route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route (builder style).
    pub fn route(
        mut self,
        name: &'static str,
        flow: FlowKind,
        step: FlowStep,
        accepts: InputPredicate,
        handler: RouteHandler,
    ) -> Self {
        self.routes.push(Route {
            name,
            flow,
            step,
            accepts,
            handler,
        });
        self
    }

    /// Find the first route matching the state and accepting the interaction.
    pub fn resolve(&self, flow: FlowKind, step: FlowStep, interaction: &Interaction) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.flow == flow && r.step == step && (r.accepts)(interaction))
    }

    /// Whether any route exists for this state, regardless of input shape.
    pub fn has_routes(&self, flow: FlowKind, step: FlowStep) -> bool {
        self.routes.iter().any(|r| r.flow == flow && r.step == step)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
