//! Conversation Orchestrator - sequences routing and generation
//!
//! Single entry point `submit`: append the user message, classify it,
//! update the active agent, emit the routing notice when the specialist
//! changes, generate the reply with a trailing history window, and append
//! it. The busy flag is set for the whole round trip and cleared on every
//! exit path.
//!
//! Every message is reclassified from scratch and the active agent is
//! overwritten unconditionally; there is no sticky-specialist logic.

use crate::agents::AgentKey;
use crate::classifier::Classifier;
use crate::generator::ResponseGenerator;
use crate::session::SessionState;
use garmen_llm::LlmProvider;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// Appended when the submit pipeline fails unexpectedly
pub const ORCHESTRATION_ERROR_MESSAGE: &str = "Maaf, terjadi kesalahan pada sistem agen.";

/// Result of a `submit` call
///
/// Rejections append nothing to the log; callers that care (the UI input
/// gate) can distinguish them without inspecting session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round trip ran to completion (including caught failures)
    Completed,
    /// Empty or whitespace-only input, dropped
    RejectedEmpty,
    /// A round trip was already in flight, dropped
    RejectedBusy,
}

/// Owns the session and coordinates the classify-then-generate round trip
pub struct Orchestrator {
    classifier: Classifier,
    generator: ResponseGenerator,
    session: SessionState,
}

impl Orchestrator {
    /// Create an orchestrator over a provider, fresh session
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            classifier: Classifier::new(provider.clone()),
            generator: ResponseGenerator::new(provider),
            session: SessionState::new(),
        }
    }

    /// Override the model used for both routing and generation calls
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.classifier = self.classifier.with_model(model.clone());
        self.generator = self.generator.with_model(model);
        self
    }

    /// Read-only view of the session for the presentation layer
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Handle one user submission.
    ///
    /// Rejected submissions change no state. Accepted submissions always
    /// clear the busy flag before returning, whichever path was taken.
    pub async fn submit(&mut self, user_text: &str) -> SubmitOutcome {
        if user_text.trim().is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }
        if self.session.is_busy() {
            warn!("Submission dropped: round trip already in flight");
            return SubmitOutcome::RejectedBusy;
        }

        // History for this turn is the log as it stood before the new
        // user message.
        let history_cutoff = self.session.messages().len();
        self.session.append_user(user_text);
        self.session.set_busy(true);

        if let Err(e) = self.run_turn(user_text, history_cutoff).await {
            warn!(error = %e, "Submit pipeline failed");
            self.session.append_system(ORCHESTRATION_ERROR_MESSAGE);
        }
        self.session.set_busy(false);

        SubmitOutcome::Completed
    }

    /// Classify, update the active agent, notify, generate, append.
    ///
    /// The routing and generation components absorb their own failures; an
    /// error here is the unexpected kind and surfaces as a system message
    /// in `submit`.
    async fn run_turn(&mut self, user_text: &str, history_cutoff: usize) -> anyhow::Result<()> {
        let previous_agent = self.session.active_agent();

        let decision = self.classifier.classify(user_text).await;
        // Unconditional: the active agent follows every decision, even an
        // unchanged one.
        self.session.set_active_agent(decision.target);

        if decision.fallback {
            self.session.append_system(decision.reason.clone());
        } else if decision.target != AgentKey::Main && decision.target != previous_agent {
            let profile = decision.target.profile();
            info!(from = %previous_agent, to = %decision.target, "Agent switch");
            self.session.append_system(format!(
                "\u{1f500} Mengalihkan ke **{}**: {}",
                profile.name, decision.reason
            ));
        }

        let history = self.session.history_window(history_cutoff);
        let reply = self
            .generator
            .generate(decision.target, user_text, &history)
            .await;
        self.session.append_agent(decision.target, reply);

        Ok(())
    }
}
