//! Session state: the append-only conversation log
//!
//! `SessionState` is owned exclusively by the `Orchestrator` and lives for
//! one interactive session. Nothing here is persisted.

use crate::agents::AgentKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of prior log entries included in the generator's history window
pub const HISTORY_WINDOW: usize = 5;

/// Opening system message shown at the start of every session
pub const WELCOME_MESSAGE: &str = "Selamat datang di SIA Manufaktur Garmen. Saya Agen Utama. \
    Apa yang bisa saya bantu? (Contoh: \"Buatkan invoice penjualan\", \"Berapa HPP batch A?\", \
    \"Cek stok kain\")";

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Raw user input
    User,
    /// Reply produced by a specialist agent
    Agent,
    /// Routing notices, welcome text, error fallbacks
    System,
}

impl ChatRole {
    /// String form used in history windows
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::System => "system",
        }
    }
}

/// A single immutable entry in the conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    /// Originating agent, if any (user messages carry none)
    pub agent: Option<AgentKey>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    fn new(role: ChatRole, content: impl Into<String>, agent: Option<AgentKey>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            agent,
            timestamp: Utc::now(),
        }
    }
}

/// In-memory conversation state for one session
///
/// Invariants: the log is append-only and insertion-ordered; exactly one
/// agent is active at any time; the busy flag gates new submissions.
#[derive(Debug)]
pub struct SessionState {
    messages: Vec<ConversationMessage>,
    active_agent: AgentKey,
    busy: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create a session seeded with the welcome message, Main agent active
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ConversationMessage::new(
                ChatRole::System,
                WELCOME_MESSAGE,
                Some(AgentKey::Main),
            )],
            active_agent: AgentKey::Main,
            busy: false,
        }
    }

    /// Ordered conversation log
    #[must_use]
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Currently active agent
    #[must_use]
    pub fn active_agent(&self) -> AgentKey {
        self.active_agent
    }

    /// Whether a submit round trip is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(crate) fn set_active_agent(&mut self, agent: AgentKey) {
        self.active_agent = agent;
    }

    pub(crate) fn append_user(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(ChatRole::User, content, None));
    }

    pub(crate) fn append_agent(&mut self, agent: AgentKey, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(ChatRole::Agent, content, Some(agent)));
    }

    pub(crate) fn append_system(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::new(
            ChatRole::System,
            content,
            Some(AgentKey::Main),
        ));
    }

    /// Trailing history window: the last `HISTORY_WINDOW` entries of the
    /// first `up_to` log entries, formatted as `"<role>: <content>"` lines.
    #[must_use]
    pub(crate) fn history_window(&self, up_to: usize) -> Vec<String> {
        let log = &self.messages[..up_to.min(self.messages.len())];
        log.iter()
            .rev()
            .take(HISTORY_WINDOW)
            .rev()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect()
    }
}
