//! Conversation orchestration core for the Garmen SIA assistant
//!
//! This crate is the "brain" of the system. Each user message goes through a
//! constrained loop:
//!
//! 1. **Routing** (`classifier`) - classify the message into one of the
//!    specialist agents via a schema-constrained LLM call
//! 2. **Execution** (`generator`) - produce the specialist's reply with a
//!    per-agent role instruction and a short history window
//! 3. **Bookkeeping** (`orchestrator`) - append everything to the
//!    append-only conversation log and keep the busy flag honest
//!
//! # Key Types
//!
//! - `Orchestrator` - owns the `SessionState`, single `submit` entry point
//! - `AgentKey` / `AgentProfile` - the closed agent registry (`agents`)
//! - `ConversationMessage` - timestamped, role-tagged log entry (`session`)
//!
//! # Failure Principle
//!
//! Nothing in this crate throws past its boundary. Routing failures default
//! to the Main agent, generation failures become fixed localized strings,
//! and anything unexpected becomes a system message. The presentation layer
//! only ever sees ordinary messages.

pub mod agents;
pub mod classifier;
pub mod generator;
pub mod orchestrator;
pub mod session;

pub use agents::{AgentKey, AgentProfile};
pub use classifier::{Classifier, RoutingDecision};
pub use generator::ResponseGenerator;
pub use orchestrator::{Orchestrator, SubmitOutcome};
pub use session::{ChatRole, ConversationMessage, SessionState};
