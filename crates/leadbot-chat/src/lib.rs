//! Rule-based chat for the roofing site.
//!
//! Matches visitor utterances against square-footage quotes, trigger phrases
//! and keyword families, collects a lead's name, phone and e-mail, and tracks
//! per-visitor sessions.

pub mod engine;
pub mod error;
pub mod matcher;
pub mod replies;
pub mod session;

pub use engine::{ContactStage, ConversationEngine, ConversationState, TurnOutcome, TurnRoute};
pub use error::ChatError;
pub use matcher::{IntentMatcher, QuantityQuote, Topic};
pub use replies::ReplyBook;
pub use session::{ChatSession, SessionManager, SessionSummary, SessionTurn};
