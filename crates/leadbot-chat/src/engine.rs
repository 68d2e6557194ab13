//! Conversation engine: one bot reply per visitor utterance.
//!
//! Each turn is routed in strict priority order:
//! 1. square-footage quote
//! 2. fixed trigger phrase
//! 3. contact-collection continuation (name -> phone -> email)
//! 4. keyword family
//! 5. catch-all, which (re)starts collection by asking for the name
//!
//! The engine holds no timers and never fails. Presentation delays and
//! notification delivery belong to the caller.

use serde::{Deserialize, Serialize};

use leadbot_core::config::{LeadbotConfig, RelayPolicy};
use leadbot_core::types::{render_transcript, Contact, ContactField, Message, NotificationRequest};

use crate::matcher::{IntentMatcher, QuantityQuote, Topic};
use crate::replies::{ReplyBook, CONTACT_COLLECTED};

/// Topic label recorded when a visitor asks for a square-footage estimate.
pub const TOPIC_QUOTE: &str = "quote";
/// Topic label recorded when the catch-all restarts collection.
pub const TOPIC_GENERAL_INQUIRY: &str = "general inquiry";

// =============================================================================
// State
// =============================================================================

/// Where the contact-collection flow currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStage {
    /// Not collecting; utterances get informational replies.
    Idle,
    AwaitingName,
    AwaitingPhone,
    AwaitingEmail,
    /// Collection was restarted after every field had been filled. Nothing is
    /// left to record, so utterances fall through to keyword matching.
    Exhausted,
}

/// Per-session conversation state, owned by exactly one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    history: Vec<Message>,
    collecting_contact: bool,
    contact: Contact,
}

impl ConversationState {
    /// Fresh state seeded with the greeting, already awaiting a name.
    fn with_greeting(greeting: Message) -> Self {
        Self {
            history: vec![greeting],
            collecting_contact: true,
            contact: Contact::default(),
        }
    }

    /// Every message so far, in order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn collecting_contact(&self) -> bool {
        self.collecting_contact
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn stage(&self) -> ContactStage {
        if !self.collecting_contact {
            return ContactStage::Idle;
        }
        match self.contact.next_missing() {
            Some(ContactField::Name) => ContactStage::AwaitingName,
            Some(ContactField::Phone) => ContactStage::AwaitingPhone,
            Some(ContactField::Email) => ContactStage::AwaitingEmail,
            None => ContactStage::Exhausted,
        }
    }
}

// =============================================================================
// Turn outcome
// =============================================================================

/// Which rule produced the reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnRoute {
    Quote(QuantityQuote),
    Phrase { topic: Topic },
    Collected { field: ContactField },
    Keyword { topic: Topic },
    Fallback,
}

impl TurnRoute {
    /// True when the turn filled the last contact field.
    pub fn completes_lead(&self) -> bool {
        matches!(
            self,
            TurnRoute::Collected {
                field: ContactField::Email
            }
        )
    }
}

/// Result of one visitor turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The bot message appended to the history.
    pub reply: Message,
    pub route: TurnRoute,
    /// Lead or relay to forward to the notifier, if any.
    pub notification: Option<NotificationRequest>,
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless rule set applied to a [`ConversationState`] one turn at a time.
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    matcher: IntentMatcher,
    replies: ReplyBook,
    relay_policy: RelayPolicy,
}

impl ConversationEngine {
    pub fn new(matcher: IntentMatcher, replies: ReplyBook, relay_policy: RelayPolicy) -> Self {
        Self {
            matcher,
            replies,
            relay_policy,
        }
    }

    pub fn from_config(config: &LeadbotConfig) -> Self {
        Self::new(
            IntentMatcher::new(&config.pricing),
            ReplyBook::new(&config.business),
            config.chat.relay_policy,
        )
    }

    /// Start a conversation: greeting in the history, awaiting a name.
    pub fn start(&self) -> ConversationState {
        ConversationState::with_greeting(self.replies.greeting())
    }

    /// Process one utterance.
    ///
    /// Appends the utterance and exactly one bot reply to the history. The
    /// caller is expected to have trimmed the utterance and rejected empty
    /// input.
    pub fn handle_user_turn(&self, state: &mut ConversationState, utterance: &str) -> TurnOutcome {
        let was_idle = !state.collecting_contact;
        state.history.push(Message::user(utterance));

        let lowered = utterance.to_lowercase();
        let (reply, route, lead) = self.route(state, utterance, &lowered);
        state.history.push(reply.clone());

        let notification = lead.or_else(|| {
            self.should_relay(was_idle, &route).then(|| {
                NotificationRequest::relay(format!(
                    "User: {}\n\nBot: {}",
                    utterance, reply.content
                ))
            })
        });

        tracing::debug!(
            route = ?route,
            stage = ?state.stage(),
            notify = notification.is_some(),
            "Chat turn routed"
        );

        TurnOutcome {
            reply,
            route,
            notification,
        }
    }

    fn route(
        &self,
        state: &mut ConversationState,
        utterance: &str,
        lowered: &str,
    ) -> (Message, TurnRoute, Option<NotificationRequest>) {
        if let Some(quote) = self.matcher.extract_quote(utterance) {
            state.collecting_contact = true;
            state.contact.topic = TOPIC_QUOTE.to_string();
            return (self.replies.quote_estimate(&quote), TurnRoute::Quote(quote), None);
        }

        if let Some(topic) = self.matcher.match_phrase(lowered) {
            return (self.replies.topic(topic), TurnRoute::Phrase { topic }, None);
        }

        if state.collecting_contact {
            if let Some(field) = state.contact.next_missing() {
                state.contact.set(field, utterance);
                let route = TurnRoute::Collected { field };
                return match field {
                    ContactField::Name => (self.replies.ask_phone(), route, None),
                    ContactField::Phone => (self.replies.ask_email(), route, None),
                    ContactField::Email => {
                        state.collecting_contact = false;
                        let transcript = format!(
                            "{}\n\nBot: {}",
                            render_transcript(&state.history),
                            CONTACT_COLLECTED
                        );
                        let lead = NotificationRequest::lead(transcript, state.contact.clone());
                        tracing::info!(topic = %state.contact.topic, "Chat lead completed");
                        (self.replies.collection_complete(), route, Some(lead))
                    }
                };
            }
        }

        if let Some(topic) = self.matcher.match_keyword(lowered) {
            return (self.replies.topic(topic), TurnRoute::Keyword { topic }, None);
        }

        state.collecting_contact = true;
        state.contact.topic = TOPIC_GENERAL_INQUIRY.to_string();
        (self.replies.ask_name(), TurnRoute::Fallback, None)
    }

    fn should_relay(&self, was_idle: bool, route: &TurnRoute) -> bool {
        if !was_idle {
            return false;
        }
        match self.relay_policy {
            RelayPolicy::UnmatchedTurns => matches!(route, TurnRoute::Fallback),
            RelayPolicy::Mirror => {
                matches!(route, TurnRoute::Phrase { .. } | TurnRoute::Keyword { .. })
            }
            RelayPolicy::Off => false,
        }
    }
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::from_config(&LeadbotConfig::default())
    }
}
