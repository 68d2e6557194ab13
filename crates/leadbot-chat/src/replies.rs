//! Canned bot copy.
//!
//! Reply text is marketing copy parameterised by the business details from
//! configuration. Only the presence of quick replies matters to the engine.

use leadbot_core::config::BusinessConfig;
use leadbot_core::types::Message;

use crate::matcher::{QuantityQuote, Topic};

/// Closing line appended to a completed lead's transcript.
pub const CONTACT_COLLECTED: &str = "Contact information collected.";

/// Quick replies offered once a lead is complete.
pub const MENU_OPTIONS: [&str; 4] = [
    "Get a quote",
    "Services info",
    "Emergency repair",
    "Free inspection",
];

/// Builds every bot message the engine can send.
#[derive(Debug, Clone)]
pub struct ReplyBook {
    business: BusinessConfig,
}

impl ReplyBook {
    pub fn new(business: &BusinessConfig) -> Self {
        Self {
            business: business.clone(),
        }
    }

    /// First message of every session. Asks for the visitor's name.
    pub fn greeting(&self) -> Message {
        Message::bot(format!(
            "Hello! I'm {}'s virtual assistant. To help you better, could you please provide your name?",
            self.business.name
        ))
    }

    /// Informational reply for a topic, with its quick replies.
    pub fn topic(&self, topic: Topic) -> Message {
        let b = &self.business;
        let (content, options): (String, &[&str]) = match topic {
            Topic::GetQuote => (
                "I can help you calculate a rough estimate. Please tell me the approximate square footage of your roof (e.g., \"1500 sq ft\"). Remember, this will be a basic estimate, and the final price may vary after inspection.".to_string(),
                &["Example: 1500 sq ft", "Not sure", "Schedule inspection"],
            ),
            Topic::ServicesInfo => (
                "We offer a comprehensive range of roofing services including:\n\n\
                 • Roof Replacement\n\
                 • Roof Repairs\n\
                 • Insurance Claims Assistance\n\
                 • Fencing\n\
                 • Drywall Services\n\
                 • Emergency Services\n\n\
                 Which service would you like to learn more about?"
                    .to_string(),
                &[
                    "Roof Replacement",
                    "Roof Repairs",
                    "Insurance Claims",
                    "Fencing",
                    "Drywall",
                    "Emergency",
                ],
            ),
            Topic::EmergencyRepair => (
                format!(
                    "I understand you need emergency assistance. Our team is available for urgent roofing problems. Please call us at {} for assistance, or provide your contact information and a brief description of the issue, and we'll reach out right away.",
                    b.phone
                ),
                &["Call now", "Leave contact info"],
            ),
            Topic::ContactUs => (
                format!(
                    "You can reach us through several channels:\n\n\
                     • Phone: {}\n\
                     • Email: {}\n\
                     • Office: {}\n\n\
                     Our business hours are flexible as the company owner can receive calls anytime. Would you like us to contact you?",
                    b.phone, b.email, b.office
                ),
                &["Yes, contact me", "No, thanks"],
            ),
            Topic::FreeInspection => (
                "We'd be happy to provide a free roof inspection! This includes a comprehensive assessment of your roof's condition and a detailed report of any issues found. When would be a good time for our team to visit your property?".to_string(),
                &["Schedule now", "Call me", "More info"],
            ),
        };
        Message::bot_with_options(content, to_options(options))
    }

    /// Estimate for a stated roof area, followed by a request for the name.
    pub fn quote_estimate(&self, quote: &QuantityQuote) -> Message {
        Message::bot(format!(
            "Based on {} square feet ({} squares), your estimated price would be ${}. \
             This is a rough estimate and the final price may vary based on:\n\n\
             • Roof complexity\n\
             • Material choices\n\
             • Current roof condition\n\n\
             To get back to you with a detailed quote, I'll need your contact information. What's your name?",
            quote.sqft, quote.squares, quote.price
        ))
    }

    pub fn ask_phone(&self) -> Message {
        Message::bot("Thanks! What's your phone number?")
    }

    pub fn ask_email(&self) -> Message {
        Message::bot("Great! Finally, what's your email address?")
    }

    /// Sent after the e-mail address completes a lead.
    pub fn collection_complete(&self) -> Message {
        Message::bot_with_options(
            "Perfect! How can I help you today? We offer free roof inspections!",
            to_options(&MENU_OPTIONS),
        )
    }

    /// Catch-all reply that restarts contact collection.
    pub fn ask_name(&self) -> Message {
        Message::bot(
            "I'd be happy to help you with that. First, could you please provide your name so we can get back to you?",
        )
    }
}

impl Default for ReplyBook {
    fn default() -> Self {
        Self::new(&BusinessConfig::default())
    }
}

fn to_options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}
