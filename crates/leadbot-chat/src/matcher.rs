//! Rule-based utterance matching.
//!
//! Three independent matchers, consulted by the engine in priority order:
//! square-footage extraction, fixed trigger phrases, and broad keyword
//! families. All phrase and keyword tests are plain substring checks on the
//! lowercased utterance.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use leadbot_core::config::PricingConfig;

// =============================================================================
// Topics
// =============================================================================

/// A canned informational topic the bot can answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    GetQuote,
    ServicesInfo,
    EmergencyRepair,
    ContactUs,
    FreeInspection,
}

impl Topic {
    /// Fixed-phrase test order. The first phrase contained in the utterance wins.
    pub const PHRASE_ORDER: [Topic; 5] = [
        Topic::GetQuote,
        Topic::ServicesInfo,
        Topic::EmergencyRepair,
        Topic::ContactUs,
        Topic::FreeInspection,
    ];

    /// Lowercase trigger phrase for the fixed-phrase lookup.
    pub fn trigger_phrase(&self) -> &'static str {
        match self {
            Topic::GetQuote => "get a quote",
            Topic::ServicesInfo => "services info",
            Topic::EmergencyRepair => "emergency repair",
            Topic::ContactUs => "contact us",
            Topic::FreeInspection => "free inspection",
        }
    }

    /// Keywords for the broader fallback, tested after the fixed phrases.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::GetQuote => &["price", "cost", "quote"],
            Topic::ServicesInfo => &["service", "offer"],
            Topic::EmergencyRepair => &["emergency", "urgent", "leak"],
            Topic::ContactUs => &["contact", "call", "phone"],
            Topic::FreeInspection => &["inspection", "free", "check"],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger_phrase())
    }
}

// =============================================================================
// Square-footage quotes
// =============================================================================

static AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(?:sq\s*ft|square\s*feet|sqft|sf|square)")
        .expect("Invalid area regex")
});

/// A rough estimate derived from a stated roof area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityQuote {
    /// Square feet as stated by the visitor.
    pub sqft: u64,
    /// Roofing squares, rounded up.
    pub squares: u64,
    /// Estimated price in whole dollars.
    pub price: u64,
}

// =============================================================================
// IntentMatcher
// =============================================================================

/// Matches utterances against the quote pattern, trigger phrases and keywords.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    price_per_square: u64,
    sqft_per_square: u64,
}

impl IntentMatcher {
    /// Create a matcher quoting with the given pricing.
    pub fn new(pricing: &PricingConfig) -> Self {
        Self {
            price_per_square: pricing.price_per_square,
            sqft_per_square: pricing.sqft_per_square,
        }
    }

    /// Extract a square-footage figure and price it.
    ///
    /// Returns `None` when no area is mentioned, or when the figure does not
    /// fit in a `u64` or the price would overflow. Those cases fall through
    /// to the phrase and keyword matchers.
    pub fn extract_quote(&self, utterance: &str) -> Option<QuantityQuote> {
        let caps = AREA_RE.captures(utterance)?;
        let sqft: u64 = caps.get(1)?.as_str().parse().ok()?;
        let squares = sqft.checked_div(self.sqft_per_square).map(|whole| {
            if sqft % self.sqft_per_square == 0 {
                whole
            } else {
                whole + 1
            }
        })?;
        let price = squares.checked_mul(self.price_per_square)?;
        Some(QuantityQuote {
            sqft,
            squares,
            price,
        })
    }

    /// Fixed-phrase lookup. `lowered` must already be lowercase.
    pub fn match_phrase(&self, lowered: &str) -> Option<Topic> {
        Topic::PHRASE_ORDER
            .into_iter()
            .find(|topic| lowered.contains(topic.trigger_phrase()))
    }

    /// Keyword-family fallback. `lowered` must already be lowercase.
    ///
    /// Families are tested in the same order as the phrases, so a price word
    /// beats an emergency word in the same sentence.
    pub fn match_keyword(&self, lowered: &str) -> Option<Topic> {
        Topic::PHRASE_ORDER.into_iter().find(|topic| {
            topic
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(&PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> IntentMatcher {
        IntentMatcher::default()
    }

    // ---- Quote extraction ----

    #[test]
    fn test_quote_1500_sq_ft() {
        let q = matcher().extract_quote("1500 sq ft").unwrap();
        assert_eq!(q.sqft, 1500);
        assert_eq!(q.squares, 15);
        assert_eq!(q.price, 4875);
    }

    #[test]
    fn test_quote_rounds_squares_up() {
        let q = matcher().extract_quote("about 1501 sqft").unwrap();
        assert_eq!(q.squares, 16);
        assert_eq!(q.price, 16 * 325);

        let q = matcher().extract_quote("99sf").unwrap();
        assert_eq!(q.squares, 1);
        assert_eq!(q.price, 325);
    }

    #[test]
    fn test_quote_unit_variants() {
        let m = matcher();
        for text in [
            "1200 sq ft",
            "1200 sqft",
            "1200sq ft",
            "1200 SQ  FT",
            "1200 square feet",
            "1200 Square Feet",
            "1200 squarefeet",
            "1200 sf",
            "1200 square",
            "1200\tsq\tft",
        ] {
            let q = m
                .extract_quote(text)
                .unwrap_or_else(|| panic!("no quote for {:?}", text));
            assert_eq!(q.sqft, 1200, "{:?}", text);
            assert_eq!(q.price, 12 * 325, "{:?}", text);
        }
    }

    #[test]
    fn test_quote_embedded_in_sentence() {
        let q = matcher()
            .extract_quote("I have a leak and need help, my roof is 2000 sq ft")
            .unwrap();
        assert_eq!(q.squares, 20);
        assert_eq!(q.price, 6500);
    }

    #[test]
    fn test_quote_skips_numbers_without_unit() {
        let q = matcher()
            .extract_quote("2 stories, roughly 1800 sq ft")
            .unwrap();
        assert_eq!(q.sqft, 1800);
    }

    #[test]
    fn test_quote_zero_area() {
        let q = matcher().extract_quote("0 sq ft").unwrap();
        assert_eq!(q.squares, 0);
        assert_eq!(q.price, 0);
    }

    #[test]
    fn test_no_quote_without_unit() {
        assert!(matcher().extract_quote("1500").is_none());
        assert!(matcher().extract_quote("my house is big").is_none());
        assert!(matcher().extract_quote("sq ft 1500").is_none());
    }

    #[test]
    fn test_quote_overflowing_number_falls_through() {
        let text = format!("{}0 sq ft", u64::MAX);
        assert!(matcher().extract_quote(&text).is_none());
    }

    #[test]
    fn test_quote_overflowing_price_falls_through() {
        let text = format!("{} sq ft", u64::MAX);
        assert!(matcher().extract_quote(&text).is_none());
    }

    #[test]
    fn test_quote_non_ascii_digits_ignored() {
        assert!(matcher().extract_quote("\u{0661}\u{0662}\u{0663} sq ft").is_none());
    }

    #[test]
    fn test_quote_custom_pricing() {
        let m = IntentMatcher::new(&PricingConfig {
            price_per_square: 400,
            sqft_per_square: 50,
        });
        let q = m.extract_quote("120 sq ft").unwrap();
        assert_eq!(q.squares, 3);
        assert_eq!(q.price, 1200);
    }

    #[test]
    fn test_quote_zero_square_size_falls_through() {
        let m = IntentMatcher::new(&PricingConfig {
            price_per_square: 325,
            sqft_per_square: 0,
        });
        assert!(m.extract_quote("120 sq ft").is_none());
    }

    // ---- Fixed phrases ----

    #[test]
    fn test_phrase_each_topic() {
        let m = matcher();
        assert_eq!(m.match_phrase("i want to get a quote"), Some(Topic::GetQuote));
        assert_eq!(m.match_phrase("services info please"), Some(Topic::ServicesInfo));
        assert_eq!(m.match_phrase("emergency repair"), Some(Topic::EmergencyRepair));
        assert_eq!(m.match_phrase("how do i contact us"), Some(Topic::ContactUs));
        assert_eq!(m.match_phrase("free inspection?"), Some(Topic::FreeInspection));
    }

    #[test]
    fn test_phrase_priority_order() {
        let m = matcher();
        assert_eq!(
            m.match_phrase("emergency repair, and i also want to get a quote"),
            Some(Topic::GetQuote)
        );
        assert_eq!(
            m.match_phrase("free inspection or contact us"),
            Some(Topic::ContactUs)
        );
    }

    #[test]
    fn test_phrase_requires_whole_phrase() {
        let m = matcher();
        assert_eq!(m.match_phrase("quote"), None);
        assert_eq!(m.match_phrase("emergency"), None);
        assert_eq!(m.match_phrase("get quote"), None);
    }

    // ---- Keyword families ----

    #[test]
    fn test_keyword_families() {
        let m = matcher();
        assert_eq!(m.match_keyword("what does it cost"), Some(Topic::GetQuote));
        assert_eq!(m.match_keyword("what do you offer"), Some(Topic::ServicesInfo));
        assert_eq!(m.match_keyword("it's urgent"), Some(Topic::EmergencyRepair));
        assert_eq!(m.match_keyword("can i call you"), Some(Topic::ContactUs));
        assert_eq!(m.match_keyword("can you check my roof"), Some(Topic::FreeInspection));
        assert_eq!(m.match_keyword("hello there"), None);
    }

    #[test]
    fn test_keyword_price_beats_emergency() {
        assert_eq!(
            matcher().match_keyword("emergency! what's the price"),
            Some(Topic::GetQuote)
        );
    }

    #[test]
    fn test_keyword_substring_semantics() {
        let m = matcher();
        // "services" contains "service"; "freedom" contains "free"
        assert_eq!(m.match_keyword("your services"), Some(Topic::ServicesInfo));
        assert_eq!(m.match_keyword("freedom"), Some(Topic::FreeInspection));
        // "recall" contains "call"
        assert_eq!(m.match_keyword("i recall"), Some(Topic::ContactUs));
    }

    #[test]
    fn test_topic_display_is_trigger_phrase() {
        assert_eq!(Topic::EmergencyRepair.to_string(), "emergency repair");
    }
}
