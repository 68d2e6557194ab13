//! Contact-form submissions from the site's "Get in touch" section.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

pub const MISSING_FIELDS: &str = "Please fill out all required fields.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// A submitted contact form. Phone is the only optional field.
///
/// Absent keys deserialize as blank so that `validate` reports them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Check required fields, then the e-mail shape.
    pub fn validate(&self) -> Result<(), NotifyError> {
        let required = [&self.name, &self.email, &self.service, &self.message];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(NotifyError::InvalidSubmission(MISSING_FIELDS.to_string()));
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(NotifyError::InvalidSubmission(INVALID_EMAIL.to_string()));
        }
        Ok(())
    }
}
