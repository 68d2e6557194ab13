use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LeadbotError, Result};

/// Top-level configuration for the Leadbot application.
///
/// Loaded from `~/.leadbot/config.toml` by default. Each section corresponds
/// to one crate or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadbotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub business: BusinessConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl LeadbotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LeadbotConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LeadbotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the rest of the system cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.pricing.sqft_per_square == 0 {
            return Err(LeadbotError::Config(
                "pricing.sqft_per_square must be greater than zero".to_string(),
            ));
        }
        if self.chat.max_message_length == 0 {
            return Err(LeadbotError::Config(
                "chat.max_message_length must be greater than zero".to_string(),
            ));
        }
        if self.chat.session_timeout_minutes == 0 {
            return Err(LeadbotError::Config(
                "chat.session_timeout_minutes must be greater than zero".to_string(),
            ));
        }
        if self.server.rate_limit_per_sec == 0 {
            return Err(LeadbotError::Config(
                "server.rate_limit_per_sec must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.notify.backend.as_str(), "log" | "memory") {
            return Err(LeadbotError::Config(format!(
                "notify.backend must be \"log\" or \"memory\", got \"{}\"",
                self.notify.backend
            )));
        }
        if self.notify.enabled && self.notify.recipient.trim().is_empty() {
            return Err(LeadbotError::Config(
                "notify.recipient is required when notifications are enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port. Zero means "use the built-in default".
    pub port: u16,
    /// Origins allowed to call the API from a browser (the marketing site).
    pub allowed_origins: Vec<String>,
    /// Requests per second accepted on the chat and contact routes.
    pub rate_limit_per_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            rate_limit_per_sec: 50,
        }
    }
}

/// Which ordinary turns are relayed to the notifier as single-turn transcripts.
///
/// The end-of-collection notification is sent under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayPolicy {
    /// Relay idle turns that matched no rule and got the catch-all
    /// re-prompt. Quotes, phrases and keyword replies are not relayed.
    #[default]
    UnmatchedTurns,
    /// Relay idle turns whose reply did not start contact collection
    /// (fixed-phrase and keyword replies).
    Mirror,
    /// Never relay single turns.
    Off,
}

/// Chat session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the chat widget accepts messages.
    pub enabled: bool,
    /// Maximum utterance length in characters.
    pub max_message_length: usize,
    /// Idle minutes before a session is discarded.
    pub session_timeout_minutes: u32,
    /// Cosmetic "typing" delay applied by front ends before a reply is shown.
    pub reply_delay_ms: u64,
    /// Single-turn relay policy.
    pub relay_policy: RelayPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
            session_timeout_minutes: 60,
            reply_delay_ms: 1500,
            relay_policy: RelayPolicy::default(),
        }
    }
}

/// Business details quoted in canned replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub office: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Mendez Roofing".to_string(),
            phone: "(214) 489-2828".to_string(),
            email: "mendezfabian880@gmail.com".to_string(),
            office: "9610 Marianna Way, Alvarado, TX 76009".to_string(),
        }
    }
}

/// Rough-estimate pricing used by the square-footage quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Price in whole dollars per roofing square.
    pub price_per_square: u64,
    /// Square feet in one roofing square.
    pub sqft_per_square: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_square: 325,
            sqft_per_square: 100,
        }
    }
}

/// Lead notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Whether notifications are dispatched at all.
    pub enabled: bool,
    /// Delivery backend: "log" or "memory".
    pub backend: String,
    /// Address that receives leads.
    pub recipient: String,
    /// Sender address used for chat transcripts.
    pub from_email: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "log".to_string(),
            recipient: "mendezfabian880@gmail.com".to_string(),
            from_email: "chat@mendezroofing.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = LeadbotConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.chat.enabled);
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.chat.reply_delay_ms, 1500);
        assert_eq!(config.chat.relay_policy, RelayPolicy::UnmatchedTurns);
        assert_eq!(config.pricing.price_per_square, 325);
        assert_eq!(config.pricing.sqft_per_square, 100);
        assert_eq!(config.notify.backend, "log");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9000
allowed_origins = ["https://example.com"]
rate_limit_per_sec = 10

[chat]
reply_delay_ms = 0
relay_policy = "mirror"

[pricing]
price_per_square = 400
"#;
        let file = create_temp_config(content);
        let config = LeadbotConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.allowed_origins, vec!["https://example.com"]);
        assert_eq!(config.chat.reply_delay_ms, 0);
        assert_eq!(config.chat.relay_policy, RelayPolicy::Mirror);
        assert_eq!(config.pricing.price_per_square, 400);
        // Untouched fields keep their defaults
        assert_eq!(config.pricing.sqft_per_square, 100);
        assert_eq!(config.business.name, "Mendez Roofing");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[general]
log_level = "warn"
"#;
        let file = create_temp_config(content);
        let config = LeadbotConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.chat.session_timeout_minutes, 60);
        assert_eq!(config.notify.from_email, "chat@mendezroofing.com");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = LeadbotConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[chat\nenabled = ");
        let err = LeadbotConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, LeadbotError::Config(_)));
    }

    #[test]
    fn test_load_unknown_relay_policy() {
        let file = create_temp_config("[chat]\nrelay_policy = \"sometimes\"\n");
        assert!(LeadbotConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_zero_square_size() {
        let file = create_temp_config("[pricing]\nsqft_per_square = 0\n");
        let err = LeadbotConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("sqft_per_square"));
    }

    #[test]
    fn test_validate_unknown_backend() {
        let mut config = LeadbotConfig::default();
        config.notify.backend = "smtp".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("smtp"));
    }

    #[test]
    fn test_validate_recipient_required_when_enabled() {
        let mut config = LeadbotConfig::default();
        config.notify.recipient = "  ".to_string();
        assert!(config.validate().is_err());

        config.notify.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limits() {
        let mut config = LeadbotConfig::default();
        config.chat.max_message_length = 0;
        assert!(config.validate().is_err());

        let mut config = LeadbotConfig::default();
        config.chat.session_timeout_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = LeadbotConfig::default();
        config.server.rate_limit_per_sec = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = LeadbotConfig::default();
        config.chat.relay_policy = RelayPolicy::Off;
        config.business.phone = "(555) 000-1111".to_string();
        config.save(&path).unwrap();

        let reloaded = LeadbotConfig::load(&path).unwrap();
        assert_eq!(reloaded.chat.relay_policy, RelayPolicy::Off);
        assert_eq!(reloaded.business.phone, "(555) 000-1111");
        assert_eq!(reloaded.server.port, config.server.port);
    }

    #[test]
    fn test_relay_policy_serde_names() {
        assert_eq!(
            serde_json::to_string(&RelayPolicy::UnmatchedTurns).unwrap(),
            "\"unmatched_turns\""
        );
        assert_eq!(serde_json::to_string(&RelayPolicy::Mirror).unwrap(), "\"mirror\"");
        assert_eq!(serde_json::to_string(&RelayPolicy::Off).unwrap(), "\"off\"");
    }
}
