//! Runtime settings.
//!
//! Read from `~/.termfolio/settings.json` when the file exists, then
//! overridden by `TERMFOLIO_*` environment variables. Every field has a
//! default so a partial (or missing) file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const ENV_SERVICE_ID: &str = "TERMFOLIO_EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "TERMFOLIO_EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "TERMFOLIO_EMAILJS_PUBLIC_KEY";
pub const ENV_CHAT_DELAY_MS: &str = "TERMFOLIO_CHAT_DELAY_MS";
pub const ENV_TYPING_TICK_MS: &str = "TERMFOLIO_TYPING_TICK_MS";

pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay before the chat bot answers.
    pub chat_delay_ms: u64,
    /// Interval between revealed characters in typed text.
    pub typing_tick_ms: u64,
    /// Stagger between banner lines in the terminal pane.
    pub banner_stagger_ms: u64,
    /// Delay before the hero pane prints its boot line.
    pub hero_boot_delay_ms: u64,
    /// How long the contact form shows its success state.
    pub success_display_ms: u64,
    /// Where the language preference lives. `None` means the default path.
    pub preferences_path: Option<PathBuf>,
    pub emailjs: EmailJsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chat_delay_ms: 1000,
            typing_tick_ms: 20,
            banner_stagger_ms: 1000,
            hero_boot_delay_ms: 3000,
            success_display_ms: 3000,
            preferences_path: None,
            emailjs: EmailJsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailJsSettings {
    pub endpoint: String,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl Default for EmailJsSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EMAILJS_ENDPOINT.to_string(),
            service_id: None,
            template_id: None,
            public_key: None,
        }
    }
}

impl EmailJsSettings {
    /// All three credentials, if every one is set and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        fn pick(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Some((
            pick(&self.service_id)?,
            pick(&self.template_id)?,
            pick(&self.public_key)?,
        ))
    }
}

pub fn default_settings_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".termfolio").join("settings.json")
}

impl Settings {
    /// Defaults, then the settings file, then the process environment.
    pub fn load() -> Self {
        let path = default_settings_path();
        let mut settings = if path.exists() {
            Self::from_file(&path).unwrap_or_else(|e| {
                warn!("Using default settings: {:#}", e);
                Self::default()
            })
        } else {
            debug!("No settings file at {}", path.display());
            Self::default()
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid settings JSON at {}", path.display()))
    }

    /// Apply `TERMFOLIO_*` overrides taken from `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_SERVICE_ID) {
            self.emailjs.service_id = Some(v);
        }
        if let Some(v) = lookup(ENV_TEMPLATE_ID) {
            self.emailjs.template_id = Some(v);
        }
        if let Some(v) = lookup(ENV_PUBLIC_KEY) {
            self.emailjs.public_key = Some(v);
        }

        let millis = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", key, raw, e);
                    None
                }
            }
        };
        if let Some(ms) = millis(ENV_CHAT_DELAY_MS) {
            self.chat_delay_ms = ms;
        }
        if let Some(ms) = millis(ENV_TYPING_TICK_MS) {
            self.typing_tick_ms = ms;
        }
    }

    pub fn chat_delay(&self) -> Duration {
        Duration::from_millis(self.chat_delay_ms)
    }

    /// Never zero, the animation ticker cannot run at a zero period.
    pub fn typing_tick(&self) -> Duration {
        Duration::from_millis(self.typing_tick_ms.max(1))
    }

    pub fn banner_stagger(&self) -> Duration {
        Duration::from_millis(self.banner_stagger_ms)
    }

    pub fn hero_boot_delay(&self) -> Duration {
        Duration::from_millis(self.hero_boot_delay_ms)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(crate::i18n::default_preferences_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chat_delay(), Duration::from_millis(1000));
        assert_eq!(settings.typing_tick(), Duration::from_millis(20));
        assert_eq!(settings.success_display(), Duration::from_secs(3));
        assert_eq!(settings.emailjs.endpoint, DEFAULT_EMAILJS_ENDPOINT);
        assert!(settings.emailjs.credentials().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"chat_delay_ms": 250, "emailjs": {"service_id": "svc"}}"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.chat_delay_ms, 250);
        assert_eq!(settings.typing_tick_ms, 20);
        assert_eq!(settings.emailjs.service_id.as_deref(), Some("svc"));
        assert_eq!(settings.emailjs.endpoint, DEFAULT_EMAILJS_ENDPOINT);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(Settings::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SERVICE_ID, "svc"),
            (ENV_TEMPLATE_ID, "tpl"),
            (ENV_PUBLIC_KEY, "key"),
            (ENV_CHAT_DELAY_MS, "10"),
            (ENV_TYPING_TICK_MS, "oops"),
        ]);
        let mut settings = Settings::default();
        settings.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.emailjs.credentials(), Some(("svc", "tpl", "key")));
        assert_eq!(settings.chat_delay_ms, 10);
        // unparseable value leaves the default
        assert_eq!(settings.typing_tick_ms, 20);
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let mut settings = Settings::default();
        settings.emailjs.service_id = Some("svc".into());
        settings.emailjs.template_id = Some("  ".into());
        settings.emailjs.public_key = Some("key".into());
        assert!(settings.emailjs.credentials().is_none());
    }

    #[test]
    fn test_credentials_are_trimmed() {
        let mut settings = Settings::default();
        settings.emailjs.service_id = Some(" svc ".into());
        settings.emailjs.template_id = Some("tpl\n".into());
        settings.emailjs.public_key = Some("key".into());
        assert_eq!(settings.emailjs.credentials(), Some(("svc", "tpl", "key")));
    }

    #[test]
    fn test_typing_tick_never_zero() {
        let settings = Settings {
            typing_tick_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.typing_tick(), Duration::from_millis(1));
    }
}
