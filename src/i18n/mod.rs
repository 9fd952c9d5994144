//! Interface language and localized strings.
//!
//! Lookups fall back from the selected language to English, and from
//! English to the key itself, so a missing translation never blanks a line.

mod preference;
mod strings;

pub use preference::{default_preferences_path, load_language, save_language, PREFERENCE_KEY};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Zh,
    Es,
    Ko,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Fr,
        Language::Zh,
        Language::Es,
        Language::Ko,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Zh => "zh",
            Language::Es => "es",
            Language::Ko => "ko",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::Zh => "中文",
            Language::Es => "Español",
            Language::Ko => "한국어",
        }
    }

    /// Next language in menu order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Localized string for `key`.
pub fn t(lang: Language, key: &str) -> String {
    strings::lookup(lang, key)
        .or_else(|| strings::lookup(Language::En, key))
        .unwrap_or(key)
        .to_string()
}

/// Localized string with `{0}` replaced by `arg`.
pub fn t1(lang: Language, key: &str, arg: &str) -> String {
    t(lang, key).replace("{0}", arg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Language::En.next(), Language::Fr);
        assert_eq!(Language::Ko.next(), Language::En);
    }

    #[test]
    fn test_fallback_chain() {
        // Translated key
        assert_ne!(t(Language::Fr, "welcome"), t(Language::En, "welcome"));
        // Untranslated key falls back to English
        assert_eq!(t(Language::Ko, "resume_cmd"), t(Language::En, "resume_cmd"));
        // Unknown key falls back to itself
        assert_eq!(t(Language::Es, "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(t1(Language::En, "cmd_not_found", "foobar"), "command not found: foobar. Type 'help' to see available commands.");
    }
}
