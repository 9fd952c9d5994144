//! Disk persistence for the language preference.
//!
//! The preference file is a flat JSON object so other preferences can live
//! next to the language without a format change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use super::Language;

/// Key the language code is stored under.
pub const PREFERENCE_KEY: &str = "preferredLanguage";

type Preferences = BTreeMap<String, String>;

pub fn default_preferences_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".termfolio").join("preferences.json")
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create preference directory: {}", parent.display()))?;
    }
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "Failed to replace {} with {}",
            path.display(),
            tmp.display()
        )
    })?;
    Ok(())
}

fn read_preferences(path: &Path) -> anyhow::Result<Preferences> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid preference JSON at {}", path.display()))
}

/// Stored language, if the file exists and holds a known code.
pub fn load_language(path: &Path) -> Option<Language> {
    if !path.exists() {
        return None;
    }
    match read_preferences(path) {
        Ok(prefs) => prefs.get(PREFERENCE_KEY).and_then(|code| Language::from_code(code)),
        Err(e) => {
            tracing::warn!("Ignoring preference file: {:#}", e);
            None
        }
    }
}

/// Store `lang`, keeping any other keys already in the file.
pub fn save_language(path: &Path, lang: Language) -> anyhow::Result<()> {
    let mut prefs = if path.exists() {
        read_preferences(path).unwrap_or_default()
    } else {
        Preferences::new()
    };
    prefs.insert(PREFERENCE_KEY.to_string(), lang.code().to_string());
    let data = serde_json::to_vec_pretty(&prefs).context("Failed to serialize preferences")?;
    write_atomic(path, &data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        assert_eq!(load_language(&path), None);
        save_language(&path, Language::Zh).unwrap();
        assert_eq!(load_language(&path), Some(Language::Zh));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"preferredLanguage\": \"zh\""));
    }

    #[test]
    fn test_unknown_code_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"preferredLanguage":"klingon"}"#).unwrap();
        assert_eq!(load_language(&path), None);
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"theme":"dark","preferredLanguage":"en"}"#).unwrap();

        save_language(&path, Language::Ko).unwrap();
        let prefs = read_preferences(&path).unwrap();
        assert_eq!(prefs.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(load_language(&path), Some(Language::Ko));
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_language(&path), None);
    }
}
