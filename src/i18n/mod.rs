//! Localization — message bundles loaded per locale, with fallback.

pub mod messages;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LocaleError;

/// The locale pair reported by the host: the user's selected locale and the
/// locale to fall back to when no bundle exists for the selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleSelection {
    pub locale: String,
    #[serde(rename = "fallbackLocale")]
    pub fallback: String,
}

impl Default for LocaleSelection {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback: "en".to_string(),
        }
    }
}

/// Resolves message ids to localized text.
///
/// Bundles are flat JSON objects mapping message id to text, one file per
/// locale (`en.json`, `pt_BR.json`, ...). Loading tries the selected locale
/// first, then the fallback; if both fail the error is fatal — a tour with
/// no text is unusable.
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: String,
    messages: HashMap<String, String>,
}

impl Localizer {
    /// Load the bundle for `selection.locale` from `dir`, falling back to
    /// `selection.fallback`.
    pub fn load(dir: &Path, selection: &LocaleSelection) -> Result<Self, LocaleError> {
        match Self::load_bundle(dir, &selection.locale) {
            Ok(messages) => Ok(Self {
                locale: selection.locale.clone(),
                messages,
            }),
            Err(e) => {
                tracing::warn!(
                    locale = %selection.locale,
                    error = %e,
                    "No bundle for selected locale, trying fallback"
                );
                match Self::load_bundle(dir, &selection.fallback) {
                    Ok(messages) => Ok(Self {
                        locale: selection.fallback.clone(),
                        messages,
                    }),
                    Err(e) => {
                        tracing::error!(
                            fallback = %selection.fallback,
                            error = %e,
                            "Fallback bundle also unavailable"
                        );
                        Err(LocaleError::Unavailable {
                            locale: selection.locale.clone(),
                            fallback: selection.fallback.clone(),
                        })
                    }
                }
            }
        }
    }

    /// Build a localizer from an in-memory message map.
    pub fn from_messages(locale: impl Into<String>, messages: HashMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            messages,
        }
    }

    /// The locale whose bundle is actually in use (may be the fallback).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resolve a message id to its localized text.
    ///
    /// Missing ids (and empty strings, which some bundles use as "not
    /// translated yet") degrade to the id itself rather than failing.
    pub fn message(&self, id: &str) -> String {
        match self.messages.get(id) {
            Some(text) if !text.is_empty() => text.clone(),
            _ => {
                tracing::warn!(id, locale = %self.locale, "Missing message, using id as text");
                id.to_string()
            }
        }
    }

    /// Bundle file for a locale tag: `pt-BR` maps to `pt_BR.json`.
    fn bundle_path(dir: &Path, locale: &str) -> PathBuf {
        dir.join(format!("{}.json", locale.replace('-', "_")))
    }

    fn load_bundle(dir: &Path, locale: &str) -> Result<HashMap<String, String>, LocaleError> {
        let path = Self::bundle_path(dir, locale);
        let raw = std::fs::read_to_string(&path).map_err(|source| LocaleError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LocaleError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_bundle(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn selection(locale: &str, fallback: &str) -> LocaleSelection {
        LocaleSelection {
            locale: locale.to_string(),
            fallback: fallback.to_string(),
        }
    }

    #[test]
    fn loads_selected_locale() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "en.json", r#"{"app.tour.button.next": "Next"}"#);
        let loc = Localizer::load(dir.path(), &selection("en", "en")).unwrap();
        assert_eq!(loc.locale(), "en");
        assert_eq!(loc.message("app.tour.button.next"), "Next");
    }

    #[test]
    fn falls_back_when_selected_bundle_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "en.json", r#"{"app.tour.button.next": "Next"}"#);
        let loc = Localizer::load(dir.path(), &selection("pt-BR", "en")).unwrap();
        assert_eq!(loc.locale(), "en");
        assert_eq!(loc.message("app.tour.button.next"), "Next");
    }

    #[test]
    fn dashed_locale_maps_to_underscore_file() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "pt_BR.json", r#"{"app.tour.button.next": "Próximo"}"#);
        let loc = Localizer::load(dir.path(), &selection("pt-BR", "en")).unwrap();
        assert_eq!(loc.locale(), "pt-BR");
        assert_eq!(loc.message("app.tour.button.next"), "Próximo");
    }

    #[test]
    fn both_bundles_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Localizer::load(dir.path(), &selection("pt-BR", "en")).unwrap_err();
        assert!(matches!(err, LocaleError::Unavailable { .. }));
    }

    #[test]
    fn malformed_selected_bundle_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "pt_BR.json", "not json");
        write_bundle(dir.path(), "en.json", r#"{"app.tour.button.back": "Back"}"#);
        let loc = Localizer::load(dir.path(), &selection("pt-BR", "en")).unwrap();
        assert_eq!(loc.locale(), "en");
        assert_eq!(loc.message("app.tour.button.back"), "Back");
    }

    #[test]
    fn missing_message_degrades_to_id() {
        let loc = Localizer::from_messages("en", HashMap::new());
        assert_eq!(loc.message("app.tour.audio"), "app.tour.audio");
    }

    #[test]
    fn empty_message_degrades_to_id() {
        let mut messages = HashMap::new();
        messages.insert("app.tour.audio".to_string(), String::new());
        let loc = Localizer::from_messages("en", messages);
        assert_eq!(loc.message("app.tour.audio"), "app.tour.audio");
    }
}
