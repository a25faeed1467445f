//! Translated UI strings.
//!
//! Bundles are JSON objects embedded at compile time, one per [`Language`].
//! Lookups fall back to English when the requested language is unknown or
//! the key is missing from its bundle, and finally to the key itself.
//!
//! [`Localizer::shared`] hands out one process-wide instance so every widget
//! mounted in the process shares the same parsed bundles.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{error, trace};

use crate::language::Language;

/// Language used when a code cannot be resolved or a key is missing.
pub const FALLBACK_LANGUAGE: Language = Language::English;

/// String ids every bundle is expected to define.
pub const REQUIRED_KEYS: &[&str] = &["label", "loading", "no-data", "no-results-found", "misconfigured"];

const EMBEDDED_BUNDLES: &[(Language, &str)] = &[
    (Language::English, include_str!("../locales/en-US/fulfillers.json")),
    (Language::German, include_str!("../locales/de-DE/fulfillers.json")),
    (Language::French, include_str!("../locales/fr-FR/fulfillers.json")),
    (Language::Italian, include_str!("../locales/it-IT/fulfillers.json")),
    (Language::Dutch, include_str!("../locales/nl-NL/fulfillers.json")),
    (Language::Japanese, include_str!("../locales/ja-JP/fulfillers.json")),
    (Language::Chinese, include_str!("../locales/zh-CN/fulfillers.json")),
];

static SHARED: Lazy<Arc<Localizer>> = Lazy::new(|| Arc::new(Localizer::embedded()));

#[derive(Debug, Error)]
pub enum LocalizerError {
    #[error("translation bundle for {language} is not valid JSON: {source}")]
    Parse {
        language: Language,
        #[source]
        source: serde_json::Error,
    },
}

type Bundle = IndexMap<String, String>;

/// Resolves string ids to display text for a language code.
#[derive(Debug, Default)]
pub struct Localizer {
    bundles: HashMap<Language, Bundle>,
}

impl Localizer {
    /// Process-wide instance built from the embedded bundles on first use.
    pub fn shared() -> Arc<Localizer> {
        Arc::clone(&SHARED)
    }

    /// Build from the embedded bundles. A bundle that fails to parse is
    /// logged and skipped; lookups for that language then fall back.
    pub fn embedded() -> Self {
        let mut bundles = HashMap::new();
        for (language, source) in EMBEDDED_BUNDLES {
            match parse_bundle(*language, source) {
                Ok(bundle) => {
                    bundles.insert(*language, bundle);
                }
                Err(err) => error!(error = %err, "skipping translation bundle"),
            }
        }
        Self { bundles }
    }

    /// Build from caller-provided JSON sources.
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (Language, &'a str)>) -> Result<Self, LocalizerError> {
        let mut bundles = HashMap::new();
        for (language, source) in sources {
            bundles.insert(language, parse_bundle(language, source)?);
        }
        Ok(Self { bundles })
    }

    /// Translate `key` for `language_code`.
    pub fn translate(&self, key: &str, language_code: &str) -> String {
        let language = Language::resolve(language_code).unwrap_or_else(|| {
            trace!(language_code, "unknown language code; using fallback");
            FALLBACK_LANGUAGE
        });
        self.translate_in(key, language)
    }

    pub fn translate_in(&self, key: &str, language: Language) -> String {
        self.lookup(language, key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn supports(&self, language: Language) -> bool {
        self.bundles.contains_key(&language)
    }

    /// Keys from [`REQUIRED_KEYS`] missing in the bundle for `language`.
    pub fn missing_keys(&self, language: Language) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| self.lookup(language, key).is_none())
            .collect()
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.bundles.get(&language)?.get(key).map(String::as_str)
    }
}

fn parse_bundle(language: Language, source: &str) -> Result<Bundle, LocalizerError> {
    serde_json::from_str(source).map_err(|source| LocalizerError::Parse { language, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_embedded_bundle_defines_required_keys() {
        let localizer = Localizer::embedded();
        for language in Language::ALL {
            assert!(localizer.supports(language), "{language} bundle missing");
            assert!(localizer.missing_keys(language).is_empty(), "{language}: {:?}", localizer.missing_keys(language));
        }
    }

    #[test]
    fn translates_by_two_and_three_letter_code() {
        let localizer = Localizer::embedded();
        assert_eq!(localizer.translate("loading", "deu"), "Wird geladen...");
        assert_eq!(localizer.translate("loading", "de"), "Wird geladen...");
        assert_eq!(localizer.translate("no-results-found", "fra"), "Aucun résultat trouvé");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let localizer = Localizer::embedded();
        assert_eq!(localizer.translate("loading", "tlh"), localizer.translate("loading", "eng"));
    }

    #[test]
    fn missing_key_falls_back_to_english_then_key() {
        let localizer = Localizer::from_sources([
            (Language::English, r#"{"label": "Fulfiller", "only-english": "yes"}"#),
            (Language::German, r#"{"label": "Fulfiller"}"#),
        ])
        .unwrap();
        assert_eq!(localizer.translate("only-english", "deu"), "yes");
        assert_eq!(localizer.translate("nowhere", "deu"), "nowhere");
    }

    #[test]
    fn invalid_bundle_is_reported() {
        let err = Localizer::from_sources([(Language::Dutch, "not json")]).unwrap_err();
        assert!(err.to_string().contains("nld"));
    }

    #[test]
    fn shared_instance_is_memoized() {
        let first = Localizer::shared();
        let second = Localizer::shared();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
