//! Language code resolution for the bundled translations.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Languages that ship with a translation bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
    French,
    Italian,
    Dutch,
    Japanese,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Italian,
        Language::Dutch,
        Language::Japanese,
        Language::Chinese,
    ];

    /// Resolve an ISO 639-1 or 639-2 code. Region subtags (`en-US`, `de_DE`)
    /// and letter case are ignored. Returns `None` for unsupported codes.
    pub fn resolve(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        match primary.as_str() {
            "en" | "eng" => Some(Self::English),
            "de" | "deu" => Some(Self::German),
            "fr" | "fra" => Some(Self::French),
            "it" | "ita" => Some(Self::Italian),
            "nl" | "nld" => Some(Self::Dutch),
            "ja" | "jpn" => Some(Self::Japanese),
            "zh" | "zho" | "chi" => Some(Self::Chinese),
            _ => None,
        }
    }

    /// Three-letter code used as the canonical name.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "eng",
            Self::German => "deu",
            Self::French => "fra",
            Self::Italian => "ita",
            Self::Dutch => "nld",
            Self::Japanese => "jpn",
            Self::Chinese => "zho",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_two_and_three_letter_codes() {
        let pairs = [
            ("en", "eng", Language::English),
            ("de", "deu", Language::German),
            ("fr", "fra", Language::French),
            ("it", "ita", Language::Italian),
            ("nl", "nld", Language::Dutch),
            ("ja", "jpn", Language::Japanese),
            ("zh", "zho", Language::Chinese),
        ];
        for (short, long, expected) in pairs {
            assert_eq!(Language::resolve(short), Some(expected), "{short}");
            assert_eq!(Language::resolve(long), Some(expected), "{long}");
        }
        assert_eq!(Language::resolve("chi"), Some(Language::Chinese));
    }

    #[test]
    fn ignores_region_and_case() {
        assert_eq!(Language::resolve("en-US"), Some(Language::English));
        assert_eq!(Language::resolve("DE_de"), Some(Language::German));
        assert_eq!(Language::resolve(" Fra "), Some(Language::French));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(Language::resolve("xx"), None);
        assert_eq!(Language::resolve(""), None);
        let err = "klingon".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported language code 'klingon'");
    }
}
