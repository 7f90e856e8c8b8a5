use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

/// Site language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(Error::UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Ru => "ru",
            Locale::En => "en",
        })
    }
}

/// A portfolio case as stored in `cases.json`. Only the fields needed to
/// render a description are read; everything else is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, rename = "title_en")]
    pub title_en: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "description_en")]
    pub description_en: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Case {
    /// Title in `locale`; English falls back to Russian when missing or an
    /// empty string. Whitespace-only English text still counts as present.
    pub fn title_for(&self, locale: Locale) -> &str {
        localized(&self.title, self.title_en.as_deref(), locale)
    }

    /// Description markup in `locale`, with the same fallback as titles.
    pub fn description_for(&self, locale: Locale) -> &str {
        localized(&self.description, self.description_en.as_deref(), locale)
    }
}

fn localized<'a>(ru: &'a str, en: Option<&'a str>, locale: Locale) -> &'a str {
    match (locale, en) {
        (Locale::En, Some(en)) if !en.is_empty() => en,
        _ => ru,
    }
}

/// Read-only view of the case file
#[derive(Debug, Default)]
pub struct CaseStore {
    cases: Vec<Case>,
}

impl CaseStore {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let cases: Vec<Case> = serde_json::from_str(json)?;
        log::debug!("loaded {} case(s)", cases.len());
        Ok(Self { cases })
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Published case with the given slug. Drafts are never returned.
    pub fn find_published(&self, slug: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.slug == slug && c.published)
    }
}
