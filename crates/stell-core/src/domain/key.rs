//! Setting keys and kinds.
//!
//! Every Named Setting Record is addressed by a [`SettingKey`]. Site-wide
//! settings use a fixed name; page-scoped settings carry a normalized page
//! path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::ValidationError;

/// The closed set of setting kinds managed by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Sitemap,
    Robots,
    Redirects,
    PageSeo,
    PageContent,
}

impl SettingKind {
    /// Stable name used in storage rows and event payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sitemap => "sitemap",
            Self::Robots => "robots",
            Self::Redirects => "redirects",
            Self::PageSeo => "page_seo",
            Self::PageContent => "page_content",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sitemap" => Ok(Self::Sitemap),
            "robots" => Ok(Self::Robots),
            "redirects" => Ok(Self::Redirects),
            "page_seo" => Ok(Self::PageSeo),
            "page_content" => Ok(Self::PageContent),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

const SEO_PREFIX: &str = "seo:";
const CONTENT_PREFIX: &str = "content:";

/// Identifier of a Named Setting Record.
///
/// Rendered as a storage key via [`Display`](fmt::Display):
/// `sitemap`, `robots`, `redirects`, `seo:/about`, `content:/about`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    Sitemap,
    Robots,
    Redirects,
    PageSeo(PagePath),
    PageContent(PagePath),
}

impl SettingKey {
    /// Build a page SEO key from a raw path.
    pub fn page_seo(path: &str) -> Result<Self, ValidationError> {
        Ok(Self::PageSeo(PagePath::parse(path)?))
    }

    /// Build a page content key from a raw path.
    pub fn page_content(path: &str) -> Result<Self, ValidationError> {
        Ok(Self::PageContent(PagePath::parse(path)?))
    }

    pub const fn kind(&self) -> SettingKind {
        match self {
            Self::Sitemap => SettingKind::Sitemap,
            Self::Robots => SettingKind::Robots,
            Self::Redirects => SettingKind::Redirects,
            Self::PageSeo(_) => SettingKind::PageSeo,
            Self::PageContent(_) => SettingKind::PageContent,
        }
    }

    /// The page this key is scoped to, if any.
    pub const fn page(&self) -> Option<&PagePath> {
        match self {
            Self::PageSeo(path) | Self::PageContent(path) => Some(path),
            Self::Sitemap | Self::Robots | Self::Redirects => None,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sitemap => f.write_str("sitemap"),
            Self::Robots => f.write_str("robots"),
            Self::Redirects => f.write_str("redirects"),
            Self::PageSeo(path) => write!(f, "{SEO_PREFIX}{path}"),
            Self::PageContent(path) => write!(f, "{CONTENT_PREFIX}{path}"),
        }
    }
}

impl FromStr for SettingKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "sitemap" => return Ok(Self::Sitemap),
            "robots" => return Ok(Self::Robots),
            "redirects" => return Ok(Self::Redirects),
            _ => {}
        }
        if let Some(path) = s.strip_prefix(SEO_PREFIX) {
            return Self::page_seo(path);
        }
        if let Some(path) = s.strip_prefix(CONTENT_PREFIX) {
            return Self::page_content(path);
        }
        Err(ValidationError::UnknownKey(s.to_string()))
    }
}

impl Serialize for SettingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SettingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A normalized site path such as `/about` or `/services/seo`.
///
/// Always starts with `/`, never ends with `/` (except the root), contains
/// no whitespace, query string or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PagePath(String);

impl PagePath {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(ValidationError::InvalidPath(raw.to_string()));
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c == '?' || c == '#')
        {
            return Err(ValidationError::InvalidPath(raw.to_string()));
        }
        if trimmed.contains("//") {
            return Err(ValidationError::InvalidPath(raw.to_string()));
        }

        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Ok(Self(normalized.to_string()))
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Last non-empty path segment (`/services/seo` -> `seo`).
    pub fn last_segment(&self) -> Option<&str> {
        self.0.rsplit('/').find(|segment| !segment.is_empty())
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PagePath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PagePath> for String {
    fn from(path: PagePath) -> Self {
        path.0
    }
}
