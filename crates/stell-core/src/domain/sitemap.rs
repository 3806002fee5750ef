//! Sitemap domain types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// How frequently a page is likely to change (`<changefreq>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFreq {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(ValidationError::InvalidChangeFreq(other.to_string())),
        }
    }
}

/// One `<url>` entry of a sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub loc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl SitemapUrl {
    /// Surrounding whitespace is dropped from `loc`, as the XML parser does.
    pub fn new(loc: impl Into<String>) -> Self {
        let loc: String = loc.into();
        Self {
            loc: loc.trim().to_string(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    #[must_use]
    pub const fn with_lastmod(mut self, lastmod: NaiveDate) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    #[must_use]
    pub const fn with_changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// The site-wide sitemap: an ordered list of URL entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sitemap {
    pub urls: Vec<SitemapUrl>,
}

impl Sitemap {
    pub const fn new(urls: Vec<SitemapUrl>) -> Self {
        Self { urls }
    }

    pub fn contains(&self, loc: &str) -> bool {
        self.urls.iter().any(|u| u.loc == loc)
    }

    /// Insert a new entry or replace the one with the same `loc` in place.
    pub fn upsert(&mut self, url: SitemapUrl) {
        match self.urls.iter_mut().find(|u| u.loc == url.loc) {
            Some(existing) => *existing = url,
            None => self.urls.push(url),
        }
    }

    /// Remove the entry for `loc`. Returns whether anything was removed.
    pub fn remove(&mut self, loc: &str) -> bool {
        let before = self.urls.len();
        self.urls.retain(|u| u.loc != loc);
        self.urls.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changefreq_parse_is_case_insensitive() {
        assert_eq!("Weekly".parse::<ChangeFreq>().unwrap(), ChangeFreq::Weekly);
        assert!("fortnightly".parse::<ChangeFreq>().is_err());
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut sitemap = Sitemap::new(vec![
            SitemapUrl::new("https://stellmedia.com/"),
            SitemapUrl::new("https://stellmedia.com/about"),
        ]);
        sitemap.upsert(SitemapUrl::new("https://stellmedia.com/").with_priority(1.0));
        sitemap.upsert(SitemapUrl::new("https://stellmedia.com/blog"));

        assert_eq!(sitemap.urls.len(), 3);
        assert_eq!(sitemap.urls[0].priority, Some(1.0));
        assert_eq!(sitemap.urls[2].loc, "https://stellmedia.com/blog");
    }

    #[test]
    fn test_remove() {
        let mut sitemap = Sitemap::new(vec![SitemapUrl::new("https://stellmedia.com/")]);
        assert!(sitemap.remove("https://stellmedia.com/"));
        assert!(!sitemap.remove("https://stellmedia.com/"));
        assert!(sitemap.urls.is_empty());
    }
}
