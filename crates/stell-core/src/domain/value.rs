//! Tagged setting payloads and the persisted record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::{ContentSection, PageContent};
use super::key::{SettingKey, SettingKind};
use super::redirects::RedirectList;
use super::seo::PageSeo;
use super::sitemap::Sitemap;

/// Raw robots.txt text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotsTxt {
    pub content: String,
}

impl RobotsTxt {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A settings payload, one variant per [`SettingKind`].
///
/// Serialized with a `kind` tag so stored rows are self-describing:
///
/// ```json
/// { "kind": "robots", "content": "User-agent: *\nAllow: /\n" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingValue {
    Sitemap(Sitemap),
    Robots(RobotsTxt),
    Redirects(RedirectList),
    PageSeo(PageSeo),
    PageContent(PageContent),
}

impl SettingValue {
    pub const fn kind(&self) -> SettingKind {
        match self {
            Self::Sitemap(_) => SettingKind::Sitemap,
            Self::Robots(_) => SettingKind::Robots,
            Self::Redirects(_) => SettingKind::Redirects,
            Self::PageSeo(_) => SettingKind::PageSeo,
            Self::PageContent(_) => SettingKind::PageContent,
        }
    }

    /// Last-resort value used when nothing is persisted and no computed
    /// default can be derived for `key`.
    pub fn hard_coded(key: &SettingKey) -> Self {
        match key {
            SettingKey::Sitemap => Self::Sitemap(Sitemap::default()),
            SettingKey::Robots => Self::Robots(RobotsTxt::new(HARD_CODED_ROBOTS)),
            SettingKey::Redirects => Self::Redirects(RedirectList::default()),
            SettingKey::PageSeo(_) => Self::PageSeo(PageSeo {
                title: HARD_CODED_TITLE.to_string(),
                description: HARD_CODED_DESCRIPTION.to_string(),
                ..PageSeo::default()
            }),
            SettingKey::PageContent(_) => Self::PageContent(PageContent::new(vec![
                ContentSection::new("hero", HARD_CODED_TITLE, ""),
            ])),
        }
    }

    pub const fn as_sitemap(&self) -> Option<&Sitemap> {
        match self {
            Self::Sitemap(sitemap) => Some(sitemap),
            _ => None,
        }
    }

    pub const fn as_robots(&self) -> Option<&RobotsTxt> {
        match self {
            Self::Robots(robots) => Some(robots),
            _ => None,
        }
    }

    pub const fn as_redirects(&self) -> Option<&RedirectList> {
        match self {
            Self::Redirects(redirects) => Some(redirects),
            _ => None,
        }
    }

    pub const fn as_page_seo(&self) -> Option<&PageSeo> {
        match self {
            Self::PageSeo(seo) => Some(seo),
            _ => None,
        }
    }

    pub const fn as_page_content(&self) -> Option<&PageContent> {
        match self {
            Self::PageContent(content) => Some(content),
            _ => None,
        }
    }
}

const HARD_CODED_TITLE: &str = "Stell Media";
const HARD_CODED_DESCRIPTION: &str = "Digital marketing agency";
const HARD_CODED_ROBOTS: &str = "User-agent: *\nAllow: /\n";

/// A persisted Named Setting Record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
    pub key: SettingKey,
    pub value: SettingValue,
    pub updated_at: DateTime<Utc>,
}

impl SettingRecord {
    pub const fn new(key: SettingKey, value: SettingValue, updated_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            updated_at,
        }
    }
}
