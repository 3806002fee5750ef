//! Site configuration: base URL, site name and the page registry.
//!
//! The registry lists the pages the site ships with. It drives the computed
//! defaults for page SEO, page content and the sitemap. Its content is
//! configuration, not contract.

use std::env;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ChangeFreq, PagePath};
use crate::validation::{ValidationError, parse_absolute_url};

/// Default public URL of the site.
pub const DEFAULT_SITE_URL: &str = "https://stellmedia.com";

/// Default display name of the site.
pub const DEFAULT_SITE_NAME: &str = "Stell Media";

/// Environment variable overriding [`DEFAULT_SITE_URL`].
pub const SITE_URL_ENV: &str = "STELL_SITE_URL";

/// Environment variable overriding [`DEFAULT_SITE_NAME`].
pub const SITE_NAME_ENV: &str = "STELL_SITE_NAME";

/// A page known to the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDefinition {
    pub path: PagePath,
    pub title: String,
    pub description: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl PageDefinition {
    /// Define a page whose title is derived from its path
    /// (`/case-studies` -> "Case Studies Page", `/` -> "Home Page").
    pub fn new(path: PagePath, description: impl Into<String>) -> Self {
        let title = derive_title(&path);
        let priority = if path.is_root() { 1.0 } else { 0.8 };
        Self {
            path,
            title,
            description: description.into(),
            changefreq: ChangeFreq::Monthly,
            priority,
        }
    }

    #[must_use]
    pub const fn with_changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = changefreq;
        self
    }
}

/// Title-case the last path segment and suffix it with "Page".
pub fn derive_title(path: &PagePath) -> String {
    let Some(segment) = path.last_segment() else {
        return "Home Page".to_string();
    };
    let words: Vec<String> = segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    format!("{} Page", words.join(" "))
}

/// Site-wide configuration used to compute defaults and run audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: Url,
    pub site_name: String,
    pub pages: Vec<PageDefinition>,
}

impl SiteConfig {
    pub const fn new(base_url: Url, site_name: String, pages: Vec<PageDefinition>) -> Self {
        Self {
            base_url,
            site_name,
            pages,
        }
    }

    /// Configuration with the stock base URL, name and page registry.
    pub fn with_defaults() -> Self {
        // DEFAULT_SITE_URL is a valid absolute URL.
        let base_url = Url::parse(DEFAULT_SITE_URL).unwrap_or_else(|_| unreachable!());
        Self::new(base_url, DEFAULT_SITE_NAME.to_string(), default_pages())
    }

    /// Read `STELL_SITE_URL` / `STELL_SITE_NAME`, falling back to defaults.
    pub fn from_env() -> Result<Self, ValidationError> {
        let mut config = Self::with_defaults();
        if let Ok(raw) = env::var(SITE_URL_ENV) {
            config.base_url = parse_absolute_url(SITE_URL_ENV, &raw)?;
        }
        if let Ok(name) = env::var(SITE_NAME_ENV) {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyField(SITE_NAME_ENV));
            }
            config.site_name = name.trim().to_string();
        }
        Ok(config)
    }

    /// Absolute URL of a site path (`/about` -> `https://stellmedia.com/about`).
    pub fn page_url(&self, path: &PagePath) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.is_root() {
            format!("{base}/")
        } else {
            format!("{base}{path}")
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.base_url.host_str()
    }

    pub fn page(&self, path: &PagePath) -> Option<&PageDefinition> {
        self.pages.iter().find(|p| &p.path == path)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn page(path: &str, description: &str) -> Option<PageDefinition> {
    PagePath::parse(path)
        .ok()
        .map(|p| PageDefinition::new(p, description))
}

fn default_pages() -> Vec<PageDefinition> {
    [
        page(
            "/",
            "Stell Media is a digital marketing agency helping brands grow with SEO, paid media and content.",
        ),
        page(
            "/about",
            "Meet the team behind Stell Media and learn how we approach digital marketing.",
        ),
        page(
            "/services",
            "SEO, paid search, social media and content marketing services from Stell Media.",
        ),
        page(
            "/case-studies",
            "Results we have delivered for clients across industries, with real numbers.",
        ),
        page(
            "/blog",
            "Guides and opinions on search, advertising and content from the Stell Media team.",
        )
        .map(|p| p.with_changefreq(ChangeFreq::Weekly)),
        page(
            "/faq",
            "Answers to common questions about working with Stell Media.",
        ),
        page(
            "/contact",
            "Get in touch with Stell Media to talk about your marketing goals.",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
