//! Setting validation.
//!
//! Validation runs before every write so a stored record is always well
//! formed for its kind. Errors are plain data: the Save Gate surfaces them to
//! the editor and the draft is left untouched.

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::codec::{ParseError, robots};
use crate::domain::{
    PagePath, PageContent, PageSeo, RedirectList, RobotsTxt, SettingKey, SettingKind,
    SettingValue, Sitemap,
};

/// Setting validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown setting kind: {0}")]
    UnknownKind(String),

    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Invalid page path '{0}' (must start with '/', no spaces, query or fragment)")]
    InvalidPath(String),

    #[error("Value of kind {actual} cannot be stored under {key} (expects {expected})")]
    KindMismatch {
        key: String,
        expected: SettingKind,
        actual: SettingKind,
    },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{field} must be an absolute http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Priority must be between 0.0 and 1.0, got {0}")]
    InvalidPriority(f32),

    #[error("Invalid changefreq '{0}'")]
    InvalidChangeFreq(String),

    #[error("Redirect status must be 301, 302, 307 or 308, got {0}")]
    InvalidRedirectStatus(u16),

    #[error("Redirect from '{0}' points to itself")]
    RedirectSelfLoop(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Malformed payload: {0}")]
    Malformed(#[from] ParseError),
}

/// Validate `value` for storage under `key`.
pub fn validate_setting(key: &SettingKey, value: &SettingValue) -> Result<(), ValidationError> {
    if key.kind() != value.kind() {
        return Err(ValidationError::KindMismatch {
            key: key.to_string(),
            expected: key.kind(),
            actual: value.kind(),
        });
    }

    match value {
        SettingValue::Sitemap(sitemap) => validate_sitemap(sitemap),
        SettingValue::Robots(robots) => validate_robots(robots),
        SettingValue::Redirects(redirects) => validate_redirects(redirects),
        SettingValue::PageSeo(seo) => validate_page_seo(seo),
        SettingValue::PageContent(content) => validate_page_content(content),
    }
}

/// Parse `raw` as an absolute http(s) URL.
pub fn parse_absolute_url(field: &'static str, raw: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

pub fn validate_sitemap(sitemap: &Sitemap) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for url in &sitemap.urls {
        if url.loc.trim() != url.loc {
            return Err(ValidationError::InvalidUrl {
                field: "loc",
                value: url.loc.clone(),
            });
        }
        parse_absolute_url("loc", &url.loc)?;
        if let Some(priority) = url.priority {
            if !(0.0..=1.0).contains(&priority) {
                return Err(ValidationError::InvalidPriority(priority));
            }
        }
        if !seen.insert(url.loc.as_str()) {
            return Err(ValidationError::DuplicateEntry(url.loc.clone()));
        }
    }
    Ok(())
}

pub fn validate_robots(robots: &RobotsTxt) -> Result<(), ValidationError> {
    if robots.content.trim().is_empty() {
        return Err(ValidationError::EmptyField("robots.txt"));
    }
    robots::parse_robots(&robots.content)?;
    Ok(())
}

pub fn validate_redirects(redirects: &RedirectList) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for rule in &redirects.rules {
        let from = PagePath::parse(&rule.from)?;
        if rule.to.trim().is_empty() {
            return Err(ValidationError::EmptyField("redirect target"));
        }
        if rule.to.starts_with('/') {
            let to = PagePath::parse(&rule.to)?;
            if to == from {
                return Err(ValidationError::RedirectSelfLoop(rule.from.clone()));
            }
        } else {
            parse_absolute_url("redirect target", &rule.to)?;
        }
        if !seen.insert(from) {
            return Err(ValidationError::DuplicateEntry(rule.from.clone()));
        }
    }
    Ok(())
}

pub fn validate_page_seo(seo: &PageSeo) -> Result<(), ValidationError> {
    if seo.title.trim().is_empty() {
        return Err(ValidationError::EmptyField("title"));
    }
    if seo.description.trim().is_empty() {
        return Err(ValidationError::EmptyField("description"));
    }
    if !seo.canonical.trim().is_empty() {
        parse_absolute_url("canonical", &seo.canonical)?;
    }
    if let Some(image) = seo.og_image.as_deref() {
        parse_absolute_url("og_image", image)?;
    }
    Ok(())
}

pub fn validate_page_content(content: &PageContent) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for section in &content.sections {
        if section.id.trim().is_empty() {
            return Err(ValidationError::EmptyField("section id"));
        }
        if section.heading.trim().is_empty() {
            return Err(ValidationError::EmptyField("section heading"));
        }
        if !seen.insert(section.id.as_str()) {
            return Err(ValidationError::DuplicateEntry(section.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentSection, RedirectRule, RedirectStatus, SitemapUrl};

    fn seo() -> PageSeo {
        PageSeo {
            title: "About Page".to_string(),
            description: "About Stell Media".to_string(),
            canonical: "https://stellmedia.com/about".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_page_seo() {
        let key = SettingKey::page_seo("/about").unwrap();
        assert!(validate_setting(&key, &SettingValue::PageSeo(seo())).is_ok());
    }

    #[test]
    fn test_kind_mismatch() {
        let result = validate_setting(&SettingKey::Robots, &SettingValue::PageSeo(seo()));
        assert!(matches!(
            result,
            Err(ValidationError::KindMismatch {
                expected: SettingKind::Robots,
                actual: SettingKind::PageSeo,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_title_and_description() {
        let mut value = seo();
        value.title = "  ".to_string();
        assert_eq!(
            validate_page_seo(&value),
            Err(ValidationError::EmptyField("title"))
        );

        let mut value = seo();
        value.description.clear();
        assert_eq!(
            validate_page_seo(&value),
            Err(ValidationError::EmptyField("description"))
        );
    }

    #[test]
    fn test_canonical_must_be_absolute() {
        let mut value = seo();
        value.canonical = "/about".to_string();
        assert!(matches!(
            validate_page_seo(&value),
            Err(ValidationError::InvalidUrl {
                field: "canonical",
                ..
            })
        ));

        value.canonical = "ftp://stellmedia.com/about".to_string();
        assert!(validate_page_seo(&value).is_err());

        value.canonical.clear();
        assert!(validate_page_seo(&value).is_ok());
    }

    #[test]
    fn test_sitemap_priority_and_duplicates() {
        let sitemap = Sitemap::new(vec![
            SitemapUrl::new("https://stellmedia.com/").with_priority(1.5),
        ]);
        assert_eq!(
            validate_sitemap(&sitemap),
            Err(ValidationError::InvalidPriority(1.5))
        );

        let sitemap = Sitemap::new(vec![
            SitemapUrl::new("https://stellmedia.com/"),
            SitemapUrl::new("https://stellmedia.com/"),
        ]);
        assert!(matches!(
            validate_sitemap(&sitemap),
            Err(ValidationError::DuplicateEntry(_))
        ));
    }

    #[test]
    fn test_sitemap_loc_must_be_trimmed() {
        let mut padded = SitemapUrl::new("https://stellmedia.com/x");
        padded.loc = " https://stellmedia.com/x".to_string();
        let sitemap = Sitemap::new(vec![SitemapUrl::new("https://stellmedia.com/x"), padded]);
        assert!(matches!(
            validate_sitemap(&sitemap),
            Err(ValidationError::InvalidUrl { field: "loc", .. })
        ));

        let built = Sitemap::new(vec![SitemapUrl::new(" https://stellmedia.com/y\n")]);
        assert!(validate_sitemap(&built).is_ok());
        let parsed = crate::codec::parse_sitemap(&crate::codec::render_sitemap(&built)).unwrap();
        assert_eq!(parsed, built);
        assert!(validate_sitemap(&parsed).is_ok());
    }

    #[test]
    fn test_redirect_rules() {
        let looped = RedirectList::new(vec![RedirectRule::new(
            "/old/",
            "/old",
            RedirectStatus::default(),
        )]);
        assert!(matches!(
            validate_redirects(&looped),
            Err(ValidationError::RedirectSelfLoop(_))
        ));

        let external = RedirectList::new(vec![RedirectRule::new(
            "/partners",
            "https://partner.example.com/",
            RedirectStatus::Found,
        )]);
        assert!(validate_redirects(&external).is_ok());

        let bad_target = RedirectList::new(vec![RedirectRule::new(
            "/a",
            "partner.example.com",
            RedirectStatus::Found,
        )]);
        assert!(validate_redirects(&bad_target).is_err());

        let duplicate = RedirectList::new(vec![
            RedirectRule::new("/a", "/b", RedirectStatus::default()),
            RedirectRule::new("/a/", "/c", RedirectStatus::default()),
        ]);
        assert!(matches!(
            validate_redirects(&duplicate),
            Err(ValidationError::DuplicateEntry(_))
        ));
    }

    #[test]
    fn test_robots_must_parse() {
        assert_eq!(
            validate_robots(&RobotsTxt::new("\n")),
            Err(ValidationError::EmptyField("robots.txt"))
        );
        assert!(matches!(
            validate_robots(&RobotsTxt::new("Disallow: /admin\n")),
            Err(ValidationError::Malformed(_))
        ));
        assert!(validate_robots(&RobotsTxt::new("User-agent: *\nDisallow: /admin\n")).is_ok());
    }

    #[test]
    fn test_page_content_sections() {
        let content = PageContent::new(vec![
            ContentSection::new("hero", "Hello", ""),
            ContentSection::new("hero", "Again", ""),
        ]);
        assert!(matches!(
            validate_page_content(&content),
            Err(ValidationError::DuplicateEntry(_))
        ));

        let content = PageContent::new(vec![ContentSection::new("hero", "", "")]);
        assert_eq!(
            validate_page_content(&content),
            Err(ValidationError::EmptyField("section heading"))
        );
    }
}
