//! Per-page SEO metadata.

use serde::{Deserialize, Serialize};

/// SEO metadata for a single page (title, meta description, canonical URL,
/// Open Graph overrides and robots directives).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
}

impl PageSeo {
    /// Content of the `<meta name="robots">` tag.
    pub const fn robots_directive(&self) -> &'static str {
        match (self.noindex, self.nofollow) {
            (false, false) => "index, follow",
            (true, false) => "noindex, follow",
            (false, true) => "index, nofollow",
            (true, true) => "noindex, nofollow",
        }
    }

    /// Merge a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &SeoUpdate) {
        if let Some(ref title) = update.title {
            self.title.clone_from(title);
        }
        if let Some(ref description) = update.description {
            self.description.clone_from(description);
        }
        if let Some(ref canonical) = update.canonical {
            self.canonical.clone_from(canonical);
        }
        if let Some(ref keywords) = update.keywords {
            self.keywords.clone_from(keywords);
        }
        if let Some(ref og_title) = update.og_title {
            self.og_title.clone_from(og_title);
        }
        if let Some(ref og_description) = update.og_description {
            self.og_description.clone_from(og_description);
        }
        if let Some(ref og_image) = update.og_image {
            self.og_image.clone_from(og_image);
        }
        if let Some(noindex) = update.noindex {
            self.noindex = noindex;
        }
        if let Some(nofollow) = update.nofollow {
            self.nofollow = nofollow;
        }
    }
}

/// Partial page SEO update.
///
/// Optional fields use `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = clear the field
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub og_title: Option<Option<String>>,
    pub og_description: Option<Option<String>>,
    pub og_image: Option<Option<String>>,
    pub noindex: Option<bool>,
    pub nofollow: Option<bool>,
}

impl SeoUpdate {
    /// True when the update would not change anything.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.canonical.is_none()
            && self.keywords.is_none()
            && self.og_title.is_none()
            && self.og_description.is_none()
            && self.og_image.is_none()
            && self.noindex.is_none()
            && self.nofollow.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut seo = PageSeo {
            title: "About Page".to_string(),
            description: "Who we are".to_string(),
            og_title: Some("About".to_string()),
            ..Default::default()
        };
        let update = SeoUpdate {
            canonical: Some("https://stellmedia.com/about-us".to_string()),
            og_title: Some(None),
            noindex: Some(true),
            ..Default::default()
        };
        seo.merge(&update);

        assert_eq!(seo.title, "About Page");
        assert_eq!(seo.canonical, "https://stellmedia.com/about-us");
        assert_eq!(seo.og_title, None);
        assert!(seo.noindex);
    }

    #[test]
    fn test_robots_directive() {
        let seo = PageSeo {
            noindex: true,
            ..Default::default()
        };
        assert_eq!(seo.robots_directive(), "noindex, follow");
        assert_eq!(PageSeo::default().robots_directive(), "index, follow");
    }

    #[test]
    fn test_empty_update() {
        assert!(SeoUpdate::default().is_empty());
        let update = SeoUpdate {
            nofollow: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
