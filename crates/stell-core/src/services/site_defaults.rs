//! Computed defaults derived from the site configuration.

use crate::codec::default_robots;
use crate::domain::{
    ContentSection, PageContent, PageSeo, RobotsTxt, SettingKey, SettingValue, Sitemap,
    SitemapUrl,
};
use crate::ports::DefaultsProvider;
use crate::site::SiteConfig;

/// [`DefaultsProvider`] backed by a [`SiteConfig`].
///
/// Pages missing from the registry and the redirect list have no computed
/// default.
#[derive(Debug, Clone)]
pub struct SiteDefaults {
    site: SiteConfig,
}

impl SiteDefaults {
    pub const fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub const fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// One sitemap entry per registered page.
    pub fn sitemap(&self) -> Sitemap {
        Sitemap::new(
            self.site
                .pages
                .iter()
                .map(|page| {
                    SitemapUrl::new(self.site.page_url(&page.path))
                        .with_changefreq(page.changefreq)
                        .with_priority(page.priority)
                })
                .collect(),
        )
    }
}

impl DefaultsProvider for SiteDefaults {
    fn computed_default(&self, key: &SettingKey) -> Option<SettingValue> {
        match key {
            SettingKey::Sitemap => Some(SettingValue::Sitemap(self.sitemap())),
            SettingKey::Robots => Some(SettingValue::Robots(RobotsTxt::new(default_robots(
                &self.site.base_url,
            )))),
            SettingKey::Redirects => None,
            SettingKey::PageSeo(path) => {
                let page = self.site.page(path)?;
                Some(SettingValue::PageSeo(PageSeo {
                    title: page.title.clone(),
                    description: page.description.clone(),
                    canonical: self.site.page_url(path),
                    ..PageSeo::default()
                }))
            }
            SettingKey::PageContent(path) => {
                let page = self.site.page(path)?;
                Some(SettingValue::PageContent(PageContent::new(vec![
                    ContentSection::new("hero", page.title.clone(), page.description.clone()),
                ])))
            }
        }
    }
}
