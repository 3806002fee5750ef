//! Domain types for site settings.
//!
//! These are pure data types with no infrastructure dependencies. Every
//! payload is a variant of [`SettingValue`], addressed by a [`SettingKey`].

mod content;
mod key;
mod redirects;
mod seo;
mod sitemap;
mod value;

pub use content::{ContentSection, PageContent};
pub use key::{PagePath, SettingKey, SettingKind};
pub use redirects::{RedirectList, RedirectRule, RedirectStatus, redirect_path};
pub use seo::{PageSeo, SeoUpdate};
pub use sitemap::{ChangeFreq, Sitemap, SitemapUrl};
pub use value::{RobotsTxt, SettingRecord, SettingValue};
