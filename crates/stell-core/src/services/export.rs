//! Serializing settings to downloadable files.

use serde::Serialize;

use crate::codec::render_sitemap;
use crate::domain::{SettingKey, SettingValue};
use crate::ports::CoreError;

/// A rendered file, ready to be written wherever the caller wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub file_name: String,
    pub content: String,
}

/// Render `value` in the format crawlers or humans expect for its kind:
/// `sitemap.xml`, `robots.txt`, or pretty JSON for everything else.
pub fn export_value(key: &SettingKey, value: &SettingValue) -> Result<ExportedFile, CoreError> {
    let file = match value {
        SettingValue::Sitemap(sitemap) => ExportedFile {
            file_name: "sitemap.xml".to_string(),
            content: render_sitemap(sitemap),
        },
        SettingValue::Robots(robots) => {
            let mut content = robots.content.clone();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            ExportedFile {
                file_name: "robots.txt".to_string(),
                content,
            }
        }
        other => {
            let mut content = serde_json::to_string_pretty(other)
                .map_err(|e| CoreError::Internal(format!("Failed to serialize {key}: {e}")))?;
            content.push('\n');
            ExportedFile {
                file_name: format!("{}.json", file_stem(key)),
                content,
            }
        }
    };
    Ok(file)
}

/// Filesystem-safe stem: `seo:/case-studies` -> `seo-case-studies`,
/// `content:/` -> `content-home`.
fn file_stem(key: &SettingKey) -> String {
    let Some(page) = key.page() else {
        return key.to_string();
    };
    let prefix = key.to_string();
    let prefix = prefix.split(':').next().unwrap_or_default();
    if page.is_root() {
        return format!("{prefix}-home");
    }
    let path: String = page
        .as_str()
        .trim_start_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    format!("{prefix}-{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::parse_sitemap;
    use crate::domain::{RedirectList, RobotsTxt, Sitemap, SitemapUrl};

    #[test]
    fn test_sitemap_exports_parseable_xml() {
        let sitemap = Sitemap::new(vec![SitemapUrl::new("https://stellmedia.com/?a=1&b=2")]);
        let file = export_value(&SettingKey::Sitemap, &SettingValue::Sitemap(sitemap.clone()))
            .unwrap();
        assert_eq!(file.file_name, "sitemap.xml");
        assert_eq!(parse_sitemap(&file.content).unwrap(), sitemap);
    }

    #[test]
    fn test_robots_export_ends_with_newline() {
        let file = export_value(
            &SettingKey::Robots,
            &SettingValue::Robots(RobotsTxt::new("User-agent: *\nAllow: /")),
        )
        .unwrap();
        assert_eq!(file.file_name, "robots.txt");
        assert_eq!(file.content, "User-agent: *\nAllow: /\n");
    }

    #[test]
    fn test_other_kinds_export_json() {
        let file = export_value(
            &SettingKey::Redirects,
            &SettingValue::Redirects(RedirectList::default()),
        )
        .unwrap();
        assert_eq!(file.file_name, "redirects.json");
        assert!(file.content.contains("\"kind\": \"redirects\""));
    }

    #[test]
    fn test_page_key_file_names() {
        assert_eq!(
            file_stem(&SettingKey::page_seo("/case-studies").unwrap()),
            "seo-case-studies"
        );
        assert_eq!(file_stem(&SettingKey::page_content("/").unwrap()), "content-home");
        assert_eq!(
            file_stem(&SettingKey::page_seo("/blog/launch").unwrap()),
            "seo-blog-launch"
        );
    }
}
