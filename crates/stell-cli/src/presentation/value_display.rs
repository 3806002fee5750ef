//! Terminal rendering of setting values and audit reports.

use std::fmt::Write as _;

use stell_core::{
    AuditReport, PageContent, PageSeo, Reconciled, RedirectList, Severity, SettingValue, Sitemap,
};

use super::tables::{format_optional, truncate_string};

const LOC_WIDTH: usize = 56;

pub fn display_value(value: &SettingValue) {
    print!("{}", render_value(value));
}

/// Header with the key and where the value came from, then the value.
pub fn display_reconciled(reconciled: &Reconciled) {
    print!("{}", render_reconciled(reconciled));
}

pub fn display_audit_report(report: &AuditReport) {
    print!("{}", render_audit_report(report));
}

pub(crate) fn render_reconciled(reconciled: &Reconciled) -> String {
    let mut out = format!("{} ({}", reconciled.key, reconciled.source.label());
    if let Some(updated_at) = reconciled.updated_at {
        let _ = write!(out, ", updated {}", updated_at.format("%Y-%m-%d %H:%M UTC"));
    }
    out.push_str(")\n");
    out.push_str(&render_value(&reconciled.value));
    out
}

pub(crate) fn render_value(value: &SettingValue) -> String {
    match value {
        SettingValue::Sitemap(sitemap) => render_sitemap_table(sitemap),
        SettingValue::Robots(robots) => {
            let mut out = robots.content.clone();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        SettingValue::Redirects(redirects) => render_redirects(redirects),
        SettingValue::PageSeo(seo) => render_seo(seo),
        SettingValue::PageContent(content) => render_content(content),
    }
}

fn render_sitemap_table(sitemap: &Sitemap) -> String {
    if sitemap.urls.is_empty() {
        return "(no entries)\n".to_string();
    }
    let mut out = format!(
        "{:<LOC_WIDTH$} {:<10} {:<8} {}\n",
        "LOC", "LASTMOD", "FREQ", "PRIORITY"
    );
    for url in &sitemap.urls {
        let _ = writeln!(
            out,
            "{:<LOC_WIDTH$} {:<10} {:<8} {}",
            truncate_string(&url.loc, LOC_WIDTH),
            format_optional(url.lastmod.as_ref(), "-"),
            format_optional(url.changefreq.as_ref(), "-"),
            url.priority.map_or_else(|| "-".to_string(), |p| format!("{p:.1}")),
        );
    }
    let _ = writeln!(out, "{} entries", sitemap.urls.len());
    out
}

fn render_redirects(redirects: &RedirectList) -> String {
    if redirects.rules.is_empty() {
        return "(no redirects)\n".to_string();
    }
    let mut out = String::new();
    for rule in &redirects.rules {
        let _ = writeln!(out, "{} {} -> {}", rule.status, rule.from, rule.to);
    }
    out
}

fn render_seo(seo: &PageSeo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  title:       {}", seo.title);
    let _ = writeln!(out, "  description: {}", seo.description);
    let _ = writeln!(out, "  canonical:   {}", seo.canonical);
    let _ = writeln!(out, "  keywords:    {}", seo.keywords.join(", "));
    if let Some(og_title) = &seo.og_title {
        let _ = writeln!(out, "  og:title:    {og_title}");
    }
    if let Some(og_description) = &seo.og_description {
        let _ = writeln!(out, "  og:desc:     {og_description}");
    }
    if let Some(og_image) = &seo.og_image {
        let _ = writeln!(out, "  og:image:    {og_image}");
    }
    let _ = writeln!(out, "  robots:      {}", seo.robots_directive());
    out
}

fn render_content(content: &PageContent) -> String {
    if content.sections.is_empty() {
        return "(no sections)\n".to_string();
    }
    let mut out = String::new();
    for (i, section) in content.sections.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, section.id, section.heading);
        if !section.body.is_empty() {
            let _ = writeln!(out, "   {}", truncate_string(&section.body, 72));
        }
    }
    out
}

pub(crate) fn render_audit_report(report: &AuditReport) -> String {
    if report.is_clean() {
        return "✓ No problems found.\n".to_string();
    }
    let mut out = String::new();
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "{:<7} {:<22} {}",
            finding.severity.to_string(),
            finding.key.to_string(),
            finding.message
        );
    }
    let _ = writeln!(
        out,
        "\n{} errors, {} warnings, {} notes",
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stell_core::{
        AuditFinding, ChangeFreq, RedirectRule, RedirectStatus, SettingKey, SitemapUrl,
        ValueSource,
    };

    #[test]
    fn test_sitemap_table_shows_optional_columns() {
        let sitemap = Sitemap::new(vec![
            SitemapUrl::new("https://stellmedia.com/")
                .with_lastmod(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
                .with_changefreq(ChangeFreq::Weekly)
                .with_priority(1.0),
            SitemapUrl::new("https://stellmedia.com/faq"),
        ]);
        let out = render_value(&SettingValue::Sitemap(sitemap));
        assert!(out.contains("2024-03-01 weekly   1.0"));
        assert!(out.contains("https://stellmedia.com/faq"));
        assert!(out.ends_with("2 entries\n"));
    }

    #[test]
    fn test_reconciled_header_names_source() {
        let reconciled = Reconciled {
            key: SettingKey::Redirects,
            value: SettingValue::Redirects(RedirectList::new(vec![RedirectRule::new(
                "/old-services",
                "/services",
                RedirectStatus::MovedPermanently,
            )])),
            source: ValueSource::HardCodedDefault,
            updated_at: None,
        };
        assert_eq!(
            render_reconciled(&reconciled),
            "redirects (fallback)\n301 /old-services -> /services\n"
        );
    }

    #[test]
    fn test_audit_summary_counts() {
        let report = AuditReport {
            findings: vec![
                AuditFinding {
                    severity: Severity::Error,
                    key: SettingKey::Sitemap,
                    message: "Sitemap lists https://other.example/ outside the site".into(),
                },
                AuditFinding {
                    severity: Severity::Warning,
                    key: SettingKey::page_seo("/faq").unwrap(),
                    message: "Title is 3 characters".into(),
                },
            ],
        };
        let out = render_audit_report(&report);
        assert!(out.starts_with("error   sitemap"));
        assert!(out.ends_with("1 errors, 1 warnings, 0 notes\n"));
        assert_eq!(render_audit_report(&AuditReport::default()), "✓ No problems found.\n");
    }
}
