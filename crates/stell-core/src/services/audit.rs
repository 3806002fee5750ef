//! Site settings audit.
//!
//! Deterministic checks over the effective settings (persisted value, else
//! computed default, else fallback). The same inputs always produce the same
//! findings, in the same order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::Url;

use crate::codec::parse_robots;
use crate::domain::{
    PagePath, PageSeo, RedirectList, RobotsTxt, SettingKey, SettingValue, Sitemap, redirect_path,
};
use crate::ports::CoreError;
use crate::services::{Reconciler, SettingsService};
use crate::site::SiteConfig;

const TITLE_LEN: (usize, usize) = (10, 60);
const DESCRIPTION_LEN: (usize, usize) = (50, 160);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub severity: Severity,
    pub key: SettingKey,
    pub message: String,
}

impl AuditFinding {
    fn new(severity: Severity, key: SettingKey, message: impl Into<String>) -> Self {
        Self {
            severity,
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Effective settings of a site at one point in time.
#[derive(Debug, Clone, Default)]
pub struct SiteSnapshot {
    pub sitemap: Sitemap,
    pub robots: RobotsTxt,
    pub redirects: RedirectList,
    pub pages: BTreeMap<PagePath, PageSeo>,
}

/// Gathers a [`SiteSnapshot`] and runs [`audit_snapshot`] over it.
#[derive(Clone)]
pub struct AuditService {
    reconciler: Reconciler,
    service: SettingsService,
    site: SiteConfig,
}

impl AuditService {
    pub const fn new(reconciler: Reconciler, service: SettingsService, site: SiteConfig) -> Self {
        Self {
            reconciler,
            service,
            site,
        }
    }

    /// Effective values for the sitemap, robots, redirects and the SEO of
    /// every registered or persisted page.
    pub async fn snapshot(&self) -> Result<SiteSnapshot, CoreError> {
        let mut snapshot = SiteSnapshot::default();

        if let SettingValue::Sitemap(sitemap) = self.effective(&SettingKey::Sitemap).await? {
            snapshot.sitemap = sitemap;
        }
        if let SettingValue::Robots(robots) = self.effective(&SettingKey::Robots).await? {
            snapshot.robots = robots;
        }
        if let SettingValue::Redirects(redirects) = self.effective(&SettingKey::Redirects).await? {
            snapshot.redirects = redirects;
        }

        let mut paths: Vec<PagePath> = self.site.pages.iter().map(|p| p.path.clone()).collect();
        for record in self.service.list().await? {
            if let SettingKey::PageSeo(path) = record.key {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        for path in paths {
            let key = SettingKey::PageSeo(path.clone());
            if let SettingValue::PageSeo(seo) = self.effective(&key).await? {
                snapshot.pages.insert(path, seo);
            }
        }
        Ok(snapshot)
    }

    pub async fn run(&self) -> Result<AuditReport, CoreError> {
        let snapshot = self.snapshot().await?;
        let report = audit_snapshot(&self.site, &snapshot);
        tracing::info!(
            findings = report.findings.len(),
            errors = report.count(Severity::Error),
            "Audit finished"
        );
        Ok(report)
    }

    async fn effective(&self, key: &SettingKey) -> Result<SettingValue, CoreError> {
        Ok(self.reconciler.reconcile(key).await?.value)
    }
}

/// Run every check over `snapshot`.
pub fn audit_snapshot(site: &SiteConfig, snapshot: &SiteSnapshot) -> AuditReport {
    let mut findings = Vec::new();
    for (path, seo) in &snapshot.pages {
        audit_page_seo(site, snapshot, path, seo, &mut findings);
    }
    audit_sitemap(site, snapshot, &mut findings);
    audit_redirects(site, snapshot, &mut findings);
    AuditReport { findings }
}

fn audit_page_seo(
    site: &SiteConfig,
    snapshot: &SiteSnapshot,
    path: &PagePath,
    seo: &PageSeo,
    findings: &mut Vec<AuditFinding>,
) {
    let key = SettingKey::PageSeo(path.clone());

    let title_len = seo.title.chars().count();
    if title_len < TITLE_LEN.0 || title_len > TITLE_LEN.1 {
        findings.push(AuditFinding::new(
            Severity::Warning,
            key.clone(),
            format!(
                "Title is {title_len} characters; aim for {}-{}",
                TITLE_LEN.0, TITLE_LEN.1
            ),
        ));
    }

    let description_len = seo.description.chars().count();
    if description_len < DESCRIPTION_LEN.0 || description_len > DESCRIPTION_LEN.1 {
        findings.push(AuditFinding::new(
            Severity::Warning,
            key.clone(),
            format!(
                "Description is {description_len} characters; aim for {}-{}",
                DESCRIPTION_LEN.0, DESCRIPTION_LEN.1
            ),
        ));
    }

    if seo.canonical.is_empty() {
        findings.push(AuditFinding::new(
            Severity::Info,
            key.clone(),
            "No canonical URL set",
        ));
    } else if let Ok(canonical) = Url::parse(&seo.canonical) {
        if canonical.host_str() != site.host() {
            findings.push(AuditFinding::new(
                Severity::Warning,
                key.clone(),
                format!(
                    "Canonical host {} differs from site host {}",
                    canonical.host_str().unwrap_or("?"),
                    site.host().unwrap_or("?")
                ),
            ));
        }
    }

    if seo.noindex && snapshot.sitemap.contains(&site.page_url(path)) {
        findings.push(AuditFinding::new(
            Severity::Error,
            key,
            "Page is marked noindex but listed in the sitemap",
        ));
    }
}

fn audit_sitemap(site: &SiteConfig, snapshot: &SiteSnapshot, findings: &mut Vec<AuditFinding>) {
    let robots = match parse_robots(&snapshot.robots.content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            findings.push(AuditFinding::new(
                Severity::Error,
                SettingKey::Robots,
                format!("robots.txt does not parse: {e}"),
            ));
            None
        }
    };

    for url in &snapshot.sitemap.urls {
        let Ok(loc) = Url::parse(&url.loc) else {
            continue;
        };
        if loc.host_str() != site.host() {
            findings.push(AuditFinding::new(
                Severity::Error,
                SettingKey::Sitemap,
                format!("{} is outside the site host", url.loc),
            ));
            continue;
        }
        if let Some(doc) = &robots {
            if !doc.is_allowed("*", loc.path()) {
                findings.push(AuditFinding::new(
                    Severity::Error,
                    SettingKey::Sitemap,
                    format!("{} is listed but disallowed by robots.txt", url.loc),
                ));
            }
        }
    }

    for page in &site.pages {
        let page_url = site.page_url(&page.path);
        let noindex = snapshot.pages.get(&page.path).is_some_and(|seo| seo.noindex);
        if !noindex && !snapshot.sitemap.contains(&page_url) {
            findings.push(AuditFinding::new(
                Severity::Warning,
                SettingKey::Sitemap,
                format!("{} is missing from the sitemap", page.path),
            ));
        }
    }
}

fn audit_redirects(site: &SiteConfig, snapshot: &SiteSnapshot, findings: &mut Vec<AuditFinding>) {
    let redirects = &snapshot.redirects;
    for rule in &redirects.rules {
        let mut trail = vec![redirect_path(&rule.from)];
        let mut target = redirect_path(&rule.to);
        let mut looped = false;
        while let Some(next) = redirects.lookup(&target) {
            if trail.contains(&target) {
                looped = true;
                break;
            }
            trail.push(target);
            target = redirect_path(&next.to);
            if trail.len() > redirects.rules.len() {
                break;
            }
        }
        if trail.contains(&target) {
            looped = true;
        }

        if looped {
            trail.push(target);
            findings.push(AuditFinding::new(
                Severity::Error,
                SettingKey::Redirects,
                format!("Redirect loop: {}", trail.join(" -> ")),
            ));
        } else if trail.len() > 1 {
            trail.push(target);
            findings.push(AuditFinding::new(
                Severity::Warning,
                SettingKey::Redirects,
                format!("Redirect chain: {}", trail.join(" -> ")),
            ));
        }

        if let Ok(path) = PagePath::parse(&rule.from) {
            if snapshot.sitemap.contains(&site.page_url(&path)) {
                findings.push(AuditFinding::new(
                    Severity::Warning,
                    SettingKey::Redirects,
                    format!("{} redirects but is still listed in the sitemap", rule.from),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RedirectRule, RedirectStatus, SitemapUrl};
    use crate::ports::{DefaultsProvider, NoDefaults, NoopEmitter};
    use crate::services::SiteDefaults;
    use crate::services::test_support::MemoryStore;
    use std::sync::Arc;

    fn site() -> SiteConfig {
        SiteConfig::with_defaults()
    }

    fn good_seo(path: &str) -> PageSeo {
        PageSeo {
            title: "A perfectly sized title".to_string(),
            description: "A meta description that is comfortably longer than fifty characters."
                .to_string(),
            canonical: format!("https://stellmedia.com{path}"),
            ..Default::default()
        }
    }

    fn clean_snapshot() -> SiteSnapshot {
        let site = site();
        let defaults = SiteDefaults::new(site.clone());
        let robots = defaults
            .computed_default(&SettingKey::Robots)
            .and_then(|v| v.as_robots().cloned())
            .unwrap();
        SiteSnapshot {
            sitemap: defaults.sitemap(),
            robots,
            redirects: RedirectList::default(),
            pages: site
                .pages
                .iter()
                .map(|p| (p.path.clone(), good_seo(p.path.as_str())))
                .collect(),
        }
    }

    fn messages(report: &AuditReport) -> Vec<&str> {
        report.findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_clean_site_has_no_findings() {
        let report = audit_snapshot(&site(), &clean_snapshot());
        assert!(report.is_clean(), "{:?}", messages(&report));
    }

    #[test]
    fn test_audit_is_deterministic() {
        let mut snapshot = clean_snapshot();
        snapshot.sitemap.urls.clear();
        let first = audit_snapshot(&site(), &snapshot);
        let second = audit_snapshot(&site(), &snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_title_and_description() {
        let mut snapshot = clean_snapshot();
        let about = PagePath::parse("/about").unwrap();
        snapshot.pages.insert(
            about,
            PageSeo {
                title: "About".to_string(),
                description: "Short".to_string(),
                canonical: "https://stellmedia.com/about".to_string(),
                ..Default::default()
            },
        );
        let report = audit_snapshot(&site(), &snapshot);
        assert_eq!(report.count(Severity::Warning), 2);
        assert!(report.findings.iter().all(|f| f.key == SettingKey::page_seo("/about").unwrap()));
    }

    #[test]
    fn test_foreign_canonical_host() {
        let mut snapshot = clean_snapshot();
        let mut seo = good_seo("/faq");
        seo.canonical = "https://example.org/faq".to_string();
        snapshot.pages.insert(PagePath::parse("/faq").unwrap(), seo);

        let report = audit_snapshot(&site(), &snapshot);
        assert!(messages(&report)[0].starts_with("Canonical host example.org"));
    }

    #[test]
    fn test_noindex_page_in_sitemap_is_error() {
        let mut snapshot = clean_snapshot();
        let mut seo = good_seo("/contact");
        seo.noindex = true;
        snapshot.pages.insert(PagePath::parse("/contact").unwrap(), seo);

        let report = audit_snapshot(&site(), &snapshot);
        assert!(report.has_errors());
        assert_eq!(
            report.findings[0].message,
            "Page is marked noindex but listed in the sitemap"
        );
    }

    #[test]
    fn test_missing_registry_page_and_foreign_loc() {
        let mut snapshot = clean_snapshot();
        snapshot.sitemap.remove("https://stellmedia.com/faq");
        snapshot
            .sitemap
            .upsert(SitemapUrl::new("https://cdn.example.org/file"));

        let report = audit_snapshot(&site(), &snapshot);
        let messages = messages(&report);
        assert!(messages.contains(&"https://cdn.example.org/file is outside the site host"));
        assert!(messages.contains(&"/faq is missing from the sitemap"));
    }

    #[test]
    fn test_disallowed_loc() {
        let mut snapshot = clean_snapshot();
        snapshot
            .sitemap
            .upsert(SitemapUrl::new("https://stellmedia.com/admin/login"));

        let report = audit_snapshot(&site(), &snapshot);
        assert!(messages(&report).contains(
            &"https://stellmedia.com/admin/login is listed but disallowed by robots.txt"
        ));
    }

    #[test]
    fn test_redirect_chain_and_loop() {
        let mut snapshot = clean_snapshot();
        snapshot.redirects = RedirectList::new(vec![
            RedirectRule::new("/old", "/older", RedirectStatus::MovedPermanently),
            RedirectRule::new("/older", "/oldest", RedirectStatus::MovedPermanently),
            RedirectRule::new("/ping", "/pong", RedirectStatus::Found),
            RedirectRule::new("/pong", "/ping", RedirectStatus::Found),
        ]);

        let report = audit_snapshot(&site(), &snapshot);
        let messages = messages(&report);
        assert!(messages.contains(&"Redirect chain: /old -> /older -> /oldest"));
        assert!(messages.contains(&"Redirect loop: /ping -> /pong -> /ping"));
        assert!(messages.contains(&"Redirect loop: /pong -> /ping -> /pong"));
    }

    #[test]
    fn test_trailing_slash_loop_is_an_error() {
        let mut snapshot = clean_snapshot();
        snapshot.redirects = RedirectList::new(vec![
            RedirectRule {
                from: "/a/".into(),
                to: "/b".into(),
                status: RedirectStatus::MovedPermanently,
            },
            RedirectRule {
                from: "/b".into(),
                to: "/a".into(),
                status: RedirectStatus::MovedPermanently,
            },
        ]);

        let report = audit_snapshot(&site(), &snapshot);
        assert!(report.has_errors());
        let messages = messages(&report);
        assert!(messages.contains(&"Redirect loop: /a -> /b -> /a"));
        assert!(!messages.iter().any(|m| m.starts_with("Redirect chain")));
    }

    #[test]
    fn test_redirect_source_still_in_sitemap() {
        let mut snapshot = clean_snapshot();
        snapshot.redirects = RedirectList::new(vec![RedirectRule::new(
            "/blog",
            "https://blog.stellmedia.com/",
            RedirectStatus::MovedPermanently,
        )]);

        let report = audit_snapshot(&site(), &snapshot);
        assert_eq!(
            messages(&report),
            vec!["/blog redirects but is still listed in the sitemap"]
        );
    }

    #[tokio::test]
    async fn test_fresh_site_uses_effective_values() {
        let store = Arc::new(MemoryStore::new());
        let defaults = Arc::new(SiteDefaults::new(site()));
        let audit = AuditService::new(
            Reconciler::new(store.clone(), defaults),
            SettingsService::new(store, Arc::new(NoopEmitter)),
            site(),
        );

        let snapshot = audit.snapshot().await.unwrap();
        assert_eq!(snapshot.pages.len(), site().pages.len());
        assert_eq!(snapshot.sitemap.urls.len(), site().pages.len());

        let report = audit.run().await.unwrap();
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn test_persisted_unregistered_page_is_audited() {
        let key = SettingKey::page_seo("/pricing").unwrap();
        let store = Arc::new(MemoryStore::with_record(
            key.clone(),
            SettingValue::PageSeo(good_seo("/pricing")),
        ));
        let audit = AuditService::new(
            Reconciler::new(store.clone(), Arc::new(NoDefaults)),
            SettingsService::new(store, Arc::new(NoopEmitter)),
            site(),
        );

        let snapshot = audit.snapshot().await.unwrap();
        assert!(snapshot.pages.contains_key(&PagePath::parse("/pricing").unwrap()));
    }
}
