//! Handler-level flows over a JSON file store.

use std::sync::Arc;

use stell_cli::handlers;
use stell_cli::{
    CliContext, RedirectsCommand, SeoCommand, SitemapCommand, bootstrap_with, exit_code_for,
};
use stell_core::{SettingKey, SettingValue, SiteConfig};
use stell_db::JsonFileSettingsStore;

fn context(dir: &tempfile::TempDir) -> CliContext {
    let store = Arc::new(JsonFileSettingsStore::new(dir.path().join("settings.json")));
    bootstrap_with(store, SiteConfig::with_defaults())
}

async fn stored(ctx: &CliContext, key: &SettingKey) -> Option<SettingValue> {
    ctx.app()
        .settings()
        .get(key)
        .await
        .unwrap()
        .map(|record| record.value)
}

#[tokio::test]
async fn test_seo_set_keeps_computed_fields() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    handlers::seo::execute(
        &ctx,
        SeoCommand::Set {
            path: "/about".into(),
            title: None,
            description: None,
            canonical: Some("https://stellmedia.com/about-us".into()),
            keywords: Some("agency, team".into()),
            og_image: None,
            noindex: None,
            nofollow: None,
        },
    )
    .await
    .unwrap();

    let key = SettingKey::page_seo("/about").unwrap();
    let seo = stored(&ctx, &key).await.unwrap();
    let seo = seo.as_page_seo().unwrap();
    assert_eq!(seo.title, "About Page");
    assert_eq!(seo.canonical, "https://stellmedia.com/about-us");
    assert_eq!(seo.keywords, vec!["agency", "team"]);
}

#[tokio::test]
async fn test_seo_set_without_fields_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    let err = handlers::seo::execute(
        &ctx,
        SeoCommand::Set {
            path: "/about".into(),
            title: None,
            description: None,
            canonical: None,
            keywords: None,
            og_image: None,
            noindex: None,
            nofollow: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(exit_code_for(&err), 2);
}

#[tokio::test]
async fn test_sitemap_import_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    let input = dir.path().join("published.xml");
    std::fs::write(
        &input,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://stellmedia.com/</loc><priority>1.0</priority></url>
  <url><loc>https://stellmedia.com/blog</loc><changefreq>weekly</changefreq></url>
</urlset>"#,
    )
    .unwrap();

    handlers::sitemap::execute(&ctx, SitemapCommand::Import { file: input })
        .await
        .unwrap();
    let sitemap = stored(&ctx, &SettingKey::Sitemap).await.unwrap();
    assert_eq!(sitemap.as_sitemap().unwrap().urls.len(), 2);

    let out = dir.path().join("sitemap.xml");
    handlers::sitemap::execute(&ctx, SitemapCommand::Export { out: Some(out.clone()) })
        .await
        .unwrap();
    let exported = std::fs::read_to_string(out).unwrap();
    assert_eq!(stell_core::parse_sitemap(&exported).unwrap(), *sitemap.as_sitemap().unwrap());
}

#[tokio::test]
async fn test_malformed_import_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    let input = dir.path().join("broken.xml");
    std::fs::write(&input, "<urlset><url><loc>").unwrap();

    let err = handlers::sitemap::execute(&ctx, SitemapCommand::Import { file: input })
        .await
        .unwrap_err();
    assert_eq!(exit_code_for(&err), 65);
    assert!(stored(&ctx, &SettingKey::Sitemap).await.is_none());
}

#[tokio::test]
async fn test_redirect_loop_fails_strict_audit() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    for (from, to) in [("/ping", "/pong"), ("/pong", "/ping")] {
        handlers::redirects::execute(
            &ctx,
            RedirectsCommand::Add {
                from: from.into(),
                to: to.into(),
                status: 301,
            },
        )
        .await
        .unwrap();
    }

    let err = handlers::audit::execute(&ctx, false, true).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 65);

    handlers::redirects::execute(&ctx, RedirectsCommand::Remove { from: "/pong".into() })
        .await
        .unwrap();
    let redirects = stored(&ctx, &SettingKey::Redirects).await.unwrap();
    assert_eq!(redirects.as_redirects().unwrap().rules.len(), 1);
}

#[tokio::test]
async fn test_invalid_redirect_status_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    let result = handlers::redirects::execute(
        &ctx,
        RedirectsCommand::Add {
            from: "/old".into(),
            to: "/new".into(),
            status: 303,
        },
    )
    .await;
    assert!(result.is_err());
    assert!(stored(&ctx, &SettingKey::Redirects).await.is_none());
}

#[tokio::test]
async fn test_trailing_slash_redirect_is_the_same_source() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    for (from, to) in [("/old/", "/new"), ("/old", "/newer")] {
        handlers::redirects::execute(
            &ctx,
            RedirectsCommand::Add {
                from: from.into(),
                to: to.into(),
                status: 301,
            },
        )
        .await
        .unwrap();
    }
    let redirects = stored(&ctx, &SettingKey::Redirects).await.unwrap();
    let rules = &redirects.as_redirects().unwrap().rules;
    assert_eq!(rules.len(), 1);
    assert_eq!((rules[0].from.as_str(), rules[0].to.as_str()), ("/old", "/newer"));

    handlers::redirects::execute(&ctx, RedirectsCommand::Remove { from: "/old/".into() })
        .await
        .unwrap();
    let redirects = stored(&ctx, &SettingKey::Redirects).await.unwrap();
    assert!(redirects.as_redirects().unwrap().rules.is_empty());
}

#[tokio::test]
async fn test_trailing_slash_loop_fails_strict_audit() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    for (from, to) in [("/a/", "/b"), ("/b", "/a")] {
        handlers::redirects::execute(
            &ctx,
            RedirectsCommand::Add {
                from: from.into(),
                to: to.into(),
                status: 301,
            },
        )
        .await
        .unwrap();
    }

    let err = handlers::audit::execute(&ctx, false, true).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 65);
}
