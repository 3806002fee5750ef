//! Sitemap XML codec.
//!
//! Renders and parses the standard sitemaps.org shape:
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://stellmedia.com/</loc>
//!     <lastmod>2026-01-05</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! Unknown children of `<url>` (image or news extensions) are skipped.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

use super::ParseError;
use crate::domain::{ChangeFreq, Sitemap, SitemapUrl};

/// XML namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render a sitemap as an XML document.
pub fn render_sitemap(sitemap: &Sitemap) -> String {
    let mut out = String::with_capacity(128 + sitemap.urls.len() * 160);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<urlset xmlns=\"{SITEMAP_NAMESPACE}\">");
    for url in &sitemap.urls {
        out.push_str("  <url>\n");
        let _ = writeln!(out, "    <loc>{}</loc>", escape(url.loc.as_str()));
        if let Some(lastmod) = url.lastmod {
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        if let Some(changefreq) = url.changefreq {
            let _ = writeln!(out, "    <changefreq>{changefreq}</changefreq>");
        }
        if let Some(priority) = url.priority {
            let _ = writeln!(out, "    <priority>{}</priority>", format_priority(priority));
        }
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

/// `f32` display is the shortest string that parses back to the same value;
/// a trailing `.0` keeps whole numbers readable as priorities.
fn format_priority(priority: f32) -> String {
    let rendered = priority.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

#[derive(Default)]
struct UrlBuilder {
    loc: Option<String>,
    lastmod: Option<NaiveDate>,
    changefreq: Option<ChangeFreq>,
    priority: Option<f32>,
}

impl UrlBuilder {
    fn set(&mut self, field: &str, text: &str) -> Result<(), ParseError> {
        let text = text.trim();
        let invalid = |field: &'static str| ParseError::InvalidValue {
            field,
            value: text.to_string(),
        };
        match field {
            "loc" => {
                if text.is_empty() {
                    return Err(invalid("loc"));
                }
                self.loc = Some(text.to_string());
            }
            "lastmod" => self.lastmod = Some(parse_lastmod(text).ok_or_else(|| invalid("lastmod"))?),
            "changefreq" => {
                self.changefreq = Some(text.parse().map_err(|_| invalid("changefreq"))?);
            }
            "priority" => {
                let priority: f32 = text.parse().map_err(|_| invalid("priority"))?;
                if !(0.0..=1.0).contains(&priority) {
                    return Err(invalid("priority"));
                }
                self.priority = Some(priority);
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<SitemapUrl, ParseError> {
        Ok(SitemapUrl {
            loc: self.loc.ok_or(ParseError::MissingElement("loc"))?,
            lastmod: self.lastmod,
            changefreq: self.changefreq,
            priority: self.priority,
        })
    }
}

/// W3C datetime: either a bare date or a full RFC 3339 timestamp.
fn parse_lastmod(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

const URL_FIELDS: [&str; 4] = ["loc", "lastmod", "changefreq", "priority"];

/// Parse a sitemap XML document.
///
/// Fails on anything that is not a well-formed `<urlset>`: unclosed or
/// mismatched tags, a different root element, a `<url>` without `<loc>`, or
/// field values that do not convert.
pub fn parse_sitemap(xml: &str) -> Result<Sitemap, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut urls = Vec::new();
    let mut current: Option<UrlBuilder> = None;
    let mut text = String::new();
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ParseError::Xml(format!("{e} (at byte {})", reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                open_element(&name, &stack, &mut root_seen, &mut current)?;
                text.clear();
                stack.push(name);
            }
            Event::Empty(empty) => {
                let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                open_element(&name, &stack, &mut root_seen, &mut current)?;
                text.clear();
                stack.push(name);
                close_element(&mut stack, &mut current, &mut urls, &text)?;
            }
            Event::Text(raw) => {
                let unescaped = raw.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                if stack.is_empty() {
                    if !unescaped.trim().is_empty() {
                        return Err(ParseError::StrayText);
                    }
                } else {
                    text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if stack.is_empty() {
                    return Err(ParseError::StrayText);
                }
                text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
            }
            Event::End(_) => {
                close_element(&mut stack, &mut current, &mut urls, &text)?;
                text.clear();
            }
            Event::Eof => break,
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open));
    }
    if !root_seen {
        return Err(ParseError::MissingElement("urlset"));
    }

    Ok(Sitemap::new(urls))
}

fn open_element(
    name: &str,
    stack: &[String],
    root_seen: &mut bool,
    current: &mut Option<UrlBuilder>,
) -> Result<(), ParseError> {
    match stack.len() {
        0 => {
            if *root_seen {
                return Err(ParseError::UnexpectedElement {
                    expected: "end of document",
                    found: name.to_string(),
                });
            }
            if name != "urlset" {
                return Err(ParseError::UnexpectedElement {
                    expected: "urlset",
                    found: name.to_string(),
                });
            }
            *root_seen = true;
        }
        1 => {
            if name != "url" {
                return Err(ParseError::UnexpectedElement {
                    expected: "url",
                    found: name.to_string(),
                });
            }
            *current = Some(UrlBuilder::default());
        }
        _ => {}
    }
    Ok(())
}

fn close_element(
    stack: &mut Vec<String>,
    current: &mut Option<UrlBuilder>,
    urls: &mut Vec<SitemapUrl>,
    text: &str,
) -> Result<(), ParseError> {
    let Some(name) = stack.pop() else {
        return Ok(());
    };

    match stack.len() {
        // </url>
        1 => {
            if let Some(builder) = current.take() {
                urls.push(builder.finish()?);
            }
        }
        // </loc>, </lastmod>, ... directly under <url>
        2 if URL_FIELDS.contains(&name.as_str()) => {
            if let Some(builder) = current.as_mut() {
                builder.set(&name, text)?;
            }
        }
        _ => {}
    }
    Ok(())
}
