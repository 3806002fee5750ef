//! robots.txt parsing and generation.
//!
//! Supports the directives crawlers agree on: `User-agent`, `Allow`,
//! `Disallow`, `Crawl-delay` and `Sitemap`. Path patterns may use `*` and a
//! trailing `$` anchor.

use std::fmt::Write as _;

use url::Url;

use super::ParseError;

/// A single `Allow` / `Disallow` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    pub allow: bool,
    pub pattern: String,
}

/// Rules that apply to one or more user agents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsGroup {
    pub user_agents: Vec<String>,
    pub rules: Vec<RobotsRule>,
    pub crawl_delay: Option<f64>,
}

impl RobotsGroup {
    fn matches_agent(&self, agent: &str) -> bool {
        self.user_agents
            .iter()
            .any(|ua| ua.eq_ignore_ascii_case(agent))
    }

    fn is_wildcard(&self) -> bool {
        self.user_agents.iter().any(|ua| ua == "*")
    }
}

/// Structured view of a robots.txt file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsDocument {
    pub groups: Vec<RobotsGroup>,
    pub sitemaps: Vec<String>,
}

impl RobotsDocument {
    /// Whether `agent` may crawl `path`.
    ///
    /// The group naming the agent wins over `*`; within a group the longest
    /// matching pattern decides, with `Allow` winning ties.
    pub fn is_allowed(&self, agent: &str, path: &str) -> bool {
        let group = self
            .groups
            .iter()
            .find(|g| g.matches_agent(agent))
            .or_else(|| self.groups.iter().find(|g| g.is_wildcard()));
        let Some(group) = group else {
            return true;
        };

        let mut best: Option<(usize, bool)> = None;
        for rule in &group.rules {
            // `Disallow:` with an empty value means "allow everything".
            if rule.pattern.is_empty() || !pattern_matches(&rule.pattern, path) {
                continue;
            }
            let len = rule.pattern.len();
            best = match best {
                Some((best_len, best_allow))
                    if best_len > len || (best_len == len && best_allow) =>
                {
                    Some((best_len, best_allow))
                }
                _ => Some((len, rule.allow)),
            };
        }
        best.is_none_or(|(_, allow)| allow)
    }
}

/// Match a robots path pattern (`*` wildcard, optional `$` anchor).
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(stripped) => (stripped, true),
        None => (pattern, false),
    };

    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return true;
    };
    let Some(mut rest) = path.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    for (index, part) in parts.iter().enumerate() {
        let is_last = index + 1 == parts.len();
        if is_last && anchored {
            return rest.ends_with(part);
        }
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    !anchored || rest.is_empty()
}

/// Parse robots.txt text.
///
/// Comments (`#`) and blank lines are ignored. Rules before the first
/// `User-agent`, lines without a `:` and unknown directives are errors.
pub fn parse_robots(text: &str) -> Result<RobotsDocument, ParseError> {
    let mut doc = RobotsDocument::default();
    let mut current: Option<RobotsGroup> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let Some((directive, value)) = line.split_once(':') else {
            return Err(ParseError::Robots {
                line: line_no,
                message: format!("expected 'Directive: value', found '{line}'"),
            });
        };
        let value = value.trim();

        match directive.trim().to_ascii_lowercase().as_str() {
            "user-agent" => {
                if value.is_empty() {
                    return Err(ParseError::Robots {
                        line: line_no,
                        message: "User-agent cannot be empty".to_string(),
                    });
                }
                // Consecutive User-agent lines share one group.
                let starts_new = current
                    .as_ref()
                    .is_none_or(|g| !g.rules.is_empty() || g.crawl_delay.is_some());
                if starts_new {
                    if let Some(group) = current.take() {
                        doc.groups.push(group);
                    }
                    current = Some(RobotsGroup::default());
                }
                if let Some(group) = current.as_mut() {
                    group.user_agents.push(value.to_string());
                }
            }
            directive @ ("allow" | "disallow") => {
                let Some(group) = current.as_mut() else {
                    return Err(ParseError::Robots {
                        line: line_no,
                        message: "rule appears before any User-agent".to_string(),
                    });
                };
                group.rules.push(RobotsRule {
                    allow: directive == "allow",
                    pattern: value.to_string(),
                });
            }
            "crawl-delay" => {
                let Some(group) = current.as_mut() else {
                    return Err(ParseError::Robots {
                        line: line_no,
                        message: "Crawl-delay appears before any User-agent".to_string(),
                    });
                };
                let invalid = || ParseError::Robots {
                    line: line_no,
                    message: format!("invalid Crawl-delay '{value}'"),
                };
                let delay: f64 = value.parse().map_err(|_| invalid())?;
                if !delay.is_finite() || delay < 0.0 {
                    return Err(invalid());
                }
                group.crawl_delay = Some(delay);
            }
            "sitemap" => {
                let is_web_url = Url::parse(value).is_ok_and(|url| {
                    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
                });
                if !is_web_url {
                    return Err(ParseError::Robots {
                        line: line_no,
                        message: format!("Sitemap must be an absolute http(s) URL, found '{value}'"),
                    });
                }
                doc.sitemaps.push(value.to_string());
            }
            other => {
                return Err(ParseError::Robots {
                    line: line_no,
                    message: format!("unknown directive '{other}'"),
                });
            }
        }
    }

    if let Some(group) = current {
        doc.groups.push(group);
    }
    Ok(doc)
}

/// The robots.txt a fresh site starts with: crawl everything except the
/// admin panel and advertise the sitemap.
pub fn default_robots(base_url: &Url) -> String {
    let mut out = String::new();
    out.push_str("User-agent: *\n");
    out.push_str("Allow: /\n");
    out.push_str("Disallow: /admin\n");
    out.push('\n');
    let sitemap = base_url
        .join("sitemap.xml")
        .map_or_else(|_| format!("{base_url}sitemap.xml"), |u| u.to_string());
    let _ = writeln!(out, "Sitemap: {sitemap}");
    out
}
