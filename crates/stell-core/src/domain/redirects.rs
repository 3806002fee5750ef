//! Redirect rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PagePath;
use crate::validation::ValidationError;

/// HTTP status used for a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RedirectStatus {
    #[default]
    MovedPermanently,
    Found,
    TemporaryRedirect,
    PermanentRedirect,
}

impl RedirectStatus {
    pub const fn code(self) -> u16 {
        match self {
            Self::MovedPermanently => 301,
            Self::Found => 302,
            Self::TemporaryRedirect => 307,
            Self::PermanentRedirect => 308,
        }
    }

    pub const fn is_permanent(self) -> bool {
        matches!(self, Self::MovedPermanently | Self::PermanentRedirect)
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = ValidationError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(Self::MovedPermanently),
            302 => Ok(Self::Found),
            307 => Ok(Self::TemporaryRedirect),
            308 => Ok(Self::PermanentRedirect),
            other => Err(ValidationError::InvalidRedirectStatus(other)),
        }
    }
}

impl From<RedirectStatus> for u16 {
    fn from(status: RedirectStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Matching form of a redirect endpoint: site paths are normalized like
/// [`PagePath`] (`/old/` and `/old` are the same source), anything else is
/// only trimmed.
pub fn redirect_path(raw: &str) -> String {
    PagePath::parse(raw).map_or_else(|_| raw.trim().to_string(), |path| path.as_str().to_string())
}

/// A single `from -> to` redirect.
///
/// `from` is always a site path; `to` may be a site path or an absolute URL.
/// Rules built with [`RedirectRule::new`] store both ends in matching form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub status: RedirectStatus,
}

impl RedirectRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>, status: RedirectStatus) -> Self {
        Self {
            from: redirect_path(&from.into()),
            to: redirect_path(&to.into()),
            status,
        }
    }
}

/// Ordered list of redirect rules; the first matching `from` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectList {
    pub rules: Vec<RedirectRule>,
}

impl RedirectList {
    pub const fn new(rules: Vec<RedirectRule>) -> Self {
        Self { rules }
    }

    /// Resolve a path against the list.
    pub fn lookup(&self, path: &str) -> Option<&RedirectRule> {
        let wanted = redirect_path(path);
        self.rules.iter().find(|r| redirect_path(&r.from) == wanted)
    }

    /// Add a rule, replacing an existing rule with the same source.
    pub fn upsert(&mut self, rule: RedirectRule) {
        let wanted = redirect_path(&rule.from);
        match self
            .rules
            .iter_mut()
            .find(|r| redirect_path(&r.from) == wanted)
        {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn remove(&mut self, from: &str) -> bool {
        let wanted = redirect_path(from);
        let before = self.rules.len();
        self.rules.retain(|r| redirect_path(&r.from) != wanted);
        self.rules.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_code() {
        let rule = RedirectRule::new("/old", "/new", RedirectStatus::Found);
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"status\":302"));

        let back: RedirectRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, RedirectStatus::Found);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<RedirectRule, _> =
            serde_json::from_str(r#"{"from":"/a","to":"/b","status":303}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_defaults_to_permanent() {
        let rule: RedirectRule = serde_json::from_str(r#"{"from":"/a","to":"/b"}"#).unwrap();
        assert_eq!(rule.status, RedirectStatus::MovedPermanently);
        assert!(rule.status.is_permanent());
    }

    #[test]
    fn test_upsert_and_lookup() {
        let mut list = RedirectList::default();
        list.upsert(RedirectRule::new("/a", "/b", RedirectStatus::default()));
        list.upsert(RedirectRule::new("/a", "/c", RedirectStatus::Found));

        assert_eq!(list.rules.len(), 1);
        assert_eq!(list.lookup("/a").map(|r| r.to.as_str()), Some("/c"));
        assert!(list.remove("/a"));
        assert!(list.lookup("/a").is_none());
    }

    #[test]
    fn test_trailing_slash_matches_same_source() {
        let mut list = RedirectList::default();
        list.upsert(RedirectRule::new("/old/", "/new/", RedirectStatus::default()));
        assert_eq!(list.rules[0].from, "/old");
        assert_eq!(list.rules[0].to, "/new");

        list.upsert(RedirectRule::new("/old", "/newer", RedirectStatus::Found));
        assert_eq!(list.rules.len(), 1);
        assert_eq!(list.lookup("/old/").map(|r| r.to.as_str()), Some("/newer"));

        // Stored rules written by hand keep their raw form but still match.
        let mut raw = RedirectList::new(vec![RedirectRule {
            from: "/legacy/".into(),
            to: "https://example.com/x".into(),
            status: RedirectStatus::default(),
        }]);
        assert!(raw.lookup("/legacy").is_some());
        assert!(raw.remove("/legacy"));
        assert!(raw.rules.is_empty());
    }

    #[test]
    fn test_absolute_target_is_only_trimmed() {
        let rule = RedirectRule::new("/a", " https://example.com/b/ ", RedirectStatus::default());
        assert_eq!(rule.to, "https://example.com/b/");
    }
}
