//! Text formats that settings are imported from and exported to.
//!
//! - `sitemap` - sitemaps.org `<urlset>` XML
//! - `robots` - robots.txt groups and directives

pub mod robots;
pub mod sitemap;

use thiserror::Error;

pub use robots::{RobotsDocument, RobotsGroup, RobotsRule, default_robots, parse_robots};
pub use sitemap::{SITEMAP_NAMESPACE, parse_sitemap, render_sitemap};

/// Error raised when an imported document cannot be understood.
///
/// Parsing never mutates the caller's state; callers only replace their
/// value once parsing has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(String),

    /// The document ended while an element was still open.
    #[error("Unclosed element <{0}>")]
    Unclosed(String),

    /// An element appeared where another was expected.
    #[error("Expected <{expected}>, found <{found}>")]
    UnexpectedElement { expected: &'static str, found: String },

    /// A required element is missing.
    #[error("Missing required element <{0}>")]
    MissingElement(&'static str),

    /// Text appeared outside of any element.
    #[error("Unexpected text outside the root element")]
    StrayText,

    /// An element's text could not be converted.
    #[error("Invalid <{field}> value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    /// A robots.txt line could not be understood.
    #[error("robots.txt line {line}: {message}")]
    Robots { line: usize, message: String },
}
