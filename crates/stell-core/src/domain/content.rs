//! Per-page section content.

use serde::{Deserialize, Serialize};

/// One editable section of a page (hero, intro, call to action...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: String,
    pub heading: String,
    #[serde(default)]
    pub body: String,
}

impl ContentSection {
    pub fn new(id: impl Into<String>, heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Ordered sections making up a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub sections: Vec<ContentSection>,
}

impl PageContent {
    pub const fn new(sections: Vec<ContentSection>) -> Self {
        Self { sections }
    }

    pub fn section(&self, id: &str) -> Option<&ContentSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut ContentSection> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Swap a section with its neighbour. Returns false when the move would
    /// leave the list bounds or the section does not exist.
    pub fn move_section(&mut self, id: &str, up: bool) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        let target = if up {
            match index.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else {
            index + 1
        };
        if target >= self.sections.len() {
            return false;
        }
        self.sections.swap(index, target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageContent {
        PageContent::new(vec![
            ContentSection::new("hero", "Grow faster", ""),
            ContentSection::new("intro", "Who we are", "A digital agency."),
            ContentSection::new("cta", "Talk to us", ""),
        ])
    }

    #[test]
    fn test_move_section() {
        let mut content = sample();
        assert!(content.move_section("cta", true));
        assert_eq!(content.sections[1].id, "cta");
        assert!(!content.move_section("hero", true));
        assert!(!content.move_section("intro", false));
        assert!(!content.move_section("missing", false));
    }

    #[test]
    fn test_section_lookup() {
        let mut content = sample();
        content.section_mut("intro").unwrap().body = "Updated".to_string();
        assert_eq!(content.section("intro").unwrap().body, "Updated");
    }
}
