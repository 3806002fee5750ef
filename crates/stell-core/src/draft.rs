//! Draft state holder.
//!
//! A [`Draft`] is the in-memory, possibly unsaved copy of one Named Setting
//! Record. It moves through three states:
//!
//! ```text
//! Loading --reconcile--> Reconciled(source) --edit--> Dirty
//!                             ^                         |
//!                             +------ save / discard ---+
//! ```
//!
//! Edits are one-way into `Dirty` until the record is saved or the edits are
//! discarded. Parsing and validation failures never touch the held value.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::codec::{ParseError, parse_sitemap};
use crate::domain::{
    PageContent, PageSeo, RedirectList, RobotsTxt, SeoUpdate, SettingKey, SettingKind,
    SettingRecord, SettingValue, Sitemap,
};

/// Which reconciliation layer a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Read from the settings store.
    Persisted,
    /// Derived from site configuration.
    ComputedDefault,
    /// Built-in fallback.
    HardCodedDefault,
}

impl ValueSource {
    /// Short label for badges and listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Persisted => "saved",
            Self::ComputedDefault => "default",
            Self::HardCodedDefault => "fallback",
        }
    }
}

/// Outcome of reconciliation for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub key: SettingKey,
    pub value: SettingValue,
    pub source: ValueSource,
    /// Set only when `source` is [`ValueSource::Persisted`].
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Loading,
    Reconciled { source: ValueSource },
    Dirty { source: ValueSource },
}

/// Errors raised by draft edits. The draft is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Draft for {0} is still loading")]
    NotLoaded(SettingKey),

    #[error("Draft for {key} holds {actual} settings, not {expected}")]
    WrongKind {
        key: SettingKey,
        expected: SettingKind,
        actual: SettingKind,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// In-memory copy of a setting plus its dirty state.
#[derive(Debug, Clone)]
pub struct Draft {
    key: SettingKey,
    state: DraftState,
    value: Option<SettingValue>,
    baseline: Option<SettingValue>,
    updated_at: Option<DateTime<Utc>>,
}

impl Draft {
    /// A draft waiting for reconciliation.
    pub const fn loading(key: SettingKey) -> Self {
        Self {
            key,
            state: DraftState::Loading,
            value: None,
            baseline: None,
            updated_at: None,
        }
    }

    pub fn from_reconciled(reconciled: Reconciled) -> Self {
        let mut draft = Self::loading(reconciled.key.clone());
        draft.reconcile(reconciled);
        draft
    }

    /// Replace the draft with a freshly reconciled value. Unsaved edits are
    /// dropped; the caller decides whether that is acceptable.
    pub fn reconcile(&mut self, reconciled: Reconciled) {
        self.key = reconciled.key;
        self.baseline = Some(reconciled.value.clone());
        self.value = Some(reconciled.value);
        self.updated_at = reconciled.updated_at;
        self.state = DraftState::Reconciled {
            source: reconciled.source,
        };
    }

    pub const fn key(&self) -> &SettingKey {
        &self.key
    }

    pub const fn state(&self) -> DraftState {
        self.state
    }

    pub const fn value(&self) -> Option<&SettingValue> {
        self.value.as_ref()
    }

    /// The value as of the last reconcile or save.
    pub const fn baseline(&self) -> Option<&SettingValue> {
        self.baseline.as_ref()
    }

    pub const fn source(&self) -> Option<ValueSource> {
        match self.state {
            DraftState::Loading => None,
            DraftState::Reconciled { source } | DraftState::Dirty { source } => Some(source),
        }
    }

    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub const fn is_dirty(&self) -> bool {
        matches!(self.state, DraftState::Dirty { .. })
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, DraftState::Loading)
    }

    /// Apply a user edit. Any edit marks the draft dirty, even one that
    /// leaves the value unchanged.
    pub fn edit<F>(&mut self, f: F) -> Result<(), DraftError>
    where
        F: FnOnce(&mut SettingValue),
    {
        let source = match self.state {
            DraftState::Loading => return Err(DraftError::NotLoaded(self.key.clone())),
            DraftState::Reconciled { source } | DraftState::Dirty { source } => source,
        };
        let Some(value) = self.value.as_mut() else {
            return Err(DraftError::NotLoaded(self.key.clone()));
        };
        f(value);
        self.state = DraftState::Dirty { source };
        Ok(())
    }

    /// Replace the whole value. The new value must be of the key's kind.
    pub fn replace(&mut self, value: SettingValue) -> Result<(), DraftError> {
        self.expect_kind(value.kind())?;
        self.edit(|current| *current = value)
    }

    /// Merge a partial SEO update into a page SEO draft.
    pub fn edit_seo(&mut self, update: &SeoUpdate) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::PageSeo)?;
        self.edit(|value| {
            if let SettingValue::PageSeo(seo) = value {
                seo.merge(update);
            }
        })
    }

    pub fn edit_page_seo<F: FnOnce(&mut PageSeo)>(&mut self, f: F) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::PageSeo)?;
        self.edit(|value| {
            if let SettingValue::PageSeo(seo) = value {
                f(seo);
            }
        })
    }

    pub fn edit_sitemap<F: FnOnce(&mut Sitemap)>(&mut self, f: F) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::Sitemap)?;
        self.edit(|value| {
            if let SettingValue::Sitemap(sitemap) = value {
                f(sitemap);
            }
        })
    }

    pub fn edit_redirects<F: FnOnce(&mut RedirectList)>(&mut self, f: F) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::Redirects)?;
        self.edit(|value| {
            if let SettingValue::Redirects(redirects) = value {
                f(redirects);
            }
        })
    }

    pub fn edit_content<F: FnOnce(&mut PageContent)>(&mut self, f: F) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::PageContent)?;
        self.edit(|value| {
            if let SettingValue::PageContent(content) = value {
                f(content);
            }
        })
    }

    pub fn set_robots(&mut self, text: impl Into<String>) -> Result<(), DraftError> {
        self.expect_kind(SettingKind::Robots)?;
        let robots = RobotsTxt::new(text);
        self.edit(|value| *value = SettingValue::Robots(robots))
    }

    /// Replace the sitemap draft with the URLs of an XML document.
    ///
    /// The document is parsed before anything is touched: on a parse error
    /// the draft keeps its previous value and state.
    pub fn import_sitemap_xml(&mut self, xml: &str) -> Result<usize, DraftError> {
        self.expect_kind(SettingKind::Sitemap)?;
        if self.is_loading() {
            return Err(DraftError::NotLoaded(self.key.clone()));
        }
        let sitemap = parse_sitemap(xml)?;
        let count = sitemap.urls.len();
        self.edit(|value| *value = SettingValue::Sitemap(sitemap))?;
        Ok(count)
    }

    /// Drop unsaved edits, returning to the last reconciled or saved value.
    pub fn discard(&mut self) {
        if let DraftState::Dirty { source } = self.state {
            self.value.clone_from(&self.baseline);
            self.state = DraftState::Reconciled { source };
        }
    }

    /// Record a successful save: the stored record becomes the new baseline.
    pub fn mark_saved(&mut self, record: SettingRecord) {
        self.key = record.key;
        self.baseline = Some(record.value.clone());
        self.value = Some(record.value);
        self.updated_at = Some(record.updated_at);
        self.state = DraftState::Reconciled {
            source: ValueSource::Persisted,
        };
    }

    fn expect_kind(&self, expected: SettingKind) -> Result<(), DraftError> {
        let actual = self.key.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(DraftError::WrongKind {
                key: self.key.clone(),
                expected,
                actual,
            })
        }
    }
}
