//! Localized text lookup.
//!
//! The string tables live with the host; this crate only asks for text by
//! key and falls back when nothing is found.

use std::borrow::Cow;
use std::collections::HashMap;

pub trait Localizer {
    /// Text stored under `key`, if any. Must not have side effects.
    fn try_get_string_by_tag(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Localizer that knows no strings; every lookup falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn try_get_string_by_tag(&self, _key: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// In-memory string table.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.strings.insert(key.into(), text.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StringTable { strings: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl Localizer for StringTable {
    fn try_get_string_by_tag(&self, key: &str) -> Option<Cow<'_, str>> {
        self.strings.get(key).map(|s| Cow::Borrowed(s.as_str()))
    }
}
