//! Top navigation bar entries.

use std::fmt;

use regex::Regex;
use serde::ser::{Serialize, Serializer};

use crate::SiteError;

/// Compiled `activeMatch` pattern.
///
/// Serializes back to the pattern source so the renderer can compile it
/// with its own regex engine.
#[derive(Clone)]
pub struct ActiveMatch(Regex);

impl ActiveMatch {
    /// Compile an `activeMatch` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ActiveMatch`] if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, SiteError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| SiteError::ActiveMatch {
                pattern: pattern.to_owned(),
                source,
            })
    }

    /// Pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check whether the pattern matches anywhere in `path`.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl fmt::Debug for ActiveMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActiveMatch").field(&self.as_str()).finish()
    }
}

impl PartialEq for ActiveMatch {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ActiveMatch {}

impl Serialize for ActiveMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One entry of the top navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Display text.
    pub text: String,
    /// Link target path.
    pub link: String,
    /// Pattern deciding when the entry is highlighted, independent of `link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_match: Option<ActiveMatch>,
}

impl NavItem {
    /// Create an entry highlighted only on its own link.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            active_match: None,
        }
    }

    /// Highlight the entry whenever `pattern` matches the current path.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ActiveMatch`] if the pattern is not a valid regex.
    pub fn with_active_match(mut self, pattern: &str) -> Result<Self, SiteError> {
        self.active_match = Some(ActiveMatch::new(pattern)?);
        Ok(self)
    }

    /// Check whether the entry is highlighted for the document at `path`.
    ///
    /// Without an `activeMatch`, the entry is active when `path` is its
    /// link or lies below it. A root link is only active on the root.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        match &self.active_match {
            Some(active) => active.is_match(path),
            None if self.link == "/" => path == "/",
            None => {
                path == self.link
                    || path
                        .strip_prefix(self.link.trim_end_matches('/'))
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_item_serialization_with_active_match() {
        let item = NavItem::new("Configuration", "/configuration/config-file")
            .with_active_match("/configuration/")
            .unwrap();

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["text"], "Configuration");
        assert_eq!(json["link"], "/configuration/config-file");
        assert_eq!(json["activeMatch"], "/configuration/");
    }

    #[test]
    fn test_nav_item_serialization_without_active_match() {
        let item = NavItem::new("Guide", "/guide");

        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("activeMatch").is_none());
    }

    #[test]
    fn test_invalid_active_match() {
        let err = NavItem::new("Broken", "/broken")
            .with_active_match("/broken/(")
            .unwrap_err();

        assert!(matches!(err, SiteError::ActiveMatch { .. }));
        assert!(err.to_string().contains("/broken/("));
    }

    #[test]
    fn test_active_match_independent_of_link() {
        let item = NavItem::new("Guide", "/getting-started/introduction")
            .with_active_match("/guide/")
            .unwrap();

        assert!(item.is_active("/guide/setup"));
        assert!(!item.is_active("/getting-started/introduction"));
    }

    #[test]
    fn test_is_active_falls_back_to_link_prefix() {
        let item = NavItem::new("Configuration", "/configuration");

        assert!(item.is_active("/configuration"));
        assert!(item.is_active("/configuration/server"));
        assert!(!item.is_active("/configuration-legacy"));
        assert!(!item.is_active("/getting-started/introduction"));
    }

    #[test]
    fn test_root_link_only_active_on_root() {
        let item = NavItem::new("Home", "/");

        assert!(item.is_active("/"));
        assert!(!item.is_active("/configuration/server"));
        assert!(!item.is_active("/getting-started/introduction"));
    }

    #[test]
    fn test_active_match_equality_uses_pattern() {
        let a = ActiveMatch::new("/guide/").unwrap();
        let b = ActiveMatch::new("/guide/").unwrap();
        let c = ActiveMatch::new("/configuration/").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
