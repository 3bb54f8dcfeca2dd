//! Tags injected into the HTML `<head>`.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A `<head>` element.
///
/// Serializes as `[tag, {attrs}]`, or `[tag, {attrs}, content]` when the
/// element has inner content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadTag {
    /// Element name (`link`, `meta`, `script`).
    pub tag: String,
    /// Element attributes.
    pub attrs: BTreeMap<String, String>,
    /// Inner content, if any.
    pub content: Option<String>,
}

impl HeadTag {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: None,
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// `<meta name=... content=...>`.
    #[must_use]
    pub fn meta(name: &str, content: &str) -> Self {
        Self::new("meta").attr("name", name).attr("content", content)
    }

    /// `<meta property=... content=...>` (Open Graph).
    #[must_use]
    pub fn og(property: &str, content: &str) -> Self {
        Self::new("meta")
            .attr("property", property)
            .attr("content", content)
    }
}

impl Serialize for HeadTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.content.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.tag)?;
        seq.serialize_element(&self.attrs)?;
        if let Some(content) = &self.content {
            seq.serialize_element(content)?;
        }
        seq.end()
    }
}
