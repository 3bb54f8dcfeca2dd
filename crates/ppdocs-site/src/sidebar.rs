//! Sidebar forest keyed by path prefix.
//!
//! A [`SidebarTree`] maps a path prefix (e.g. `/getting-started/`) to the
//! [`Sidebar`] shown for documents under it. Groups share their leaf lists
//! through [`Arc`], so the same section can appear under several prefixes
//! with a different collapse state and no copied leaves.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

/// A link inside a sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarLeaf {
    /// Display text.
    pub text: String,
    /// Link target path.
    pub link: String,
}

impl SidebarLeaf {
    /// Create a leaf.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// A titled, collapsible group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Whether the group starts collapsed.
    pub collapsed: bool,
    /// Links in display order.
    pub items: Arc<[SidebarLeaf]>,
}

impl SidebarGroup {
    /// Create a group over a shared leaf list.
    #[must_use]
    pub fn new(text: impl Into<String>, collapsed: bool, items: Arc<[SidebarLeaf]>) -> Self {
        Self {
            text: text.into(),
            collapsed,
            items,
        }
    }

    /// Iterate over the link targets of the group.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|leaf| leaf.link.as_str())
    }
}

/// Sidebar shown under one path prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Base path prepended to every link by the renderer.
    pub base: String,
    /// Groups in display order.
    pub items: Vec<SidebarGroup>,
}

impl Sidebar {
    /// Create a sidebar with an empty base.
    #[must_use]
    pub fn new(items: Vec<SidebarGroup>) -> Self {
        Self {
            base: String::new(),
            items,
        }
    }

    /// Find a group by its heading.
    #[must_use]
    pub fn group(&self, text: &str) -> Option<&SidebarGroup> {
        self.items.iter().find(|group| group.text == text)
    }
}

/// Sidebars keyed by path prefix.
///
/// Keys are unique; inserting an existing key replaces its sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarTree(BTreeMap<String, Sidebar>);

impl SidebarTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sidebar for `prefix`, returning the one it replaces.
    pub fn insert(&mut self, prefix: impl Into<String>, sidebar: Sidebar) -> Option<Sidebar> {
        self.0.insert(prefix.into(), sidebar)
    }

    /// Sidebar registered for exactly `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&Sidebar> {
        self.0.get(prefix)
    }

    /// Sidebar for the longest prefix of `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Sidebar> {
        self.0
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, sidebar)| sidebar)
    }

    /// Iterate over `(prefix, sidebar)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sidebar)> {
        self.0.iter().map(|(prefix, sidebar)| (prefix.as_str(), sidebar))
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no prefixes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
