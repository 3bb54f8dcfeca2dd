//! English navigation, served from the site root.

use crate::SiteError;
use crate::head::HeadTag;
use crate::locale::{LocaleNavigation, Section, SectionGroup};
use crate::nav::NavItem;
use crate::sidebar::{Sidebar, SidebarGroup, SidebarLeaf, SidebarTree};

/// English locale.
#[derive(Clone, Copy, Debug, Default)]
pub struct English;

/// Sidebar group templates for the English locale.
///
/// Holds each section's leaf list once; every group built from it shares
/// the same leaves.
pub struct EnglishGroups {
    getting_started: SectionGroup,
    configuration: SectionGroup,
}

impl EnglishGroups {
    /// Build the leaf lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            getting_started: SectionGroup::new(
                Section::GettingStarted,
                "Getting Started",
                vec![
                    SidebarLeaf::new("Introduction", "/getting-started/introduction"),
                    SidebarLeaf::new("Getting Started", "/getting-started/getting-started"),
                ],
            ),
            configuration: SectionGroup::new(
                Section::Configuration,
                "Configuration",
                vec![
                    SidebarLeaf::new(
                        "Command Line Arguments",
                        "/configuration/command-line-arguments",
                    ),
                    SidebarLeaf::new("Config File", "/configuration/config-file"),
                    SidebarLeaf::new("Server", "/configuration/server"),
                    SidebarLeaf::new("Source", "/configuration/source"),
                    SidebarLeaf::new("Rewrite", "/configuration/rewrite"),
                    SidebarLeaf::new("Location", "/configuration/location"),
                ],
            ),
        }
    }

    /// "Getting Started" group.
    #[must_use]
    pub fn getting_started(&self, collapsed: bool) -> SidebarGroup {
        self.getting_started.group(collapsed)
    }

    /// "Configuration" group.
    #[must_use]
    pub fn configuration(&self, collapsed: bool) -> SidebarGroup {
        self.configuration.group(collapsed)
    }

    /// Sidebar shown under the `active` section's prefix.
    #[must_use]
    pub fn sidebar_for(&self, active: Section) -> Sidebar {
        Sidebar::new(vec![
            self.getting_started(self.getting_started.collapsed_under(active)),
            self.configuration(self.configuration.collapsed_under(active)),
        ])
    }
}

impl Default for EnglishGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleNavigation for English {
    fn label(&self) -> &str {
        "English"
    }

    fn lang(&self) -> &str {
        "en-US"
    }

    fn head(&self) -> Vec<HeadTag> {
        vec![HeadTag::og("og:locale", "en_US")]
    }

    fn nav(&self) -> Result<Vec<NavItem>, SiteError> {
        Ok(vec![
            NavItem::new("Guide", "/getting-started/introduction").with_active_match("/guide/")?,
            NavItem::new("Configuration", "/configuration/config-file")
                .with_active_match("/configuration/")?,
        ])
    }

    fn sidebar(&self) -> SidebarTree {
        let groups = EnglishGroups::new();
        let mut tree = SidebarTree::new();
        for active in Section::ALL {
            tree.insert(active.prefix(), groups.sidebar_for(active));
        }
        tree
    }
}
