//! Per-locale navigation and sidebar construction.
//!
//! Each supported language implements [`LocaleNavigation`] and is
//! registered in [`Locales`] under its key (`root` for the default
//! locale). Building a locale produces an independent [`LocaleBundle`];
//! bundles share nothing, so they can be built in any order or in parallel.
//!
//! # Collapse state
//!
//! Sidebars are grouped by documentation [`Section`]. Every section prefix
//! shows every group, but a group starts collapsed unless it belongs to
//! the section being viewed. The leaf lists are built once per sidebar
//! and shared between prefixes; only the `collapsed` flag differs.

mod en;

use std::sync::Arc;

use serde::Serialize;

use crate::SiteError;
use crate::head::HeadTag;
use crate::nav::NavItem;
use crate::sidebar::{SidebarGroup, SidebarLeaf, SidebarTree};

pub use en::{English, EnglishGroups};

/// Documentation sections that own a sidebar prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// Introduction and first steps.
    GettingStarted,
    /// Configuration reference.
    Configuration,
}

impl Section {
    /// All sections in sidebar order.
    pub const ALL: [Self; 2] = [Self::GettingStarted, Self::Configuration];

    /// Sidebar key for the section.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::GettingStarted => "/getting-started/",
            Self::Configuration => "/configuration/",
        }
    }
}

/// Sidebar group template: a section's heading and its shared leaves.
#[derive(Clone, Debug)]
pub struct SectionGroup {
    /// Section the group belongs to.
    pub section: Section,
    /// Group heading.
    pub text: String,
    /// Leaves shared by every instance of the group.
    pub items: Arc<[SidebarLeaf]>,
}

impl SectionGroup {
    /// Create a template from a leaf list.
    #[must_use]
    pub fn new(section: Section, text: impl Into<String>, items: Vec<SidebarLeaf>) -> Self {
        Self {
            section,
            text: text.into(),
            items: Arc::from(items),
        }
    }

    /// Instantiate the group with an explicit collapse state.
    #[must_use]
    pub fn group(&self, collapsed: bool) -> SidebarGroup {
        SidebarGroup::new(self.text.clone(), collapsed, Arc::clone(&self.items))
    }

    /// Whether the group starts collapsed under the `active` section's prefix.
    #[must_use]
    pub fn collapsed_under(&self, active: Section) -> bool {
        self.section != active
    }
}

/// Navigation content for one language.
pub trait LocaleNavigation: Send + Sync {
    /// Name shown in the language switcher.
    fn label(&self) -> &str;

    /// `lang` attribute of the generated HTML.
    fn lang(&self) -> &str;

    /// Localized site title; `None` keeps the site-wide title.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Localized site description; `None` keeps the site-wide description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Extra `<head>` tags for pages of this locale.
    fn head(&self) -> Vec<HeadTag> {
        Vec::new()
    }

    /// Top navigation entries in display order.
    fn nav(&self) -> Result<Vec<NavItem>, SiteError>;

    /// Sidebar forest.
    fn sidebar(&self) -> SidebarTree;
}

/// Navigation and sidebar of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleTheme {
    /// Top navigation entries.
    pub nav: Vec<NavItem>,
    /// Sidebar forest.
    pub sidebar: SidebarTree,
}

/// Everything the renderer needs for one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleBundle {
    /// Language switcher label.
    pub label: String,
    /// HTML `lang` attribute.
    pub lang: String,
    /// Localized title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Localized description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra `<head>` tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
    /// Navigation and sidebar.
    pub theme_config: LocaleTheme,
}

/// Registry of locale builders keyed by locale key.
pub struct Locales {
    entries: Vec<(String, Box<dyn LocaleNavigation>)>,
}

impl Locales {
    /// Registry with no locales.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the locales shipped with the site.
    #[must_use]
    pub fn builtin() -> Self {
        let mut locales = Self::empty();
        locales.register(ppdocs_config::DEFAULT_LOCALE, English);
        locales
    }

    /// Register a locale, replacing any builder already under `key`.
    pub fn register(&mut self, key: impl Into<String>, locale: impl LocaleNavigation + 'static) {
        let key = key.into();
        let locale: Box<dyn LocaleNavigation> = Box::new(locale);
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = locale;
        } else {
            self.entries.push((key, locale));
        }
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Builder registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] if no builder is registered.
    pub fn get(&self, key: &str) -> Result<&dyn LocaleNavigation, SiteError> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, locale)| locale.as_ref())
            .ok_or_else(|| SiteError::UnknownLocale(key.to_owned()))
    }

    /// Build the top navigation for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] for an unregistered key.
    pub fn build_nav(&self, key: &str) -> Result<Vec<NavItem>, SiteError> {
        self.get(key)?.nav()
    }

    /// Build the sidebar forest for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] for an unregistered key.
    pub fn build_sidebar(&self, key: &str) -> Result<SidebarTree, SiteError> {
        Ok(self.get(key)?.sidebar())
    }

    /// Build the full bundle for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] for an unregistered key, or an
    /// error from the locale's navigation builder.
    pub fn build(&self, key: &str) -> Result<LocaleBundle, SiteError> {
        let locale = self.get(key)?;
        let bundle = LocaleBundle {
            label: locale.label().to_owned(),
            lang: locale.lang().to_owned(),
            title: locale.title().map(str::to_owned),
            description: locale.description().map(str::to_owned),
            head: locale.head(),
            theme_config: LocaleTheme {
                nav: locale.nav()?,
                sidebar: locale.sidebar(),
            },
        };
        tracing::debug!(
            locale = %key,
            nav_items = bundle.theme_config.nav.len(),
            sidebar_prefixes = bundle.theme_config.sidebar.len(),
            "Built locale bundle"
        );
        Ok(bundle)
    }
}

impl Default for Locales {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Minimal;

    impl LocaleNavigation for Minimal {
        fn label(&self) -> &str {
            "Minimal"
        }

        fn lang(&self) -> &str {
            "xx"
        }

        fn title(&self) -> Option<&str> {
            Some("Minimal Title")
        }

        fn nav(&self) -> Result<Vec<NavItem>, SiteError> {
            Ok(vec![NavItem::new("Home", "/")])
        }

        fn sidebar(&self) -> SidebarTree {
            SidebarTree::new()
        }
    }

    #[test]
    fn test_collapsed_under_other_sections() {
        let config = SectionGroup::new(
            Section::Configuration,
            "Configuration",
            vec![SidebarLeaf::new("Server", "/configuration/server")],
        );

        assert!(config.collapsed_under(Section::GettingStarted));
        assert!(!config.collapsed_under(Section::Configuration));
    }

    #[test]
    fn test_unknown_locale_is_an_error() {
        let locales = Locales::builtin();

        let err = locales.build("fr").unwrap_err();

        assert!(matches!(err, SiteError::UnknownLocale(ref key) if key == "fr"));
        assert!(locales.build_nav("fr").is_err());
        assert!(locales.build_sidebar("fr").is_err());
    }

    #[test]
    fn test_register_custom_locale() {
        let mut locales = Locales::builtin();
        locales.register("xx", Minimal);

        let bundle = locales.build("xx").unwrap();

        assert_eq!(locales.keys().collect::<Vec<_>>(), vec!["root", "xx"]);
        assert_eq!(bundle.label, "Minimal");
        assert_eq!(bundle.title.as_deref(), Some("Minimal Title"));
        assert!(bundle.description.is_none());
        assert!(bundle.theme_config.sidebar.is_empty());
    }

    #[test]
    fn test_register_replaces_existing_key() {
        let mut locales = Locales::builtin();
        locales.register("root", Minimal);

        assert_eq!(locales.keys().count(), 1);
        assert_eq!(locales.build("root").unwrap().lang, "xx");
    }

    #[test]
    fn test_empty_registry_has_no_locales() {
        let locales = Locales::empty();

        assert_eq!(locales.keys().count(), 0);
        assert!(locales.get("root").is_err());
    }

    #[test]
    fn test_bundle_serialization() {
        let bundle = Locales::builtin().build("root").unwrap();

        let json = serde_json::to_value(&bundle).unwrap();

        assert_eq!(json["label"], "English");
        assert_eq!(json["lang"], "en-US");
        assert!(json.get("title").is_none());
        assert!(json["themeConfig"]["nav"].is_array());
        assert!(json["themeConfig"]["sidebar"]["/configuration/"].is_object());
    }
}
