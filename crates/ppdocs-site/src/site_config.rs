//! The configuration object handed to the site renderer.
//!
//! [`SiteConfig`] collects the rewrite rules, one [`LocaleBundle`] per
//! enabled locale, and the static site metadata. It is built once at
//! startup and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use ppdocs_config::Config;
//! use ppdocs_site::SiteConfig;
//!
//! let site = SiteConfig::build(&Config::default()).unwrap();
//! assert!(site.check_links().is_empty());
//! let json = site.to_json().unwrap();
//! assert!(json.contains("\"cleanUrls\": true"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use ppdocs_config::Config;
use rayon::prelude::*;
use serde::Serialize;

use crate::SiteError;
use crate::head::HeadTag;
use crate::locale::{LocaleBundle, Locales};
use crate::path::{is_normalized_link, is_normalized_source, link_to_source};
use crate::rewrite::RewriteRuleSet;
use crate::sidebar::SidebarGroup;
use crate::theme::ThemeConfig;

/// Sitemap generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    /// Absolute base URL for sitemap entries.
    pub hostname: String,
}

/// Complete site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Source path rewrite rules.
    pub rewrites: RewriteRuleSet,
    /// Locale bundles keyed by locale key.
    pub locales: BTreeMap<String, LocaleBundle>,
    /// Excluded source path patterns.
    pub src_exclude: Vec<String>,
    #[serde(skip)]
    exclude_patterns: Vec<glob::Pattern>,
    /// Show last-updated timestamps.
    pub last_updated: bool,
    /// Generate URLs without `.html`.
    pub clean_urls: bool,
    /// Sitemap settings.
    pub sitemap: Sitemap,
    /// Site-wide `<head>` tags.
    pub head: Vec<HeadTag>,
    /// Theme values shared by every locale.
    pub theme_config: ThemeConfig,
}

/// What is wrong with a navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkProblem {
    /// Link is not a normalized absolute path.
    Malformed,
    /// Link's source document rewrites to a malformed path.
    BadRewrite(String),
}

/// A navigation link that would not resolve cleanly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkIssue {
    /// Locale the link appears in.
    pub locale: String,
    /// Link as written.
    pub link: String,
    /// The problem found.
    pub problem: LinkProblem,
}

impl fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            LinkProblem::Malformed => {
                write!(f, "[{}] malformed link '{}'", self.locale, self.link)
            }
            LinkProblem::BadRewrite(rewritten) => write!(
                f,
                "[{}] link '{}' rewrites to malformed path '{rewritten}'",
                self.locale, self.link
            ),
        }
    }
}

/// Every link of a locale: nav entries first, then sidebar leaves.
fn bundle_links(bundle: &LocaleBundle) -> impl Iterator<Item = &str> {
    let nav = bundle.theme_config.nav.iter().map(|item| item.link.as_str());
    let sidebar = bundle
        .theme_config
        .sidebar
        .iter()
        .flat_map(|(_, sidebar)| sidebar.items.iter())
        .flat_map(SidebarGroup::links);
    nav.chain(sidebar)
}

impl SiteConfig {
    /// Build the configuration with the built-in locales.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if a configured rewrite rule or exclusion
    /// pattern is malformed, or an enabled locale is not registered.
    pub fn build(config: &Config) -> Result<Self, SiteError> {
        Self::build_with(config, &Locales::builtin())
    }

    /// Build the configuration with a custom locale registry.
    ///
    /// Locale bundles are built in parallel; each is independent.
    ///
    /// # Errors
    ///
    /// Same as [`SiteConfig::build`].
    pub fn build_with(config: &Config, locales: &Locales) -> Result<Self, SiteError> {
        let rewrites = RewriteRuleSet::with_settings(&config.rewrites)?;

        let exclude_patterns = config
            .site
            .src_exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| SiteError::Exclude {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bundles = config
            .locales
            .enabled
            .par_iter()
            .map(|key| locales.build(key).map(|bundle| (key.clone(), bundle)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let theme_config = ThemeConfig::from(&config.theme);
        let head = vec![
            HeadTag::new("link")
                .attr("rel", "icon")
                .attr("type", "image/svg+xml")
                .attr("href", theme_config.logo.as_str()),
            HeadTag::meta("theme-color", "#3c8772"),
            HeadTag::og("og:type", "website"),
            HeadTag::og("og:title", &config.site.title),
            HeadTag::og("og:site_name", &config.site.title),
        ];

        tracing::info!(
            locales = bundles.len(),
            rewrites = rewrites.rules().len(),
            "Built site configuration"
        );

        Ok(Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            rewrites,
            locales: bundles,
            src_exclude: config.site.src_exclude.clone(),
            exclude_patterns,
            last_updated: config.site.last_updated,
            clean_urls: config.site.clean_urls,
            sitemap: Sitemap {
                hostname: config.site.hostname.clone(),
            },
            head,
            theme_config,
        })
    }

    /// Bundle for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] if the locale was not built.
    pub fn locale(&self, key: &str) -> Result<&LocaleBundle, SiteError> {
        self.locales
            .get(key)
            .ok_or_else(|| SiteError::UnknownLocale(key.to_owned()))
    }

    /// Check whether a source path is excluded from the build.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(path))
    }

    /// Find navigation links that would not resolve cleanly.
    ///
    /// A link must be a normalized absolute path, and the source document
    /// it names must rewrite to a normalized source path. Each issue is
    /// also logged as a warning.
    #[must_use]
    pub fn check_links(&self) -> Vec<LinkIssue> {
        let mut issues = Vec::new();
        for (locale, bundle) in &self.locales {
            for link in bundle_links(bundle) {
                let problem = if is_normalized_link(link) {
                    let rewritten = self.rewrites.rewrite(&link_to_source(link)).into_owned();
                    if is_normalized_source(&rewritten) {
                        continue;
                    }
                    LinkProblem::BadRewrite(rewritten)
                } else {
                    LinkProblem::Malformed
                };
                let issue = LinkIssue {
                    locale: locale.clone(),
                    link: link.to_owned(),
                    problem,
                };
                tracing::warn!(%issue, "Navigation link will not resolve");
                issues.push(issue);
            }
        }
        issues
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
