//! Site configuration for the Pingpong documentation.
//!
//! This crate provides:
//! - [`RewriteRuleSet`]: maps source markdown paths to published paths
//! - [`Locales`]: per-locale navigation bar and sidebar construction
//! - [`SiteConfig`]: the object handed to the site renderer at startup
//!
//! Everything here is built once from fixed data plus the optional
//! `ppdocs.toml` settings, with no I/O.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ppdocs_config::Config;
//! use ppdocs_site::{Locales, SiteConfig};
//!
//! let locales = Locales::builtin();
//! let nav = locales.build_nav("root")?;
//! assert_eq!(nav[0].text, "Guide");
//!
//! let sidebar = locales.build_sidebar("root")?;
//! assert!(sidebar.get("/configuration/").is_some());
//!
//! let site = SiteConfig::build(&Config::default())?;
//! let json = site.to_json()?;
//! assert!(json.contains("\"rewrites\""));
//! # Ok(())
//! # }
//! ```

mod error;
mod head;
mod locale;
mod nav;
pub mod path;
mod rewrite;
mod sidebar;
mod site_config;
mod theme;

pub use error::SiteError;
pub use head::HeadTag;
pub use locale::{
    English, EnglishGroups, LocaleBundle, LocaleNavigation, LocaleTheme, Locales, Section,
    SectionGroup,
};
pub use nav::{ActiveMatch, NavItem};
pub use rewrite::{PathTemplate, RewriteError, RewriteRule, RewriteRuleSet};
pub use sidebar::{Sidebar, SidebarGroup, SidebarLeaf, SidebarTree};
pub use site_config::{LinkIssue, LinkProblem, SiteConfig, Sitemap};
pub use theme::{Footer, Search, SocialLink, ThemeConfig};
