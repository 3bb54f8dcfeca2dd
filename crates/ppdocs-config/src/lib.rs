//! Settings for the Pingpong documentation site.
//!
//! Parses `ppdocs.toml` files with serde and provides auto-discovery of
//! the settings file in parent directories. Every section is optional; a
//! missing file yields the built-in defaults.
//!
//! Programmatic overrides can be applied during load via [`Overrides`].
//!
//! ```toml
//! [site]
//! title = "Pingpong"
//! hostname = "https://pingpong.example.com"
//!
//! [theme]
//! search_provider = "local"
//!
//! [[rewrites]]
//! pattern = ":path(.*).markdown"
//! template = ":path/index.md"
//!
//! [locales]
//! enabled = ["root"]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Settings filename to search for.
const CONFIG_FILENAME: &str = "ppdocs.toml";

/// Key of the default locale, served from the site root.
pub const DEFAULT_LOCALE: &str = "root";

/// Search providers understood by the site renderer.
const SEARCH_PROVIDERS: &[&str] = &["local", "algolia"];

/// Values that take precedence over the settings file.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override site title.
    pub title: Option<String>,
    /// Override sitemap hostname.
    pub hostname: Option<String>,
    /// Override clean URL generation.
    pub clean_urls: Option<bool>,
    /// Override the last-updated timestamp flag.
    pub last_updated: Option<bool>,
    /// Override the list of enabled locales.
    pub locales: Option<Vec<String>>,
}

/// Site settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide metadata.
    pub site: SiteSettings,
    /// Theme values passed through to the renderer.
    pub theme: ThemeSettings,
    /// Extra rewrite rules, appended after the built-in ones.
    pub rewrites: Vec<RewriteSettings>,
    /// Locale selection.
    pub locales: LocaleSettings,

    /// Path to the settings file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site-wide metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Site title.
    pub title: String,
    /// Site description used in the HTML `<meta>` tag.
    pub description: String,
    /// Hostname used for sitemap generation.
    pub hostname: String,
    /// Drop the `.html` suffix from generated URLs.
    pub clean_urls: bool,
    /// Show the last-updated timestamp on each page.
    pub last_updated: bool,
    /// Source paths excluded from the build (glob patterns).
    pub src_exclude: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Pingpong".to_owned(),
            description: "A reverse proxy and static file server built on Pingora".to_owned(),
            hostname: "https://pingpong.example.com".to_owned(),
            clean_urls: true,
            last_updated: true,
            src_exclude: vec!["README.md".to_owned()],
        }
    }
}

/// Theme settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Logo path, relative to the public directory.
    pub logo: String,
    /// Search provider (`local` or `algolia`).
    pub search_provider: String,
    /// Footer message line.
    pub footer_message: String,
    /// Footer copyright line.
    pub footer_copyright: String,
    /// Links to external profiles shown in the navigation bar.
    pub social_links: Vec<SocialLinkSettings>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            logo: "/logo.svg".to_owned(),
            search_provider: "local".to_owned(),
            footer_message: "Released under the MIT License.".to_owned(),
            footer_copyright: "Copyright © Pingpong contributors".to_owned(),
            social_links: Vec::new(),
        }
    }
}

/// A social link entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLinkSettings {
    /// Icon name (e.g. `github`).
    pub icon: String,
    /// Target URL.
    pub link: String,
}

/// A rewrite rule as written in the settings file.
///
/// The pattern grammar is checked when the rule set is built.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteSettings {
    /// Source path pattern.
    pub pattern: String,
    /// Output path template.
    pub template: String,
}

/// Locale selection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Locale keys to build, in display order.
    pub enabled: Vec<String>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            enabled: vec![DEFAULT_LOCALE.to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load settings from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ppdocs.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// Overrides are applied after loading, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting settings are invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse settings from a TOML string without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(title) = &overrides.title {
            self.site.title.clone_from(title);
        }
        if let Some(hostname) = &overrides.hostname {
            self.site.hostname.clone_from(hostname);
        }
        if let Some(clean_urls) = overrides.clean_urls {
            self.site.clean_urls = clean_urls;
        }
        if let Some(last_updated) = overrides.last_updated {
            self.site.last_updated = last_updated;
        }
        if let Some(locales) = &overrides.locales {
            self.locales.enabled.clone_from(locales);
        }
    }

    /// Search for the settings file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load settings from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded site settings");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically by [`Config::load`] and [`Config::from_toml`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_theme()?;
        self.validate_rewrites()?;
        self.validate_locales()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.hostname, "site.hostname")?;
        require_http_url(&self.site.hostname, "site.hostname")?;

        for pattern in &self.site.src_exclude {
            require_non_empty(pattern, "site.src_exclude")?;
        }

        Ok(())
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        if !SEARCH_PROVIDERS.contains(&self.theme.search_provider.as_str()) {
            return Err(ConfigError::Validation(format!(
                "theme.search_provider must be one of {}, got '{}'",
                SEARCH_PROVIDERS.join(", "),
                self.theme.search_provider
            )));
        }

        for social in &self.theme.social_links {
            require_non_empty(&social.icon, "theme.social_links.icon")?;
            require_http_url(&social.link, "theme.social_links.link")?;
        }

        Ok(())
    }

    fn validate_rewrites(&self) -> Result<(), ConfigError> {
        for rule in &self.rewrites {
            require_non_empty(&rule.pattern, "rewrites.pattern")?;
            require_non_empty(&rule.template, "rewrites.template")?;
        }
        Ok(())
    }

    fn validate_locales(&self) -> Result<(), ConfigError> {
        if self.locales.enabled.is_empty() {
            return Err(ConfigError::Validation(
                "locales.enabled must list at least one locale".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for key in &self.locales.enabled {
            require_non_empty(key, "locales.enabled")?;
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "locales.enabled contains duplicate locale '{key}'"
                )));
            }
        }

        Ok(())
    }
}
