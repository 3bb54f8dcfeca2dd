//! Site-wide theme values passed through to the renderer.

use ppdocs_config::ThemeSettings;
use serde::Serialize;

/// Theme configuration shared by every locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Logo path.
    pub logo: String,
    /// Search integration.
    pub search: Search,
    /// Links to external profiles.
    pub social_links: Vec<SocialLink>,
    /// Page footer.
    pub footer: Footer,
}

/// Search provider selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Search {
    /// Provider name (`local` or `algolia`).
    pub provider: String,
}

/// Link to an external profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Icon name.
    pub icon: String,
    /// Target URL.
    pub link: String,
}

/// Page footer text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Message line.
    pub message: String,
    /// Copyright line.
    pub copyright: String,
}

impl From<&ThemeSettings> for ThemeConfig {
    fn from(settings: &ThemeSettings) -> Self {
        Self {
            logo: settings.logo.clone(),
            search: Search {
                provider: settings.search_provider.clone(),
            },
            social_links: settings
                .social_links
                .iter()
                .map(|social| SocialLink {
                    icon: social.icon.clone(),
                    link: social.link.clone(),
                })
                .collect(),
            footer: Footer {
                message: settings.footer_message.clone(),
                copyright: settings.footer_copyright.clone(),
            },
        }
    }
}
