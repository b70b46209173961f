/// A `provider: {username: ...}` account entry, e.g. `github` or `twitter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl Social {
    /// The first profile link is credited as the copyright owner.
    pub fn copyright_owner(&self) -> Option<&str> {
        self.links.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// How the theme picks between light and dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Follow the visitor's system preference and offer a manual toggle.
    FollowSystem,
    Fixed(ThemeMode),
}

impl ColorScheme {
    pub fn from_theme_mode(mode: Option<ThemeMode>) -> Self {
        mode.map_or(Self::FollowSystem, Self::Fixed)
    }

    pub fn offers_toggle(self) -> bool {
        matches!(self, Self::FollowSystem)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn copyright_owner_is_first_link() {
        let social = Social {
            links: vec![
                "https://github.com/someone".to_owned(),
                "https://twitter.com/someone".to_owned(),
            ],
            ..Default::default()
        };
        assert_eq!(social.copyright_owner(), Some("https://github.com/someone"));
    }

    #[test]
    fn copyright_owner_without_links() {
        assert_eq!(Social::default().copyright_owner(), None);
    }

    #[test]
    fn unset_theme_mode_follows_system() {
        let scheme = ColorScheme::from_theme_mode(None);
        assert_eq!(scheme, ColorScheme::FollowSystem);
        assert!(scheme.offers_toggle());
    }

    #[test]
    fn fixed_theme_mode_has_no_toggle() {
        let scheme = ColorScheme::from_theme_mode(Some(ThemeMode::Dark));
        assert_eq!(scheme, ColorScheme::Fixed(ThemeMode::Dark));
        assert!(!scheme.offers_toggle());
    }
}
