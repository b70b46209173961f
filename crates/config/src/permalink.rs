use std::borrow::Cow;
use std::fmt;

/// Placeholders a permalink template may reference.
pub const PLACEHOLDERS: &[&str] = &[
    "year",
    "month",
    "i_month",
    "day",
    "i_day",
    "short_year",
    "y_day",
    "title",
    "slug",
    "name",
    "categories",
    "collection",
    "path",
    "output_ext",
    "num",
];

static PLACEHOLDER: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r":([a-z_]+)").unwrap());

/// A permalink template as written in the configuration or a header.
///
/// Parsing never fails so a bad template can be reported together with the setting that
/// declared it; see [`Permalink::template`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Permalink(String);

impl Permalink {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn style(&self) -> Option<PermalinkStyle> {
        PermalinkStyle::from_name(self.as_str())
    }

    /// The explicit template, with built-in styles expanded.
    pub fn template(&self) -> Result<Cow<'_, str>, PermalinkError> {
        if let Some(style) = self.style() {
            return Ok(Cow::Borrowed(style.template()));
        }

        let value = self.as_str();
        if value.is_empty() {
            return Err(PermalinkError::Empty);
        }
        if !value.starts_with('/') {
            return Err(PermalinkError::NotAbsolute(value.to_owned()));
        }
        if let Some(unknown) = placeholders(value).find(|p| !PLACEHOLDERS.contains(p)) {
            return Err(PermalinkError::UnknownPlaceholder(unknown.to_owned()));
        }
        Ok(Cow::Borrowed(value))
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Permalink {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Permalink {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Named permalink shorthands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PermalinkStyle {
    Date,
    Pretty,
    Ordinal,
    None,
}

impl PermalinkStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "pretty" => Some(Self::Pretty),
            "ordinal" => Some(Self::Ordinal),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Self::Date => "/:categories/:year/:month/:day/:title:output_ext",
            Self::Pretty => "/:categories/:year/:month/:day/:title/",
            Self::Ordinal => "/:categories/:year/:y_day/:title:output_ext",
            Self::None => "/:categories/:title:output_ext",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PermalinkError {
    #[error("permalink template is empty")]
    Empty,
    #[error("permalink {0:?} must start with `/` or name a style (date, pretty, ordinal, none)")]
    NotAbsolute(String),
    #[error("permalink placeholder `:{0}` is not recognized")]
    UnknownPlaceholder(String),
}

/// Names of the `:placeholders` referenced by `template`, in order.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Substitute every `:placeholder` in `template` using `lookup`.
///
/// Unresolved placeholders become empty.
pub fn substitute<'v, F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<Cow<'v, str>>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            lookup(&caps[1]).map(Cow::into_owned).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn template_style_alias() {
        let permalink = Permalink::from("pretty");
        assert_eq!(
            permalink.template().unwrap(),
            "/:categories/:year/:month/:day/:title/"
        );
    }

    #[test]
    fn template_explicit() {
        let permalink = Permalink::from("/posts/:title/");
        assert_eq!(permalink.template().unwrap(), "/posts/:title/");
    }

    #[test]
    fn template_relative_is_malformed() {
        let permalink = Permalink::from("posts/:title/");
        assert_eq!(
            permalink.template(),
            Err(PermalinkError::NotAbsolute("posts/:title/".to_owned()))
        );
    }

    #[test]
    fn template_unknown_placeholder_is_malformed() {
        let permalink = Permalink::from("/posts/:titel/");
        assert_eq!(
            permalink.template(),
            Err(PermalinkError::UnknownPlaceholder("titel".to_owned()))
        );
    }

    #[test]
    fn template_empty_is_malformed() {
        assert_eq!(Permalink::from("").template(), Err(PermalinkError::Empty));
    }

    #[test]
    fn placeholders_adjacent() {
        let found: Vec<_> = placeholders("/:categories/:title:output_ext").collect();
        assert_eq!(found, vec!["categories", "title", "output_ext"]);
    }

    #[test]
    fn substitute_blank_unknown() {
        let actual = substitute("/:collection/:title/", |name| match name {
            "title" => Some(Cow::Borrowed("about")),
            _ => None,
        });
        assert_eq!(actual, "//about/");
    }
}
