use super::*;

static LOCALE_TAG: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").unwrap()
});

/// A configuration problem found before any content is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("`url`: {value:?} is not an absolute origin like `https://example.com`")]
    InvalidUrl { value: String },
    #[error("`lang`: {value:?} is not a locale tag")]
    InvalidLang { value: String },
    #[error("`paginate`: page size must be a positive integer, got {value}")]
    NonPositivePageSize { value: i64 },
    #[error("`paginate_path`: {value:?} must contain `:num`")]
    InvalidPaginatePath { value: String },
    #[error(
        "`comments.active`: provider `{provider}` has no `comments.{provider}` settings block"
    )]
    UndefinedCommentProvider { provider: String },
    #[error("`{setting}`: {source}")]
    MalformedPermalink {
        setting: String,
        #[source]
        source: PermalinkError,
    },
    #[error("`{setting}`: type `{kind}` does not name a collection")]
    UnknownScopeType { setting: String, kind: String },
    #[error("`{setting}`: path {path:?} must be relative to the source directory")]
    InvalidScopePath { setting: String, path: String },
}

impl ValidationError {
    /// The setting the error is about, e.g. `defaults[1].scope.type`.
    pub fn setting(&self) -> &str {
        match self {
            Self::InvalidUrl { .. } => "url",
            Self::InvalidLang { .. } => "lang",
            Self::NonPositivePageSize { .. } => "paginate",
            Self::InvalidPaginatePath { .. } => "paginate_path",
            Self::UndefinedCommentProvider { .. } => "comments.active",
            Self::MalformedPermalink { setting, .. }
            | Self::UnknownScopeType { setting, .. }
            | Self::InvalidScopePath { setting, .. } => setting.as_str(),
        }
    }
}

impl Config {
    /// Check every cross-setting rule, stopping at the first violation.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.validate_identity()?;
        self.validate_pagination()?;
        self.validate_comments()?;
        self.validate_permalinks()?;
        self.validate_scopes()?;
        Ok(())
    }

    /// Page size as a count, once validated.
    pub fn per_page(&self) -> std::result::Result<std::num::NonZeroUsize, ValidationError> {
        usize::try_from(self.paginate)
            .ok()
            .and_then(std::num::NonZeroUsize::new)
            .ok_or(ValidationError::NonPositivePageSize {
                value: self.paginate,
            })
    }

    fn validate_identity(&self) -> std::result::Result<(), ValidationError> {
        if let Some(value) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            if !is_absolute_origin(value) {
                return Err(ValidationError::InvalidUrl {
                    value: value.to_owned(),
                });
            }
        }
        if !LOCALE_TAG.is_match(&self.lang) {
            return Err(ValidationError::InvalidLang {
                value: self.lang.clone(),
            });
        }
        Ok(())
    }

    fn validate_pagination(&self) -> std::result::Result<(), ValidationError> {
        self.per_page()?;
        if !self.paginate_path.contains(":num") {
            return Err(ValidationError::InvalidPaginatePath {
                value: self.paginate_path.clone(),
            });
        }
        Ok(())
    }

    fn validate_comments(&self) -> std::result::Result<(), ValidationError> {
        if let Some(provider) = self.comments.active_provider() {
            if self.comments.provider_settings(provider).is_none() {
                return Err(ValidationError::UndefinedCommentProvider {
                    provider: provider.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn validate_permalinks(&self) -> std::result::Result<(), ValidationError> {
        let site = self
            .permalink
            .iter()
            .map(|p| ("permalink".to_owned(), p));
        let collections = self.collections.iter().filter_map(|(name, c)| {
            c.permalink
                .as_ref()
                .map(|p| (format!("collections.{name}.permalink"), p))
        });
        let defaults = self
            .defaults
            .rules()
            .iter()
            .enumerate()
            .filter_map(|(i, rule)| {
                rule.values
                    .permalink
                    .as_ref()
                    .map(|p| (format!("defaults[{i}].values.permalink"), p))
            });
        for (setting, permalink) in site.chain(collections).chain(defaults) {
            permalink
                .template()
                .map_err(|source| ValidationError::MalformedPermalink { setting, source })?;
        }
        Ok(())
    }

    fn validate_scopes(&self) -> std::result::Result<(), ValidationError> {
        for (i, rule) in self.defaults.rules().iter().enumerate() {
            let scope = &rule.scope;
            let escapes = scope.path.starts_with('/')
                || scope.path.starts_with('\\')
                || scope.segments().any(|s| s == "..");
            if escapes {
                return Err(ValidationError::InvalidScopePath {
                    setting: format!("defaults[{i}].scope.path"),
                    path: scope.path.clone(),
                });
            }
            if let Some(kind) = scope.kind.as_deref() {
                if !self.collection_names().any(|name| name == kind) {
                    return Err(ValidationError::UnknownScopeType {
                        setting: format!("defaults[{i}].scope.type"),
                        kind: kind.to_owned(),
                    });
                }
            }
        }

        for conflict in self.defaults.conflicts() {
            log::warn!(
                "`defaults[{}]` and `defaults[{}]` share a scope and disagree on {}; `defaults[{}]` wins",
                conflict.earlier,
                conflict.later,
                conflict.keys.join(", "),
                conflict.later
            );
        }
        Ok(())
    }
}

fn is_absolute_origin(value: &str) -> bool {
    let Ok(url) = url::Url::parse(value) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| !h.is_empty())
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
}
