use std::collections::BTreeMap;

/// `comments:` block: the selected provider plus one settings block per provider.
///
/// ```yaml
/// comments:
///   active: disqus
///   disqus:
///     shortname: my-blog
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Comments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(flatten)]
    pub providers: BTreeMap<String, serde_yaml::Value>,
}

impl Comments {
    /// The selected provider; blank means comments are disabled.
    pub fn active_provider(&self) -> Option<&str> {
        self.active
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Settings for `provider`, if any of them is actually set.
    pub fn provider_settings(&self, provider: &str) -> Option<&serde_yaml::Mapping> {
        self.providers
            .get(provider)
            .and_then(serde_yaml::Value::as_mapping)
            .filter(|m| m.values().any(|v| !v.is_null()))
    }
}
