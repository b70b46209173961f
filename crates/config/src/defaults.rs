use std::collections::BTreeMap;

use super::*;

/// Which content items a [`DefaultRule`] applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Scope {
    /// Path prefix relative to the source root; empty matches everything.
    pub path: String,
    /// Collection filter.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Scope {
    pub fn new(path: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            path: path.into(),
            kind: kind.map(str::to_owned),
        }
    }

    pub fn is_global(&self) -> bool {
        self.segments().next().is_none() && self.kind.is_none()
    }

    /// Prefix match is per path component: `_drafts` does not cover `_drafts2/x.md`.
    pub fn matches(&self, item: &ContentItem) -> bool {
        let mut item_segments = segments(item.rel_path.as_str());
        let path_matches = self
            .segments()
            .all(|segment| item_segments.next() == Some(segment));
        let kind_matches = self.kind.as_deref().is_none_or(|kind| item.is_type(kind));
        path_matches && kind_matches
    }

    pub(crate) fn segments(&self) -> impl Iterator<Item = &str> {
        segments(&self.path)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
}

/// One `defaults:` entry.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct DefaultRule {
    pub scope: Scope,
    pub values: Frontmatter,
}

impl DefaultRule {
    pub fn new(scope: Scope, values: Frontmatter) -> Self {
        Self { scope, values }
    }
}

/// The ordered `defaults:` list.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Defaults {
    rules: Vec<DefaultRule>,
}

impl Defaults {
    pub fn new(rules: Vec<DefaultRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[DefaultRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Effective defaults for `item`: every matching rule is folded in declaration order,
    /// a later rule winning for keys both set.
    pub fn resolve(&self, item: &ContentItem) -> Frontmatter {
        self.rules
            .iter()
            .filter(|rule| rule.scope.matches(item))
            .fold(Frontmatter::empty(), |effective, rule| {
                rule.values.clone().merge(&effective)
            })
    }

    pub fn resolve_all<'i>(
        &self,
        items: impl IntoIterator<Item = &'i ContentItem>,
    ) -> BTreeMap<relative_path::RelativePathBuf, Frontmatter> {
        items
            .into_iter()
            .map(|item| (item.rel_path.clone(), self.resolve(item)))
            .collect()
    }

    /// Indexes of rules whose scope selects none of `items`.
    pub fn unmatched<'i>(&self, items: impl IntoIterator<Item = &'i ContentItem>) -> Vec<usize> {
        let mut matched = vec![false; self.rules.len()];
        for item in items {
            for (idx, rule) in self.rules.iter().enumerate() {
                if !matched[idx] && rule.scope.matches(item) {
                    matched[idx] = true;
                }
            }
        }
        matched
            .into_iter()
            .enumerate()
            .filter(|(_, hit)| !hit)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Pairs of rules with an identical scope that set a key to different values.
    ///
    /// The later rule wins; this only exists so the overlap can be reported.
    pub fn conflicts(&self) -> Vec<ScopeConflict> {
        let mut conflicts = Vec::new();
        for (later_idx, later) in self.rules.iter().enumerate() {
            for (earlier_idx, earlier) in self.rules[..later_idx].iter().enumerate() {
                if !same_scope(&earlier.scope, &later.scope) {
                    continue;
                }
                let keys = later.values.conflicting_keys(&earlier.values);
                if !keys.is_empty() {
                    conflicts.push(ScopeConflict {
                        earlier: earlier_idx,
                        later: later_idx,
                        keys,
                    });
                }
            }
        }
        conflicts
    }
}

fn same_scope(a: &Scope, b: &Scope) -> bool {
    a.kind == b.kind && a.segments().eq(b.segments())
}

impl From<Vec<DefaultRule>> for Defaults {
    fn from(rules: Vec<DefaultRule>) -> Self {
        Self::new(rules)
    }
}

/// Two `defaults` entries with the same scope disagreeing on `keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScopeConflict {
    pub earlier: usize,
    pub later: usize,
    pub keys: Vec<String>,
}
