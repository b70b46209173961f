use std::collections::BTreeMap;
use std::fmt;

use super::*;

/// Settings attached to a content item, either declared in its own header or supplied by a
/// `defaults` scope.
///
/// Every typed key is optional so that "unset" stays distinguishable from "set to `false`"
/// when layers are merged.
#[derive(Debug, PartialEq, Default, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<Permalink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub categories: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_yaml::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(flatten)]
    pub data: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Layer `self` over `other`: every key `self` sets wins, the rest comes from `other`.
    pub fn merge(self, other: &Self) -> Self {
        let Self {
            layout,
            permalink,
            title,
            author,
            date,
            categories,
            tags,
            image,
            comments,
            toc,
            math,
            mermaid,
            pin,
            hidden,
            data,
        } = self;
        Self {
            layout: layout.or_else(|| other.layout.clone()),
            permalink: permalink.or_else(|| other.permalink.clone()),
            title: title.or_else(|| other.title.clone()),
            author: author.or_else(|| other.author.clone()),
            date: date.or_else(|| other.date.clone()),
            categories: categories.or_else(|| other.categories.clone()),
            tags: tags.or_else(|| other.tags.clone()),
            image: image.or_else(|| other.image.clone()),
            comments: comments.or(other.comments),
            toc: toc.or(other.toc),
            math: math.or(other.math),
            mermaid: mermaid.or(other.mermaid),
            pin: pin.or(other.pin),
            hidden: hidden.or(other.hidden),
            data: merge_objects(data, &other.data),
        }
    }

    /// Keys that `self` and `other` both set to different values.
    pub fn conflicting_keys(&self, other: &Self) -> Vec<String> {
        let ours = to_mapping(self);
        let theirs = to_mapping(other);
        ours.into_iter()
            .filter(|(key, value)| theirs.get(key).is_some_and(|v| v != value))
            .map(|(key, _)| key)
            .collect()
    }
}

fn to_mapping(front: &Frontmatter) -> BTreeMap<String, serde_yaml::Value> {
    serde_yaml::to_value(front)
        .ok()
        .and_then(|v| serde_yaml::from_value(v).ok())
        .unwrap_or_default()
}

impl fmt::Display for Frontmatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        let subset = converted
            .strip_prefix("---")
            .unwrap_or(converted.as_str())
            .trim();
        let converted = if subset == "{}" { "" } else { subset };
        if converted.is_empty() {
            Ok(())
        } else {
            write!(f, "{converted}")
        }
    }
}

/// Shallow merge of free-form keys
fn merge_objects(
    mut primary: BTreeMap<String, serde_yaml::Value>,
    secondary: &BTreeMap<String, serde_yaml::Value>,
) -> BTreeMap<String, serde_yaml::Value> {
    for (key, value) in secondary {
        primary
            .entry(key.to_owned())
            .or_insert_with(|| value.clone());
    }
    primary
}

/// Jekyll accepts `tags: a b` as well as `tags: [a, b]`; numbers and booleans in either form
/// are taken as their text.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_yaml::Value> = serde::Deserialize::deserialize(deserializer)?;
    let list = match value {
        None | Some(serde_yaml::Value::Null) => return Ok(None),
        Some(serde_yaml::Value::String(s)) => s.split_whitespace().map(str::to_owned).collect(),
        Some(serde_yaml::Value::Sequence(seq)) => seq
            .iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| serde::de::Error::custom("expected a list of words"))?,
        Some(other) => vec![
            scalar_to_string(&other)
                .ok_or_else(|| serde::de::Error::custom("expected a word or a list of words"))?,
        ],
    };
    Ok(Some(list))
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_empty() {
        let front = Frontmatter::empty();
        assert_eq!(&front.to_string(), "");
    }

    #[test]
    fn display_layout() {
        let front = Frontmatter {
            layout: Some("post".into()),
            ..Default::default()
        };
        assert_eq!(&front.to_string(), "layout: post");
    }

    #[test]
    fn merge_prefers_self() {
        let primary = Frontmatter {
            comments: Some(false),
            ..Default::default()
        };
        let secondary = Frontmatter {
            layout: Some("post".into()),
            comments: Some(true),
            ..Default::default()
        };
        let merged = primary.merge(&secondary);
        assert_eq!(merged.layout.as_deref(), Some("post"));
        assert_eq!(merged.comments, Some(false));
    }

    #[test]
    fn merge_keeps_explicit_false() {
        let primary = Frontmatter {
            toc: Some(false),
            ..Default::default()
        };
        let secondary = Frontmatter {
            toc: Some(true),
            ..Default::default()
        };
        assert_eq!(primary.merge(&secondary).toc, Some(false));
    }

    #[test]
    fn merge_data_is_shallow() {
        let primary: Frontmatter = serde_yaml::from_str("sidebar: left").unwrap();
        let secondary: Frontmatter = serde_yaml::from_str("sidebar: right\norder: 3").unwrap();
        let merged = primary.merge(&secondary);
        assert_eq!(merged.data["sidebar"], serde_yaml::Value::from("left"));
        assert_eq!(merged.data["order"], serde_yaml::Value::from(3));
    }

    #[test]
    fn parse_tags_from_string() {
        let front: Frontmatter = serde_yaml::from_str("tags: flutter dart").unwrap();
        assert_eq!(
            front.tags,
            Some(vec!["flutter".to_owned(), "dart".to_owned()])
        );
    }

    #[test]
    fn parse_categories_from_list() {
        let front: Frontmatter =
            serde_yaml::from_str("categories: [Flutter, Testing]").unwrap();
        assert_eq!(
            front.categories,
            Some(vec!["Flutter".to_owned(), "Testing".to_owned()])
        );
    }

    #[test]
    fn parse_tags_with_numbers() {
        let front: Frontmatter = serde_yaml::from_str("tags: [dart, 3, true]").unwrap();
        assert_eq!(
            front.tags,
            Some(vec!["dart".to_owned(), "3".to_owned(), "true".to_owned()])
        );
    }

    #[test]
    fn parse_category_number() {
        let front: Frontmatter = serde_yaml::from_str("categories: 2023").unwrap();
        assert_eq!(front.categories, Some(vec!["2023".to_owned()]));
    }

    #[test]
    fn parse_tags_nested_list_is_rejected() {
        let front: Result<Frontmatter, _> = serde_yaml::from_str("tags: [[a, b]]");
        assert!(front.is_err());
    }

    #[test]
    fn parse_unknown_keys_into_data() {
        let front: Frontmatter = serde_yaml::from_str("icon: fas fa-info\norder: 4").unwrap();
        assert_eq!(front.data.len(), 2);
        assert!(front.layout.is_none());
    }

    #[test]
    fn conflicting_keys_reports_differences_only() {
        let a: Frontmatter = serde_yaml::from_str("layout: post\ncomments: true").unwrap();
        let b: Frontmatter = serde_yaml::from_str("layout: post\ncomments: false").unwrap();
        assert_eq!(a.conflicting_keys(&b), vec!["comments".to_owned()]);
    }
}
