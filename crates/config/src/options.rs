use super::frontmatter::string_or_list;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Kramdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_highlighter: Option<String>,
    pub syntax_highlighter_opts: SyntaxHighlighterOpts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote_backlink_inline: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct SyntaxHighlighterOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    pub span: LineNumbers,
    pub block: LineNumbers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct LineNumbers {
    pub line_numbers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
}

/// Options for the HTML compressor layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct CompressHtml {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub clippings: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub comments: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub endings: Option<Vec<String>>,
    pub profile: bool,
    pub blanklines: bool,
    pub ignore: CompressIgnore,
}

impl CompressHtml {
    /// Compression is skipped for the listed build environments.
    pub fn is_enabled_for(&self, env: &str) -> bool {
        !self.ignore.envs.iter().any(|e| e == env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct CompressIgnore {
    #[serde(deserialize_with = "envs")]
    pub envs: Vec<String>,
}

fn envs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    string_or_list(deserializer).map(Option::unwrap_or_default)
}
