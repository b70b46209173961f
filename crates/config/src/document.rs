use std::fmt;

use crate::Frontmatter;
use crate::Result;
use crate::Status;

/// A content file split into its header and body.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Document {
    front: Frontmatter,
    content: String,
}

impl Document {
    pub fn new(front: Frontmatter, content: String) -> Self {
        Self { front, content }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (front, content) = split_document(content);
        let front = front
            .map(parse_frontmatter)
            .transpose()?
            .unwrap_or_default();
        let content = content.to_owned();
        Ok(Self { front, content })
    }

    pub fn front(&self) -> &Frontmatter {
        &self.front
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (Frontmatter, String) {
        let Self { front, content } = self;
        (front, content)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let front = self.front.to_string();
        if front.is_empty() {
            write!(f, "{}", self.content)
        } else {
            write!(f, "---\n{}\n---\n{}", front, self.content)
        }
    }
}

fn parse_frontmatter(front: &str) -> Result<Frontmatter> {
    let front: Frontmatter = serde_yaml::from_str(front)
        .map_err(|e| Status::new("Failed to parse frontmatter").with_source(e))?;
    Ok(front)
}

static FRONT_MATTER: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::RegexBuilder::new(r"\A---\s*\r?\n([\s\S]*\n)?---\s*\r?\n(.*)")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

fn split_document(content: &str) -> (Option<&str>, &str) {
    if let Some(captures) = FRONT_MATTER.captures(content) {
        let front_split = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let content_split = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        if front_split.is_empty() {
            (None, content_split)
        } else {
            (Some(front_split), content_split)
        }
    } else {
        (None, content)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_document_empty() {
        let input = "";
        let (front, content) = split_document(input);
        assert!(front.is_none());
        assert_eq!(content, "");
    }

    #[test]
    fn split_document_no_front_matter() {
        let input = "Body";
        let (front, content) = split_document(input);
        assert!(front.is_none());
        assert_eq!(content, "Body");
    }

    #[test]
    fn split_document_empty_front_matter() {
        let input = "---\n---\nBody";
        let (front, content) = split_document(input);
        assert!(front.is_none());
        assert_eq!(content, "Body");
    }

    #[test]
    fn split_document_front_matter_and_body() {
        let input = "---\ntitle: Hello\n---\nbody";
        let (front, content) = split_document(input);
        assert_eq!(front.unwrap(), "title: Hello\n");
        assert_eq!(content, "body");
    }

    #[test]
    fn split_document_no_new_line_after_front_matter() {
        let input = "invalid_front_matter---\nbody";
        let (front, content) = split_document(input);
        assert!(front.is_none());
        assert_eq!(content, input);
    }

    #[test]
    fn parse_post_header() {
        let input = "---\ntitle: Flutter Form Validation\nauthor: jane\ndate: 2023-01-07 10:00:00 +0800\ncategories: [Flutter]\ntags: [forms, validation]\nimage:\n  path: /assets/img/cover.png\n---\nBody\n";
        let doc = Document::parse(input).unwrap();
        let front = doc.front();
        assert_eq!(front.title.as_deref(), Some("Flutter Form Validation"));
        assert_eq!(front.author.as_deref(), Some("jane"));
        assert_eq!(front.date.as_deref(), Some("2023-01-07 10:00:00 +0800"));
        assert_eq!(front.categories, Some(vec!["Flutter".to_owned()]));
        assert!(front.image.is_some());
        assert_eq!(doc.content(), "Body\n");
    }

    #[test]
    fn parse_header_with_numeric_tag() {
        let doc = Document::parse("---\ntags: [flutter, 3]\n---\nbody").unwrap();
        assert_eq!(
            doc.front().tags,
            Some(vec!["flutter".to_owned(), "3".to_owned()])
        );
        assert_eq!(doc.content(), "body");
    }

    #[test]
    fn parse_invalid_header() {
        let input = "---\ntitle: [unclosed\n---\nBody";
        assert!(Document::parse(input).is_err());
    }

    #[test]
    fn display_empty_front() {
        let doc = Document::new(Frontmatter::empty(), "body".to_owned());
        assert_eq!(&doc.to_string(), "body");
    }

    #[test]
    fn display_both() {
        let front = Frontmatter {
            layout: Some("post".to_owned()),
            ..Default::default()
        };
        let doc = Document::new(front, "body".to_owned());
        assert_eq!(&doc.to_string(), "---\nlayout: post\n---\nbody");
    }
}
