//! Line-level data model shared by the classifier, the hint validator and the layout engine.

use serde::{Deserialize, Serialize};

/// One line of the input document paired with its 0-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    pub index: usize,
    pub text: String,
    pub is_blank: bool,
}

/// The closed set of semantic roles a résumé line can take.
///
/// Serialized as `snake_case`; the PascalCase variant names are accepted on input
/// because model-produced hints use both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    #[serde(alias = "Name")]
    Name,
    #[serde(alias = "Contact")]
    Contact,
    #[serde(alias = "SectionHeader")]
    SectionHeader,
    #[serde(alias = "JobTitle")]
    JobTitle,
    #[serde(alias = "JobDetail")]
    JobDetail,
    #[serde(alias = "Bullet")]
    Bullet,
    #[serde(alias = "SkillGroup")]
    SkillGroup,
    #[serde(alias = "PlainText")]
    PlainText,
    #[serde(alias = "Blank")]
    Blank,
}

impl LineRole {
    pub const ALL: [LineRole; 9] = [
        LineRole::Name,
        LineRole::Contact,
        LineRole::SectionHeader,
        LineRole::JobTitle,
        LineRole::JobDetail,
        LineRole::Bullet,
        LineRole::SkillGroup,
        LineRole::PlainText,
        LineRole::Blank,
    ];
}

/// A classified line ready for layout.
///
/// `line_span` is the number of raw lines this record consumed: 2 when the
/// classifier merged a following line into `secondary_text` or joined a split
/// masthead, 1 otherwise. A hint record that continues a line already claimed
/// by the previous record has a span of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub role: LineRole,
    pub primary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    pub source_index: usize,
    pub line_span: usize,
}

impl ClassifiedLine {
    pub fn new(role: LineRole, primary_text: impl Into<String>, source_index: usize) -> Self {
        Self {
            role,
            primary_text: primary_text.into(),
            secondary_text: None,
            source_index,
            line_span: 1,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>, span: usize) -> Self {
        self.secondary_text = Some(secondary.into());
        self.line_span = span;
        self
    }

    pub fn blank(source_index: usize) -> Self {
        Self::new(LineRole::Blank, String::new(), source_index)
    }
}

/// Splits a sanitized body on line breaks. Trailing whitespace is trimmed from each
/// line; leading indentation is kept for the classifier to inspect.
pub fn split_lines(text: &str) -> Vec<RawLine> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let text = line.trim_end().to_string();
            let is_blank = text.trim().is_empty();
            RawLine {
                index,
                text,
                is_blank,
            }
        })
        .collect()
}
