//! Structuring hint: an externally produced pre-classification of the résumé lines.
//!
//! A hint replaces heuristic classification wholesale, but only after validation:
//! roles must come from the closed `LineRole` vocabulary, every record must be a
//! substring-preserving rendition of the input, and the records must consume every
//! non-blank input line exactly once, in order.
//! Any violation rejects the whole hint; callers fall back to `classify`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::line::{ClassifiedLine, LineRole, RawLine};
use crate::classify::patterns::strip_bullet_marker;
use crate::text::sanitize;

#[derive(Debug, Error, PartialEq)]
pub enum HintError {
    #[error("hint is not valid JSON for the line-record schema: {0}")]
    Json(String),

    #[error("hint payload must be a JSON array of line records")]
    NotAnArray,

    #[error("hint contains no line records")]
    Empty,

    #[error("record {index} does not appear in the input: {content:?}")]
    ContentMismatch { index: usize, content: String },

    #[error("record {index} has a {role:?} role but no content")]
    MissingContent { index: usize, role: LineRole },

    #[error("record {index} is out of line order or repeats consumed input: {content:?}")]
    OutOfOrder { index: usize, content: String },

    #[error("record {index} is blank but carries text")]
    BlankWithContent { index: usize },

    #[error("hint drops input content (first missing word: {word:?})")]
    DroppedContent { word: String },

    #[error("more than one Name record")]
    DuplicateName,

    #[error("Name record at position {index} is not the first non-blank record")]
    NameOutOfPlace { index: usize },
}

/// One record of the hint wire format: `{ "role": ..., "content": ..., "secondary": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintRecord {
    pub role: LineRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// A parsed (but not yet validated) structuring hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuringHint {
    pub records: Vec<HintRecord>,
}

impl StructuringHint {
    /// Parses a dynamic JSON payload. Anything other than an array of well-formed
    /// records (missing `role`, unknown role, wrong types) is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self, HintError> {
        if !value.is_array() {
            return Err(HintError::NotAnArray);
        }
        let records: Vec<HintRecord> =
            serde_json::from_value(value).map_err(|e| HintError::Json(e.to_string()))?;
        Ok(Self { records })
    }

    pub fn from_json_str(text: &str) -> Result<Self, HintError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| HintError::Json(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validates the hint against the sanitized input lines and converts it into
    /// classified lines.
    ///
    /// Records are matched against the non-blank lines in order. Each content or
    /// secondary part must sit at the current position of the current line (only
    /// punctuation or markers may be skipped) and every line must be consumed
    /// completely before the walk moves to the next one.
    pub fn apply(&self, raw_lines: &[RawLine]) -> Result<Vec<ClassifiedLine>, HintError> {
        let content_records: Vec<(usize, &HintRecord)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.role != LineRole::Blank)
            .collect();
        if content_records.is_empty() {
            return Err(HintError::Empty);
        }

        for (index, record) in self.records.iter().enumerate() {
            if record.role == LineRole::Blank
                && (!normalize(&record.content).is_empty()
                    || record.secondary.as_deref().is_some_and(|s| !normalize(s).is_empty()))
            {
                return Err(HintError::BlankWithContent { index });
            }
        }

        check_name_placement(&content_records)?;

        let source = normalize(
            &raw_lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        );
        for &(index, record) in &content_records {
            let content = normalize(&record.content);
            if content.is_empty() {
                return Err(HintError::MissingContent {
                    index,
                    role: record.role,
                });
            }
            for part in std::iter::once(&content).chain(record.secondary.as_ref()) {
                let part = normalize(part);
                if !source.contains(&part) {
                    return Err(HintError::ContentMismatch {
                        index,
                        content: part,
                    });
                }
            }
        }

        let lines: Vec<(usize, String)> = raw_lines
            .iter()
            .filter(|l| !l.is_blank)
            .map(|l| (l.index, normalize(&l.text)))
            .collect();
        let mut walk = CoverageWalk::new(&lines);
        let mut out: Vec<ClassifiedLine> = Vec::with_capacity(self.records.len());

        for (index, record) in self.records.iter().enumerate() {
            if record.role == LineRole::Blank {
                let previous_is_blank = out.last().map_or(true, |l| l.role == LineRole::Blank);
                if !previous_is_blank {
                    out.push(ClassifiedLine::blank(walk.source_index() + 1));
                }
                continue;
            }

            let content = normalize(&record.content);
            let start = walk.attributed;
            walk.consume(index, &content)?;
            let source_index = walk.source_index();

            let primary = if record.role == LineRole::Bullet {
                strip_bullet_marker(&content).unwrap_or(&content).to_string()
            } else {
                content
            };
            let mut line = ClassifiedLine::new(record.role, primary, source_index);
            if let Some(secondary) = record.secondary.as_deref().map(normalize) {
                if !secondary.is_empty() {
                    walk.consume(index, &secondary)?;
                    line.secondary_text = Some(secondary);
                }
            }
            line.line_span = walk.attributed - start;
            out.push(line);
        }

        walk.finish()?;

        while out.last().is_some_and(|l| l.role == LineRole::Blank) {
            out.pop();
        }
        Ok(out)
    }
}

/// Cursor over the normalized non-blank input lines.
///
/// `attributed` counts the lines already claimed by a record; a record's
/// `line_span` is the number of lines it claimed, so records sharing a line
/// with their predecessor get a span of 0.
struct CoverageWalk<'a> {
    lines: &'a [(usize, String)],
    line: usize,
    offset: usize,
    attributed: usize,
}

impl<'a> CoverageWalk<'a> {
    fn new(lines: &'a [(usize, String)]) -> Self {
        Self {
            lines,
            line: 0,
            offset: 0,
            attributed: 0,
        }
    }

    fn rest(&self) -> &'a str {
        self.lines
            .get(self.line)
            .map_or("", |(_, text)| &text[self.offset..])
    }

    fn source_index(&self) -> usize {
        self.lines.get(self.line).map_or(0, |(i, _)| *i)
    }

    fn consume(&mut self, index: usize, part: &str) -> Result<(), HintError> {
        loop {
            let rest = self.rest();
            if let Some(pos) = rest.find(part) {
                if !has_words(&rest[..pos]) {
                    if self.attributed == self.line {
                        self.attributed += 1;
                    }
                    self.offset += pos + part.len();
                    return Ok(());
                }
            }
            // An unclaimed line is dropped even when it holds no words.
            if has_words(rest) || self.attributed <= self.line {
                return Err(dropped(rest));
            }
            if self.line + 1 >= self.lines.len() {
                return Err(HintError::OutOfOrder {
                    index,
                    content: part.to_string(),
                });
            }
            self.line += 1;
            self.offset = 0;
        }
    }

    fn finish(&self) -> Result<(), HintError> {
        let rest = self.rest();
        if has_words(rest) {
            return Err(dropped(rest));
        }
        match self.lines.get(self.line + 1) {
            Some((_, text)) => Err(dropped(text)),
            None => Ok(()),
        }
    }
}

fn has_words(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

fn dropped(text: &str) -> HintError {
    HintError::DroppedContent {
        word: words(text).into_iter().next().unwrap_or_else(|| text.to_string()),
    }
}

fn check_name_placement(records: &[(usize, &HintRecord)]) -> Result<(), HintError> {
    let names: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, (_, r))| r.role == LineRole::Name)
        .map(|(pos, _)| pos)
        .collect();

    match names.as_slice() {
        [] | [0] => Ok(()),
        [pos] => Err(HintError::NameOutOfPlace {
            index: records[*pos].0,
        }),
        _ => Err(HintError::DuplicateName),
    }
}

/// Sanitized, whitespace-collapsed form used for substring comparison.
fn normalize(text: &str) -> String {
    sanitize(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
