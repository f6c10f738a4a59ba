//! Section Tracker: canonical heading vocabulary and the single-pass section state.

use serde::{Deserialize, Serialize};

/// Canonical résumé sections. Synonyms in the heading vocabulary fold onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
    Publications,
    Languages,
    Volunteer,
    Interests,
    References,
}

impl Section {
    /// Sections whose undated short lines may be company names and whose dated lines
    /// are job titles even without a separator.
    pub fn is_experience_family(self) -> bool {
        matches!(self, Section::Experience | Section::Volunteer)
    }

    pub fn is_skills(self) -> bool {
        matches!(self, Section::Skills)
    }
}

/// Headings longer than this are never treated as section headers.
const MAX_HEADING_CHARS: usize = 40;

/// Closed heading vocabulary, already normalized (lowercase, `&` spelled `and`).
const HEADING_VOCABULARY: &[(&str, Section)] = &[
    ("summary", Section::Summary),
    ("professional summary", Section::Summary),
    ("career summary", Section::Summary),
    ("executive summary", Section::Summary),
    ("summary of qualifications", Section::Summary),
    ("profile", Section::Summary),
    ("professional profile", Section::Summary),
    ("about", Section::Summary),
    ("about me", Section::Summary),
    ("objective", Section::Summary),
    ("career objective", Section::Summary),
    ("experience", Section::Experience),
    ("work experience", Section::Experience),
    ("professional experience", Section::Experience),
    ("relevant experience", Section::Experience),
    ("work history", Section::Experience),
    ("employment", Section::Experience),
    ("employment history", Section::Experience),
    ("career history", Section::Experience),
    ("professional background", Section::Experience),
    ("education", Section::Education),
    ("education and training", Section::Education),
    ("academic background", Section::Education),
    ("academic history", Section::Education),
    ("skills", Section::Skills),
    ("technical skills", Section::Skills),
    ("key skills", Section::Skills),
    ("core skills", Section::Skills),
    ("core competencies", Section::Skills),
    ("competencies", Section::Skills),
    ("skills and abilities", Section::Skills),
    ("skills and expertise", Section::Skills),
    ("technologies", Section::Skills),
    ("tech stack", Section::Skills),
    ("tools and technologies", Section::Skills),
    ("projects", Section::Projects),
    ("personal projects", Section::Projects),
    ("key projects", Section::Projects),
    ("selected projects", Section::Projects),
    ("side projects", Section::Projects),
    ("certifications", Section::Certifications),
    ("certificates", Section::Certifications),
    ("licenses", Section::Certifications),
    ("licenses and certifications", Section::Certifications),
    ("certifications and licenses", Section::Certifications),
    ("awards", Section::Awards),
    ("honors", Section::Awards),
    ("honours", Section::Awards),
    ("achievements", Section::Awards),
    ("awards and honors", Section::Awards),
    ("honors and awards", Section::Awards),
    ("publications", Section::Publications),
    ("papers", Section::Publications),
    ("languages", Section::Languages),
    ("volunteer", Section::Volunteer),
    ("volunteering", Section::Volunteer),
    ("volunteer experience", Section::Volunteer),
    ("community involvement", Section::Volunteer),
    ("interests", Section::Interests),
    ("hobbies", Section::Interests),
    ("hobbies and interests", Section::Interests),
    ("references", Section::References),
];

/// Normalizes a candidate heading: decorative rules and trailing colon stripped,
/// `&` folded to `and`, word-joining `-` and `_` folded to spaces, whitespace
/// collapsed, lowercased.
fn normalize_heading(text: &str) -> String {
    let stripped = text
        .trim()
        .trim_matches(|c: char| matches!(c, '=' | '-' | '_' | '*' | '#' | '~' | '•') || c.is_whitespace())
        .trim_end_matches(':')
        .trim();

    stripped
        .replace('&', " and ")
        .replace('/', " and ")
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Folds a line onto its canonical section, if the line is a heading.
pub fn fold_heading(text: &str) -> Option<Section> {
    if text.trim().chars().count() > MAX_HEADING_CHARS {
        return None;
    }
    let normalized = normalize_heading(text);
    HEADING_VOCABULARY
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, section)| *section)
}

/// The heading as it should be displayed: author's wording, decoration and colon removed.
pub fn display_heading(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| matches!(c, '=' | '-' | '_' | '*' | '#' | '~') || c.is_whitespace())
        .trim_end_matches(':')
        .trim()
        .to_string()
}

/// The "current section" state threaded through one classification pass.
///
/// Allocated fresh per run and owned by the caller; only a `SectionHeader` line
/// changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionState {
    pub current: Option<Section>,
    pub current_heading: String,
}

impl SectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, section: Section, heading: &str) {
        self.current = Some(section);
        self.current_heading = heading.to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn in_experience_family(&self) -> bool {
        self.current.is_some_and(Section::is_experience_family)
    }

    pub fn in_skills(&self) -> bool {
        self.current.is_some_and(Section::is_skills)
    }
}
