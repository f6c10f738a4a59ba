//! Heuristic line classifier.
//!
//! # Decision order (first satisfied rule wins, no backtracking)
//! 1. Name: first non-blank line, short, not contact-like, not a heading
//! 2. Contact: first line after the Name, or any email / phone / profile-link line
//! 3. SectionHeader: closed heading vocabulary; updates `SectionState`
//! 4. JobTitle: dated, unmarked, under the long-line threshold, with a separator or
//!    inside an Experience-family section; may absorb the next bare line
//! 5. JobDetail: undated company/location line directly above a dated line, inside
//!    an Experience-family section
//! 6. Bullet: leading list marker, stripped
//! 7. SkillGroup: 3+ comma tokens inside Skills
//! 8. PlainText: always matches
//!
//! Runs of blank lines collapse into a single `Blank`; leading and trailing blanks
//! are dropped.

use crate::classify::line::{ClassifiedLine, LineRole, RawLine};
use crate::classify::patterns::{
    comma_token_count, has_date, has_separator, is_contact_like, is_single_alpha_word,
    split_columns, strip_bullet_marker, word_count,
};
use crate::classify::section::{display_heading, fold_heading, SectionState};

/// Name lines must be strictly shorter than this (in chars).
pub const NAME_MAX_CHARS: usize = 50;
/// JobTitle lines must be strictly shorter than this (in chars).
pub const JOB_TITLE_MAX_CHARS: usize = 120;
/// A line absorbed as `secondary_text`, or a JobDetail line, must be shorter than this.
pub const BARE_LINE_MAX_CHARS: usize = 60;
const BARE_LINE_MAX_WORDS: usize = 8;
const SKILL_GROUP_MIN_TOKENS: usize = 3;

/// Classifies a document with a freshly allocated `SectionState`.
pub fn classify(lines: &[RawLine]) -> Vec<ClassifiedLine> {
    let mut state = SectionState::new();
    classify_with_state(lines, &mut state)
}

/// Classifies a document, threading the caller-owned section state through the pass.
///
/// The state is reset first; after the call it holds the last section entered.
pub fn classify_with_state(lines: &[RawLine], state: &mut SectionState) -> Vec<ClassifiedLine> {
    state.reset();

    let mut out = Vec::with_capacity(lines.len());
    let mut seen_content = false;
    let mut after_name = false;
    let mut pending_blank: Option<usize> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if line.is_blank {
            if seen_content && pending_blank.is_none() {
                pending_blank = Some(line.index);
            }
            i += 1;
            continue;
        }

        if let Some(blank_index) = pending_blank.take() {
            out.push(ClassifiedLine::blank(blank_index));
        }

        let next = lines.get(i + 1);
        let ctx = LineContext {
            first_content: !seen_content,
            after_name,
        };
        seen_content = true;

        let classified = classify_line(line, next, ctx, state);
        after_name = classified.role == LineRole::Name;
        i += classified.line_span.max(1);
        out.push(classified);
    }

    out
}

#[derive(Debug, Clone, Copy)]
struct LineContext {
    /// No non-blank line has been seen before this one.
    first_content: bool,
    /// The previous non-blank line was classified as `Name`.
    after_name: bool,
}

fn classify_line(
    line: &RawLine,
    next: Option<&RawLine>,
    ctx: LineContext,
    state: &mut SectionState,
) -> ClassifiedLine {
    let text = line.text.trim();
    let index = line.index;
    let heading = fold_heading(text);

    // 1. Name
    if ctx.first_content
        && text.chars().count() < NAME_MAX_CHARS
        && !is_contact_like(text)
        && heading.is_none()
    {
        if let Some(second) = masthead_continuation(text, next) {
            return ClassifiedLine {
                role: LineRole::Name,
                primary_text: format!("{text} {second}"),
                secondary_text: None,
                source_index: index,
                line_span: 2,
            };
        }
        return ClassifiedLine::new(LineRole::Name, text, index);
    }

    // 2. Contact
    if (ctx.after_name && heading.is_none()) || is_contact_like(text) {
        return ClassifiedLine::new(LineRole::Contact, text, index);
    }

    // 3. SectionHeader
    if let Some(section) = heading {
        let display = display_heading(text);
        state.enter(section, &display);
        return ClassifiedLine::new(LineRole::SectionHeader, display, index);
    }

    let marker_content = strip_bullet_marker(text);

    // 4. JobTitle
    if marker_content.is_none()
        && has_date(text)
        && text.chars().count() < JOB_TITLE_MAX_CHARS
        && (has_separator(text) || state.in_experience_family())
    {
        let title = ClassifiedLine::new(LineRole::JobTitle, text, index);
        return match next.filter(|n| is_bare_line(&n.text)) {
            Some(n) => title.with_secondary(n.text.trim(), 2),
            None => title,
        };
    }

    // 5. JobDetail
    if marker_content.is_none()
        && state.in_experience_family()
        && is_company_line(text)
        && next.is_some_and(precedes_as_detail)
    {
        let (left, right) = split_columns(text);
        let detail = ClassifiedLine::new(LineRole::JobDetail, left, index);
        return match right {
            Some(r) => detail.with_secondary(r, 1),
            None => detail,
        };
    }

    // 6. Bullet
    if let Some(content) = marker_content {
        return ClassifiedLine::new(LineRole::Bullet, content, index);
    }

    // 7. SkillGroup
    if state.in_skills() && comma_token_count(text) >= SKILL_GROUP_MIN_TOKENS {
        return ClassifiedLine::new(LineRole::SkillGroup, text, index);
    }

    // 8. PlainText
    ClassifiedLine::new(LineRole::PlainText, text, index)
}

/// Second half of a masthead split over two lines (`JANE` / `DOE`).
fn masthead_continuation<'a>(first: &str, next: Option<&'a RawLine>) -> Option<&'a str> {
    let next = next.filter(|n| !n.is_blank)?;
    let second = next.text.trim();
    let merged_len = first.chars().count() + 1 + second.chars().count();

    (is_single_alpha_word(first)
        && is_single_alpha_word(second)
        && merged_len < NAME_MAX_CHARS
        && fold_heading(second).is_none())
    .then_some(second)
}

/// A short, undated, unmarked line that reads like a company or location.
fn is_company_line(text: &str) -> bool {
    !has_date(text)
        && text.chars().count() < BARE_LINE_MAX_CHARS
        && word_count(text) <= BARE_LINE_MAX_WORDS
        && !text.ends_with('.')
        && !is_contact_like(text)
}

/// A line that may be absorbed as a JobTitle's `secondary_text`.
fn is_bare_line(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty()
        && strip_bullet_marker(t).is_none()
        && fold_heading(t).is_none()
        && is_company_line(t)
}

/// The line after a JobDetail candidate must itself be a dated, unmarked line.
fn precedes_as_detail(next: &RawLine) -> bool {
    let t = next.text.trim();
    !next.is_blank && has_date(t) && strip_bullet_marker(t).is_none() && fold_heading(t).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::line::split_lines;
    use crate::classify::section::Section;

    fn roles(text: &str) -> Vec<LineRole> {
        classify(&split_lines(text)).iter().map(|l| l.role).collect()
    }

    const JANE: &str = "Jane Doe\njane@x.com\nEXPERIENCE\nSenior Engineer - Acme Corp 2020 - Present\n- Built systems\nEDUCATION\nBSc Computer Science, MIT, 2016";

    #[test]
    fn test_reference_resume_scenario() {
        let lines = classify(&split_lines(JANE));
        let got: Vec<(LineRole, &str)> = lines
            .iter()
            .map(|l| (l.role, l.primary_text.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (LineRole::Name, "Jane Doe"),
                (LineRole::Contact, "jane@x.com"),
                (LineRole::SectionHeader, "EXPERIENCE"),
                (LineRole::JobTitle, "Senior Engineer - Acme Corp 2020 - Present"),
                (LineRole::Bullet, "Built systems"),
                (LineRole::SectionHeader, "EDUCATION"),
                (LineRole::PlainText, "BSc Computer Science, MIT, 2016"),
            ]
        );
        assert!(lines[3].secondary_text.is_none());
        let indexes: Vec<usize> = lines.iter().map(|l| l.source_index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_section_state_left_on_last_heading() {
        let mut state = SectionState::new();
        classify_with_state(&split_lines(JANE), &mut state);
        assert_eq!(state.current, Some(Section::Education));
        assert_eq!(state.current_heading, "EDUCATION");
    }

    #[test]
    fn test_state_is_reset_between_runs() {
        let mut state = SectionState::new();
        state.enter(Section::Skills, "Skills");
        let lines = classify_with_state(&split_lines("Jane Doe\nyou\nRust, Go, Python"), &mut state);
        assert_eq!(lines[2].role, LineRole::PlainText);
    }

    #[test]
    fn test_job_title_absorbs_bare_next_line() {
        let text = "Jane Doe\njane@x.com\nExperience\nStaff Engineer 2018 - 2021\nGlobex, Berlin\n- Scaled ingestion";
        let lines = classify(&split_lines(text));
        assert_eq!(lines[3].role, LineRole::JobTitle);
        assert_eq!(lines[3].secondary_text.as_deref(), Some("Globex, Berlin"));
        assert_eq!(lines[3].line_span, 2);
        assert_eq!(lines[4].role, LineRole::Bullet);
        assert_eq!(lines[4].source_index, 5);
    }

    #[test]
    fn test_job_title_does_not_absorb_sentence() {
        let text = "Jane Doe\njane@x.com\nExperience\nEngineer 2019 - 2020\nLed a small platform team across regions.";
        let lines = classify(&split_lines(text));
        assert_eq!(lines[3].role, LineRole::JobTitle);
        assert!(lines[3].secondary_text.is_none());
        assert_eq!(lines[4].role, LineRole::PlainText);
    }

    #[test]
    fn test_job_title_outside_experience_needs_separator() {
        let text = "Jane Doe\nx\nProjects\nLedger engine | 2021\nCompiler 2020";
        assert_eq!(
            roles(text),
            vec![
                LineRole::Name,
                LineRole::Contact,
                LineRole::SectionHeader,
                LineRole::JobTitle,
                LineRole::PlainText
            ]
        );
    }

    #[test]
    fn test_company_line_above_dated_title_is_job_detail() {
        let text = "Jane Doe\njane@x.com\nWork History\nAcme Corp | Remote\nSenior Engineer 2020 - Present\n- Built systems";
        let lines = classify(&split_lines(text));
        assert_eq!(lines[2].role, LineRole::SectionHeader);
        assert_eq!(lines[3].role, LineRole::JobDetail);
        assert_eq!(lines[3].primary_text, "Acme Corp");
        assert_eq!(lines[3].secondary_text.as_deref(), Some("Remote"));
        assert_eq!(lines[3].line_span, 1);
        assert_eq!(lines[4].role, LineRole::JobTitle);
    }

    #[test]
    fn test_dated_bullet_stays_bullet() {
        let text = "Jane Doe\nx\nExperience\n- Migrated billing in 2021 - saved 30%";
        assert_eq!(roles(text)[3], LineRole::Bullet);
    }

    #[test]
    fn test_skill_group_only_inside_skills() {
        let text = "Jane Doe\nx\nSummary\nRust, Go, Python\nTechnical Skills\nRust, Go, Python\nRust, Go";
        assert_eq!(
            roles(text),
            vec![
                LineRole::Name,
                LineRole::Contact,
                LineRole::SectionHeader,
                LineRole::PlainText,
                LineRole::SectionHeader,
                LineRole::SkillGroup,
                LineRole::PlainText
            ]
        );
    }

    #[test]
    fn test_hyphenated_skills_heading_opens_skills() {
        let text = "Jane Doe\njane@x.com\nTECHNICAL-SKILLS\nRust, Go, Python";
        assert_eq!(
            roles(text),
            vec![
                LineRole::Name,
                LineRole::Contact,
                LineRole::SectionHeader,
                LineRole::SkillGroup
            ]
        );
    }

    #[test]
    fn test_contact_anywhere_by_pattern() {
        let text = "Jane Doe\nSenior Engineer\nSummary\nReach me at jane@x.com";
        assert_eq!(
            roles(text),
            vec![LineRole::Name, LineRole::Contact, LineRole::SectionHeader, LineRole::Contact]
        );
    }

    #[test]
    fn test_heading_right_after_name_is_not_contact() {
        assert_eq!(
            roles("Jane Doe\nEXPERIENCE"),
            vec![LineRole::Name, LineRole::SectionHeader]
        );
    }

    #[test]
    fn test_long_first_line_is_not_name() {
        let first = "A".repeat(60);
        let lines = classify(&split_lines(&first));
        assert_eq!(lines[0].role, LineRole::PlainText);
    }

    #[test]
    fn test_only_one_name_and_it_comes_first() {
        let lines = classify(&split_lines("\n\nJane Doe\njane@x.com\nJohn Smith\nSummary"));
        let names: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.role == LineRole::Name)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(names, vec![0]);
    }

    #[test]
    fn test_split_masthead_merges() {
        let lines = classify(&split_lines("JANE\nDOE\njane@x.com"));
        assert_eq!(lines[0].role, LineRole::Name);
        assert_eq!(lines[0].primary_text, "JANE DOE");
        assert_eq!(lines[0].line_span, 2);
        assert_eq!(lines[1].role, LineRole::Contact);
    }

    #[test]
    fn test_blank_runs_collapse_and_edges_drop() {
        let lines = classify(&split_lines("\n\nJane Doe\n\n\n\njane@x.com\n\n"));
        let got: Vec<LineRole> = lines.iter().map(|l| l.role).collect();
        assert_eq!(got, vec![LineRole::Name, LineRole::Blank, LineRole::Contact]);
        assert_eq!(lines[1].source_index, 3);
    }

    #[test]
    fn test_every_non_blank_line_accounted_for() {
        let text = "JANE\nDOE\n(555) 123-4567\n\nProfile\nBuilder of things.\nExperience\nAcme\nEngineer 2019 - 2021\nGlobex\n* Did a thing\n\nSkills\nRust, Go, SQL, Kafka\n";
        let raw = split_lines(text);
        let non_blank = raw.iter().filter(|l| !l.is_blank).count();
        let consumed: usize = classify(&raw)
            .iter()
            .filter(|l| l.role != LineRole::Blank)
            .map(|l| l.line_span)
            .sum();
        assert_eq!(consumed, non_blank);
    }

    #[test]
    fn test_empty_and_blank_inputs_classify_to_nothing() {
        assert!(classify(&split_lines("")).is_empty());
        assert!(classify(&split_lines("\n \n\t\n")).is_empty());
    }

    #[test]
    fn test_single_character_input() {
        assert_eq!(roles("x"), vec![LineRole::Name]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let raw = split_lines(JANE);
        assert_eq!(classify(&raw), classify(&raw));
    }
}
