//! Keyword matching between a job description and a résumé.
//!
//! Algorithm:
//! 1. Job keywords = vocabulary terms contained (case-insensitively) in the job text.
//! 2. Each job keyword is `matched` if the résumé text contains it, else `missing`.
//! 3. `match_score = round(matched / max(job_keywords, 1) * 100)`, clamped to 0..=100.
//!
//! Because matching is containment against a fixed vocabulary, adding text to the
//! résumé can only move keywords from `missing` to `matched`.

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::{vocabulary, TermCategory};

/// Maximum number of missing terms named in a recommendation.
const RECOMMENDATION_TERMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Job keywords present in the résumé, in vocabulary order.
    pub matched: Vec<String>,
    /// Job keywords absent from the résumé, in vocabulary order.
    pub missing: Vec<String>,
    pub match_score: u32, // 0 – 100
}

impl KeywordMatch {
    pub fn total_job_keywords(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Match result plus guidance for improving the résumé without a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordReport {
    #[serde(flatten)]
    pub keywords: KeywordMatch,
    pub total_job_keywords: usize,
    pub missing_soft_skills: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub term: String,
    pub category: TermCategory,
    pub occurrences: usize,
}

pub fn match_keywords(job_text: &str, resume_text: &str) -> KeywordMatch {
    let job = job_text.to_lowercase();
    let resume = resume_text.to_lowercase();

    let (matched, missing): (Vec<&str>, Vec<&str>) = vocabulary()
        .map(|t| t.term)
        .filter(|term| job.contains(term))
        .partition(|term| resume.contains(term));

    let total = (matched.len() + missing.len()).max(1);
    let match_score = ((matched.len() as f32 / total as f32) * 100.0).round() as u32;

    KeywordMatch {
        matched: matched.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
        match_score: match_score.min(100),
    }
}

/// Runs `match_keywords` and attaches a human-readable recommendation.
pub fn keyword_report(job_text: &str, resume_text: &str) -> KeywordReport {
    let keywords = match_keywords(job_text, resume_text);
    let missing_soft_skills = vocabulary()
        .filter(|t| t.category == TermCategory::SoftSkill)
        .map(|t| t.term)
        .filter(|term| keywords.missing.iter().any(|m| m == term))
        .map(String::from)
        .collect();
    let recommendation = build_recommendation(&keywords);

    KeywordReport {
        total_job_keywords: keywords.total_job_keywords(),
        keywords,
        missing_soft_skills,
        recommendation,
    }
}

/// Vocabulary terms found in `text` with their occurrence counts,
/// most frequent first (ties keep vocabulary order).
pub fn keyword_density(text: &str) -> Vec<KeywordCount> {
    let lower = text.to_lowercase();
    let mut counts: Vec<KeywordCount> = vocabulary()
        .filter_map(|t| {
            let occurrences = lower.matches(t.term).count();
            (occurrences > 0).then(|| KeywordCount {
                term: t.term.to_string(),
                category: t.category,
                occurrences,
            })
        })
        .collect();
    counts.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    counts
}

fn build_recommendation(keywords: &KeywordMatch) -> String {
    if keywords.total_job_keywords() == 0 {
        return "No recognised keywords found in the job description.".to_string();
    }

    let summary = if keywords.match_score >= 80 {
        "Strong keyword coverage."
    } else if keywords.match_score >= 60 {
        "Moderate keyword coverage."
    } else {
        "Low keyword coverage."
    };

    if keywords.missing.is_empty() {
        return format!("{summary} Every job keyword already appears in the résumé.");
    }

    let named: Vec<&str> = keywords
        .missing
        .iter()
        .take(RECOMMENDATION_TERMS)
        .map(String::as_str)
        .collect();
    let more = keywords.missing.len().saturating_sub(RECOMMENDATION_TERMS);
    let suffix = if more > 0 {
        format!(" (and {more} more)")
    } else {
        String::new()
    };
    format!(
        "{summary} Consider adding, where accurate: {}{suffix}.",
        named.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Senior backend engineer: Python, Redis, Kubernetes and AWS. \
                       Strong communication and mentoring expected.";

    #[test]
    fn test_self_match_is_100() {
        let m = match_keywords(JOB, JOB);
        assert_eq!(m.match_score, 100);
        assert!(m.missing.is_empty());
        assert_eq!(m.matched.len(), 6);
    }

    #[test]
    fn test_partial_match() {
        let m = match_keywords(JOB, "Built Python services on AWS.");
        assert_eq!(m.matched, vec!["python", "aws"]);
        assert_eq!(m.missing, vec!["redis", "kubernetes", "communication", "mentoring"]);
        // 2 / 6 = 33.3%
        assert_eq!(m.match_score, 33);
    }

    #[test]
    fn test_case_insensitive() {
        let m = match_keywords("KUBERNETES", "kubernetes");
        assert_eq!(m.match_score, 100);
    }

    #[test]
    fn test_score_monotonic_as_keywords_added() {
        let mut resume = String::from("Engineer.");
        let mut last = match_keywords(JOB, &resume).match_score;
        for kw in ["python", "aws", "kubernetes", "redis", "mentoring", "communication"] {
            resume.push(' ');
            resume.push_str(kw);
            let score = match_keywords(JOB, &resume).match_score;
            assert!(score >= last, "score dropped from {last} to {score}");
            last = score;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_job_without_keywords_scores_zero() {
        let m = match_keywords("We are hiring.", "anything");
        assert_eq!(m.match_score, 0);
        assert_eq!(m.total_job_keywords(), 0);
    }

    #[test]
    fn test_report_recommendation_names_missing_terms() {
        let report = keyword_report(JOB, "Python");
        assert!(report.recommendation.starts_with("Low keyword coverage."));
        assert!(report.recommendation.contains("redis"));
        assert_eq!(report.total_job_keywords, 6);
        assert_eq!(report.missing_soft_skills, vec!["communication", "mentoring"]);
    }

    #[test]
    fn test_report_strong_coverage() {
        let report = keyword_report(JOB, JOB);
        assert!(report.recommendation.starts_with("Strong keyword coverage."));
    }

    #[test]
    fn test_report_flattens_match_fields() {
        let json = serde_json::to_value(keyword_report(JOB, "Python")).unwrap();
        assert_eq!(json["match_score"], 17);
        assert!(json["matched"].is_array());
    }

    #[test]
    fn test_keyword_density_orders_by_frequency() {
        let counts = keyword_density("Python, AWS, python scripts, and more Python.");
        assert_eq!(counts[0].term, "python");
        assert_eq!(counts[0].occurrences, 3);
        assert_eq!(counts[1].term, "aws");
        assert_eq!(counts[1].category, TermCategory::Technical);
    }
}
