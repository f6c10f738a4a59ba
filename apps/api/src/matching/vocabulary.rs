//! Static vocabulary of technical and soft-skill terms.
//!
//! Terms are lowercase and matched as case-insensitive substrings, so tokens that
//! commonly occur inside unrelated words ("go", "excel", "scala", "git") are
//! omitted or spelled out in a longer form.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    Technical,
    SoftSkill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VocabularyTerm {
    pub term: &'static str,
    pub category: TermCategory,
}

#[rustfmt::skip]
pub static TECHNICAL_TERMS: &[&str] = &[
    // languages
    "python", "java", "javascript", "typescript", "rust", "golang", "c++", "c#", "ruby",
    "kotlin", "php", "perl", "haskell", "elixir", "sql", "bash",
    // web and frameworks
    "react", "angular", "vue", "node.js", "django", "flask", "fastapi", "spring",
    "ruby on rails", "graphql", "rest api", "html", "css", "tailwind", ".net",
    // data and storage
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "kafka", "rabbitmq",
    "cassandra", "dynamodb", "snowflake", "apache spark", "hadoop", "airflow", "etl",
    "data pipeline", "data warehouse",
    // cloud and infrastructure
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "linux",
    "ci/cd", "jenkins", "github actions", "microservices", "serverless", "devops",
    "observability", "prometheus", "grafana",
    // ml and analytics
    "machine learning", "deep learning", "tensorflow", "pytorch", "nlp",
    "computer vision", "pandas", "numpy", "scikit-learn", "statistics", "tableau",
    "power bi",
    // practices
    "agile", "scrum", "kanban", "tdd", "unit testing", "system design",
    "distributed systems", "api design", "security", "jira",
];

#[rustfmt::skip]
pub static SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "collaboration", "teamwork", "mentoring",
    "problem solving", "critical thinking", "stakeholder management",
    "project management", "time management", "ownership", "adaptability",
    "cross-functional", "negotiation", "presentation", "strategic planning",
    "decision making", "attention to detail", "customer focus", "coaching",
];

/// Every vocabulary term in a fixed order: technical terms first, then soft skills.
pub fn vocabulary() -> impl Iterator<Item = VocabularyTerm> {
    TECHNICAL_TERMS
        .iter()
        .map(|&term| VocabularyTerm {
            term,
            category: TermCategory::Technical,
        })
        .chain(SOFT_SKILLS.iter().map(|&term| VocabularyTerm {
            term,
            category: TermCategory::SoftSkill,
        }))
}
