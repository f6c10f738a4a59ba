// Keyword/Requirement Matching
// Lexical overlap between a job description and a résumé against a static vocabulary.
// Pure functions of their inputs: no external calls, no state.

pub mod keywords;
pub mod vocabulary;

pub use keywords::{
    keyword_density, keyword_report, match_keywords, KeywordCount, KeywordMatch, KeywordReport,
};
pub use vocabulary::{TermCategory, VocabularyTerm};
