// Line Classifier + Section Tracker
// Single forward pass over the raw lines with one line of lookahead. An externally
// supplied structuring hint replaces the heuristics only after it passes validation.

pub mod classifier;
pub mod hint;
pub mod line;
pub mod patterns;
pub mod section;

pub use classifier::classify;
pub use hint::{HintError, HintRecord, StructuringHint};
pub use line::{split_lines, ClassifiedLine, LineRole, RawLine};
pub use section::{Section, SectionState};
