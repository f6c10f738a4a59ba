// Text Sanitizer: Unicode punctuation and symbols folded to renderable equivalents
// before any classification or measurement happens.

pub mod sanitize;

pub use sanitize::sanitize;
