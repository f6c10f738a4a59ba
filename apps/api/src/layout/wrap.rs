//! Greedy word wrap.
//!
//! Words are appended to the current line while the measured line still fits; the
//! first word that would overflow starts a new line. A single word wider than the
//! line is hard-split by characters so nothing ever draws past the right margin.

/// Splits `text` into sub-lines no wider than `max_width` according to `width_of`.
///
/// Returns an empty vector for text with no words. Every returned line is
/// non-empty; a line exceeds `max_width` only when it is a single character that
/// alone is wider than the line.
pub fn wrap_text<F>(text: &str, max_width: f32, width_of: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            if width_of(word) <= max_width {
                current.push_str(word);
            } else {
                current = hard_split(word, max_width, &width_of, &mut lines);
            }
            continue;
        }

        let candidate = format!("{current} {word}");
        if width_of(&candidate) <= max_width {
            current = candidate;
        } else if width_of(word) <= max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            lines.push(std::mem::take(&mut current));
            current = hard_split(word, max_width, &width_of, &mut lines);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pushes full-width chunks of `word` onto `lines` and returns the trailing
/// partial chunk, which later words may still join.
fn hard_split<F>(word: &str, max_width: f32, width_of: &F, lines: &mut Vec<String>) -> String
where
    F: Fn(&str) -> f32,
{
    let mut chunk = String::new();
    for c in word.chars() {
        chunk.push(c);
        if chunk.chars().count() > 1 && width_of(&chunk) > max_width {
            chunk.pop();
            lines.push(std::mem::take(&mut chunk));
            chunk.push(c);
        }
    }
    chunk
}
