use crate::layout::geometry::FontWeight;

/// Rendered width of `text` in points at a given size and weight.
/// Must be deterministic for identical arguments.
pub trait TextMeasure: Send + Sync {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32, FontWeight) -> f32 + Send + Sync,
{
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> f32 {
        self(text, font_size, weight)
    }
}

/// Per-character estimate used when no real measurement is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthEstimate {
    /// Character advance in em for regular text.
    pub regular_em: f32,
    pub bold_em: f32,
}

impl Default for FixedWidthEstimate {
    fn default() -> Self {
        Self {
            regular_em: 0.5,
            bold_em: 0.55,
        }
    }
}

impl TextMeasure for FixedWidthEstimate {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> f32 {
        let em = match weight {
            FontWeight::Regular => self.regular_em,
            FontWeight::Bold => self.bold_em,
        };
        text.chars().count() as f32 * em * font_size
    }
}
