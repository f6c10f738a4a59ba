//! Page geometry and per-role text styles.
//!
//! All dimensions are in PDF points (1/72 inch).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::LineRole;
use crate::errors::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

/// Named paper presets accepted by configuration and the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            "a4" => Ok(PaperSize::A4),
            other => Err(format!("unknown page size {other:?} (expected letter or a4)")),
        }
    }
}

impl PaperSize {
    pub fn geometry(self) -> PageGeometry {
        match self {
            PaperSize::Letter => PageGeometry::letter(),
            PaperSize::A4 => PageGeometry::a4(),
        }
    }
}

impl PageGeometry {
    /// US Letter, 0.75" margins on every side.
    pub fn letter() -> Self {
        Self::with_uniform_margin(612.0, 792.0, 54.0)
    }

    /// ISO A4, 0.75" margins on every side.
    pub fn a4() -> Self {
        Self::with_uniform_margin(595.28, 841.89, 54.0)
    }

    pub fn with_uniform_margin(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Y coordinate of the top of the content area.
    pub fn top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn right_edge(&self) -> f32 {
        self.width - self.margin_right
    }

    fn check(&self) -> Result<(), LayoutError> {
        let dims = [
            self.width,
            self.height,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(LayoutError::GeometryTooSmall {
                reason: "page dimensions and margins must be finite and non-negative".to_string(),
            });
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(LayoutError::GeometryTooSmall {
                reason: format!(
                    "margins leave no content area ({:.1} x {:.1}pt)",
                    self.content_width(),
                    self.content_height()
                ),
            });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const SLATE: Color = Color { r: 0x33, g: 0x41, b: 0x55 };
    pub const ACCENT: Color = Color { r: 0x1f, g: 0x3a, b: 0x5f };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

fn default_font_size() -> f32 {
    10.0
}

fn default_line_gap() -> f32 {
    2.5
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub spacing_before: f32,
    #[serde(default)]
    pub spacing_after: f32,
    /// Extra leading added below each wrapped sub-line.
    #[serde(default = "default_line_gap")]
    pub line_gap: f32,
    /// Left indent from the content edge. Bullets draw their marker inside it.
    #[serde(default)]
    pub indent: f32,
    #[serde(default)]
    pub align: Align,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            font_weight: FontWeight::Regular,
            color: Color::BLACK,
            spacing_before: 0.0,
            spacing_after: 2.0,
            line_gap: default_line_gap(),
            indent: 0.0,
            align: Align::Left,
        }
    }
}

impl TextStyle {
    /// Vertical advance for one wrapped sub-line.
    pub fn line_height(&self) -> f32 {
        self.font_size + self.line_gap
    }

    fn check(&self, role: LineRole, geometry: &PageGeometry) -> Result<(), LayoutError> {
        let invalid = |reason: String| LayoutError::InvalidStyle { role, reason };
        let values = [
            self.font_size,
            self.spacing_before,
            self.spacing_after,
            self.line_gap,
            self.indent,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("style values must be finite".to_string()));
        }
        if self.font_size <= 0.0 {
            return Err(invalid(format!("font size {} must be positive", self.font_size)));
        }
        if self.spacing_before < 0.0 || self.spacing_after < 0.0 || self.line_gap < 0.0 {
            return Err(invalid("spacing and line gap must be non-negative".to_string()));
        }
        if self.indent < 0.0 || self.indent >= geometry.content_width() {
            return Err(invalid(format!(
                "indent {} leaves no room in a {:.1}pt content width",
                self.indent,
                geometry.content_width()
            )));
        }
        if self.line_height() > geometry.content_height() {
            return Err(LayoutError::GeometryTooSmall {
                reason: format!(
                    "{role:?} line height {:.1}pt exceeds content height {:.1}pt",
                    self.line_height(),
                    geometry.content_height()
                ),
            });
        }
        Ok(())
    }
}

/// Mapping from role to style. Roles without an entry resolve to the PlainText style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    styles: BTreeMap<LineRole, TextStyle>,
}

impl Default for StyleTable {
    fn default() -> Self {
        let body = TextStyle::default();
        let styles = BTreeMap::from([
            (
                LineRole::Name,
                TextStyle {
                    font_size: 22.0,
                    font_weight: FontWeight::Bold,
                    spacing_after: 4.0,
                    line_gap: 3.0,
                    align: Align::Center,
                    ..body
                },
            ),
            (
                LineRole::Contact,
                TextStyle {
                    font_size: 9.5,
                    color: Color::SLATE,
                    spacing_after: 2.0,
                    align: Align::Center,
                    ..body
                },
            ),
            (
                LineRole::SectionHeader,
                TextStyle {
                    font_size: 12.0,
                    font_weight: FontWeight::Bold,
                    color: Color::ACCENT,
                    spacing_before: 10.0,
                    spacing_after: 6.0,
                    ..body
                },
            ),
            (
                LineRole::JobTitle,
                TextStyle {
                    font_size: 10.5,
                    font_weight: FontWeight::Bold,
                    spacing_before: 6.0,
                    spacing_after: 2.0,
                    ..body
                },
            ),
            (
                LineRole::JobDetail,
                TextStyle {
                    color: Color::SLATE,
                    spacing_after: 2.0,
                    ..body
                },
            ),
            (
                LineRole::Bullet,
                TextStyle {
                    spacing_after: 1.5,
                    indent: 14.0,
                    ..body
                },
            ),
            (LineRole::SkillGroup, body),
            (LineRole::PlainText, TextStyle { spacing_after: 3.0, ..body }),
            (
                LineRole::Blank,
                TextStyle {
                    spacing_after: 6.0,
                    ..body
                },
            ),
        ]);
        Self { styles }
    }
}

impl StyleTable {
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Adds or replaces the style for `role`.
    pub fn with(mut self, role: LineRole, style: TextStyle) -> Self {
        self.styles.insert(role, style);
        self
    }

    /// Overlays `overrides` on top of this table.
    pub fn merged(mut self, overrides: &StyleTable) -> Self {
        self.styles
            .extend(overrides.styles.iter().map(|(k, v)| (*k, *v)));
        self
    }

    pub fn resolve(&self, role: LineRole) -> TextStyle {
        self.styles
            .get(&role)
            .or_else(|| self.styles.get(&LineRole::PlainText))
            .copied()
            .unwrap_or_default()
    }
}

/// Rejects geometry or styles that cannot hold a single line of text.
pub fn validate(geometry: &PageGeometry, styles: &StyleTable) -> Result<(), LayoutError> {
    geometry.check()?;
    for role in LineRole::ALL {
        styles.resolve(role).check(role, geometry)?;
    }
    Ok(())
}
