//! Render plan: positioned draw instructions grouped by page.
//!
//! Coordinates are PDF-style points with the origin at the bottom-left of the page;
//! `DrawBlock::y` is the text baseline. Blocks are ordered by page ascending and,
//! within a page, top to bottom in draw order. Once built, a plan is never mutated.

use serde::{Deserialize, Serialize};

use crate::classify::LineRole;
use crate::errors::Degradation;
use crate::layout::geometry::{Color, FontWeight};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Resolved style carried on each block so backends never need the StyleTable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleRef {
    pub role: LineRole,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
}

/// A list marker drawn on the same baseline as the first line of a bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub text: String,
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawBlock {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: StyleRef,
    /// Request for a horizontal separator rule beneath this block (section headers).
    pub rule_below: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub page_size: PageSize,
    /// Always at least 1, even for a plan without blocks.
    pub page_count: usize,
    pub blocks: Vec<DrawBlock>,
    #[serde(default)]
    pub degradations: Vec<Degradation>,
}

impl RenderPlan {
    /// Blocks drawn on `page`, in draw order. Empty for pages without blocks.
    pub fn blocks_on(&self, page: usize) -> &[DrawBlock] {
        let start = self.blocks.partition_point(|b| b.page < page);
        let end = self.blocks.partition_point(|b| b.page <= page);
        &self.blocks[start..end]
    }

    /// Iterates `(page, blocks)` for every page of the plan.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[DrawBlock])> + '_ {
        (0..self.page_count).map(move |p| (p, self.blocks_on(p)))
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Concatenated text of every block, in draw order. Useful for checking that no
    /// content was lost between input and plan.
    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
