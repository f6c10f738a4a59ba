//! Layout engine: turns classified lines into a paginated `RenderPlan`.
//!
//! # Cursor model
//! A cursor `(page, y)` starts at the top of the content area and moves down.
//! Each wrapped sub-line needs `font_size + line_gap` of vertical room; if the
//! cursor cannot fit that above the bottom margin, a new page starts and the
//! cursor resets to the top. Spacing before a line is skipped at the top of a page.
//!
//! Section headers are kept with the first line that follows them. JobTitle and
//! JobDetail lines draw their secondary text (usually a date range) right-aligned
//! on the same baseline when both columns fit, otherwise on their own line below.
//!
//! Layout is a pure function of its inputs: identical lines, geometry, styles, and
//! measurement produce a byte-identical plan.

use tracing::debug;

use crate::classify::{ClassifiedLine, LineRole};
use crate::errors::{Degradation, LayoutError};
use crate::layout::geometry::{validate, Align, PageGeometry, StyleTable, TextStyle};
use crate::layout::measure::{FixedWidthEstimate, TextMeasure};
use crate::layout::wrap::wrap_text;
use crate::render::{DrawBlock, Marker, PageSize, RenderPlan, StyleRef};
use crate::text::sanitize::BULLET;

/// Minimum horizontal gap between the primary and right-aligned secondary column.
const COLUMN_GAP: f32 = 12.0;

/// Distance between a bullet marker and the start of the bullet text.
const MARKER_GAP: f32 = 8.0;

/// Lays out `lines` onto pages of `geometry`.
///
/// When `measure` is `None` a `FixedWidthEstimate` is used and the plan records
/// `Degradation::MeasurementUnavailable`.
pub fn layout(
    lines: &[ClassifiedLine],
    geometry: &PageGeometry,
    styles: &StyleTable,
    measure: Option<&dyn TextMeasure>,
) -> Result<RenderPlan, LayoutError> {
    validate(geometry, styles)?;

    let estimate = FixedWidthEstimate::default();
    let mut degradations = Vec::new();
    let measure: &dyn TextMeasure = match measure {
        Some(m) => m,
        None => {
            degradations.push(Degradation::MeasurementUnavailable);
            &estimate
        }
    };

    let mut engine = Engine::new(geometry, styles, measure);
    for (i, line) in lines.iter().enumerate() {
        engine.place(line, lines.get(i + 1));
    }

    let plan = engine.finish(degradations);
    debug!(
        lines = lines.len(),
        blocks = plan.blocks.len(),
        pages = plan.page_count,
        "Layout complete"
    );
    Ok(plan)
}

struct Engine<'a> {
    geometry: &'a PageGeometry,
    styles: &'a StyleTable,
    measure: &'a dyn TextMeasure,
    page: usize,
    y: f32,
    /// True until the cursor first moves on the current page.
    at_page_top: bool,
    blocks: Vec<DrawBlock>,
}

impl<'a> Engine<'a> {
    fn new(
        geometry: &'a PageGeometry,
        styles: &'a StyleTable,
        measure: &'a dyn TextMeasure,
    ) -> Self {
        Self {
            geometry,
            styles,
            measure,
            page: 0,
            y: geometry.top(),
            at_page_top: true,
            blocks: Vec::new(),
        }
    }

    fn finish(self, degradations: Vec<Degradation>) -> RenderPlan {
        let page_count = self.blocks.last().map_or(1, |b| b.page + 1);
        RenderPlan {
            page_size: PageSize {
                width: self.geometry.width,
                height: self.geometry.height,
            },
            page_count,
            blocks: self.blocks,
            degradations,
        }
    }

    /// Width in points. Non-finite or negative measurements count as zero width.
    fn width(&self, text: &str, style: &TextStyle) -> f32 {
        let w = self.measure.measure(text, style.font_size, style.font_weight);
        if w.is_finite() && w > 0.0 {
            w
        } else {
            0.0
        }
    }

    fn wrap(&self, text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
        wrap_text(text, max_width, |s| self.width(s, style))
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.y = self.geometry.top();
        self.at_page_top = true;
    }

    fn space(&mut self, amount: f32) {
        if !self.at_page_top {
            self.y -= amount;
        }
    }

    fn ensure_room(&mut self, required: f32) {
        if !self.at_page_top && self.y - required < self.geometry.margin_bottom {
            self.new_page();
        }
    }

    /// Places one row of blocks on a shared baseline and advances the cursor.
    fn emit_row(&mut self, role: LineRole, style: &TextStyle, row: Vec<RowItem>) {
        self.ensure_room(style.line_height());
        let baseline = self.y - style.font_size;
        let style_ref = StyleRef {
            role,
            font_size: style.font_size,
            font_weight: style.font_weight,
            color: style.color,
        };
        for item in row {
            self.blocks.push(DrawBlock {
                page: self.page,
                x: item.x,
                y: baseline,
                text: item.text,
                style: style_ref,
                rule_below: item.rule_below,
                marker: item.marker,
            });
        }
        self.y -= style.line_height();
        self.at_page_top = false;
    }

    fn text_left(&self, style: &TextStyle) -> f32 {
        self.geometry.margin_left + style.indent
    }

    fn available(&self, style: &TextStyle) -> f32 {
        self.geometry.content_width() - style.indent
    }

    fn aligned_x(&self, text: &str, style: &TextStyle) -> f32 {
        let left = self.text_left(style);
        match style.align {
            Align::Left => left,
            Align::Center => left + ((self.available(style) - self.width(text, style)) / 2.0).max(0.0),
        }
    }

    fn right_aligned_x(&self, text: &str, style: &TextStyle) -> f32 {
        (self.geometry.right_edge() - self.width(text, style)).max(self.text_left(style))
    }

    fn place(&mut self, line: &ClassifiedLine, next: Option<&ClassifiedLine>) {
        let style = self.styles.resolve(line.role);

        if line.role == LineRole::Blank {
            self.space(style.spacing_before + style.spacing_after);
            return;
        }

        let primary = line.primary_text.trim();
        let secondary = line
            .secondary_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if primary.is_empty() && secondary.is_none() {
            self.ensure_room(style.line_height());
            self.y -= style.line_height();
            self.at_page_top = false;
            return;
        }

        self.space(style.spacing_before);

        let sub_lines = self.wrap(primary, &style, self.available(&style));

        if line.role == LineRole::SectionHeader {
            self.keep_with_next(&style, sub_lines.len(), next);
        }

        match secondary {
            Some(sec) if matches!(line.role, LineRole::JobTitle | LineRole::JobDetail) => {
                self.place_two_column(line.role, &style, primary, sub_lines, sec);
            }
            Some(sec) => {
                self.place_sub_lines(line.role, &style, sub_lines);
                let trailing = self.wrap(sec, &style, self.available(&style));
                self.place_sub_lines(line.role, &style, trailing);
            }
            None => self.place_sub_lines(line.role, &style, sub_lines),
        }

        self.space(style.spacing_after);
    }

    /// Starts a new page when the header and the first line of the next entry
    /// would not fit together below the cursor.
    fn keep_with_next(&mut self, style: &TextStyle, header_lines: usize, next: Option<&ClassifiedLine>) {
        let Some(next) = next.filter(|n| n.role != LineRole::Blank) else {
            return;
        };
        let next_style = self.styles.resolve(next.role);
        let required = header_lines as f32 * style.line_height()
            + style.spacing_after
            + next_style.spacing_before
            + next_style.line_height();
        if required <= self.geometry.content_height() {
            self.ensure_room(required);
        }
    }

    fn place_sub_lines(&mut self, role: LineRole, style: &TextStyle, sub_lines: Vec<String>) {
        let last = sub_lines.len().saturating_sub(1);
        for (k, text) in sub_lines.into_iter().enumerate() {
            let marker = (role == LineRole::Bullet && k == 0).then(|| Marker {
                text: BULLET.to_string(),
                x: (self.text_left(style) - MARKER_GAP).max(self.geometry.margin_left),
            });
            let item = RowItem {
                x: self.aligned_x(&text, style),
                text,
                rule_below: role == LineRole::SectionHeader && k == last,
                marker,
            };
            self.emit_row(role, style, vec![item]);
        }
    }

    fn place_two_column(
        &mut self,
        role: LineRole,
        style: &TextStyle,
        primary: &str,
        sub_lines: Vec<String>,
        secondary: &str,
    ) {
        let fits_beside =
            self.width(primary, style) + COLUMN_GAP + self.width(secondary, style) <= self.available(style);

        if fits_beside && !primary.is_empty() {
            let row = vec![
                RowItem::plain(primary.to_string(), self.text_left(style)),
                RowItem::plain(secondary.to_string(), self.right_aligned_x(secondary, style)),
            ];
            self.emit_row(role, style, row);
            return;
        }

        self.place_sub_lines(role, style, sub_lines);
        for text in self.wrap(secondary, style, self.available(style)) {
            let x = self.right_aligned_x(&text, style);
            self.emit_row(role, style, vec![RowItem::plain(text, x)]);
        }
    }
}

struct RowItem {
    text: String,
    x: f32,
    rule_below: bool,
    marker: Option<Marker>,
}

impl RowItem {
    fn plain(text: String, x: f32) -> Self {
        Self {
            text,
            x,
            rule_below: false,
            marker: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, split_lines};
    use crate::layout::font_metrics::HelveticaMeasure;
    use crate::layout::geometry::FontWeight;

    /// One point per character, independent of size and weight.
    fn per_char(text: &str, _size: f32, _weight: FontWeight) -> f32 {
        text.chars().count() as f32
    }

    /// Letter-height page whose content area is exactly 40 points wide.
    fn narrow_geometry() -> PageGeometry {
        PageGeometry {
            width: 120.0,
            height: 792.0,
            margin_top: 54.0,
            margin_right: 40.0,
            margin_bottom: 54.0,
            margin_left: 40.0,
        }
    }

    fn flat_styles() -> StyleTable {
        StyleTable::empty().with(
            LineRole::PlainText,
            TextStyle {
                spacing_after: 0.0,
                ..TextStyle::default()
            },
        )
    }

    fn line(role: LineRole, text: &str, index: usize) -> ClassifiedLine {
        ClassifiedLine::new(role, text.to_string(), index)
    }

    fn assert_within_page(plan: &RenderPlan, g: &PageGeometry) {
        for b in &plan.blocks {
            assert!(b.page < plan.page_count);
            assert!(b.y >= g.margin_bottom, "block below bottom margin: {b:?}");
            assert!(b.y <= g.top(), "block above top margin: {b:?}");
            assert!(b.x >= g.margin_left, "block left of margin: {b:?}");
        }
    }

    #[test]
    fn test_long_bullet_wraps_to_thirteen_blocks() {
        let g = narrow_geometry();
        let lines = vec![line(LineRole::Bullet, &"x".repeat(500), 0)];
        let plan = layout(&lines, &g, &flat_styles(), Some(&per_char)).unwrap();

        assert_eq!(plan.blocks.len(), 13);
        assert!(plan.blocks.windows(2).all(|w| w[1].y < w[0].y));
        assert!(plan.blocks[0].marker.is_some());
        assert!(plan.blocks[1..].iter().all(|b| b.marker.is_none()));
        assert!(plan.blocks.iter().all(|b| b.text.chars().count() <= 40));
        assert_within_page(&plan, &g);
    }

    #[test]
    fn test_word_bullet_wraps_at_word_boundaries() {
        let g = narrow_geometry();
        let text = vec!["word"; 100].join(" ");
        let lines = vec![line(LineRole::Bullet, &text, 0)];
        let plan = layout(&lines, &g, &flat_styles(), Some(&per_char)).unwrap();

        assert!(plan.blocks.iter().all(|b| b.text.chars().count() <= 40));
        assert!(plan.blocks.iter().all(|b| !b.text.starts_with(' ')));
        assert_eq!(plan.text_content(), text);
    }

    #[test]
    fn test_paginates_and_stays_within_margins() {
        let g = PageGeometry::letter();
        let lines: Vec<ClassifiedLine> = (0..200)
            .map(|i| line(LineRole::PlainText, &format!("Line number {i}"), i))
            .collect();
        let plan = layout(&lines, &g, &StyleTable::default(), Some(&HelveticaMeasure)).unwrap();

        assert!(plan.page_count > 1);
        assert_eq!(plan.blocks.len(), 200);
        assert_within_page(&plan, &g);
        for (_, blocks) in plan.pages() {
            assert!(blocks.windows(2).all(|w| w[1].y < w[0].y));
        }
        // Each new page restarts at the same first baseline.
        let first_baselines: Vec<f32> = plan.pages().filter_map(|(_, b)| b.first()).map(|b| b.y).collect();
        assert!(first_baselines.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let raw = split_lines(
            "Jane Doe\njane@x.com | 555-123-4567\n\nEXPERIENCE\nSenior Engineer | Acme 2020 - Present\n- Built systems that scale\n- Led a team of five",
        );
        let lines = classify(&raw);
        let g = PageGeometry::letter();
        let styles = StyleTable::default();
        let a = layout(&lines, &g, &styles, Some(&HelveticaMeasure)).unwrap();
        let b = layout(&lines, &g, &styles, Some(&HelveticaMeasure)).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_geometry_too_small_rejected() {
        let g = PageGeometry::with_uniform_margin(612.0, 100.0, 50.0);
        let lines = vec![line(LineRole::PlainText, "hello", 0)];
        assert!(matches!(
            layout(&lines, &g, &StyleTable::default(), None),
            Err(LayoutError::GeometryTooSmall { .. })
        ));
    }

    #[test]
    fn test_empty_primary_advances_without_block() {
        let g = PageGeometry::letter();
        let lines = vec![
            line(LineRole::PlainText, "above", 0),
            line(LineRole::PlainText, "   ", 1),
            line(LineRole::PlainText, "below", 2),
        ];
        let styles = flat_styles();
        let plan = layout(&lines, &g, &styles, Some(&per_char)).unwrap();
        assert_eq!(plan.blocks.len(), 2);
        let step = styles.resolve(LineRole::PlainText).line_height();
        assert!((plan.blocks[0].y - plan.blocks[1].y - 2.0 * step).abs() < 1e-3);
    }

    #[test]
    fn test_secondary_right_aligned_on_same_baseline() {
        let g = PageGeometry::letter();
        let lines = vec![line(LineRole::JobTitle, "Senior Engineer", 0)
            .with_secondary("2020 - Present".to_string(), 1)];
        let plan = layout(&lines, &g, &StyleTable::default(), Some(&per_char)).unwrap();

        assert_eq!(plan.blocks.len(), 2);
        let (title, dates) = (&plan.blocks[0], &plan.blocks[1]);
        assert_eq!(title.y, dates.y);
        assert_eq!(title.x, g.margin_left);
        assert!((dates.x + 14.0 - g.right_edge()).abs() < 1e-3);
    }

    #[test]
    fn test_secondary_drops_below_when_columns_overflow() {
        let g = narrow_geometry();
        let lines = vec![line(LineRole::JobTitle, "Principal Engineer Acme", 0)
            .with_secondary("2020 - Present".to_string(), 1)];
        let plan = layout(&lines, &g, &flat_styles(), Some(&per_char)).unwrap();

        assert_eq!(plan.blocks.len(), 2);
        assert!(plan.blocks[1].y < plan.blocks[0].y);
        assert_eq!(plan.blocks[1].text, "2020 - Present");
        assert_within_page(&plan, &g);
    }

    #[test]
    fn test_section_header_requests_rule_and_keeps_with_next() {
        // Page holds exactly four 12.5pt lines (content height 50).
        let g = PageGeometry::with_uniform_margin(300.0, 150.0, 50.0);
        let styles = flat_styles();
        let lines = vec![
            line(LineRole::PlainText, "one", 0),
            line(LineRole::PlainText, "two", 1),
            line(LineRole::PlainText, "three", 2),
            line(LineRole::SectionHeader, "EXPERIENCE", 3),
            line(LineRole::PlainText, "four", 4),
        ];
        let plan = layout(&lines, &g, &styles, Some(&per_char)).unwrap();

        let header = plan.blocks.iter().find(|b| b.text == "EXPERIENCE").unwrap();
        assert!(header.rule_below);
        assert_eq!(header.page, 1);
        assert_eq!(plan.blocks.iter().find(|b| b.text == "four").unwrap().page, 1);
        assert_within_page(&plan, &g);
    }

    #[test]
    fn test_spacing_before_dropped_at_page_top() {
        let g = PageGeometry::letter();
        let styles = StyleTable::default();
        let lines = vec![line(LineRole::SectionHeader, "SKILLS", 0)];
        let plan = layout(&lines, &g, &styles, Some(&per_char)).unwrap();
        let header_size = styles.resolve(LineRole::SectionHeader).font_size;
        assert_eq!(plan.blocks[0].y, g.top() - header_size);
    }

    #[test]
    fn test_center_aligned_name() {
        let g = PageGeometry::letter();
        let lines = vec![line(LineRole::Name, "Jane Doe", 0)];
        let plan = layout(&lines, &g, &StyleTable::default(), Some(&per_char)).unwrap();
        let expected = g.margin_left + (g.content_width() - 8.0) / 2.0;
        assert!((plan.blocks[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_missing_measure_records_degradation() {
        let lines = vec![line(LineRole::PlainText, "hello world", 0)];
        let plan = layout(&lines, &PageGeometry::letter(), &StyleTable::default(), None).unwrap();
        assert_eq!(plan.degradations, vec![Degradation::MeasurementUnavailable]);
        assert_eq!(plan.blocks.len(), 1);
    }

    #[test]
    fn test_no_lines_yields_single_empty_page() {
        let plan = layout(&[], &PageGeometry::a4(), &StyleTable::default(), Some(&per_char)).unwrap();
        assert_eq!(plan.page_count, 1);
        assert!(plan.blocks.is_empty());
    }

    #[test]
    fn test_nan_measure_does_not_escape_margins() {
        let nan = |_: &str, _: f32, _: FontWeight| f32::NAN;
        let g = PageGeometry::letter();
        let lines = vec![line(LineRole::Name, "Jane Doe", 0)];
        let plan = layout(&lines, &g, &StyleTable::default(), Some(&nan)).unwrap();
        assert!(plan.blocks.iter().all(|b| b.x.is_finite() && b.y.is_finite()));
        assert_within_page(&plan, &g);
    }

    #[test]
    fn test_leading_empty_lines_break_pages() {
        let g = PageGeometry::letter();
        let mut lines: Vec<ClassifiedLine> =
            (0..100).map(|i| line(LineRole::PlainText, "", i)).collect();
        lines.push(line(LineRole::PlainText, "x", 100));
        let plan = layout(&lines, &g, &StyleTable::default(), Some(&HelveticaMeasure)).unwrap();

        assert_eq!(plan.blocks.len(), 1);
        assert_eq!(plan.blocks[0].page, 1);
        assert_eq!(plan.page_count, 2);
        assert_within_page(&plan, &g);
    }

    #[test]
    fn test_long_bullet_splits_across_page_boundary() {
        // 54 lines fit on a page; 50 filler lines leave room for four bullet lines.
        let g = narrow_geometry();
        let mut lines: Vec<ClassifiedLine> = (0..50)
            .map(|i| line(LineRole::PlainText, "filler", i))
            .collect();
        lines.push(line(LineRole::Bullet, &"x".repeat(500), 50));
        let plan = layout(&lines, &g, &flat_styles(), Some(&per_char)).unwrap();

        let bullet: Vec<&DrawBlock> = plan
            .blocks
            .iter()
            .filter(|b| b.style.role == LineRole::Bullet)
            .collect();
        assert_eq!(bullet.len(), 13);
        assert_eq!(bullet.iter().filter(|b| b.page == 0).count(), 4);
        assert_eq!(bullet.iter().filter(|b| b.page == 1).count(), 9);
        assert!(bullet[0].marker.is_some());
        assert!(bullet[1..].iter().all(|b| b.marker.is_none()));
        assert_eq!(bullet[4].y, g.top() - 10.0);
        assert_eq!(plan.page_count, 2);
        assert_within_page(&plan, &g);
    }
}
