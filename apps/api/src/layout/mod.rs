// Layout Engine: word wrap, vertical cursor, and pagination.
// Pure and synchronous; async callers run it inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod measure;
pub mod wrap;

pub use engine::layout;
pub use font_metrics::HelveticaMeasure;
pub use geometry::{Align, Color, FontWeight, PageGeometry, PaperSize, StyleTable, TextStyle};
pub use measure::{FixedWidthEstimate, TextMeasure};
