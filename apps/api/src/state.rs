use std::sync::Arc;

use crate::config::Config;
use crate::layout::{PageGeometry, TextMeasure};
use crate::pipeline::HintProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Structuring-hint backend. `None` when no API key is configured.
    pub hint_provider: Option<Arc<dyn HintProvider>>,
    /// Measurement used for every layout request.
    pub measure: Arc<dyn TextMeasure>,
    /// Page geometry applied when a request does not supply its own.
    pub geometry: PageGeometry,
}
