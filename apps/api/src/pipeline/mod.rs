//! Typesetting pipeline: sanitize → split → (hint | classify) → layout.
//!
//! `typeset` is the synchronous core. `typeset_with_provider` first asks a
//! `HintProvider` for a structuring hint under an explicit timeout and runs the
//! CPU-bound work inside `tokio::task::spawn_blocking`. Every failure on the hint
//! path degrades to heuristic classification; only unusable geometry or styles
//! fail the request.

pub mod hint_provider;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::{classify, split_lines, ClassifiedLine, LineRole, RawLine, StructuringHint};
use crate::errors::{AppError, Degradation, LayoutError};
use crate::layout::{layout, PageGeometry, StyleTable, TextMeasure};
use crate::render::RenderPlan;
use crate::text::sanitize;

pub use hint_provider::{HintProvider, LlmHintProvider};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypesetRequest {
    pub text: String,
    /// Defaults to US Letter.
    #[serde(default)]
    pub geometry: Option<PageGeometry>,
    /// Per-role overrides merged over the default style table.
    #[serde(default)]
    pub styles: Option<StyleTable>,
    /// Untrusted structuring hint: a JSON array of `{role, content, secondary?}`.
    #[serde(default)]
    pub hint: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Heuristic,
    /// A caller-supplied hint passed validation.
    Hint,
    /// A hint from the configured `HintProvider` passed validation.
    ModelHint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesetOutput {
    pub lines: Vec<ClassifiedLine>,
    /// Carries every degradation taken, from classification and layout alike.
    pub plan: RenderPlan,
    pub classification_source: ClassificationSource,
}

impl TypesetOutput {
    pub fn degradations(&self) -> &[Degradation] {
        &self.plan.degradations
    }
}

/// Sanitizes, splits and heuristically classifies `text`.
pub fn classify_text(text: &str) -> Vec<ClassifiedLine> {
    classify(&split_lines(&sanitize(text)))
}

/// Runs the whole pipeline synchronously.
pub fn typeset(
    request: &TypesetRequest,
    measure: Option<&dyn TextMeasure>,
) -> Result<TypesetOutput, LayoutError> {
    let raw = split_lines(&sanitize(&request.text));
    let mut degradations = Vec::new();

    let (mut lines, mut source) = match request.hint.as_ref() {
        Some(value) => match validated_hint(value, &raw) {
            Ok(lines) => (lines, ClassificationSource::Hint),
            Err(reason) => {
                warn!(%reason, "Structuring hint rejected, classifying heuristically");
                degradations.push(Degradation::InvalidHint { reason });
                (classify(&raw), ClassificationSource::Heuristic)
            }
        },
        None => (classify(&raw), ClassificationSource::Heuristic),
    };

    if lines.is_empty() {
        degradations.push(Degradation::InputEmpty);
        lines = vec![ClassifiedLine::new(LineRole::PlainText, String::new(), 0)];
        source = ClassificationSource::Heuristic;
    }

    let geometry = request.geometry.unwrap_or_else(PageGeometry::letter);
    let styles = match &request.styles {
        Some(overrides) => StyleTable::default().merged(overrides),
        None => StyleTable::default(),
    };

    let mut plan = layout(&lines, &geometry, &styles, measure)?;
    degradations.append(&mut plan.degradations);
    plan.degradations = degradations;

    info!(
        lines = lines.len(),
        blocks = plan.blocks.len(),
        pages = plan.page_count,
        source = ?source,
        "Typeset complete"
    );

    Ok(TypesetOutput {
        lines,
        plan,
        classification_source: source,
    })
}

fn validated_hint(value: &serde_json::Value, raw: &[RawLine]) -> Result<Vec<ClassifiedLine>, String> {
    StructuringHint::from_value(value.clone())
        .and_then(|hint| hint.apply(raw))
        .map_err(|e| e.to_string())
}

/// Asks `provider` for a hint when the request carries none, then typesets.
///
/// A provider error or a timeout is recorded as `HintUnavailable`; a provider hint
/// that fails validation is recorded as `InvalidHint`. Either way the document is
/// still typeset heuristically.
pub async fn typeset_with_provider(
    mut request: TypesetRequest,
    provider: Option<Arc<dyn HintProvider>>,
    hint_timeout: Duration,
    measure: Arc<dyn TextMeasure>,
) -> Result<TypesetOutput, AppError> {
    let mut unavailable: Option<Degradation> = None;
    let mut from_provider = false;

    let provider = provider.filter(|_| request.hint.is_none());
    if let Some(provider) = provider {
        let sanitized = sanitize(&request.text);
        match tokio::time::timeout(hint_timeout, provider.structure(&sanitized)).await {
            Ok(Ok(value)) => {
                request.hint = Some(value);
                from_provider = true;
            }
            Ok(Err(e)) => {
                warn!(provider = provider.name(), error = %e, "Hint provider failed, classifying heuristically");
                unavailable = Some(Degradation::HintUnavailable {
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_secs = hint_timeout.as_secs_f32(),
                    "Hint provider timed out, classifying heuristically"
                );
                unavailable = Some(Degradation::HintUnavailable {
                    reason: format!("timed out after {hint_timeout:?}"),
                });
            }
        }
    }

    let mut output = tokio::task::spawn_blocking(move || typeset(&request, Some(&*measure)))
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("typeset task failed")))??;

    if from_provider && output.classification_source == ClassificationSource::Hint {
        output.classification_source = ClassificationSource::ModelHint;
    }
    if let Some(degradation) = unavailable {
        output.plan.degradations.insert(0, degradation);
    }
    Ok(output)
}
