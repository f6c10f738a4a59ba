//! Typesetting and keyword handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::ClassifiedLine;
use crate::errors::AppError;
use crate::matching::{keyword_density, keyword_report, KeywordCount, KeywordReport};
use crate::pipeline::{classify_text, typeset_with_provider, TypesetOutput, TypesetRequest};
use crate::state::AppState;

/// Upper bound on submitted text, in characters.
const MAX_TEXT_CHARS: usize = 200_000;

#[derive(Debug, Deserialize)]
pub struct TypesetBody {
    #[serde(flatten)]
    pub request: TypesetRequest,
    /// Ask the configured hint provider to structure the document first.
    #[serde(default)]
    pub use_model_hint: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub lines: Vec<ClassifiedLine>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordMatchBody {
    pub job_text: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordDensityBody {
    pub text: String,
}

fn check_length(field: &str, text: &str) -> Result<(), AppError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "{field} exceeds {MAX_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

/// POST /api/v1/typeset
///
/// Returns classified lines plus the paginated render plan. Empty text is not an
/// error: the plan is a single empty page with an `input_empty` degradation.
pub async fn handle_typeset(
    State(state): State<AppState>,
    Json(body): Json<TypesetBody>,
) -> Result<Json<TypesetOutput>, AppError> {
    check_length("text", &body.request.text)?;

    let mut request = body.request;
    if request.geometry.is_none() {
        request.geometry = Some(state.geometry);
    }
    let provider = if body.use_model_hint {
        state.hint_provider.clone()
    } else {
        None
    };

    let output = typeset_with_provider(
        request,
        provider,
        state.config.hint_timeout,
        state.measure.clone(),
    )
    .await?;

    info!(
        pages = output.plan.page_count,
        degraded = output.plan.is_degraded(),
        "Typeset request served"
    );
    Ok(Json(output))
}

/// POST /api/v1/classify
pub async fn handle_classify(
    Json(body): Json<ClassifyBody>,
) -> Result<Json<ClassifyResponse>, AppError> {
    check_length("text", &body.text)?;
    Ok(Json(ClassifyResponse {
        lines: classify_text(&body.text),
    }))
}

/// POST /api/v1/keywords/match
pub async fn handle_keyword_match(
    Json(body): Json<KeywordMatchBody>,
) -> Result<Json<KeywordReport>, AppError> {
    if body.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }
    check_length("job_text", &body.job_text)?;
    check_length("resume_text", &body.resume_text)?;
    Ok(Json(keyword_report(&body.job_text, &body.resume_text)))
}

/// POST /api/v1/keywords/density
pub async fn handle_keyword_density(
    Json(body): Json<KeywordDensityBody>,
) -> Result<Json<Vec<KeywordCount>>, AppError> {
    check_length("text", &body.text)?;
    Ok(Json(keyword_density(&body.text)))
}
