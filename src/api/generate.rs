//! Blog generator endpoint
//!
//! `GET /` is the initial view, `POST /` submits the form. Both answer with
//! a [`BlogResponse`]; failures go through [`ApiError`] so they keep the
//! same shape.

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};

use crate::error::ApiError;
use crate::schemas::{BlogRequest, BlogResponse};
use crate::server::state::AppState;
use crate::services::GenerationError;
use crate::utils::with_timeout;

/// GET /
pub async fn show_form(State(state): State<AppState>) -> Result<Json<BlogResponse>, ApiError> {
    if !state.generator.pool().is_configured() {
        return Err(GenerationError::NotConfigured.into());
    }
    Ok(Json(BlogResponse::empty()))
}

/// POST /
pub async fn generate_blog(
    State(state): State<AppState>,
    form: Result<Form<BlogRequest>, FormRejection>,
) -> Result<Json<BlogResponse>, ApiError> {
    let Form(request) = form.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let timeout = state.generation_timeout();
    let text = with_timeout(timeout, state.generator.generate(&request))
        .await
        .map_err(|err| {
            err.unwrap_or_else(|after| {
                tracing::warn!(timeout_secs = after.as_secs(), "Generation timed out");
                GenerationError::TimedOut
            })
        })?;

    Ok(Json(BlogResponse::success(text)))
}
