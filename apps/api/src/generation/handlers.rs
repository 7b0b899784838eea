//! Axum route handlers for the resume generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::skills::merge_skill_groups;
use crate::layout::render_resume_blocking;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

/// POST /api/resume/generate
///
/// Renders the submitted resume and returns it as an inline PDF.
/// Free-form skill rows are folded into the fixed skill lists first.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<ResumeRecord>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(mut record) = payload.map_err(|e| AppError::MalformedRecord(e.body_text()))?;

    let groups = std::mem::take(&mut record.skill_groups);
    merge_skill_groups(&mut record.skills, groups);

    let render_id = Uuid::new_v4();
    info!(%render_id, "Rendering resume");

    let rendered = render_resume_blocking(record, state.geometry.clone()).await?;

    info!(
        %render_id,
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "Resume rendered"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=resume.pdf"),
        ],
        rendered.bytes,
    ))
}
