//! Axum route handlers for the Screening API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{readable_candidates, UploadedFile};
use crate::screening::engine::{ScoreResult, ScreeningError};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

/// Decoded `multipart/form-data` body of an analyze request.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub job_description: String,
    pub resumes: Vec<UploadedFile>,
}

/// POST /analyze
///
/// Scores every readable resume against the job description. Unreadable
/// files are skipped; results keep upload order.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ScoreResult>>, AppError> {
    let batch_id = Uuid::new_v4();
    let span = info_span!("analyze", %batch_id);

    let form = read_analyze_form(&mut multipart)
        .instrument(span.clone())
        .await?;

    if form.job_description.trim().is_empty() {
        return Err(ScreeningError::EmptyReference.into());
    }
    if form.resumes.is_empty() {
        return Err(ScreeningError::NoCandidates.into());
    }

    let uploaded = form.resumes.len();
    let engine = state.engine.clone();
    let scoring_span = span.clone();

    // Extraction and scoring are CPU-bound
    let results = tokio::task::spawn_blocking(move || {
        let _entered = scoring_span.enter();
        let candidates = readable_candidates(form.resumes);
        engine.score_batch(&form.job_description, &candidates)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("Scoring task failed: {e}")))??;

    span.in_scope(|| {
        info!(
            uploaded,
            scored = results.len(),
            dropped = uploaded - results.len(),
            "Batch scored"
        )
    });

    Ok(Json(results))
}

async fn read_analyze_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => form.job_description = field.text().await?,
            Some(RESUMES_FIELD) => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!(file = ?file_name, size = bytes.len(), "Received resume");
                form.resumes.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            other => debug!(field = ?other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}
