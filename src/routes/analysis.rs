use std::time::Instant;

use crate::{
    AppState,
    dto::{AnalyseForm, AnalysisResponse},
    errors::ApiError,
    forms, sentiment, uploads,
};
use axum::{
    Json,
    extract::{Form, Multipart, State},
    response::Redirect,
};
use tracing::info;

/// GET /analysis
pub async fn analysis_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "title": "Sentiment Analysis" }))
}

/// POST /analyse
/// Body: rawtext (form-encoded). Scores the text and reports how long the
/// call took.
pub async fn analyse(
    Form(payload): Form<AnalyseForm>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    forms::validate(&payload).into_result()?;

    let start = Instant::now();
    let scores = sentiment::analyse(&payload.rawtext);
    let elapsed_seconds = start.elapsed().as_secs_f64();

    Ok(Json(AnalysisResponse {
        received_text: payload.rawtext,
        negative: scores.negative,
        neutral: scores.neutral,
        positive: scores.positive,
        elapsed_seconds,
    }))
}

/// GET /analysis_excel
pub async fn excel_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "title": "Spreadsheet Upload" }))
}

/// POST /analysis_excel
/// Multipart body: "filename" file part. The file is saved to the upload
/// folder and never processed further.
pub async fn upload_excel(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InternalError(format!("Reading upload failed: {}", e)))?
    {
        if field.name() != Some("filename") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InternalError(format!("Reading upload failed: {}", e)))?;
        if !file_name.is_empty() {
            let path = uploads::save_upload(&state.config.upload_dir, &file_name, &data)?;
            info!("Spreadsheet saved: {}", path.display());
        }
    }

    Ok(Redirect::to("/analysis_excel"))
}
