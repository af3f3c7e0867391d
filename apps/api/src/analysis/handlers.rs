use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::AnalysisOutcome;
use crate::errors::AppError;
use crate::pdf::extract_upload;
use crate::state::AppState;

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    job_title: Option<String>,
}

struct UploadedFile {
    file_name: Option<String>,
    data: Bytes,
}

/// POST /upload-cv
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let request_id = Uuid::new_v4();

    let mut multipart = multipart.map_err(|rejection| {
        warn!(%request_id, "Upload rejected, not a multipart body: {rejection}");
        AppError::MissingFields
    })?;
    let form = read_upload_form(&mut multipart).await?;

    let (file, job_title) = match (form.file, form.job_title) {
        (Some(file), Some(job_title)) => (file, job_title),
        _ => {
            warn!(%request_id, "Upload rejected, file or job_title missing");
            return Err(AppError::MissingFields);
        }
    };

    if !is_pdf_filename(file.file_name.as_deref()) {
        warn!(%request_id, "Upload rejected, not a PDF filename: {:?}", file.file_name);
        return Err(AppError::InvalidFile);
    }

    info!(
        %request_id,
        "Received CV {:?} ({} bytes) for job title {:?}",
        file.file_name,
        file.data.len(),
        job_title
    );

    let uploads_dir = state.config.uploads_dir.clone();
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .with_context(|| format!("Failed to create uploads directory {}", uploads_dir.display()))?;

    let cv_text = extract_upload(uploads_dir, request_id, file.data).await?;
    if cv_text.trim().is_empty() {
        warn!(%request_id, "Upload rejected, no extractable text");
        return Err(AppError::EmptyDocument);
    }
    info!(%request_id, "Extracted {} chars of CV text", cv_text.chars().count());

    match state.analyzer.analyze(&cv_text, &job_title).await {
        AnalysisOutcome::Failure(detail) if state.config.strict_upstream_status => {
            warn!(%request_id, "Analysis failed: {}", detail.error);
            Err(AppError::Upstream(detail))
        }
        outcome => {
            match &outcome {
                AnalysisOutcome::Success(_) => info!(%request_id, "Analysis succeeded"),
                AnalysisOutcome::Failure(detail) => {
                    warn!(%request_id, "Analysis failed: {}", detail.error)
                }
            }
            Ok(Json(outcome))
        }
    }
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    // The first part of each name wins. A job_title sent as a file is not a form value.
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" if form.file.is_none() => {
                let file_name = field.file_name().map(str::to_owned);
                let data = field.bytes().await?;
                form.file = Some(UploadedFile { file_name, data });
            }
            "job_title" if form.job_title.is_none() && field.file_name().is_none() => {
                form.job_title = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn is_pdf_filename(file_name: Option<&str>) -> bool {
    file_name.is_some_and(|name| !name.is_empty() && name.to_lowercase().ends_with(".pdf"))
}
