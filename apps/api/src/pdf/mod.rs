//! PDF text extraction for uploaded CVs.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub mod scratch;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::errors::panic_message;
use scratch::ScratchUpload;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF: {0}")]
    Pdf(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),

    #[error("Extraction task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Reads every page in document order and concatenates the page texts.
/// Pages without text are skipped; nothing else is normalised.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, ExtractError> {
    let pages = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_by_pages(path)))
        .map_err(|payload| ExtractError::Panicked(panic_message(payload.as_ref())))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let page_count = pages.len();
    let text: String = pages.into_iter().filter(|page| !page.is_empty()).collect();

    debug!(
        "Extracted {} chars from {} pages of {}",
        text.len(),
        page_count,
        path.display()
    );
    Ok(text)
}

/// Persists the upload to a scratch file under `dir`, extracts its text and removes the
/// file again. Runs on the blocking pool; the scratch file is gone once this returns,
/// whatever the outcome.
pub async fn extract_upload(
    dir: PathBuf,
    request_id: Uuid,
    data: Bytes,
) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || {
        let scratch = ScratchUpload::persist(&dir, request_id, &data)?;
        extract_text_from_pdf(scratch.path())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::{graphics_only_pdf, text_pdf, unresolved_font_pdf};

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::io::Write::write_all(&mut file, bytes).unwrap();
        file
    }

    #[test]
    fn test_extracts_text_in_page_order() {
        let file = write_temp(&text_pdf(&[&["Jane Doe", "Rust developer"], &["Experience Acme"]]));
        let text = extract_text_from_pdf(file.path()).unwrap();

        let name = text.find("Jane").expect("first page text");
        let company = text.find("Acme").expect("second page text");
        assert!(text.contains("Rust"));
        assert!(name < company);
    }

    #[test]
    fn test_graphics_only_pdf_has_no_text() {
        let file = write_temp(&graphics_only_pdf());
        let text = extract_text_from_pdf(file.path()).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let file = write_temp(b"this is plain text, not a PDF");
        assert!(extract_text_from_pdf(file.path()).is_err());
    }

    #[test]
    fn test_parser_panic_is_contained() {
        let file = write_temp(&unresolved_font_pdf());
        match extract_text_from_pdf(file.path()) {
            Err(ExtractError::Panicked(message)) => assert!(!message.is_empty()),
            other => panic!("expected a contained parser panic, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_text_from_pdf(&dir.path().join("absent.pdf")).is_err());
    }

    #[tokio::test]
    async fn test_extract_upload_cleans_up_on_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();

        let text = extract_upload(
            dir.path().to_path_buf(),
            Uuid::new_v4(),
            Bytes::from(text_pdf(&[&["Jane Doe"]])),
        )
        .await
        .unwrap();
        assert!(text.contains("Jane"));

        let result = extract_upload(
            dir.path().to_path_buf(),
            Uuid::new_v4(),
            Bytes::from_static(b"garbage"),
        )
        .await;
        assert!(result.is_err());

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_extract_upload_into_missing_dir_fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_upload(
            dir.path().join("does-not-exist"),
            Uuid::new_v4(),
            Bytes::from(text_pdf(&[&["x"]])),
        )
        .await;
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
