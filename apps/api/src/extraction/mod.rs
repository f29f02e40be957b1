//! Text extraction for uploaded resumes.
//!
//! PDFs go through `pdf-extract`; everything else is decoded as UTF-8 with
//! invalid sequences replaced. A file that yields no usable text is dropped
//! from the batch instead of failing it.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::warn;

use crate::screening::engine::CandidateDocument;

/// A single file received from the client, in upload order.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Returns the document text, or `None` when it is unreadable or blank.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Option<String> {
    let text = if is_pdf(file_name) {
        extract_pdf_text(file_name, bytes)?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn is_pdf(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".pdf")
}

fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> Option<String> {
    // pdf-extract panics on some malformed documents
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            warn!(file = file_name, "PDF extraction failed: {e}");
            None
        }
        Err(_) => {
            warn!(file = file_name, "PDF extraction panicked");
            None
        }
    }
}

/// File name without directories and without its final extension.
/// Falls back to `candidate-<position>` (1-based) when nothing usable remains.
pub fn candidate_name(file_name: Option<&str>, position: usize) -> String {
    file_name
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .and_then(|base| Path::new(base).file_stem())
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| format!("candidate-{position}"))
}

/// Keeps only uploads with readable text, preserving upload order.
pub fn readable_candidates(uploads: Vec<UploadedFile>) -> Vec<CandidateDocument> {
    uploads
        .into_iter()
        .enumerate()
        .filter_map(|(idx, upload)| {
            let file_name = upload.file_name.as_deref().unwrap_or_default();
            match extract_text(file_name, &upload.bytes) {
                Some(text) => Some(CandidateDocument {
                    name: candidate_name(upload.file_name.as_deref(), idx + 1),
                    text,
                }),
                None => {
                    warn!(file = file_name, position = idx + 1, "Skipping unreadable resume");
                    None
                }
            }
        })
        .collect()
}
