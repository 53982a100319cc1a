use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use futures::future::try_join_all;

use super::domain::MarkSheet;

/// One file handed over for inline storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSheetUpload {
    pub name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl MarkSheetUpload {
    /// Line shown in the selected-files preview.
    pub fn size_note(&self) -> String {
        format!("{} ({:.2} KB)", self.name, self.content.len() as f64 / 1024.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("failed to read mark sheet '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
    #[error("mark sheet payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Encode every upload to an inline data URL.
///
/// Uploads encode independently and concurrently; output order follows the
/// upload order, not completion order. Any failure aborts the whole batch so
/// a submission never stores a partial set.
pub async fn encode_uploads(
    uploads: Vec<MarkSheetUpload>,
) -> Result<Vec<MarkSheet>, AttachmentError> {
    let tasks = uploads.into_iter().map(|upload| async move {
        let encoded = STANDARD.encode(&upload.content);
        Ok(MarkSheet {
            name: upload.name,
            data: format!("data:{};base64,{encoded}", upload.content_type),
            uploaded_at: Utc::now(),
        })
    });

    try_join_all(tasks).await
}

/// Read files from disk into uploads, one concurrent read per path.
pub async fn read_from_paths(paths: &[PathBuf]) -> Result<Vec<MarkSheetUpload>, AttachmentError> {
    let tasks = paths.iter().map(|path| async move {
        let content =
            tokio::fs::read(path)
                .await
                .map_err(|source| AttachmentError::Read {
                    name: path.display().to_string(),
                    source,
                })?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("mark-sheet")
            .to_string();
        Ok(MarkSheetUpload {
            content_type: content_type_for(path).to_string(),
            name,
            content,
        })
    });

    try_join_all(tasks).await
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
