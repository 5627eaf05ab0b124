use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::uploads as upload_db;
use crate::error::{AppError, AppResult};
use crate::models::uploads::{self, NewUpload};

/// Public path prefix the stored files are served under.
pub const PUBLIC_PATH: &str = "/uploads";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Accepted content types and the extension a stored file gets. The client's
/// file name never decides how `/uploads` serves the file.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("application/pdf", "pdf"),
];

/// Local-disk storage for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
    public_base_url: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: u64, public_base_url: &str) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Raster images and PDFs up to the configured size are accepted. Returns
    /// the extension to store the file under.
    pub fn validate(&self, content_type: &str, size: u64) -> AppResult<&'static str> {
        let Some(ext) = extension_for(content_type) else {
            return Err(AppError::InvalidArgument(format!(
                "unsupported content type {content_type:?}"
            )));
        };
        if size == 0 {
            return Err(AppError::InvalidArgument("file is empty".to_string()));
        }
        if size > self.max_bytes {
            return Err(AppError::InvalidArgument(format!(
                "file is {size} bytes, the limit is {} bytes",
                self.max_bytes
            )));
        }
        Ok(ext)
    }

    pub fn public_url(&self, stored_name: &str) -> String {
        format!("{}{}/{}", self.public_base_url, PUBLIC_PATH, stored_name)
    }

    /// Write `content` to disk under a fresh name and record it.
    pub async fn save<R>(
        &self,
        db: &DatabaseConnection,
        original_name: &str,
        content_type: Option<&str>,
        size: u64,
        mut content: R,
    ) -> AppResult<uploads::Model>
    where
        R: AsyncRead + Unpin,
    {
        let content_type = content_type.unwrap_or(FALLBACK_CONTENT_TYPE).to_ascii_lowercase();
        let ext = self.validate(&content_type, size)?;

        let stored_name = stored_name(ext);
        let path = self.dir.join(&stored_name);

        let mut file = tokio::fs::File::create(&path).await?;
        let written = tokio::io::copy(&mut content, &mut file).await?;

        let record = upload_db::insert_upload(
            db,
            NewUpload {
                original_name: display_name(original_name),
                stored_name: stored_name.clone(),
                content_type,
                size: written as i64,
                url: self.public_url(&stored_name),
            },
        )
        .await;

        match record {
            Ok(upload) => {
                info!("Stored upload {} ({} bytes)", upload.stored_name, written);
                Ok(upload)
            }
            Err(e) => {
                if let Err(io) = tokio::fs::remove_file(&path).await {
                    warn!("Failed to remove orphaned upload {}: {}", path.display(), io);
                }
                Err(e)
            }
        }
    }

    /// Delete an upload record and its file. Returns `false` when no record
    /// exists.
    pub async fn remove(&self, db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
        let Some(upload) = upload_db::get_upload_by_id(db, id).await? else {
            return Ok(false);
        };

        upload_db::delete_upload(db, id).await?;

        let path = self.dir.join(&upload.stored_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Upload file {} could not be removed: {}", path.display(), e);
        }
        Ok(true)
    }
}

/// Generated on-disk name: a fresh UUID plus `ext`.
pub fn stored_name(ext: &str) -> String {
    format!("{}.{ext}", Uuid::new_v4())
}

/// Extension for an accepted content type, ignoring any parameters such as
/// `; charset=...`.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim();
    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

/// Client-supplied file name without any directory components.
fn display_name(original_name: &str) -> String {
    Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload")
        .to_string()
}
