//! Flat on-disk storage for uploaded drawings.
//!
//! Every upload lands directly in the configured directory as
//! `{uuid}.{ext}`. Files are written once and never modified.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use storyteller_common::paths::{
    extension_of, is_allowed_extension, is_safe_filename, normalize_extension, upload_filename,
};
use storyteller_common::{Error, Result};
use uuid::Uuid;

use crate::config::UploadsConfig;

/// Metadata about a stored upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Generated identifier, also the file stem.
    pub id: Uuid,
    /// File name inside the upload directory.
    pub filename: String,
    /// Absolute or config-relative path of the written file.
    pub path: PathBuf,
    /// Decoded image bytes.
    pub bytes: Bytes,
}

impl StoredUpload {
    /// Data URL of the stored image, as handed to the vision model.
    pub fn data_url(&self) -> String {
        data_url(&self.bytes)
    }
}

/// Filesystem manager for uploads.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    /// Create a store rooted at `dir` accepting the given extensions.
    pub fn new(dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            allowed_extensions,
        }
    }

    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(config.dir.clone(), config.allowed_extensions.clone())
    }

    /// Directory uploads are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode and store a base64 image.
    ///
    /// `ext` may be a bare extension (`"png"`) or a MIME type
    /// (`"image/png"`). The payload may carry a `data:*;base64,` prefix.
    /// The bytes must decode as an image before anything is written.
    pub fn save_base64(&self, data: &str, ext: &str) -> Result<StoredUpload> {
        let ext = normalize_extension(ext);
        if !is_allowed_extension(&ext, &self.allowed_extensions) {
            return Err(Error::validation(format!("Unsupported image type: {ext}")));
        }

        let bytes = decode_data(data)?;

        image::load_from_memory(&bytes)
            .map_err(|e| Error::validation(format!("Invalid image data: {e}")))?;

        std::fs::create_dir_all(&self.dir)?;

        let id = Uuid::new_v4();
        let filename = upload_filename(id, &ext);
        let path = self.dir.join(&filename);
        std::fs::write(&path, &bytes)?;

        tracing::info!(
            "Stored upload {} ({} bytes) in {}",
            filename,
            bytes.len(),
            self.dir.display()
        );

        Ok(StoredUpload {
            id,
            filename,
            path,
            bytes: Bytes::from(bytes),
        })
    }

    /// Resolve a stored filename to its path.
    ///
    /// Rejects anything that is not a plain file name with an allowed
    /// extension, then checks the file exists.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if !is_safe_filename(filename) {
            return Err(Error::validation(format!("Invalid upload name: {filename}")));
        }

        let allowed = extension_of(filename)
            .map(|ext| is_allowed_extension(&ext, &self.allowed_extensions))
            .unwrap_or(false);
        if !allowed {
            return Err(Error::validation(format!("Invalid upload name: {filename}")));
        }

        let path = self.dir.join(filename);
        if !path.is_file() {
            return Err(Error::not_found(filename.to_string()));
        }
        Ok(path)
    }
}

/// Build a `data:image/jpeg;base64,...` URL for raw image bytes.
pub fn data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

/// Content type to serve a stored upload with.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Decode a base64 payload, with or without a `data:*;base64,` prefix.
pub fn decode_data(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(strip_data_url_prefix(data))
        .map_err(|e| Error::validation(format!("Invalid base64 data: {e}")))
}

fn strip_data_url_prefix(data: &str) -> &str {
    let data = data.trim();
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(";base64,") {
            return payload.trim();
        }
    }
    data
}
