//! Path utilities for uploaded files.
//!
//! Uploads are stored flat under a generated `{uuid}.{ext}` name. These helpers
//! normalise client-supplied extensions, check them against an allow-list, and
//! guard the fetch side against names that could escape the upload directory.

use std::path::Path;

use uuid::Uuid;

/// Default list of accepted image upload extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Get the default list of image upload extensions.
///
/// # Examples
///
/// ```
/// use storyteller_common::paths::image_extensions;
///
/// let extensions = image_extensions();
/// assert!(extensions.contains(&"jpg"));
/// assert!(!extensions.contains(&"gif"));
/// ```
#[must_use]
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}

/// Normalise a client-supplied type into a bare lowercase extension.
///
/// Accepts `"png"`, `".PNG"`, or a MIME type such as `"image/png"`.
///
/// # Examples
///
/// ```
/// use storyteller_common::paths::normalize_extension;
///
/// assert_eq!(normalize_extension(" .JPEG "), "jpeg");
/// assert_eq!(normalize_extension("image/png"), "png");
/// ```
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.rsplit('/').next().unwrap_or(trimmed);
    trimmed.trim_start_matches('.').to_lowercase()
}

/// Check whether an extension is in the allow-list (case-insensitive).
///
/// # Examples
///
/// ```
/// use storyteller_common::paths::is_allowed_extension;
///
/// assert!(is_allowed_extension("JPG", &["jpg", "png"]));
/// assert!(!is_allowed_extension("gif", &["jpg", "png"]));
/// ```
pub fn is_allowed_extension<S: AsRef<str>>(ext: &str, allowed: &[S]) -> bool {
    let ext = normalize_extension(ext);
    !ext.is_empty()
        && allowed
            .iter()
            .any(|a| normalize_extension(a.as_ref()) == ext)
}

/// Generate a fresh upload filename of the form `{uuid}.{ext}`.
pub fn upload_filename(id: Uuid, ext: &str) -> String {
    format!("{}.{}", id, normalize_extension(ext))
}

/// Get the lowercase extension of a filename, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check that a stored filename is a single plain path component.
///
/// Rejects empty names, separators, and parent references.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
        && !filename.starts_with('.')
}
