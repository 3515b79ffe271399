//! Upload storage.
//!
//! Character drawings arrive base64-encoded, are validated as images, and
//! are written flat into the configured upload directory.

mod storage;

pub use storage::{content_type_for, data_url, decode_data, StoredUpload, UploadStore};
