//! Media payloads for multipart upload
//!
//! The file content is held as [`Bytes`], so handing it to the transport (and
//! to the one credential retry) shares the buffer instead of copying it.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Temporary media categories accepted by `media/upload`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Voice,
    Video,
    File,
}

impl_wire_name_conversions!(MediaType {
    Image => "image",
    Voice => "voice",
    Video => "video",
    File => "file",
});

/// A file to upload
#[derive(Clone, PartialEq, Eq)]
pub struct Media {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

impl Media {
    /// Media from an in-memory buffer
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), content_type: None, data: data.into() }
    }

    /// Media read from disk; the file name becomes the upload name.
    ///
    /// This reads the whole file synchronously.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| "media".to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self::from_bytes(filename, data))
    }

    /// Declare a MIME type for the multipart part
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Upload file name
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared MIME type, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File content
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for an empty file
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Media")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Result of a temporary media upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaUploadResult {
    #[serde(rename = "type")]
    pub media_type: String,
    /// Valid for three days
    pub media_id: String,
    /// Unix seconds, sent as a string
    pub created_at: String,
}

impl MediaUploadResult {
    /// Parsed `created_at`, `None` if the platform sent something unexpected
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let secs = self.created_at.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}
