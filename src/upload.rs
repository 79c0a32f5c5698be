//! Dropzone acceptance rules.
//!
//! A dropped file is accepted when its MIME type is on the allow-list and it
//! fits under the size cap. The MIME type comes from the file extension, the
//! same way a browser fills in `File.type`; the bytes are never sniffed.
//!
//! [`UploadRules::partition`] splits a drop into accepted and rejected files,
//! matching the dropzone's `onDrop`/`onReject` pair.

use crate::config::UploadConfig;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum RejectReason {
    FileTooLarge { size: u64, max: u64 },
    FileInvalidType { mime: String },
    UnknownType,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::FileTooLarge { size, max } => {
                write!(f, "file is {size} bytes, limit is {max}")
            }
            RejectReason::FileInvalidType { mime } => write!(f, "type {mime} is not accepted"),
            RejectReason::UnknownType => f.write_str("file type could not be determined"),
        }
    }
}

/// A file offered to the dropzone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// A file that passed the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedFile {
    pub path: PathBuf,
    pub mime: &'static str,
    pub size: u64,
}

/// A file that failed the rules, with the first rule it broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub size: u64,
    pub reason: RejectReason,
}

/// Result of a single drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropOutcome {
    pub accepted: Vec<AcceptedFile>,
    pub rejected: Vec<RejectedFile>,
}

/// Map a path's extension to an image MIME type.
///
/// Covers every raster format the `image` crate knows by extension, plus
/// `svg`, which it does not decode but the dropzone accepts.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if ext == "svg" {
        return Some("image/svg+xml");
    }
    image::ImageFormat::from_extension(&ext).map(|format| format.to_mime_type())
}

/// Size cap and MIME allow-list for the dropzone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    max_bytes: u64,
    accept: Vec<String>,
}

impl UploadRules {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            accept: config.accept.clone(),
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check one file. Type is checked before size.
    pub fn check(&self, path: &Path, size: u64) -> Result<&'static str, RejectReason> {
        let mime = mime_for_path(path).ok_or(RejectReason::UnknownType)?;
        if !self.accept.iter().any(|accepted| accepted == mime) {
            return Err(RejectReason::FileInvalidType {
                mime: mime.to_string(),
            });
        }
        if size > self.max_bytes {
            return Err(RejectReason::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(mime)
    }

    /// Split a drop into accepted and rejected files, preserving order.
    pub fn partition(&self, files: impl IntoIterator<Item = DroppedFile>) -> DropOutcome {
        let mut outcome = DropOutcome::default();
        for DroppedFile { path, size } in files {
            match self.check(&path, size) {
                Ok(mime) => outcome.accepted.push(AcceptedFile { path, mime, size }),
                Err(reason) => outcome.rejected.push(RejectedFile { path, size, reason }),
            }
        }
        tracing::debug!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "drop partitioned"
        );
        outcome
    }
}
