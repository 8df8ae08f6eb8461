//! Error types for reading and writing tree records.

use thiserror::Error;

/// Errors that can occur while converting between trees and records.
///
/// Problems inside child records (unknown type tags, empty children) are
/// recovered from and logged; these variants cover what cannot be recovered.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerialError {
    /// The top-level record has no name, value or children.
    #[error("record has no name, value or children")]
    EmptyRecord,

    /// The record was written by a newer format version.
    #[error("record format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the record
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// A type tag string is not of the form `class|@|module`.
    #[error("invalid type tag '{tag}'")]
    InvalidTypeTag {
        /// The malformed tag
        tag: String,
    },
}

impl SerialError {
    /// Check if this error rejected the record's format version.
    pub fn is_version_error(&self) -> bool {
        matches!(self, SerialError::UnsupportedVersion { .. })
    }

    /// Check if this error is about a malformed record or tag.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SerialError::EmptyRecord | SerialError::InvalidTypeTag { .. }
        )
    }
}

// Conversion from SerialError to the main Error type
impl From<SerialError> for crate::Error {
    fn from(err: SerialError) -> Self {
        crate::Error::Serial(err)
    }
}
