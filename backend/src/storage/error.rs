//! # Storage Errors
//!
//! Error taxonomy shared by the codec, the flat-file store and the entity
//! repositories. "Record not found" is not an error: lookups return `Option`
//! and deletes return `false`.

use shared::RecordId;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored line does not decode (wrong field count, bad number, bad date)
    #[error("Malformed {kind} record at line {line}: {reason}")]
    MalformedRecord {
        kind: &'static str,
        line: u64,
        reason: String,
    },

    /// The data directory or file cannot be created, read or written
    #[error("Storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode {kind} record {id}: {reason}")]
    Encoding {
        kind: &'static str,
        id: RecordId,
        reason: String,
    },

    #[error("A {kind} with {field} '{value}' already exists")]
    DuplicateNaturalKey {
        kind: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Student {student_id} already has an active enrollment in course {course_id}")]
    DuplicateActiveEnrollment {
        student_id: RecordId,
        course_id: RecordId,
    },

    /// Every id up to `RecordId::MAX` has been handed out
    #[error("No {kind} ids left to assign")]
    IdsExhausted { kind: &'static str },

    #[error("Lock on the {kind} store is poisoned")]
    LockPoisoned { kind: &'static str },
}

impl StorageError {
    pub fn unavailable(path: &Path, source: io::Error) -> Self {
        StorageError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for the conflicts raised by checked saves
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StorageError::DuplicateNaturalKey { .. } | StorageError::DuplicateActiveEnrollment { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::MalformedRecord {
            kind: "student",
            line: 4,
            reason: "expected 5 fields, found 3".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed student record at line 4: expected 5 fields, found 3");

        let err = StorageError::unavailable(Path::new("dados/alunos.txt"), io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.to_string().starts_with("Storage unavailable at dados/alunos.txt"));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_conflicts() {
        let dup = StorageError::DuplicateNaturalKey {
            kind: "course",
            field: "course code",
            value: "CS101".to_string(),
        };
        assert!(dup.is_conflict());
        assert_eq!(dup.to_string(), "A course with course code 'CS101' already exists");
        assert!(StorageError::DuplicateActiveEnrollment { student_id: 1, course_id: 2 }.is_conflict());
    }

    #[test]
    fn test_ids_exhausted_message() {
        let err = StorageError::IdsExhausted { kind: "enrollment" };
        assert_eq!(err.to_string(), "No enrollment ids left to assign");
        assert!(!err.is_conflict());
    }
}
