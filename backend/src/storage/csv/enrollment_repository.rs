//! # Enrollment Repository
//!
//! Enrollments live in `{data_directory}/matriculas.txt`:
//!
//! ```text
//! id;studentId;courseId;dd/mm/yyyy;status
//! 1;1;1;03/09/2024;ATIVA
//! ```
//!
//! Status tokens are `ATIVA`, `CANCELADA` and `CONCLUIDA`; any other token is
//! kept as written. Any status may be written over any other; the only rule is
//! one ACTIVE enrollment per student and course, enforced by
//! [`EnrollmentStorage::save_checked`].

use shared::{Enrollment, EnrollmentStatus, RecordId};

use super::codec::{Fields, LineCodec};
use super::connection::CsvConnection;
use super::flat_file_store::{FlatFileStore, Listing};
use crate::storage::error::{Result, StorageError};
use crate::storage::traits::{EnrollmentStorage, RecordStorage};

impl LineCodec for Enrollment {
    const KIND: &'static str = "enrollment";
    const FIELDS: &'static [&'static str] =
        &["id", "student id", "course id", "enrollment date", "status"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.student_id.to_string(),
            self.course_id.to_string(),
            self.formatted_date(),
            self.status.as_token().to_string(),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, String> {
        Ok(Enrollment {
            id: fields.record_id(0)?,
            student_id: fields.number(1)?,
            course_id: fields.number(2)?,
            enrollment_date: fields.date(3)?,
            status: EnrollmentStatus::from_token(&fields.text(4)),
        })
    }
}

#[derive(Clone)]
pub struct EnrollmentRepository {
    store: FlatFileStore<Enrollment>,
}

impl EnrollmentRepository {
    pub fn new(connection: CsvConnection) -> Result<Self> {
        let file_name = connection.files().enrollments.clone();
        let store = FlatFileStore::open(connection, &file_name)?;
        Ok(Self { store })
    }

    pub fn scan(&self) -> Result<Listing<Enrollment>> {
        self.store.scan()
    }
}

impl RecordStorage<Enrollment> for EnrollmentRepository {
    fn save(&self, enrollment: Enrollment) -> Result<Enrollment> {
        self.store.save(enrollment)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        self.store.delete(id)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<Enrollment>> {
        self.store.find_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Enrollment>> {
        self.store.list_all()
    }
}

impl EnrollmentStorage for EnrollmentRepository {
    fn find_by_student(&self, student_id: RecordId) -> Result<Vec<Enrollment>> {
        self.store.find_where(|e| e.student_id == student_id)
    }

    fn find_by_course(&self, course_id: RecordId) -> Result<Vec<Enrollment>> {
        self.store.find_where(|e| e.course_id == course_id)
    }

    fn exists_active_enrollment(&self, student_id: RecordId, course_id: RecordId) -> Result<bool> {
        self.store
            .exists_where(|e| e.is_active_for(student_id, course_id))
    }

    fn save_checked(&self, enrollment: Enrollment) -> Result<Enrollment> {
        self.store.save_checked(enrollment, |existing, candidate| {
            if !candidate.status.is_active() {
                return Ok(());
            }
            let clash = existing.iter().any(|e| {
                e.id != candidate.id && e.is_active_for(candidate.student_id, candidate.course_id)
            });
            if clash {
                return Err(StorageError::DuplicateActiveEnrollment {
                    student_id: candidate.student_id,
                    course_id: candidate.course_id,
                });
            }
            Ok(())
        })
    }
}
