//! # Course Repository
//!
//! Courses live in `{data_directory}/disciplinas.txt`:
//!
//! ```text
//! id;title;courseCode;creditHours;professorId;term
//! 2;Algorithms;CS101;60;3;2024.2
//! ```
//!
//! `professorId` is a soft reference: it is stored as given and may point at a
//! professor that no longer exists.

use shared::{Course, RecordId};

use super::codec::{Fields, LineCodec};
use super::connection::CsvConnection;
use super::flat_file_store::{FlatFileStore, Listing};
use crate::storage::error::{Result, StorageError};
use crate::storage::traits::{CourseStorage, RecordStorage};

impl LineCodec for Course {
    const KIND: &'static str = "course";
    const FIELDS: &'static [&'static str] =
        &["id", "title", "course code", "credit hours", "professor id", "term"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.course_code.clone(),
            self.credit_hours.to_string(),
            self.professor_id.to_string(),
            self.term.clone(),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, String> {
        Ok(Course {
            id: fields.record_id(0)?,
            title: fields.text(1),
            course_code: fields.text(2),
            credit_hours: fields.number(3)?,
            professor_id: fields.number(4)?,
            term: fields.text(5),
        })
    }
}

#[derive(Clone)]
pub struct CourseRepository {
    store: FlatFileStore<Course>,
}

impl CourseRepository {
    pub fn new(connection: CsvConnection) -> Result<Self> {
        let file_name = connection.files().courses.clone();
        let store = FlatFileStore::open(connection, &file_name)?;
        Ok(Self { store })
    }

    pub fn scan(&self) -> Result<Listing<Course>> {
        self.store.scan()
    }
}

impl RecordStorage<Course> for CourseRepository {
    fn save(&self, course: Course) -> Result<Course> {
        self.store.save(course)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        self.store.delete(id)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<Course>> {
        self.store.find_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Course>> {
        self.store.list_all()
    }
}

impl CourseStorage for CourseRepository {
    fn exists_by_course_code(&self, course_code: &str) -> Result<bool> {
        self.store.exists_where(|c| c.course_code == course_code)
    }

    fn find_by_professor(&self, professor_id: RecordId) -> Result<Vec<Course>> {
        self.store.find_where(|c| c.professor_id == professor_id)
    }

    fn save_checked(&self, course: Course) -> Result<Course> {
        self.store.save_checked(course, |existing, candidate| {
            if existing
                .iter()
                .any(|c| c.id != candidate.id && c.course_code == candidate.course_code)
            {
                return Err(StorageError::DuplicateNaturalKey {
                    kind: Course::KIND,
                    field: "course code",
                    value: candidate.course_code.clone(),
                });
            }
            Ok(())
        })
    }
}
