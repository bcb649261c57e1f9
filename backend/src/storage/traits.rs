//! # Storage Traits
//!
//! This module defines the storage abstraction traits that the domain layer
//! works against. The flat-file repositories in [`super::csv`] implement them.
//!
//! All operations are synchronous and run on the caller's thread.

use shared::{Course, Enrollment, Professor, RecordId, Student};

use super::error::Result;

/// A persistable record with a store-assigned surrogate id
pub trait Record: Clone + Send + Sync + 'static {
    /// Current id, `0` until the record is first saved
    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);
}

impl Record for Student {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Record for Professor {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Record for Course {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Record for Enrollment {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// CRUD operations every entity repository exposes
pub trait RecordStorage<R: Record>: Send + Sync {
    /// Insert (id 0, a new id is assigned) or replace in place (existing id).
    /// Returns the record with its id.
    fn save(&self, record: R) -> Result<R>;

    /// Remove the record with this id. Returns false if there was none.
    fn delete(&self, id: RecordId) -> Result<bool>;

    /// Retrieve a specific record by id
    fn find_by_id(&self, id: RecordId) -> Result<Option<R>>;

    /// All readable records in file order
    fn list_all(&self) -> Result<Vec<R>>;
}

/// Trait defining the interface for student storage operations
pub trait StudentStorage: RecordStorage<Student> {
    fn exists_by_registration_number(&self, registration_number: &str) -> Result<bool>;

    /// Save, rejecting a registration number already held by another student
    fn save_checked(&self, student: Student) -> Result<Student>;
}

/// Trait defining the interface for professor storage operations
pub trait ProfessorStorage: RecordStorage<Professor> {
    fn exists_by_staff_code(&self, staff_code: &str) -> Result<bool>;

    /// Save, rejecting a staff code already held by another professor
    fn save_checked(&self, professor: Professor) -> Result<Professor>;
}

/// Trait defining the interface for course storage operations
pub trait CourseStorage: RecordStorage<Course> {
    fn exists_by_course_code(&self, course_code: &str) -> Result<bool>;

    /// Courses taught by a professor, in file order
    fn find_by_professor(&self, professor_id: RecordId) -> Result<Vec<Course>>;

    /// Save, rejecting a course code already held by another course
    fn save_checked(&self, course: Course) -> Result<Course>;
}

/// Trait defining the interface for enrollment storage operations
pub trait EnrollmentStorage: RecordStorage<Enrollment> {
    fn find_by_student(&self, student_id: RecordId) -> Result<Vec<Enrollment>>;

    fn find_by_course(&self, course_id: RecordId) -> Result<Vec<Enrollment>>;

    /// True if the student has an ACTIVE enrollment in the course
    fn exists_active_enrollment(&self, student_id: RecordId, course_id: RecordId) -> Result<bool>;

    /// Save, rejecting a second ACTIVE enrollment for the same student and course
    fn save_checked(&self, enrollment: Enrollment) -> Result<Enrollment>;
}
