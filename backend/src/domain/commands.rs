//! Domain-level command and result types
//!
//! Services take these instead of raw records so that field validation and
//! trimming happen in one place. Update commands carry only the fields that
//! change.

pub mod student {
    use shared::RecordId;

    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub registration_number: String,
        pub email: String,
        pub phone: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub student_id: RecordId,
        pub name: Option<String>,
        pub registration_number: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
    }
}

pub mod professor {
    use shared::RecordId;

    #[derive(Debug, Clone)]
    pub struct CreateProfessorCommand {
        pub name: String,
        pub staff_code: String,
        pub email: String,
        pub department: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfessorCommand {
        pub professor_id: RecordId,
        pub name: Option<String>,
        pub staff_code: Option<String>,
        pub email: Option<String>,
        pub department: Option<String>,
    }
}

pub mod course {
    use serde::Serialize;
    use shared::{Course, RecordId};

    #[derive(Debug, Clone)]
    pub struct CreateCourseCommand {
        pub title: String,
        pub course_code: String,
        pub credit_hours: u32,
        pub professor_id: RecordId,
        pub term: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateCourseCommand {
        pub course_id: RecordId,
        pub title: Option<String>,
        pub course_code: Option<String>,
        pub credit_hours: Option<u32>,
        pub professor_id: Option<RecordId>,
        pub term: Option<String>,
    }

    /// A course with its professor's name resolved for display
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CourseWithProfessor {
        pub course: Course,
        pub professor_name: String,
    }
}

pub mod enrollment {
    use shared::{EnrollmentStatus, RecordId};

    /// `enrollment_date` is dd/mm/yyyy text, as typed by the user
    #[derive(Debug, Clone)]
    pub struct CreateEnrollmentCommand {
        pub student_id: RecordId,
        pub course_id: RecordId,
        pub enrollment_date: String,
        pub status: EnrollmentStatus,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateEnrollmentCommand {
        pub enrollment_id: RecordId,
        pub student_id: Option<RecordId>,
        pub course_id: Option<RecordId>,
        pub enrollment_date: Option<String>,
        pub status: Option<EnrollmentStatus>,
    }

    #[derive(Debug, Clone)]
    pub struct ChangeStatusCommand {
        pub enrollment_id: RecordId,
        pub status: EnrollmentStatus,
    }
}

pub mod roster {
    use serde::Serialize;
    use shared::{EnrollmentStatus, RecordId};

    /// One enrollment joined with the names it refers to. References that
    /// no longer resolve hold [`crate::domain::roster_service::NOT_FOUND`].
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct RosterEntry {
        pub enrollment_id: RecordId,
        pub student_name: String,
        pub course_title: String,
        pub professor_name: String,
        pub enrollment_date: String,
        pub status: EnrollmentStatus,
    }
}
