//! # Domain Module
//!
//! Services that validate user input and drive the storage layer. Each
//! service owns clones of the repositories it needs; clones share the
//! repository's id counter and lock.

pub mod commands;
pub mod course_service;
pub mod enrollment_service;
pub mod professor_service;
pub mod roster_service;
pub mod student_service;
pub mod validation;

pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use professor_service::ProfessorService;
pub use roster_service::{RosterService, NOT_FOUND};
pub use student_service::StudentService;
pub use validation::ValidationError;
