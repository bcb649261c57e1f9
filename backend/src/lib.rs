//! # Enrollment Tracker Backend
//!
//! Flat-file record keeping for students, professors, courses and
//! enrollments. All operations are synchronous:
//! - `storage` persists each entity type in its own `;`-delimited text file
//! - `domain` validates input and resolves references for display
//! - `config` locates the data directory and file names

use anyhow::{Context, Result};
use log::info;

pub mod config;
pub mod domain;
pub mod storage;

pub use config::RecordKeeperConfig;
pub use storage::csv::CsvConnection;

use domain::{CourseService, EnrollmentService, ProfessorService, RosterService, StudentService};
use storage::csv::{CourseRepository, EnrollmentRepository, ProfessorRepository, StudentRepository};

/// Main backend struct that wires every service onto one data directory
pub struct Backend {
    pub connection: CsvConnection,
    pub student_service: StudentService,
    pub professor_service: ProfessorService,
    pub course_service: CourseService,
    pub enrollment_service: EnrollmentService,
    pub roster_service: RosterService,
}

impl Backend {
    /// Open the data directory named by `config`, creating it if needed.
    ///
    /// Each repository is opened once and shared by clone, so every service
    /// draws ids from the same counter.
    pub fn new(config: &RecordKeeperConfig) -> Result<Self> {
        let connection = CsvConnection::from_config(config)
            .context("Failed to open data directory")?;
        info!("Using data directory {:?}", connection.base_directory());

        let students = StudentRepository::new(connection.clone())?;
        let professors = ProfessorRepository::new(connection.clone())?;
        let courses = CourseRepository::new(connection.clone())?;
        let enrollments = EnrollmentRepository::new(connection.clone())?;

        let student_service = StudentService::new(students.clone());
        let professor_service = ProfessorService::new(professors.clone());
        let course_service = CourseService::new(courses.clone(), professors.clone());
        let enrollment_service =
            EnrollmentService::new(enrollments.clone(), students.clone(), courses.clone());
        let roster_service = RosterService::new(students, professors, courses, enrollments);

        Ok(Backend {
            connection,
            student_service,
            professor_service,
            course_service,
            enrollment_service,
            roster_service,
        })
    }
}
