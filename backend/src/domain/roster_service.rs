//! Joins enrollments with the students, courses and professors they refer
//! to. References are soft, so any of them may be gone.

use anyhow::Result;
use log::debug;
use shared::RecordId;
use std::collections::HashMap;

use crate::domain::commands::roster::RosterEntry;
use crate::storage::csv::{CourseRepository, EnrollmentRepository, ProfessorRepository, StudentRepository};
use crate::storage::traits::RecordStorage;

/// Shown in place of a name whose record no longer exists
pub const NOT_FOUND: &str = "not found";

#[derive(Clone)]
pub struct RosterService {
    student_repository: StudentRepository,
    professor_repository: ProfessorRepository,
    course_repository: CourseRepository,
    enrollment_repository: EnrollmentRepository,
}

impl RosterService {
    pub fn new(
        student_repository: StudentRepository,
        professor_repository: ProfessorRepository,
        course_repository: CourseRepository,
        enrollment_repository: EnrollmentRepository,
    ) -> Self {
        Self {
            student_repository,
            professor_repository,
            course_repository,
            enrollment_repository,
        }
    }

    /// One entry per enrollment, in file order
    pub fn enrollment_roster(&self) -> Result<Vec<RosterEntry>> {
        let students: HashMap<RecordId, String> = self
            .student_repository
            .list_all()?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();
        let professors: HashMap<RecordId, String> = self
            .professor_repository
            .list_all()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let courses: HashMap<RecordId, (String, RecordId)> = self
            .course_repository
            .list_all()?
            .into_iter()
            .map(|c| (c.id, (c.title, c.professor_id)))
            .collect();

        let enrollments = self.enrollment_repository.list_all()?;
        debug!("Building roster for {} enrollments", enrollments.len());

        let roster = enrollments
            .into_iter()
            .map(|enrollment| {
                let course = courses.get(&enrollment.course_id);
                let professor_name = course
                    .and_then(|(_, professor_id)| professors.get(professor_id))
                    .cloned()
                    .unwrap_or_else(|| NOT_FOUND.to_string());

                RosterEntry {
                    enrollment_id: enrollment.id,
                    student_name: name_or_not_found(students.get(&enrollment.student_id)),
                    course_title: name_or_not_found(course.map(|(title, _)| title)),
                    professor_name,
                    enrollment_date: enrollment.formatted_date(),
                    status: enrollment.status,
                }
            })
            .collect();

        Ok(roster)
    }
}

fn name_or_not_found(name: Option<&String>) -> String {
    name.cloned().unwrap_or_else(|| NOT_FOUND.to_string())
}
