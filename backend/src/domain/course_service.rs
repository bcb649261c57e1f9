use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::{Course, RecordId};
use std::collections::HashMap;

use crate::domain::commands::course::{CourseWithProfessor, CreateCourseCommand, UpdateCourseCommand};
use crate::domain::roster_service::NOT_FOUND;
use crate::domain::validation::{positive_credit_hours, reference, required, ValidationError};
use crate::storage::csv::{CourseRepository, ProfessorRepository};
use crate::storage::traits::{CourseStorage, RecordStorage};

/// Service for managing courses
#[derive(Clone)]
pub struct CourseService {
    course_repository: CourseRepository,
    professor_repository: ProfessorRepository,
}

impl CourseService {
    pub fn new(course_repository: CourseRepository, professor_repository: ProfessorRepository) -> Self {
        Self {
            course_repository,
            professor_repository,
        }
    }

    /// Create a course taught by an existing professor
    pub fn create_course(&self, command: CreateCourseCommand) -> Result<Course> {
        info!("Creating course: code={}", command.course_code);

        let course = Course::new(
            required("Title", &command.title)?,
            required("Course code", &command.course_code)?,
            positive_credit_hours(command.credit_hours)?,
            self.existing_professor(command.professor_id)?,
            required("Term", &command.term)?,
        );

        let course = self
            .course_repository
            .save_checked(course)
            .context("Failed to create course")?;

        info!("Created course: {} with ID: {}", course.title, course.id);
        Ok(course)
    }

    pub fn get_course(&self, course_id: RecordId) -> Result<Option<Course>> {
        debug!("Getting course: {}", course_id);
        Ok(self.course_repository.find_by_id(course_id)?)
    }

    pub fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.course_repository.list_all()?)
    }

    pub fn courses_taught_by(&self, professor_id: RecordId) -> Result<Vec<Course>> {
        Ok(self.course_repository.find_by_professor(professor_id)?)
    }

    /// Every course with its professor's name, or "not found" when the
    /// professor was deleted
    pub fn courses_with_professor(&self) -> Result<Vec<CourseWithProfessor>> {
        let professors: HashMap<RecordId, String> = self
            .professor_repository
            .list_all()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let courses = self.course_repository.list_all()?;
        Ok(courses
            .into_iter()
            .map(|course| {
                let professor_name = professors
                    .get(&course.professor_id)
                    .cloned()
                    .unwrap_or_else(|| NOT_FOUND.to_string());
                CourseWithProfessor { course, professor_name }
            })
            .collect())
    }

    pub fn update_course(&self, command: UpdateCourseCommand) -> Result<Course> {
        info!("Updating course: {}", command.course_id);

        let mut course = self
            .course_repository
            .find_by_id(command.course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found: {}", command.course_id))?;

        if let Some(title) = command.title {
            course.title = required("Title", &title)?;
        }
        if let Some(course_code) = command.course_code {
            course.course_code = required("Course code", &course_code)?;
        }
        if let Some(credit_hours) = command.credit_hours {
            course.credit_hours = positive_credit_hours(credit_hours)?;
        }
        if let Some(professor_id) = command.professor_id {
            course.professor_id = self.existing_professor(professor_id)?;
        }
        if let Some(term) = command.term {
            course.term = required("Term", &term)?;
        }

        let course = self
            .course_repository
            .save_checked(course)
            .context("Failed to update course")?;

        info!("Updated course: {} with ID: {}", course.title, course.id);
        Ok(course)
    }

    /// Enrollments in the course keep their now dangling reference
    pub fn delete_course(&self, course_id: RecordId) -> Result<bool> {
        info!("Deleting course: {}", course_id);
        let deleted = self.course_repository.delete(course_id)?;
        if !deleted {
            warn!("Course not found: {}", course_id);
        }
        Ok(deleted)
    }

    fn existing_professor(&self, professor_id: RecordId) -> Result<RecordId> {
        let professor_id = reference("professor", professor_id)?;
        if self.professor_repository.find_by_id(professor_id)?.is_none() {
            return Err(ValidationError::UnknownReference {
                kind: "professor",
                id: professor_id,
            }
            .into());
        }
        Ok(professor_id)
    }
}
