use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::{Enrollment, RecordId};

use crate::domain::commands::enrollment::{
    ChangeStatusCommand, CreateEnrollmentCommand, UpdateEnrollmentCommand,
};
use crate::domain::validation::{enrollment_date, reference, ValidationError};
use crate::storage::csv::{CourseRepository, EnrollmentRepository, StudentRepository};
use crate::storage::traits::{EnrollmentStorage, RecordStorage};

/// Service for managing enrollments.
///
/// A student may hold any number of cancelled or completed enrollments in a
/// course but at most one active one.
#[derive(Clone)]
pub struct EnrollmentService {
    enrollment_repository: EnrollmentRepository,
    student_repository: StudentRepository,
    course_repository: CourseRepository,
}

impl EnrollmentService {
    pub fn new(
        enrollment_repository: EnrollmentRepository,
        student_repository: StudentRepository,
        course_repository: CourseRepository,
    ) -> Self {
        Self {
            enrollment_repository,
            student_repository,
            course_repository,
        }
    }

    pub fn create_enrollment(&self, command: CreateEnrollmentCommand) -> Result<Enrollment> {
        info!(
            "Creating enrollment: student={}, course={}, status={}",
            command.student_id, command.course_id, command.status
        );

        let enrollment = Enrollment::new(
            self.existing_student(command.student_id)?,
            self.existing_course(command.course_id)?,
            enrollment_date(&command.enrollment_date)?,
            command.status,
        );

        let enrollment = self
            .enrollment_repository
            .save_checked(enrollment)
            .context("Failed to create enrollment")?;

        info!("Created enrollment with ID: {}", enrollment.id);
        Ok(enrollment)
    }

    pub fn get_enrollment(&self, enrollment_id: RecordId) -> Result<Option<Enrollment>> {
        debug!("Getting enrollment: {}", enrollment_id);
        Ok(self.enrollment_repository.find_by_id(enrollment_id)?)
    }

    pub fn list_enrollments(&self) -> Result<Vec<Enrollment>> {
        Ok(self.enrollment_repository.list_all()?)
    }

    pub fn enrollments_for_student(&self, student_id: RecordId) -> Result<Vec<Enrollment>> {
        Ok(self.enrollment_repository.find_by_student(student_id)?)
    }

    pub fn enrollments_for_course(&self, course_id: RecordId) -> Result<Vec<Enrollment>> {
        Ok(self.enrollment_repository.find_by_course(course_id)?)
    }

    pub fn is_actively_enrolled(&self, student_id: RecordId, course_id: RecordId) -> Result<bool> {
        Ok(self
            .enrollment_repository
            .exists_active_enrollment(student_id, course_id)?)
    }

    pub fn update_enrollment(&self, command: UpdateEnrollmentCommand) -> Result<Enrollment> {
        info!("Updating enrollment: {}", command.enrollment_id);

        let mut enrollment = self.existing_enrollment(command.enrollment_id)?;

        if let Some(student_id) = command.student_id {
            enrollment.student_id = self.existing_student(student_id)?;
        }
        if let Some(course_id) = command.course_id {
            enrollment.course_id = self.existing_course(course_id)?;
        }
        if let Some(date) = command.enrollment_date {
            enrollment.enrollment_date = enrollment_date(&date)?;
        }
        if let Some(status) = command.status {
            enrollment.status = status;
        }

        let enrollment = self
            .enrollment_repository
            .save_checked(enrollment)
            .context("Failed to update enrollment")?;

        info!("Updated enrollment with ID: {}", enrollment.id);
        Ok(enrollment)
    }

    /// Write a new status. Any transition is accepted, but reactivating is
    /// refused while another active enrollment exists for the same pair.
    pub fn change_status(&self, command: ChangeStatusCommand) -> Result<Enrollment> {
        info!(
            "Changing enrollment {} status to {}",
            command.enrollment_id, command.status
        );

        let mut enrollment = self.existing_enrollment(command.enrollment_id)?;
        enrollment.status = command.status;

        self.enrollment_repository
            .save_checked(enrollment)
            .context("Failed to change enrollment status")
    }

    pub fn delete_enrollment(&self, enrollment_id: RecordId) -> Result<bool> {
        info!("Deleting enrollment: {}", enrollment_id);
        let deleted = self.enrollment_repository.delete(enrollment_id)?;
        if !deleted {
            warn!("Enrollment not found: {}", enrollment_id);
        }
        Ok(deleted)
    }

    fn existing_enrollment(&self, enrollment_id: RecordId) -> Result<Enrollment> {
        self.enrollment_repository
            .find_by_id(enrollment_id)?
            .ok_or_else(|| anyhow::anyhow!("Enrollment not found: {}", enrollment_id))
    }

    fn existing_student(&self, student_id: RecordId) -> Result<RecordId> {
        let student_id = reference("student", student_id)?;
        if self.student_repository.find_by_id(student_id)?.is_none() {
            return Err(ValidationError::UnknownReference { kind: "student", id: student_id }.into());
        }
        Ok(student_id)
    }

    fn existing_course(&self, course_id: RecordId) -> Result<RecordId> {
        let course_id = reference("course", course_id)?;
        if self.course_repository.find_by_id(course_id)?.is_none() {
            return Err(ValidationError::UnknownReference { kind: "course", id: course_id }.into());
        }
        Ok(course_id)
    }
}
