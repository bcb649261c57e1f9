use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::{RecordId, Student};

use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::validation::required;
use crate::storage::csv::StudentRepository;
use crate::storage::traits::{RecordStorage, StudentStorage};

/// Service for managing students
#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(student_repository: StudentRepository) -> Self {
        Self { student_repository }
    }

    /// Register a new student. The registration number must not be taken.
    pub fn create_student(&self, command: CreateStudentCommand) -> Result<Student> {
        info!("Creating student: registration={}", command.registration_number);

        let student = Student::new(
            required("Name", &command.name)?,
            required("Registration number", &command.registration_number)?,
            required("Email", &command.email)?,
            required("Phone", &command.phone)?,
        );

        let student = self
            .student_repository
            .save_checked(student)
            .context("Failed to create student")?;

        info!("Created student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    pub fn get_student(&self, student_id: RecordId) -> Result<Option<Student>> {
        debug!("Getting student: {}", student_id);
        let student = self.student_repository.find_by_id(student_id)?;
        if student.is_none() {
            warn!("Student not found: {}", student_id);
        }
        Ok(student)
    }

    pub fn list_students(&self) -> Result<Vec<Student>> {
        let students = self.student_repository.list_all()?;
        debug!("Found {} students", students.len());
        Ok(students)
    }

    /// Apply the provided fields to an existing student
    pub fn update_student(&self, command: UpdateStudentCommand) -> Result<Student> {
        info!("Updating student: {}", command.student_id);

        let mut student = self
            .student_repository
            .find_by_id(command.student_id)?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", command.student_id))?;

        if let Some(name) = command.name {
            student.name = required("Name", &name)?;
        }
        if let Some(registration_number) = command.registration_number {
            student.registration_number = required("Registration number", &registration_number)?;
        }
        if let Some(email) = command.email {
            student.email = required("Email", &email)?;
        }
        if let Some(phone) = command.phone {
            student.phone = required("Phone", &phone)?;
        }

        let student = self
            .student_repository
            .save_checked(student)
            .context("Failed to update student")?;

        info!("Updated student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    /// Returns whether a student was removed
    pub fn delete_student(&self, student_id: RecordId) -> Result<bool> {
        info!("Deleting student: {}", student_id);
        let deleted = self.student_repository.delete(student_id)?;
        if !deleted {
            warn!("Student not found: {}", student_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationError;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::StorageError;

    fn setup_test() -> (StudentService, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let repository = StudentRepository::new(env.connection.clone()).unwrap();
        (StudentService::new(repository), env)
    }

    fn create_command(name: &str, registration_number: &str) -> CreateStudentCommand {
        CreateStudentCommand {
            name: name.to_string(),
            registration_number: registration_number.to_string(),
            email: "a@x.com".to_string(),
            phone: "000".to_string(),
        }
    }

    #[test]
    fn test_create_student_trims_fields() {
        let (service, env) = setup_test();

        let student = service.create_student(create_command("  Ana ", " R1")).unwrap();
        assert_eq!(student.id, 1);
        assert_eq!(student.name, "Ana");
        assert_eq!(env.read_file("alunos.txt"), "1;Ana;R1;a@x.com;000\n");
    }

    #[test]
    fn test_create_student_rejects_blank_name() {
        let (service, _env) = setup_test();

        let err = service.create_student(create_command(" ", "R1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyField { field: "Name" })
        );
        assert!(service.list_students().unwrap().is_empty());
    }

    #[test]
    fn test_create_student_rejects_duplicate_registration() {
        let (service, _env) = setup_test();
        service.create_student(create_command("Ana", "R1")).unwrap();

        let err = service.create_student(create_command("Bia", "R1")).unwrap_err();
        let storage_error = err.downcast_ref::<StorageError>().unwrap();
        assert!(storage_error.is_conflict());
        assert_eq!(service.list_students().unwrap().len(), 1);
    }

    #[test]
    fn test_update_student() {
        let (service, _env) = setup_test();
        let ana = service.create_student(create_command("Ana", "R1")).unwrap();

        let updated = service
            .update_student(UpdateStudentCommand {
                student_id: ana.id,
                phone: Some("999".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.phone, "999");
        assert_eq!(updated.name, "Ana");
        assert_eq!(service.list_students().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_student_fails() {
        let (service, _env) = setup_test();

        let result = service.update_student(UpdateStudentCommand {
            student_id: 42,
            ..Default::default()
        });
        assert!(result.is_err());
        assert!(service.list_students().unwrap().is_empty());
    }

    #[test]
    fn test_delete_student() {
        let (service, _env) = setup_test();
        let ana = service.create_student(create_command("Ana", "R1")).unwrap();

        assert!(service.delete_student(ana.id).unwrap());
        assert!(!service.delete_student(ana.id).unwrap());
        assert!(service.get_student(ana.id).unwrap().is_none());
    }
}
