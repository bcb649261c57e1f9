/// Test utilities shared by the repository and service tests
///
/// The temporary data directory is removed when the environment is dropped,
/// even if the test panics.
use anyhow::Result;
use chrono::NaiveDate;
use shared::{Course, Enrollment, EnrollmentStatus, Professor, RecordId, Student};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::course_repository::CourseRepository;
use super::enrollment_repository::EnrollmentRepository;
use super::professor_repository::ProfessorRepository;
use super::student_repository::StudentRepository;
use crate::storage::traits::RecordStorage;

/// Temporary data directory with a connection pointing at it
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Self::new_with_prefix("enrollment_test_")
    }

    /// Create the environment under a recognisable directory name
    pub fn new_with_prefix(prefix: &str) -> Result<Self> {
        let temp_dir = TempDir::with_prefix(prefix)?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Raw contents of one data file, empty if it does not exist yet
    pub fn read_file(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.base_path.join(file_name)).unwrap_or_default()
    }

    pub fn write_file(&self, file_name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.base_path.join(file_name), contents)?;
        Ok(())
    }
}

/// All four repositories over one temporary data directory
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub student_repo: StudentRepository,
    pub professor_repo: ProfessorRepository,
    pub course_repo: CourseRepository,
    pub enrollment_repo: EnrollmentRepository,
}

impl RepositoryTestHelper {
    pub fn new() -> Result<Self> {
        Self::from_env(TestEnvironment::new()?)
    }

    /// Build the repositories after `seed` has written raw data files, so the
    /// id counters start from what is on disk
    pub fn with_seed<F>(seed: F) -> Result<Self>
    where
        F: FnOnce(&TestEnvironment) -> Result<()>,
    {
        let env = TestEnvironment::new()?;
        seed(&env)?;
        Self::from_env(env)
    }

    fn from_env(env: TestEnvironment) -> Result<Self> {
        let student_repo = StudentRepository::new(env.connection.clone())?;
        let professor_repo = ProfessorRepository::new(env.connection.clone())?;
        let course_repo = CourseRepository::new(env.connection.clone())?;
        let enrollment_repo = EnrollmentRepository::new(env.connection.clone())?;

        Ok(RepositoryTestHelper {
            env,
            student_repo,
            professor_repo,
            course_repo,
            enrollment_repo,
        })
    }

    pub fn create_test_student(&self, name: &str, registration_number: &str) -> Result<Student> {
        let email = format!("{}@example.com", name.to_lowercase());
        let student = Student::new(name, registration_number, email, "000");
        Ok(self.student_repo.save(student)?)
    }

    pub fn create_test_professor(&self, name: &str, staff_code: &str) -> Result<Professor> {
        let email = format!("{}@example.com", name.to_lowercase());
        let professor = Professor::new(name, staff_code, email, "Computing");
        Ok(self.professor_repo.save(professor)?)
    }

    pub fn create_test_course(
        &self,
        title: &str,
        course_code: &str,
        professor_id: RecordId,
    ) -> Result<Course> {
        let course = Course::new(title, course_code, 60, professor_id, "2024.2");
        Ok(self.course_repo.save(course)?)
    }

    pub fn create_test_enrollment(
        &self,
        student_id: RecordId,
        course_id: RecordId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment> {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).expect("valid test date");
        let enrollment = Enrollment::new(student_id, course_id, date, status);
        Ok(self.enrollment_repo.save(enrollment)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleans_up_on_drop() {
        let path = {
            let env = TestEnvironment::new().unwrap();
            assert!(env.base_directory().exists());
            env.base_path.clone()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_helper_creates_records() {
        let helper = RepositoryTestHelper::new().unwrap();
        let student = helper.create_test_student("Ana", "R1").unwrap();
        let professor = helper.create_test_professor("Bruno", "P7").unwrap();
        let course = helper.create_test_course("Algorithms", "CS101", professor.id).unwrap();
        helper
            .create_test_enrollment(student.id, course.id, EnrollmentStatus::Active)
            .unwrap();

        assert_eq!(helper.env.read_file("matriculas.txt"), "1;1;1;03/09/2024;ATIVA\n");
    }

    #[test]
    fn test_seeded_helper_continues_ids() {
        let helper = RepositoryTestHelper::with_seed(|env| {
            env.write_file("alunos.txt", "4;Ana;R1;a@x.com;000\n")
        })
        .unwrap();

        let bia = helper.create_test_student("Bia", "R2").unwrap();
        assert_eq!(bia.id, 5);
    }
}
