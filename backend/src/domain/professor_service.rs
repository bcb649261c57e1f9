use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::{Professor, RecordId};

use crate::domain::commands::professor::{CreateProfessorCommand, UpdateProfessorCommand};
use crate::domain::validation::required;
use crate::storage::csv::ProfessorRepository;
use crate::storage::traits::{ProfessorStorage, RecordStorage};

/// Service for managing professors
#[derive(Clone)]
pub struct ProfessorService {
    professor_repository: ProfessorRepository,
}

impl ProfessorService {
    pub fn new(professor_repository: ProfessorRepository) -> Self {
        Self { professor_repository }
    }

    pub fn create_professor(&self, command: CreateProfessorCommand) -> Result<Professor> {
        info!("Creating professor: staff_code={}", command.staff_code);

        let professor = Professor::new(
            required("Name", &command.name)?,
            required("Staff code", &command.staff_code)?,
            required("Email", &command.email)?,
            required("Department", &command.department)?,
        );

        let professor = self
            .professor_repository
            .save_checked(professor)
            .context("Failed to create professor")?;

        info!("Created professor: {} with ID: {}", professor.name, professor.id);
        Ok(professor)
    }

    pub fn get_professor(&self, professor_id: RecordId) -> Result<Option<Professor>> {
        debug!("Getting professor: {}", professor_id);
        Ok(self.professor_repository.find_by_id(professor_id)?)
    }

    pub fn list_professors(&self) -> Result<Vec<Professor>> {
        Ok(self.professor_repository.list_all()?)
    }

    pub fn update_professor(&self, command: UpdateProfessorCommand) -> Result<Professor> {
        info!("Updating professor: {}", command.professor_id);

        let mut professor = self
            .professor_repository
            .find_by_id(command.professor_id)?
            .ok_or_else(|| anyhow::anyhow!("Professor not found: {}", command.professor_id))?;

        if let Some(name) = command.name {
            professor.name = required("Name", &name)?;
        }
        if let Some(staff_code) = command.staff_code {
            professor.staff_code = required("Staff code", &staff_code)?;
        }
        if let Some(email) = command.email {
            professor.email = required("Email", &email)?;
        }
        if let Some(department) = command.department {
            professor.department = required("Department", &department)?;
        }

        let professor = self
            .professor_repository
            .save_checked(professor)
            .context("Failed to update professor")?;

        info!("Updated professor: {} with ID: {}", professor.name, professor.id);
        Ok(professor)
    }

    /// Courses taught by the professor keep their now dangling reference
    pub fn delete_professor(&self, professor_id: RecordId) -> Result<bool> {
        info!("Deleting professor: {}", professor_id);
        let deleted = self.professor_repository.delete(professor_id)?;
        if !deleted {
            warn!("Professor not found: {}", professor_id);
        }
        Ok(deleted)
    }
}
