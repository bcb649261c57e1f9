//! # Professor Repository
//!
//! Professors live in `{data_directory}/professores.txt`:
//!
//! ```text
//! id;name;staffCode;email;department
//! ```

use shared::{Professor, RecordId};

use super::codec::{Fields, LineCodec};
use super::connection::CsvConnection;
use super::flat_file_store::{FlatFileStore, Listing};
use crate::storage::error::{Result, StorageError};
use crate::storage::traits::{ProfessorStorage, RecordStorage};

impl LineCodec for Professor {
    const KIND: &'static str = "professor";
    const FIELDS: &'static [&'static str] = &["id", "name", "staff code", "email", "department"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.staff_code.clone(),
            self.email.clone(),
            self.department.clone(),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, String> {
        Ok(Professor {
            id: fields.record_id(0)?,
            name: fields.text(1),
            staff_code: fields.text(2),
            email: fields.text(3),
            department: fields.text(4),
        })
    }
}

#[derive(Clone)]
pub struct ProfessorRepository {
    store: FlatFileStore<Professor>,
}

impl ProfessorRepository {
    pub fn new(connection: CsvConnection) -> Result<Self> {
        let file_name = connection.files().professors.clone();
        let store = FlatFileStore::open(connection, &file_name)?;
        Ok(Self { store })
    }

    pub fn scan(&self) -> Result<Listing<Professor>> {
        self.store.scan()
    }
}

impl RecordStorage<Professor> for ProfessorRepository {
    fn save(&self, professor: Professor) -> Result<Professor> {
        self.store.save(professor)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        self.store.delete(id)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<Professor>> {
        self.store.find_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Professor>> {
        self.store.list_all()
    }
}

impl ProfessorStorage for ProfessorRepository {
    fn exists_by_staff_code(&self, staff_code: &str) -> Result<bool> {
        self.store.exists_where(|p| p.staff_code == staff_code)
    }

    fn save_checked(&self, professor: Professor) -> Result<Professor> {
        self.store.save_checked(professor, |existing, candidate| {
            if existing
                .iter()
                .any(|p| p.id != candidate.id && p.staff_code == candidate.staff_code)
            {
                return Err(StorageError::DuplicateNaturalKey {
                    kind: Professor::KIND,
                    field: "staff code",
                    value: candidate.staff_code.clone(),
                });
            }
            Ok(())
        })
    }
}
