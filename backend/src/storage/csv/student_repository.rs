//! # Student Repository
//!
//! Students live in `{data_directory}/alunos.txt`, one per line:
//!
//! ```text
//! id;name;registrationNumber;email;phone
//! 1;Ana;R1;a@x.com;000
//! ```

use log::debug;
use shared::{RecordId, Student};

use super::codec::{Fields, LineCodec};
use super::connection::CsvConnection;
use super::flat_file_store::{FlatFileStore, Listing};
use crate::storage::error::{Result, StorageError};
use crate::storage::traits::{RecordStorage, StudentStorage};

impl LineCodec for Student {
    const KIND: &'static str = "student";
    const FIELDS: &'static [&'static str] = &["id", "name", "registration number", "email", "phone"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.registration_number.clone(),
            self.email.clone(),
            self.phone.clone(),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, String> {
        Ok(Student {
            id: fields.record_id(0)?,
            name: fields.text(1),
            registration_number: fields.text(2),
            email: fields.text(3),
            phone: fields.text(4),
        })
    }
}

#[derive(Clone)]
pub struct StudentRepository {
    store: FlatFileStore<Student>,
}

impl StudentRepository {
    /// Create a new student repository on the connection's students file
    pub fn new(connection: CsvConnection) -> Result<Self> {
        let file_name = connection.files().students.clone();
        let store = FlatFileStore::open(connection, &file_name)?;
        Ok(Self { store })
    }

    /// Records plus the lines that could not be read
    pub fn scan(&self) -> Result<Listing<Student>> {
        self.store.scan()
    }
}

impl RecordStorage<Student> for StudentRepository {
    fn save(&self, student: Student) -> Result<Student> {
        self.store.save(student)
    }

    fn delete(&self, id: RecordId) -> Result<bool> {
        self.store.delete(id)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<Student>> {
        self.store.find_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Student>> {
        self.store.list_all()
    }
}

impl StudentStorage for StudentRepository {
    fn exists_by_registration_number(&self, registration_number: &str) -> Result<bool> {
        debug!("Checking registration number {}", registration_number);
        self.store
            .exists_where(|s| s.registration_number == registration_number)
    }

    fn save_checked(&self, student: Student) -> Result<Student> {
        self.store.save_checked(student, |existing, candidate| {
            let taken = existing.iter().any(|s| {
                s.id != candidate.id && s.registration_number == candidate.registration_number
            });
            if taken {
                return Err(StorageError::DuplicateNaturalKey {
                    kind: Student::KIND,
                    field: "registration number",
                    value: candidate.registration_number.clone(),
                });
            }
            Ok(())
        })
    }
}
