//! # Flat-File Storage Module
//!
//! Each entity type is kept in its own text file under the data directory,
//! one record per `;`-delimited line and no header row:
//!
//! ```text
//! dados/alunos.txt        id;name;registrationNumber;email;phone
//! dados/professores.txt   id;name;staffCode;email;department
//! dados/disciplinas.txt   id;title;courseCode;creditHours;professorId;term
//! dados/matriculas.txt    id;studentId;courseId;dd/mm/yyyy;status
//! ```
//!
//! Every mutation rewrites the whole file through a temporary sibling that is
//! renamed over the original, so readers never see a half-written file.

pub mod codec;
pub mod connection;
pub mod course_repository;
pub mod enrollment_repository;
pub mod flat_file_store;
pub mod professor_repository;
pub mod student_repository;

#[cfg(test)]
pub mod test_utils;

pub use codec::{decode, encode, LineCodec};
pub use connection::CsvConnection;
pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use flat_file_store::{FlatFileStore, Listing, SkippedLine};
pub use professor_repository::ProfessorRepository;
pub use student_repository::StudentRepository;
