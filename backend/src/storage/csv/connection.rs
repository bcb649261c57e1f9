use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{EntityFiles, RecordKeeperConfig};
use crate::storage::error::{Result, StorageError};

/// CsvConnection owns the data directory and knows where each entity file lives
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    files: EntityFiles,
}

impl CsvConnection {
    /// Create a new connection with a base directory and the default file names
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        Self::with_files(base_directory, EntityFiles::default())
    }

    /// Create a new connection from a loaded configuration
    pub fn from_config(config: &RecordKeeperConfig) -> Result<Self> {
        Self::with_files(&config.data_directory, config.files.clone())
    }

    fn with_files<P: AsRef<Path>>(base_directory: P, files: EntityFiles) -> Result<Self> {
        let connection = Self {
            base_directory: base_directory.as_ref().to_path_buf(),
            files,
        };
        connection.ensure_data_directory()?;
        Ok(connection)
    }

    /// Create the data directory if it doesn't exist. Safe to call repeatedly.
    pub fn ensure_data_directory(&self) -> Result<()> {
        if !self.base_directory.is_dir() {
            fs::create_dir_all(&self.base_directory)
                .map_err(|e| StorageError::unavailable(&self.base_directory, e))?;
            info!("Created data directory: {}", self.base_directory.display());
        }
        Ok(())
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn files(&self) -> &EntityFiles {
        &self.files
    }

    /// Path of a file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("a").join("b");

        let connection = CsvConnection::new(&base).unwrap();
        assert!(base.is_dir());
        assert_eq!(connection.file_path("alunos.txt"), base.join("alunos.txt"));
    }

    #[test]
    fn test_ensure_data_directory_recreates_removed_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("data");
        let connection = CsvConnection::new(&base).unwrap();

        fs::remove_dir_all(&base).unwrap();
        connection.ensure_data_directory().unwrap();
        connection.ensure_data_directory().unwrap();
        assert!(base.is_dir());
    }

    #[test]
    fn test_from_config_uses_configured_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = RecordKeeperConfig::with_data_directory(temp_dir.path());
        config.files.students = "students.txt".to_string();

        let connection = CsvConnection::from_config(&config).unwrap();
        assert_eq!(connection.files().students, "students.txt");
        assert_eq!(connection.files().courses, "disciplinas.txt");
    }

    #[test]
    fn test_new_fails_when_base_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = CsvConnection::new(blocker.join("data"));
        assert!(matches!(result, Err(StorageError::StorageUnavailable { .. })));
    }
}
