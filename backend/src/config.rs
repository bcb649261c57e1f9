//! # Record Keeper Configuration
//!
//! Where the four entity files live. Every store resolves its file through the
//! same configuration, so all of them share one data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "dados"
//! files:
//!   students: "alunos.txt"
//!   professors: "professores.txt"
//!   courses: "disciplinas.txt"
//!   enrollments: "matriculas.txt"
//! ```
//!
//! Missing keys fall back to the defaults above.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Data directory used when nothing else is configured
pub const DEFAULT_DATA_DIRECTORY: &str = "dados";

/// File name of each entity collection inside the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFiles {
    pub students: String,
    pub professors: String,
    pub courses: String,
    pub enrollments: String,
}

impl Default for EntityFiles {
    fn default() -> Self {
        Self {
            students: "alunos.txt".to_string(),
            professors: "professores.txt".to_string(),
            courses: "disciplinas.txt".to_string(),
            enrollments: "matriculas.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordKeeperConfig {
    pub data_directory: PathBuf,
    pub files: EntityFiles,
}

impl Default for RecordKeeperConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            files: EntityFiles::default(),
        }
    }
}

impl RecordKeeperConfig {
    /// Default file names under a custom data directory
    pub fn with_data_directory<P: AsRef<Path>>(data_directory: P) -> Self {
        Self {
            data_directory: data_directory.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load the configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RecordKeeperConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded record keeper config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RecordKeeperConfig::default();
        assert_eq!(config.data_directory, PathBuf::from("dados"));
        assert_eq!(config.files.students, "alunos.txt");
        assert_eq!(config.files.enrollments, "matriculas.txt");
    }

    #[test]
    fn test_load_partial_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "data_directory: /srv/records\nfiles:\n  courses: courses.txt\n").unwrap();

        let config = RecordKeeperConfig::load(&path).unwrap();
        assert_eq!(config.data_directory, PathBuf::from("/srv/records"));
        assert_eq!(config.files.courses, "courses.txt");
        assert_eq!(config.files.students, "alunos.txt");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(RecordKeeperConfig::load(temp_dir.path().join("nope.yaml")).is_err());
    }
}
