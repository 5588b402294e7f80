use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Appointment;

/// File that holds the whole appointment collection inside the data directory.
pub const STORAGE_FILE: &str = "turnos.json";

/// Gateway to the on-disk appointment collection.
///
/// The collection is one JSON array in a single file; every save overwrites
/// the whole file (last writer wins, no partial writes).
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(STORAGE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored collection.
    ///
    /// A missing file is an empty collection. A file that cannot be read or
    /// parsed is treated the same way: a warning goes to stderr and callers
    /// get an empty collection, never a parse error.
    pub fn load(&self) -> Vec<Appointment> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(appointments) => appointments,
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection with `appointments`.
    pub fn save(&self, appointments: &[Appointment]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(appointments)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the stored collection entirely.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_appointment(id: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            owner_name: "Ana".to_string(),
            pet_name: "Rex".to_string(),
            species: "perro".to_string(),
            service_type: "vacunacion".to_string(),
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
            notes: String::new(),
            created_at: "2024-04-30T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());

        let appointments = vec![sample_appointment("a1"), sample_appointment("a2")];
        storage.save(&appointments).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a1");
        assert_eq!(loaded[1].id, "a2");
    }

    #[test]
    fn test_save_of_loaded_collection_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());

        storage.save(&[sample_appointment("a1")]).unwrap();
        let before = fs::read_to_string(storage.path()).unwrap();

        storage.save(&storage.load()).unwrap();
        let after = fs::read_to_string(storage.path()).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_load_invalid_json_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());

        fs::write(storage.path(), "this is not json").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_non_list_json_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());

        fs::write(storage.path(), r#"{"id": "a1"}"#).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());

        storage.save(&[sample_appointment("a1")]).unwrap();
        assert!(storage.path().exists());

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_clear_on_missing_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().to_path_buf());
        assert!(storage.clear().is_ok());
    }
}
