//! Persisted app state: rotation position and user-added exercises.
//!
//! Both stores are small JSON files saved with file locking and an atomic
//! temp-file rename. Corrupt or missing files fall back to defaults with a
//! warning so a bad write never bricks the tracker.

use crate::{Error, ExerciseDefinition, Result, WorkoutKey};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mapping of workout key to user-added exercise definitions
pub type CustomExerciseMap = BTreeMap<WorkoutKey, Vec<ExerciseDefinition>>;

/// Persisted "which workout is next" value
pub trait RotationStore {
    /// The stored key, or None when nothing has been persisted yet
    fn get(&self) -> Result<Option<WorkoutKey>>;
    fn set(&mut self, key: WorkoutKey) -> Result<()>;
}

/// Persisted user-added exercise lists
pub trait CustomExerciseStore {
    fn get(&self) -> Result<CustomExerciseMap>;
    fn set(&mut self, mapping: &CustomExerciseMap) -> Result<()>;
}

/// Load a JSON value from a file with shared locking
///
/// Returns None if the file doesn't exist. If the file is corrupted or
/// unreadable, logs a warning and returns None rather than failing.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open state file {:?}: {}. Using defaults.", path, e);
            return Ok(None);
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock state file {:?}: {}. Using defaults.", path, e);
        return Ok(None);
    }

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    if let Err(e) = reader.read_to_string(&mut contents) {
        let _ = file.unlock();
        tracing::warn!("Failed to read state file {:?}: {}. Using defaults.", path, e);
        return Ok(None);
    }

    file.unlock()?;

    match serde_json::from_str::<T>(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!("Failed to parse state file {:?}: {}. Using defaults.", path, e);
            Ok(None)
        }
    }
}

/// Save a JSON value to a file with exclusive locking
///
/// Atomically writes by:
/// 1. Writing to a temp file
/// 2. Syncing to disk
/// 3. Renaming over the original
fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
    })?)?;

    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved state to {:?}", path);
    Ok(())
}

/// JSON-file rotation store
pub struct FileRotationStore {
    path: PathBuf,
}

impl FileRotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RotationStore for FileRotationStore {
    fn get(&self) -> Result<Option<WorkoutKey>> {
        load_json(&self.path)
    }

    fn set(&mut self, key: WorkoutKey) -> Result<()> {
        save_json(&self.path, &key)
    }
}

/// JSON-file custom exercise store
pub struct FileCustomExerciseStore {
    path: PathBuf,
}

impl FileCustomExerciseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CustomExerciseStore for FileCustomExerciseStore {
    fn get(&self) -> Result<CustomExerciseMap> {
        Ok(load_json(&self.path)?.unwrap_or_default())
    }

    fn set(&mut self, mapping: &CustomExerciseMap) -> Result<()> {
        save_json(&self.path, mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseType;

    #[test]
    fn test_rotation_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileRotationStore::new(temp_dir.path().join("rotation.json"));

        assert_eq!(store.get().unwrap(), None);

        store.set(WorkoutKey::C).unwrap();
        assert_eq!(store.get().unwrap(), Some(WorkoutKey::C));
    }

    #[test]
    fn test_corrupted_rotation_falls_back_to_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("rotation.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileRotationStore::new(&path);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_custom_exercise_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileCustomExerciseStore::new(temp_dir.path().join("exercises.json"));

        assert!(store.get().unwrap().is_empty());

        let mut mapping = CustomExerciseMap::new();
        mapping.insert(
            WorkoutKey::B,
            vec![ExerciseDefinition {
                name: "Yoke".into(),
                exercise_type: ExerciseType::Carry,
            }],
        );
        store.set(&mapping).unwrap();

        let loaded = store.get().unwrap();
        assert_eq!(loaded[&WorkoutKey::B].len(), 1);
        assert_eq!(loaded[&WorkoutKey::B][0].name, "Yoke");
    }

    #[test]
    fn test_save_leaves_no_stray_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileRotationStore::new(temp_dir.path().join("rotation.json"));
        store.set(WorkoutKey::A).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "rotation.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only rotation.json, found extras: {:?}",
            extras
        );
    }
}
