//! Exercise catalog: built-in and user-added exercises per workout key.
//!
//! Built-ins are name-only (the system ships without presets, so every list is
//! currently empty) and default to strength when queried. User additions live
//! in an injected [`CustomExerciseStore`] and keep their insertion order.

use crate::state::CustomExerciseStore;
use crate::{Error, ExerciseDefinition, ExerciseType, Result, WorkoutKey};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached built-in exercise names per workout key - built once and reused
static BUILTIN_EXERCISES: Lazy<BTreeMap<WorkoutKey, Vec<&'static str>>> = Lazy::new(|| {
    WorkoutKey::CYCLE
        .into_iter()
        .map(|key| (key, Vec::new()))
        .collect()
});

/// Built-in exercises for a workout key
///
/// Built-ins carry no explicit type record and default to strength.
pub fn builtin_exercises_for(key: WorkoutKey) -> Vec<ExerciseDefinition> {
    BUILTIN_EXERCISES
        .get(&key)
        .map(|names| {
            names
                .iter()
                .map(|name| ExerciseDefinition {
                    name: (*name).to_string(),
                    exercise_type: ExerciseType::Strength,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Catalog over an injected custom exercise store
pub struct ExerciseCatalog<S: CustomExerciseStore> {
    store: S,
}

impl<S: CustomExerciseStore> ExerciseCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Built-ins for the key followed by user additions, in insertion order
    pub fn exercises_for(&self, key: WorkoutKey) -> Result<Vec<ExerciseDefinition>> {
        let mut exercises = builtin_exercises_for(key);
        let custom = self.store.get()?;
        if let Some(added) = custom.get(&key) {
            exercises.extend(added.iter().cloned());
        }
        Ok(exercises)
    }

    /// Append a user-defined exercise under the key
    ///
    /// Rejects the add when the name already exists for that key, built-in or
    /// user-added.
    pub fn add_exercise(
        &mut self,
        key: WorkoutKey,
        name: &str,
        exercise_type: ExerciseType,
    ) -> Result<()> {
        let existing = self.exercises_for(key)?;
        if existing.iter().any(|e| e.name == name) {
            return Err(Error::DuplicateExercise {
                workout: key,
                name: name.to_string(),
            });
        }

        let mut custom = self.store.get()?;
        custom.entry(key).or_default().push(ExerciseDefinition {
            name: name.to_string(),
            exercise_type,
        });
        self.store.set(&custom)?;

        tracing::info!("Added exercise '{}' ({}) to workout {}", name, exercise_type, key);
        Ok(())
    }

    /// Remove a user-defined exercise by exact name; no-op when absent
    pub fn remove_exercise(&mut self, key: WorkoutKey, name: &str) -> Result<()> {
        let mut custom = self.store.get()?;
        if let Some(added) = custom.get_mut(&key) {
            let before = added.len();
            added.retain(|e| e.name != name);
            if added.len() != before {
                self.store.set(&custom)?;
                tracing::info!("Removed exercise '{}' from workout {}", name, key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CustomExerciseMap;

    /// In-memory store so catalog rules can be tested without touching disk
    #[derive(Default)]
    struct MemoryStore {
        mapping: CustomExerciseMap,
    }

    impl CustomExerciseStore for MemoryStore {
        fn get(&self) -> Result<CustomExerciseMap> {
            Ok(self.mapping.clone())
        }

        fn set(&mut self, mapping: &CustomExerciseMap) -> Result<()> {
            self.mapping = mapping.clone();
            Ok(())
        }
    }

    #[test]
    fn test_builtins_are_empty() {
        for key in WorkoutKey::CYCLE {
            assert!(builtin_exercises_for(key).is_empty());
        }
    }

    #[test]
    fn test_add_and_list_preserves_insertion_order() {
        let mut catalog = ExerciseCatalog::new(MemoryStore::default());

        catalog
            .add_exercise(WorkoutKey::A, "Log Press", ExerciseType::Strength)
            .unwrap();
        catalog
            .add_exercise(WorkoutKey::A, "Farmers", ExerciseType::Carry)
            .unwrap();

        let names: Vec<String> = catalog
            .exercises_for(WorkoutKey::A)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Log Press", "Farmers"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = ExerciseCatalog::new(MemoryStore::default());

        catalog
            .add_exercise(WorkoutKey::A, "Log Press", ExerciseType::Strength)
            .unwrap();

        let err = catalog
            .add_exercise(WorkoutKey::A, "Log Press", ExerciseType::Strength)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateExercise { .. }));
    }

    #[test]
    fn test_same_name_allowed_under_other_key() {
        let mut catalog = ExerciseCatalog::new(MemoryStore::default());

        catalog
            .add_exercise(WorkoutKey::A, "Log Press", ExerciseType::Strength)
            .unwrap();
        catalog
            .add_exercise(WorkoutKey::B, "Log Press", ExerciseType::Strength)
            .unwrap();

        assert_eq!(catalog.exercises_for(WorkoutKey::B).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_is_exact_match_and_idempotent() {
        let mut catalog = ExerciseCatalog::new(MemoryStore::default());

        catalog
            .add_exercise(WorkoutKey::A, "Yoke", ExerciseType::Carry)
            .unwrap();

        catalog.remove_exercise(WorkoutKey::A, "yoke").unwrap();
        assert_eq!(catalog.exercises_for(WorkoutKey::A).unwrap().len(), 1);

        catalog.remove_exercise(WorkoutKey::A, "Yoke").unwrap();
        assert!(catalog.exercises_for(WorkoutKey::A).unwrap().is_empty());

        // Removing again is a no-op
        catalog.remove_exercise(WorkoutKey::A, "Yoke").unwrap();
    }
}
