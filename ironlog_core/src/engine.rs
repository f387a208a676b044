//! Engine: orchestration over the set repository and rotation store.
//!
//! Stores are injected at construction so tests can substitute in-memory
//! fakes. Every mutating operation is a single atomic insert/update/delete
//! against the repository; statistics are recomputed from full snapshots.

use crate::config::ProgressionConfig;
use crate::repo::SetRepository;
use crate::state::RotationStore;
use crate::{advisor, rotation, Result, SetRecord, Suggestion, WorkoutKey, WorkoutSession};
use chrono::Utc;
use uuid::Uuid;

/// The session/progression domain engine
pub struct Engine<R: SetRepository, S: RotationStore> {
    repo: R,
    rotation: S,
    progression: ProgressionConfig,
}

impl<R: SetRepository, S: RotationStore> Engine<R, S> {
    pub fn new(repo: R, rotation: S, progression: ProgressionConfig) -> Self {
        Self {
            repo,
            rotation,
            progression,
        }
    }

    /// Today's workout key from the rotation store, defaulting to A
    pub fn current_workout(&self) -> Result<WorkoutKey> {
        rotation::current(&self.rotation)
    }

    /// Validate and persist a set, returning it with its assigned id
    ///
    /// Validation failures reject the set before any repository write.
    pub fn log_set(&mut self, mut record: SetRecord) -> Result<SetRecord> {
        record.validate()?;
        let id = self.repo.insert(record.clone())?;
        record.id = Some(id);
        tracing::info!(
            "Logged {} set for '{}' under workout {}",
            record.exercise_type,
            record.exercise,
            record.workout
        );
        Ok(record)
    }

    /// Delete a set by id; unknown ids succeed silently
    pub fn delete_set(&mut self, id: Uuid) -> Result<()> {
        self.repo.delete_by_id(id)
    }

    /// Full history sorted by timestamp, insertion order breaking ties
    pub fn history(&self) -> Result<Vec<SetRecord>> {
        let mut records = self.repo.scan_all()?;
        records.sort_by_key(|r| r.logged_at);
        Ok(records)
    }

    /// Advisor suggestion for the next set of an exercise
    pub fn suggest(
        &self,
        exercise: &str,
        exercise_type: crate::ExerciseType,
    ) -> Result<Suggestion> {
        let history = self.repo.scan_all()?;
        Ok(advisor::suggest_next(
            exercise,
            exercise_type,
            &history,
            &self.progression,
        ))
    }

    /// Finalize the active workout
    ///
    /// Creates a session, retroactively tags every untagged set logged under
    /// the active workout key with its id, then advances and persists the
    /// rotation. Returns the new session.
    pub fn finish_workout(&mut self) -> Result<WorkoutSession> {
        let workout = self.current_workout()?;
        let session = WorkoutSession {
            id: Uuid::new_v4(),
            completed_at: Utc::now(),
        };

        let session_id = session.id;
        let tagged = self.repo.update_where(
            &|r| r.workout == workout && r.session_id.is_none(),
            &|r| r.session_id = Some(session_id),
        )?;

        rotation::advance(&mut self.rotation)?;

        tracing::info!(
            "Finished workout {}: tagged {} sets with session {}",
            workout,
            tagged,
            session.id
        );
        Ok(session)
    }
}
