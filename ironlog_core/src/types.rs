//! Core domain types for the Ironlog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout keys (the A–E training day rotation)
//! - Exercise types and definitions
//! - Logged set records and their per-type field validation
//! - Workout sessions and advisor suggestions

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Workout Keys
// ============================================================================

/// A training day in the rotating A–E cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkoutKey {
    A,
    B,
    C,
    D,
    E,
}

impl WorkoutKey {
    /// The full rotation cycle, in order
    pub const CYCLE: [WorkoutKey; 5] = [
        WorkoutKey::A,
        WorkoutKey::B,
        WorkoutKey::C,
        WorkoutKey::D,
        WorkoutKey::E,
    ];

    /// The cyclic successor (E wraps back to A)
    pub fn next(self) -> WorkoutKey {
        let index = Self::CYCLE.iter().position(|k| *k == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }
}

impl Default for WorkoutKey {
    fn default() -> Self {
        WorkoutKey::A
    }
}

impl fmt::Display for WorkoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for WorkoutKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(WorkoutKey::A),
            "B" => Ok(WorkoutKey::B),
            "C" => Ok(WorkoutKey::C),
            "D" => Ok(WorkoutKey::D),
            "E" => Ok(WorkoutKey::E),
            other => Err(Error::Validation(format!(
                "unknown workout key '{}' (expected A-E)",
                other
            ))),
        }
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Kind of exercise, which decides the set fields that apply
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Strength,
    Carry,
    Hold,
    Cardio,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExerciseType::Strength => "strength",
            ExerciseType::Carry => "carry",
            ExerciseType::Hold => "hold",
            ExerciseType::Cardio => "cardio",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ExerciseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(ExerciseType::Strength),
            "carry" => Ok(ExerciseType::Carry),
            "hold" => Ok(ExerciseType::Hold),
            "cardio" => Ok(ExerciseType::Cardio),
            other => Err(Error::Validation(format!(
                "unknown exercise type '{}' (expected strength, carry, hold or cardio)",
                other
            ))),
        }
    }
}

/// An exercise entry in the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub name: String,
    pub exercise_type: ExerciseType,
}

// ============================================================================
// Set Records
// ============================================================================

/// One logged exercise performance
///
/// Units: `weight` in kilograms, `time` in seconds, `distance` in metres for
/// carries and kilometres for cardio. Which fields apply is decided by
/// `exercise_type`; see [`SetRecord::validate`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetRecord {
    /// Assigned by the repository on insert; None before
    pub id: Option<Uuid>,
    pub workout: WorkoutKey,
    /// Attached when the workout is finished; None for in-progress sets
    pub session_id: Option<Uuid>,
    /// Grouping key for history and stats; case-sensitive, no normalization
    pub exercise: String,
    pub exercise_type: ExerciseType,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub distance: Option<f64>,
    pub time: Option<u32>,
    pub notes: Option<String>,
    /// Sole time axis for all aggregation; immutable once set
    pub logged_at: DateTime<Utc>,
}

impl SetRecord {
    /// Check the populated fields against the exercise type
    ///
    /// Required fields must be present and inapplicable fields must be absent,
    /// so downstream consumers (stats, export) can rely on field presence
    /// instead of zero-coercion.
    pub fn validate(&self) -> Result<()> {
        if self.exercise.trim().is_empty() {
            return Err(Error::Validation("exercise name is required".into()));
        }

        match self.exercise_type {
            ExerciseType::Strength => {
                self.require("weight", self.weight.is_some())?;
                self.require("reps", self.reps.is_some())?;
                self.forbid("distance", self.distance.is_some())?;
                self.forbid("time", self.time.is_some())?;
            }
            ExerciseType::Carry => {
                self.require("weight", self.weight.is_some())?;
                if self.distance.is_none() && self.time.is_none() {
                    return Err(Error::Validation(
                        "carry set requires distance or time".into(),
                    ));
                }
                self.forbid("reps", self.reps.is_some())?;
            }
            ExerciseType::Hold => {
                self.require("weight", self.weight.is_some())?;
                self.require("time", self.time.is_some())?;
                self.forbid("reps", self.reps.is_some())?;
                self.forbid("distance", self.distance.is_some())?;
            }
            ExerciseType::Cardio => {
                self.forbid("weight", self.weight.is_some())?;
                self.forbid("reps", self.reps.is_some())?;
            }
        }

        Ok(())
    }

    fn require(&self, field: &str, present: bool) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "{} set requires {}",
                self.exercise_type, field
            )))
        }
    }

    fn forbid(&self, field: &str, present: bool) -> Result<()> {
        if present {
            Err(Error::Validation(format!(
                "{} does not apply to {} sets",
                field, self.exercise_type
            )))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Sessions and Suggestions
// ============================================================================

/// A finalized grouping of sets logged under one workout key
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub completed_at: DateTime<Utc>,
}

/// Advisor output: pre-filled values for the next set of an exercise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Suggestion {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub distance: Option<f64>,
    pub time: Option<u32>,
}

impl Suggestion {
    pub fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.reps.is_none()
            && self.distance.is_none()
            && self.time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record(exercise_type: ExerciseType) -> SetRecord {
        SetRecord {
            id: None,
            workout: WorkoutKey::A,
            session_id: None,
            exercise: "Log Press".into(),
            exercise_type,
            weight: None,
            reps: None,
            distance: None,
            time: None,
            notes: None,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_workout_key_roundtrip_from_str() {
        for key in WorkoutKey::CYCLE {
            let parsed: WorkoutKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("F".parse::<WorkoutKey>().is_err());
    }

    #[test]
    fn test_strength_requires_weight_and_reps() {
        let mut record = base_record(ExerciseType::Strength);
        assert!(record.validate().is_err());

        record.weight = Some(100.0);
        assert!(record.validate().is_err());

        record.reps = Some(5);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_strength_rejects_distance() {
        let mut record = base_record(ExerciseType::Strength);
        record.weight = Some(100.0);
        record.reps = Some(5);
        record.distance = Some(20.0);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_carry_requires_distance_or_time() {
        let mut record = base_record(ExerciseType::Carry);
        record.weight = Some(80.0);
        assert!(record.validate().is_err());

        record.distance = Some(20.0);
        assert!(record.validate().is_ok());

        record.distance = None;
        record.time = Some(30);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_hold_requires_weight_and_time() {
        let mut record = base_record(ExerciseType::Hold);
        record.weight = Some(120.0);
        assert!(record.validate().is_err());

        record.time = Some(45);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_cardio_allows_empty_fields() {
        let mut record = base_record(ExerciseType::Cardio);
        assert!(record.validate().is_ok());

        record.distance = Some(5.0);
        record.time = Some(1500);
        assert!(record.validate().is_ok());

        record.weight = Some(10.0);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_blank_exercise_name_rejected() {
        let mut record = base_record(ExerciseType::Cardio);
        record.exercise = "  ".into();
        assert!(record.validate().is_err());
    }
}
