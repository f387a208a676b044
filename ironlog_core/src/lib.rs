#![forbid(unsafe_code)]

//! Core domain model and business logic for the Ironlog strength tracker.
//!
//! This crate provides:
//! - Domain types (workout keys, exercise types, set records, sessions)
//! - Exercise catalog management
//! - Progression advisor
//! - Statistics (1RM estimates, day/week rollups, PR detection)
//! - Workout rotation and rest timer state machines
//! - Persistence (JSONL set repository, rotation/catalog stores, CSV export)

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod plan;
pub mod repo;
pub mod rotation;
pub mod state;
pub mod stats;
pub mod timer;
pub mod types;

// Re-export commonly used types
pub use catalog::ExerciseCatalog;
pub use config::Config;
pub use engine::Engine;
pub use error::{Error, Result};
pub use repo::{JsonlSetRepository, SetRepository};
pub use state::{
    CustomExerciseMap, CustomExerciseStore, FileCustomExerciseStore, FileRotationStore,
    RotationStore,
};
pub use stats::{PersonalRecord, Totals};
pub use timer::{RestTimer, RestTimerState};
pub use types::*;
