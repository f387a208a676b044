//! CSV export of the full set history.
//!
//! Column order is fixed: workout, exercise, type, weight, reps, distance,
//! time, timestamp. Fields that don't apply to a record's exercise type are
//! rendered blank; validation guarantees they are absent rather than zero.

use crate::{Result, SetRecord};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    workout: String,
    exercise: String,
    #[serde(rename = "type")]
    exercise_type: String,
    weight: Option<f64>,
    reps: Option<u32>,
    distance: Option<f64>,
    time: Option<u32>,
    timestamp: String,
}

impl From<&SetRecord> for CsvRow {
    fn from(record: &SetRecord) -> Self {
        CsvRow {
            workout: record.workout.to_string(),
            exercise: record.exercise.clone(),
            exercise_type: record.exercise_type.to_string(),
            weight: record.weight,
            reps: record.reps,
            distance: record.distance,
            time: record.time,
            timestamp: record.logged_at.to_rfc3339(),
        }
    }
}

/// Write the history as CSV with headers
pub fn write_csv<W: Write>(records: &[SetRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
    }

    csv_writer.flush()?;
    tracing::info!("Exported {} sets to CSV", records.len());
    Ok(())
}

/// Write the history to a CSV file, creating parent directories as needed
pub fn write_csv_file(records: &[SetRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(records, file)
}
