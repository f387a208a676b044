//! Statistics over logged sets.
//!
//! All aggregations are pure functions over a full-history snapshot plus an
//! explicit `now`, recomputed on demand. Grouping key throughout is raw
//! exercise name equality.
//!
//! Absent fields are excluded, not coerced to zero: only strength sets with
//! both weight and reps contribute to volume and estimated-1RM rollups.
//! Non-strength sets still count toward set totals.

use crate::{ExerciseType, SetRecord};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Epley-style estimated one-rep max
///
/// Returns 0 unless both weight and reps are positive.
pub fn estimate_one_rm(weight: f64, reps: u32) -> f64 {
    if weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

/// Estimated 1RM contribution of a single record
///
/// Only strength sets contribute; everything else is 0.
fn record_one_rm(record: &SetRecord) -> f64 {
    if record.exercise_type != ExerciseType::Strength {
        return 0.0;
    }
    match (record.weight, record.reps) {
        (Some(weight), Some(reps)) => estimate_one_rm(weight, reps),
        _ => 0.0,
    }
}

/// Set / rep / volume rollup for a day or a week
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Totals {
    pub sets: u32,
    pub reps: u32,
    /// Σ weight×reps over strength sets, in kg
    pub volume: f64,
}

impl Totals {
    fn add(&mut self, record: &SetRecord) {
        self.sets += 1;
        if record.exercise_type == ExerciseType::Strength {
            if let (Some(weight), Some(reps)) = (record.weight, record.reps) {
                self.reps += reps;
                self.volume += weight * reps as f64;
            }
        }
    }
}

/// A new best estimated 1RM detected today
#[derive(Clone, Debug, PartialEq)]
pub struct PersonalRecord {
    pub exercise: String,
    pub one_rm: f64,
}

impl fmt::Display for PersonalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - new 1RM PR: {:.1} kg", self.exercise, self.one_rm)
    }
}

fn is_same_day(record: &SetRecord, now: DateTime<Utc>) -> bool {
    record.logged_at.date_naive() == now.date_naive()
}

/// Records logged on `now`'s calendar date
pub fn todays_sets<'a>(records: &'a [SetRecord], now: DateTime<Utc>) -> Vec<&'a SetRecord> {
    records.iter().filter(|r| is_same_day(r, now)).collect()
}

/// Rollup of everything logged on `now`'s calendar date
pub fn todays_totals(records: &[SetRecord], now: DateTime<Utc>) -> Totals {
    let mut totals = Totals::default();
    for record in records.iter().filter(|r| is_same_day(r, now)) {
        totals.add(record);
    }
    totals
}

/// Per-exercise rollup over the trailing 7 days, inclusive of today
pub fn weekly_volume(records: &[SetRecord], now: DateTime<Utc>) -> BTreeMap<String, Totals> {
    let cutoff = now - Duration::days(7);
    let mut by_exercise: BTreeMap<String, Totals> = BTreeMap::new();

    for record in records.iter().filter(|r| r.logged_at >= cutoff) {
        by_exercise
            .entry(record.exercise.clone())
            .or_default()
            .add(record);
    }

    by_exercise
}

/// All-time best estimated 1RM per exercise
///
/// Exercises with no qualifying strength set map to 0.
pub fn best_one_rm_by_exercise(records: &[SetRecord]) -> BTreeMap<String, f64> {
    let mut best: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let est = record_one_rm(record);
        let entry = best.entry(record.exercise.clone()).or_insert(0.0);
        if est > *entry {
            *entry = est;
        }
    }
    best
}

/// Group the full history by exercise name, preserving record order
pub fn group_by_exercise(records: &[SetRecord]) -> BTreeMap<String, Vec<&SetRecord>> {
    let mut grouped: BTreeMap<String, Vec<&SetRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.exercise.clone()).or_default().push(record);
    }
    grouped
}

/// Detect personal records set today
///
/// For each exercise touched today, today's best estimated 1RM must strictly
/// exceed the best of every other day. A tie is not a PR.
pub fn personal_records(records: &[SetRecord], now: DateTime<Utc>) -> Vec<PersonalRecord> {
    let mut todays_best: BTreeMap<String, f64> = BTreeMap::new();
    let mut prior_best: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        let est = record_one_rm(record);
        let bucket = if is_same_day(record, now) {
            &mut todays_best
        } else {
            &mut prior_best
        };
        let entry = bucket.entry(record.exercise.clone()).or_insert(0.0);
        if est > *entry {
            *entry = est;
        }
    }

    let mut prs = Vec::new();
    for (exercise, best) in todays_best {
        let previous = prior_best.get(&exercise).copied().unwrap_or(0.0);
        if best > 0.0 && best > previous {
            tracing::debug!("PR for {}: {:.1} kg (previous best {:.1})", exercise, best, previous);
            prs.push(PersonalRecord {
                exercise,
                one_rm: best,
            });
        }
    }
    prs
}
