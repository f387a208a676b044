//! Progression advisor: pre-fills the next set from an exercise's history.
//!
//! Rules per exercise type:
//! - Strength: linear progression - add weight once the rep target is
//!   cleared, otherwise repeat the stimulus
//! - Carry / Hold: flat carry-over of the last effort
//! - Cardio: no suggestion

use crate::config::ProgressionConfig;
use crate::{ExerciseType, SetRecord, Suggestion};

/// Suggest values for the next set of an exercise
///
/// History is matched by exercise name only, across all workout keys. The
/// most recent record by `logged_at` wins; timestamp ties resolve to the
/// record seen last.
pub fn suggest_next(
    exercise: &str,
    exercise_type: ExerciseType,
    history: &[SetRecord],
    config: &ProgressionConfig,
) -> Suggestion {
    let last = last_record_for(exercise, history);

    let Some(last) = last else {
        tracing::debug!("No history for '{}', suggesting empty fields", exercise);
        return Suggestion::default();
    };

    match exercise_type {
        ExerciseType::Strength => {
            let weight = match (last.weight, last.reps) {
                (Some(w), Some(r)) if r >= config.rep_threshold => {
                    Some(w + config.weight_increment_kg)
                }
                (weight, _) => weight,
            };
            Suggestion {
                weight,
                reps: last.reps,
                ..Suggestion::default()
            }
        }
        ExerciseType::Carry => Suggestion {
            weight: last.weight,
            distance: last.distance,
            time: last.time,
            ..Suggestion::default()
        },
        ExerciseType::Hold => Suggestion {
            weight: last.weight,
            time: last.time,
            ..Suggestion::default()
        },
        // Progression for cardio is out of scope; the caller keeps its defaults
        ExerciseType::Cardio => Suggestion::default(),
    }
}

/// Most recent record for the exercise, ties broken last-seen-wins
fn last_record_for<'a>(exercise: &str, history: &'a [SetRecord]) -> Option<&'a SetRecord> {
    let mut latest: Option<&SetRecord> = None;
    for record in history.iter().filter(|r| r.exercise == exercise) {
        match latest {
            Some(current) if record.logged_at < current.logged_at => {}
            _ => latest = Some(record),
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkoutKey;
    use chrono::{Duration, Utc};

    fn strength_set(exercise: &str, weight: f64, reps: u32, days_ago: i64) -> SetRecord {
        SetRecord {
            id: None,
            workout: WorkoutKey::A,
            session_id: None,
            exercise: exercise.into(),
            exercise_type: ExerciseType::Strength,
            weight: Some(weight),
            reps: Some(reps),
            distance: None,
            time: None,
            notes: None,
            logged_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_strength_progresses_at_rep_threshold() {
        let history = vec![strength_set("Log Press", 100.0, 8, 1)];
        let suggestion = suggest_next(
            "Log Press",
            ExerciseType::Strength,
            &history,
            &ProgressionConfig::default(),
        );

        assert_eq!(suggestion.weight, Some(102.5));
        assert_eq!(suggestion.reps, Some(8));
    }

    #[test]
    fn test_strength_repeats_below_threshold() {
        let history = vec![strength_set("Log Press", 100.0, 5, 1)];
        let suggestion = suggest_next(
            "Log Press",
            ExerciseType::Strength,
            &history,
            &ProgressionConfig::default(),
        );

        assert_eq!(suggestion.weight, Some(100.0));
        assert_eq!(suggestion.reps, Some(5));
    }

    #[test]
    fn test_no_history_suggests_empty() {
        let suggestion = suggest_next(
            "Log Press",
            ExerciseType::Strength,
            &[],
            &ProgressionConfig::default(),
        );
        assert!(suggestion.is_empty());
    }

    #[test]
    fn test_most_recent_record_wins() {
        let history = vec![
            strength_set("Log Press", 110.0, 8, 0),
            strength_set("Log Press", 100.0, 5, 3),
        ];
        let suggestion = suggest_next(
            "Log Press",
            ExerciseType::Strength,
            &history,
            &ProgressionConfig::default(),
        );

        assert_eq!(suggestion.weight, Some(112.5));
    }

    #[test]
    fn test_history_ignores_other_exercises() {
        let history = vec![strength_set("Deadlift", 180.0, 8, 0)];
        let suggestion = suggest_next(
            "Log Press",
            ExerciseType::Strength,
            &history,
            &ProgressionConfig::default(),
        );
        assert!(suggestion.is_empty());
    }

    #[test]
    fn test_carry_flat_carry_over() {
        let mut last = strength_set("Farmers", 0.0, 0, 1);
        last.exercise_type = ExerciseType::Carry;
        last.weight = Some(80.0);
        last.reps = None;
        last.distance = Some(20.0);
        last.time = Some(25);

        let suggestion = suggest_next(
            "Farmers",
            ExerciseType::Carry,
            &[last],
            &ProgressionConfig::default(),
        );

        assert_eq!(suggestion.weight, Some(80.0));
        assert_eq!(suggestion.distance, Some(20.0));
        assert_eq!(suggestion.time, Some(25));
        assert_eq!(suggestion.reps, None);
    }

    #[test]
    fn test_hold_carries_weight_and_time_only() {
        let mut last = strength_set("Deadlift Hold", 0.0, 0, 1);
        last.exercise_type = ExerciseType::Hold;
        last.weight = Some(160.0);
        last.reps = None;
        last.time = Some(30);

        let suggestion = suggest_next(
            "Deadlift Hold",
            ExerciseType::Hold,
            &[last],
            &ProgressionConfig::default(),
        );

        assert_eq!(suggestion.weight, Some(160.0));
        assert_eq!(suggestion.time, Some(30));
        assert_eq!(suggestion.distance, None);
    }

    #[test]
    fn test_cardio_suggests_nothing() {
        let mut last = strength_set("Row", 0.0, 0, 1);
        last.exercise_type = ExerciseType::Cardio;
        last.weight = None;
        last.reps = None;
        last.distance = Some(5.0);
        last.time = Some(1200);

        let suggestion = suggest_next(
            "Row",
            ExerciseType::Cardio,
            &[last],
            &ProgressionConfig::default(),
        );
        assert!(suggestion.is_empty());
    }

    #[test]
    fn test_custom_threshold_and_increment() {
        let config = ProgressionConfig {
            rep_threshold: 5,
            weight_increment_kg: 5.0,
        };
        let history = vec![strength_set("Squat", 140.0, 5, 1)];
        let suggestion = suggest_next("Squat", ExerciseType::Strength, &history, &config);

        assert_eq!(suggestion.weight, Some(145.0));
    }
}
