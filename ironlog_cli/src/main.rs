use chrono::Utc;
use clap::{Parser, Subcommand};
use ironlog_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Personal strength training tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a set; omitted values are pre-filled from your history
    Log {
        /// Exercise name (e.g. "Log Press")
        exercise: String,

        /// Exercise type (strength, carry, hold, cardio)
        #[arg(long, default_value = "strength")]
        r#type: String,

        /// Workout key override (defaults to the current rotation)
        #[arg(long)]
        workout: Option<String>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        reps: Option<u32>,

        /// Distance (metres for carry, kilometres for cardio)
        #[arg(long)]
        distance: Option<f64>,

        /// Time in seconds
        #[arg(long)]
        time: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the advisor's suggestion for an exercise
    Suggest {
        exercise: String,

        /// Exercise type (strength, carry, hold, cardio)
        #[arg(long, default_value = "strength")]
        r#type: String,
    },

    /// Today's sets, totals and personal records
    Today,

    /// Weekly volume per exercise (trailing 7 days)
    Week,

    /// Full history grouped by exercise with best estimated 1RM
    History,

    /// Finish the active workout: tag its sets and advance the rotation
    Finish,

    /// Delete a set by id
    Delete {
        id: String,
    },

    /// Manage the exercise catalog
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Export the full history as CSV
    Export {
        /// Output file path
        #[arg(long, default_value = "ironlog-history.csv")]
        output: PathBuf,
    },

    /// Run a rest countdown
    Timer {
        /// Countdown length in seconds (defaults to the first configured preset)
        #[arg(long)]
        seconds: Option<u32>,
    },

    /// Show or replace the training plan note
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// Add an exercise to a workout key
    Add {
        workout: String,
        name: String,

        /// Exercise type (strength, carry, hold, cardio)
        #[arg(long, default_value = "strength")]
        r#type: String,
    },

    /// Remove an exercise from a workout key
    Remove { workout: String, name: String },

    /// List exercises, for one workout key or all of them
    List {
        workout: Option<String>,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    Show,
    Set { text: String },
}

/// File layout under the data directory
struct DataPaths {
    sets: PathBuf,
    rotation: PathBuf,
    exercises: PathBuf,
    plan: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            sets: data_dir.join("sets.jsonl"),
            rotation: data_dir.join("rotation.json"),
            exercises: data_dir.join("custom_exercises.json"),
            plan: data_dir.join("plan.txt"),
        }
    }
}

fn main() {
    ironlog_core::logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    let mut engine = Engine::new(
        JsonlSetRepository::new(&paths.sets),
        FileRotationStore::new(&paths.rotation),
        config.progression.clone(),
    );

    match cli.command {
        Commands::Log {
            exercise,
            r#type,
            workout,
            weight,
            reps,
            distance,
            time,
            notes,
        } => cmd_log(
            &mut engine, exercise, &r#type, workout, weight, reps, distance, time, notes,
        ),
        Commands::Suggest { exercise, r#type } => cmd_suggest(&engine, &exercise, &r#type),
        Commands::Today => cmd_today(&engine),
        Commands::Week => cmd_week(&engine),
        Commands::History => cmd_history(&engine),
        Commands::Finish => cmd_finish(&mut engine),
        Commands::Delete { id } => cmd_delete(&mut engine, &id),
        Commands::Exercise { action } => cmd_exercise(&paths, action),
        Commands::Export { output } => cmd_export(&engine, &output),
        Commands::Timer { seconds } => cmd_timer(seconds.or(config.timer.presets_seconds.first().copied())),
        Commands::Plan { action } => cmd_plan(&paths, action),
    }
}

type CliEngine = Engine<JsonlSetRepository, FileRotationStore>;

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    engine: &mut CliEngine,
    exercise: String,
    type_str: &str,
    workout: Option<String>,
    weight: Option<f64>,
    reps: Option<u32>,
    distance: Option<f64>,
    time: Option<u32>,
    notes: Option<String>,
) -> Result<()> {
    let exercise_type: ExerciseType = type_str.parse()?;
    let workout = match workout {
        Some(key) => key.parse()?,
        None => engine.current_workout()?,
    };

    // Pre-fill anything the user didn't give from the advisor
    let suggestion = engine.suggest(&exercise, exercise_type)?;
    let record = SetRecord {
        id: None,
        workout,
        session_id: None,
        exercise,
        exercise_type,
        weight: weight.or(suggestion.weight),
        reps: reps.or(suggestion.reps),
        distance: distance.or(suggestion.distance),
        time: time.or(suggestion.time),
        notes,
        logged_at: Utc::now(),
    };

    let logged = engine.log_set(record)?;

    let set_number = stats::todays_sets(&engine.history()?, Utc::now())
        .iter()
        .filter(|r| r.exercise == logged.exercise)
        .count();

    println!(
        "✓ Set {} logged for {} (workout {}): {}",
        set_number,
        logged.exercise,
        logged.workout,
        describe_set(&logged)
    );
    Ok(())
}

fn cmd_suggest(engine: &CliEngine, exercise: &str, type_str: &str) -> Result<()> {
    let exercise_type: ExerciseType = type_str.parse()?;
    let suggestion = engine.suggest(exercise, exercise_type)?;

    if suggestion.is_empty() {
        println!("No suggestion for {} - no history yet.", exercise);
        return Ok(());
    }

    println!("Next set for {}:", exercise);
    if let Some(weight) = suggestion.weight {
        println!("  Weight: {} kg", weight);
    }
    if let Some(reps) = suggestion.reps {
        println!("  Reps: {}", reps);
    }
    if let Some(distance) = suggestion.distance {
        println!("  Distance: {}", distance);
    }
    if let Some(time) = suggestion.time {
        println!("  Time: {} s", time);
    }
    Ok(())
}

fn cmd_today(engine: &CliEngine) -> Result<()> {
    let history = engine.history()?;
    let now = Utc::now();

    println!("Workout {}", engine.current_workout()?);
    println!();

    let todays = stats::todays_sets(&history, now);
    if todays.is_empty() {
        println!("No sets logged yet.");
        return Ok(());
    }

    let mut by_exercise: Vec<(&str, Vec<&SetRecord>)> = Vec::new();
    for &record in &todays {
        match by_exercise.iter().position(|(name, _)| *name == record.exercise) {
            Some(index) => by_exercise[index].1.push(record),
            None => by_exercise.push((record.exercise.as_str(), vec![record])),
        }
    }

    for (exercise, sets) in &by_exercise {
        println!("{}", exercise);
        for (index, set) in sets.iter().enumerate() {
            println!("  Set {}: {}", index + 1, describe_set(set));
        }
    }

    print_summary(&history, now);
    Ok(())
}

fn cmd_week(engine: &CliEngine) -> Result<()> {
    let history = engine.history()?;
    let weekly = stats::weekly_volume(&history, Utc::now());

    println!("Weekly volume (last 7 days)");
    println!();

    if weekly.is_empty() {
        println!("No sets logged in the last 7 days yet.");
        return Ok(());
    }

    for (exercise, totals) in weekly {
        println!("{}", exercise);
        println!("  Sets: {}", totals.sets);
        println!("  Total reps: {}", totals.reps);
        println!("  Total volume: {:.1} kg", totals.volume);
    }
    Ok(())
}

fn cmd_history(engine: &CliEngine) -> Result<()> {
    let history = engine.history()?;
    let grouped = stats::group_by_exercise(&history);
    let best = stats::best_one_rm_by_exercise(&history);

    if grouped.is_empty() {
        println!("No sets logged yet.");
        return Ok(());
    }

    for (exercise, sets) in grouped {
        let best_1rm = best.get(&exercise).copied().unwrap_or(0.0);
        if best_1rm > 0.0 {
            println!("{} (best est. 1RM: {:.1} kg)", exercise, best_1rm);
        } else {
            println!("{}", exercise);
        }

        for set in sets {
            println!(
                "  {} | workout {} | {}",
                set.logged_at.format("%Y-%m-%d"),
                set.workout,
                describe_set(set)
            );
        }
        println!();
    }
    Ok(())
}

fn cmd_finish(engine: &mut CliEngine) -> Result<()> {
    let history = engine.history()?;
    let now = Utc::now();

    let workout = engine.current_workout()?;
    println!("Workout {} summary", workout);
    print_summary(&history, now);

    let session = engine.finish_workout()?;
    println!();
    println!("✓ Workout complete (session {})", session.id);
    println!("  Next workout: {}", engine.current_workout()?);
    Ok(())
}

fn cmd_delete(engine: &mut CliEngine, id: &str) -> Result<()> {
    let id = uuid::Uuid::parse_str(id)
        .map_err(|e| Error::Validation(format!("invalid set id: {}", e)))?;
    engine.delete_set(id)?;
    println!("✓ Deleted set {} (if it existed)", id);
    Ok(())
}

fn cmd_exercise(paths: &DataPaths, action: ExerciseAction) -> Result<()> {
    let mut catalog = ExerciseCatalog::new(FileCustomExerciseStore::new(&paths.exercises));

    match action {
        ExerciseAction::Add {
            workout,
            name,
            r#type,
        } => {
            let key: WorkoutKey = workout.parse()?;
            let exercise_type: ExerciseType = r#type.parse()?;
            catalog.add_exercise(key, &name, exercise_type)?;
            println!("✓ Added {} ({}) to workout {}", name, exercise_type, key);
        }

        ExerciseAction::Remove { workout, name } => {
            let key: WorkoutKey = workout.parse()?;
            catalog.remove_exercise(key, &name)?;
            println!("✓ Removed {} from workout {}", name, key);
        }

        ExerciseAction::List { workout } => {
            let keys: Vec<WorkoutKey> = match workout {
                Some(key) => vec![key.parse()?],
                None => WorkoutKey::CYCLE.to_vec(),
            };

            for key in keys {
                let exercises = catalog.exercises_for(key)?;
                println!("Workout {}:", key);
                if exercises.is_empty() {
                    println!("  (none)");
                }
                for exercise in exercises {
                    println!("  {} ({})", exercise.name, exercise.exercise_type);
                }
            }
        }
    }
    Ok(())
}

fn cmd_export(engine: &CliEngine, output: &Path) -> Result<()> {
    let history = engine.history()?;
    export::write_csv_file(&history, output)?;
    println!("✓ Exported {} sets to {}", history.len(), output.display());
    Ok(())
}

fn cmd_timer(seconds: Option<u32>) -> Result<()> {
    let seconds = seconds.unwrap_or(60);

    let mut timer = RestTimer::new();
    timer.start(seconds);

    // One tick per wall second; the loop exits the moment the timer goes
    // idle, so no stray ticks are delivered after reset or completion.
    while timer.is_running() {
        print!("\r  Rest: {}  ", format_mmss(timer.remaining()));
        io::stdout().flush()?;
        std::thread::sleep(Duration::from_secs(1));
        timer.tick();
    }

    println!("\r✓ Rest over.          ");
    Ok(())
}

fn cmd_plan(paths: &DataPaths, action: PlanAction) -> Result<()> {
    match action {
        PlanAction::Show => {
            let text = plan::load(&paths.plan)?;
            if text.is_empty() {
                println!("(no plan yet)");
            } else {
                println!("{}", text);
            }
        }
        PlanAction::Set { text } => {
            plan::save(&paths.plan, &text)?;
            println!("✓ Plan saved");
        }
    }
    Ok(())
}

/// Human-readable one-line summary of a set's measured values
fn describe_set(record: &SetRecord) -> String {
    let mut parts = Vec::new();
    if let Some(weight) = record.weight {
        parts.push(format!("{} kg", weight));
    }
    if let Some(reps) = record.reps {
        parts.push(format!("{} reps", reps));
    }
    if let Some(distance) = record.distance {
        let unit = match record.exercise_type {
            ExerciseType::Cardio => "km",
            _ => "m",
        };
        parts.push(format!("{} {}", distance, unit));
    }
    if let Some(time) = record.time {
        parts.push(format!("{} s", time));
    }
    if parts.is_empty() {
        parts.push("(no measurements)".into());
    }
    parts.join(" × ")
}

/// Shared tail of `today` and `finish`: totals plus PR callouts
fn print_summary(history: &[SetRecord], now: chrono::DateTime<Utc>) {
    let totals = stats::todays_totals(history, now);

    println!();
    println!("Total sets: {}", totals.sets);
    println!("Total reps: {}", totals.reps);
    println!("Total volume: {:.1} kg", totals.volume);

    let prs = stats::personal_records(history, now);
    if !prs.is_empty() {
        println!();
        println!("Personal records today:");
        for pr in prs {
            println!("  🏆 {}", pr);
        }
    }
}

fn format_mmss(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
