/// Main entry point for the habit tracker command line
///
/// This file sets up logging, parses command line arguments, opens the habit
/// store and runs a single command against it.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use habit_tracker::{
    backup_file_name, week_containing, Category, Frequency, HabitId, HabitStore, SqliteStorage,
    SystemClock,
};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".habit_tracker");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("habit_tracker");
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push("habit_tracker");
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_tracker");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_tracker");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start tracking a new habit
    Add {
        name: String,
        #[arg(long, default_value = "other")]
        category: Category,
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
    },
    /// Rename or recategorize a habit
    Edit {
        id: String,
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        frequency: Frequency,
    },
    /// Delete a habit and its history
    Delete { id: String },
    /// Mark or unmark a day (today by default)
    Toggle {
        id: String,
        /// Day to toggle, as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show all habits, newest first
    List {
        /// Show this week's completions for each habit
        #[arg(long)]
        week: bool,
        /// Print the list as JSON
        #[arg(long, conflicts_with = "week")]
        json: bool,
    },
    /// Show totals across all habits
    Stats {
        /// Print the totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a JSON backup of every habit
    Export {
        /// Output file; defaults to habits-backup-<date>.json
        path: Option<PathBuf>,
    },
    /// Replace all habits with the contents of a JSON backup
    Import { path: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let storage = SqliteStorage::new(&db_path)?;
    let mut store = HabitStore::open(storage, SystemClock);

    run(&mut store, args.command)
}

fn run(
    store: &mut HabitStore<SqliteStorage>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Add { name, category, frequency } => {
            let habit = store.add(&name, category, frequency)?;
            println!("Added '{}' ({})", habit.name, habit.id);
        }
        Command::Edit { id, name, category, frequency } => {
            let habit = store.edit(&HabitId::from(id), &name, category, frequency)?;
            println!("Updated '{}'", habit.name);
        }
        Command::Delete { id } => {
            store.delete(&HabitId::from(id))?;
            println!("Deleted habit");
        }
        Command::Toggle { id, date } => {
            let date = date.unwrap_or_else(|| store.today());
            let habit = store.toggle_completion(&HabitId::from(id), Some(date))?;
            let state = if habit.is_completed_on(date) { "done" } else { "not done" };
            println!(
                "'{}' marked {} for {} (streak {}, best {})",
                habit.name, state, date, habit.streak, habit.best_streak
            );
        }
        Command::List { json: true, .. } => {
            println!("{}", serde_json::to_string_pretty(&store.list_with_progress())?);
        }
        Command::List { week, .. } => print_habits(store, week),
        Command::Stats { json: true } => {
            println!("{}", serde_json::to_string_pretty(&store.stats())?);
        }
        Command::Stats { json: false } => {
            let stats = store.stats();
            println!("Total habits:    {}", stats.total_habits);
            println!("Completed today: {}", stats.completed_today);
            println!("Best streak:     {}", stats.best_streak_overall);
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(backup_file_name(store.today())));
            std::fs::write(&path, store.export_json()?)?;
            println!("Exported habits to {}", path.display());
        }
        Command::Import { path } => {
            let document = std::fs::read_to_string(&path)?;
            let count = store.import_json(&document)?;
            println!("Imported {} habits from {}", count, path.display());
        }
    }

    Ok(())
}

fn print_habits(store: &HabitStore<SqliteStorage>, week: bool) {
    let rows = store.list_with_progress();
    if rows.is_empty() {
        println!("No habits yet. Add your first one with `habit-tracker add <name>`.");
        return;
    }

    let days = week_containing(store.today());

    for row in rows {
        let habit = row.habit;
        println!(
            "{} {} [{} · {}] ({})",
            if row.completed_today { "[x]" } else { "[ ]" },
            habit.name,
            habit.category.display_name(),
            habit.frequency,
            habit.id
        );
        println!(
            "    streak {} | best {} | progress {}%",
            habit.streak, habit.best_streak, row.progress
        );
        if week {
            let grid: Vec<String> = days
                .iter()
                .map(|day| {
                    let mark = if habit.is_completed_on(*day) { "x" } else { "." };
                    format!("{} {}", day.format("%a"), mark)
                })
                .collect();
            println!("    {}", grid.join("  "));
        }
    }
}
