use clap::Parser;
use hiitfit::application::{self, ConfigService, HistoryStore};
use hiitfit::cli::{format_exercise_list, format_history, format_week, Cli, Commands};
use hiitfit::domain::{week, ExerciseCatalog};
use hiitfit::error::HiitError;
use hiitfit::infrastructure::config::resolve_data_dir;
use hiitfit::infrastructure::{Config, FileHistoryRepository, HistoryRepository};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr; RUST_LOG overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), HiitError> {
    let root = resolve_data_dir(cli.dir)?;

    match cli.command {
        Commands::Done { exercise } => {
            let (catalog, mut store) = open(&root)?;
            let (name, date) = application::record_done(&mut store, &catalog, &exercise)?;
            println!("Recorded {} on {}", name, date.format("%d-%m-%Y"));
            Ok(())
        }
        Commands::Add { exercise, on } => {
            let (catalog, mut store) = open(&root)?;
            let (name, date) =
                application::record_on(&mut store, &catalog, &exercise, on.as_deref())?;
            println!("Recorded {} on {}", name, date.format("%d-%m-%Y"));
            Ok(())
        }
        Commands::Remove { day } => {
            let (_, mut store) = open(&root)?;
            let removed = application::remove_on(&mut store, &day)?;
            println!(
                "Removed {} ({} exercises)",
                removed.date.format("%d-%m-%Y"),
                removed.total()
            );
            Ok(())
        }
        Commands::History { limit } => {
            let (_, store) = open(&root)?;
            warn_if_load_failed(&store);
            println!("{}", format_history(store.days(), limit).trim_end());
            Ok(())
        }
        Commands::Week => {
            let (catalog, store) = open(&root)?;
            warn_if_load_failed(&store);
            let end = week::report_end(store.history(), store.today());
            let days = week::week_ending(store.history(), end);
            println!("Week ending {}", end.format("%-d %b %Y"));
            print!("{}", format_week(&days, catalog.names()));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(root);

            if list {
                let config = service.list()?;
                println!("history_file = {}", config.history_file);
                println!("exercises = {}", config.exercises.join(", "));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else if k == "exercises" {
                    print!("{}", format_exercise_list(&service.list()?.exercises));
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: hiitfit config [--list | <key> [<value>]]");
                println!("Valid keys: history_file, exercises");
            }
            Ok(())
        }
    }
}

fn open(root: &Path) -> Result<(ExerciseCatalog, HistoryStore<FileHistoryRepository>), HiitError> {
    let config = Config::load_from_dir(root)?;
    Ok((config.catalog(), application::open_store(root, &config)))
}

fn warn_if_load_failed<R: HistoryRepository>(store: &HistoryStore<R>) {
    if let Some(e) = store.load_error() {
        eprintln!("Warning: {}", e);
        eprintln!(
            "Showing an empty history; {} was left untouched.",
            store.repository().location().display()
        );
    }
}
