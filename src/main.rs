use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vacation_finder::{
    cities::is_known_city, generator, report, CombinationSearch, FinderConfig, FlightCatalog,
    VacationFinder,
};

#[derive(Debug, Parser)]
#[command(name = "vacation-finder", about = "Find the cheapest group vacation")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan upcoming days for the cheapest common destination
    Search {
        /// Origin city of each traveler, in traveler order
        #[arg(required = true)]
        origins: Vec<String>,
        /// Number of departure days to scan, starting today
        #[arg(short, long)]
        days: Option<u32>,
        /// Number of options to show
        #[arg(short, long)]
        results: Option<usize>,
        /// Largest allowed gap between arrivals, in minutes
        #[arg(long)]
        max_wait: Option<i64>,
        /// Worker threads used for the scan
        #[arg(short, long)]
        workers: Option<usize>,
        /// Flight data file (defaults to $FLIGHT_DATA_FILE or data/flight_data.csv)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic flight data file
    Generate {
        #[arg(long, default_value_t = generator::DEFAULT_ROWS)]
        rows: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = FinderConfig::from_env();

    match args.command {
        Command::Search {
            origins,
            days,
            results,
            max_wait,
            workers,
            data,
            json,
        } => {
            if let Some(days) = days {
                config.num_days = days;
            }
            if let Some(results) = results {
                config.num_results = results;
            }
            if let Some(max_wait) = max_wait {
                config.max_wait_minutes = max_wait;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if let Some(data) = data {
                config.data_file = data;
            }
            search(&config, &origins, json)
        }
        Command::Generate { rows, output, seed } => {
            let output = output.unwrap_or(config.data_file);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            generator::write_flight_data(&output, rows, &mut rng)
                .with_context(|| format!("writing flight data to {}", output.display()))?;
            Ok(())
        }
    }
}

fn search(config: &FinderConfig, origins: &[String], json: bool) -> anyhow::Result<()> {
    for origin in origins.iter().filter(|origin| !is_known_city(origin)) {
        warn!(%origin, "origin is not a known city, only exact matches are searched");
    }

    // fail on bad arguments before reading the data file
    CombinationSearch::with_max_wait_minutes(config.max_wait_minutes).check_arguments(origins)?;

    let catalog = FlightCatalog::load(&config.data_file)
        .with_context(|| format!("reading flight data from {}", config.data_file.display()))?;
    let finder = VacationFinder::with_config(Arc::new(catalog), config);

    info!(
        travelers = origins.len(),
        days = config.num_days,
        workers = config.workers,
        "searching vacations"
    );
    let vacations = if config.workers > 1 {
        let today = Local::now().date_naive();
        finder.find_cheapest_vacations_parallel(origins, today, config.num_days, config.workers)?
    } else {
        finder.find_cheapest_vacations(origins, config.num_days)?
    };

    if json {
        println!("{}", report::render_json(&vacations, config.num_results)?);
    } else {
        print!("{}", report::render_report(&vacations, config.num_results));
    }
    Ok(())
}
