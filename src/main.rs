use clap::{Args, Parser, Subcommand};
use curve_advisor::api::formatting::formatter_for;
use curve_advisor::api::theme::{drain_samples, start_ambient_sensor};
use curve_advisor::hardware::{
    MockLightSensor, MockLocationProvider, MockWakeLockProvider, PermissionState, WatchOptions,
};
use curve_advisor::utils::LogLevel;
use curve_advisor::{
    AdvisorConfig, AdvisoryPipeline, ConfigurationManager, CurveDatabase, MatchPolicy,
    OutputFormat, PositionReading, Session, SpeedUnit, ThemeController,
};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "curve-advisor", about = "Advisory curve speeds from position readings")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Curve database, overrides the configured path
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Speed readout unit (mph or kmh)
    #[arg(long, global = true)]
    unit: Option<SpeedUnit>,
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
    /// Match curves within this many degrees instead of exactly
    #[arg(long, global = true, conflicts_with = "proximity")]
    tolerance: Option<f64>,
    /// Match curves within this many metres instead of exactly
    #[arg(long, global = true)]
    proximity: Option<f64>,
    /// Blank advisories when a reading matches no curve
    #[arg(long, global = true)]
    clear_on_no_match: bool,
    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single reading
    Evaluate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Ground speed in m/s
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Feed a JSON array of readings through a tracking session
    Replay {
        #[arg(long)]
        readings: PathBuf,
    },
    /// Validate a curve database
    Check,
    /// Feed ambient light samples (lux) through the theme controller
    Theme {
        #[arg(long, value_delimiter = ',', required = true)]
        lux: Vec<f64>,
        /// Simulate a denied sensor permission
        #[arg(long)]
        denied: bool,
    },
}

fn init_logging(level: LogLevel, verbose: u8) {
    let filter = match verbose {
        0 => level.to_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
}

fn resolve_config(args: &GlobalArgs) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
    let mut manager = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };

    if let Some(unit) = args.unit {
        manager.set_readout_unit(unit);
    }
    if let Some(degrees) = args.tolerance {
        manager.set_match_policy(MatchPolicy::Tolerance { degrees })?;
    }
    if let Some(max_distance_m) = args.proximity {
        manager.set_match_policy(MatchPolicy::Proximity { max_distance_m })?;
    }

    let mut config = manager.config().clone();
    if let Some(db) = &args.db {
        config.database_path = db.clone();
    }
    if args.clear_on_no_match {
        config.clear_on_no_match = true;
    }
    Ok(config)
}

/// Load the curve table; a failure leaves the dashboard running without advisories
fn load_database_or_empty(path: &Path) -> CurveDatabase {
    CurveDatabase::load(path).unwrap_or_else(|e| {
        error!("Error loading the database: {}", e);
        CurveDatabase::default()
    })
}

fn build_pipeline(config: &AdvisorConfig) -> AdvisoryPipeline {
    AdvisoryPipeline::new(load_database_or_empty(&config.database_path), config.match_policy)
        .with_unit(config.readout_unit)
        .with_clear_on_no_match(config.clear_on_no_match)
}

fn read_readings(path: &Path) -> Result<Vec<PositionReading>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read readings file '{}': {}", path.display(), e))?;
    let readings = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse readings file '{}': {}", path.display(), e))?;
    Ok(readings)
}

fn run(cli: Cli, config: AdvisorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = formatter_for(cli.global.format);

    match cli.command {
        Command::Evaluate { lat, lon, speed } => {
            let mut pipeline = build_pipeline(&config);
            pipeline.submit(PositionReading::new(lat, lon, speed))?;
            if let Some(update) = pipeline.process() {
                println!("{}", formatter.format(pipeline.display(), Some(&update.evaluation))?);
            }
        }
        Command::Replay { readings } => {
            let readings = read_readings(&readings)?;
            let mut pipeline = build_pipeline(&config);

            let location = MockLocationProvider::with_readings(readings);
            let options = WatchOptions {
                enable_high_accuracy: config.high_accuracy,
            };
            let mut session = Session::new(location, MockWakeLockProvider::new(), config.readout_unit)
                .with_options(options);
            session.start()?;

            while let Some(reading) = session.poll_reading() {
                if let Err(e) = pipeline.submit(reading) {
                    error!("Skipping reading: {}", e);
                    continue;
                }
                if let Some(update) = pipeline.process() {
                    println!("{}", formatter.format(pipeline.display(), Some(&update.evaluation))?);
                    if cli.global.format == OutputFormat::Text {
                        println!();
                    }
                }
            }
            session.stop();

            let stats = pipeline.stats();
            info!(
                "Replay finished: {} submitted, {} processed, {} superseded",
                stats.submitted, stats.processed, stats.superseded
            );
        }
        Command::Check => {
            let database = CurveDatabase::load(&config.database_path)?;
            let without_radius = database.records().iter().filter(|r| r.radius.is_none()).count();
            println!(
                "{}: {} curve records ({} without radius)",
                config.database_path.display(),
                database.len(),
                without_radius
            );
        }
        Command::Theme { lux, denied } => {
            let permission = if denied {
                PermissionState::Denied
            } else {
                PermissionState::Granted
            };
            let mut sensor = MockLightSensor::new(permission, lux);
            let mut controller = ThemeController::new(config.dark_threshold_lux);
            if !start_ambient_sensor(&mut sensor, Some(config.sensor_frequency_hz))? {
                println!("Sensor not started, theme: {:?}", controller.theme());
                return Ok(());
            }
            println!("Theme: {:?}", drain_samples(&mut sensor, &mut controller));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let log_level = if cli.global.config.is_some() {
        config.log_level
    } else {
        LogLevel::Warn
    };
    init_logging(log_level, cli.global.verbose);

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
