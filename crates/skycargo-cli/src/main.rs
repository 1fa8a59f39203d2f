mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::airports::handle_airports_command;
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::weather::{handle_weather_command, WeatherCommandArgs};
use skycargo_cli::output::OutputFormat;
use skycargo_lib::{RouteAlgorithm, DEFAULT_ARC_SAMPLES};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weather-aware cargo flight route optimizer")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Override the METAR endpoint (also read from SKYCARGO_WEATHER_URL).
    #[arg(long, global = true)]
    weather_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the lowest-cost route between two airports.
    Route(RouteArgs),
    /// List the airports served by the optimizer.
    Airports,
    /// Show the weather penalty for a single airport.
    Weather(WeatherArgs),
}

#[derive(Parser, Debug)]
struct RouteArgs {
    /// Origin airport code.
    #[arg(long = "from")]
    from: String,
    /// Destination airport code.
    #[arg(long = "to")]
    to: String,
    /// Fetch live METAR data instead of using --weather-severity.
    #[arg(long)]
    real_weather: bool,
    /// Simulated weather penalty in percent (0-50).
    #[arg(long, default_value_t = 20.0, value_parser = parse_severity)]
    weather_severity: f64,
    /// Fuel burn in kg per km (0.5-2.0).
    #[arg(long, default_value_t = 1.0, value_parser = parse_fuel_efficiency)]
    fuel_efficiency: f64,
    /// Cargo load multiplier (1.0-2.0).
    #[arg(long, default_value_t = 1.2, value_parser = parse_cargo_load)]
    cargo_load: f64,
    /// Cruise flight level, e.g. 350 for FL350 (300-410, steps of 10).
    #[arg(long, default_value_t = 350, value_parser = parse_flight_level)]
    altitude: u16,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    algorithm: AlgorithmArg,
    /// Great-circle samples per route leg.
    #[arg(long, default_value_t = DEFAULT_ARC_SAMPLES, value_parser = parse_samples)]
    samples: usize,
}

#[derive(Parser, Debug)]
struct WeatherArgs {
    /// Airport code.
    #[arg(long)]
    airport: String,
    /// Fetch live METAR data instead of using --weather-severity.
    #[arg(long)]
    real_weather: bool,
    /// Simulated weather penalty in percent (0-50).
    #[arg(long, default_value_t = 20.0, value_parser = parse_severity)]
    weather_severity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    #[value(name = "a-star", alias = "astar")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let weather_url = cli.weather_url.as_deref();

    match cli.command {
        Command::Route(args) => {
            let args = RouteCommandArgs {
                from: args.from,
                to: args.to,
                real_weather: args.real_weather,
                weather_severity: args.weather_severity,
                fuel_efficiency: args.fuel_efficiency,
                cargo_load: args.cargo_load,
                altitude: args.altitude,
                algorithm: args.algorithm.into(),
                samples: args.samples,
            };
            handle_route_command(&args, cli.format, weather_url)
        }
        Command::Airports => handle_airports_command(cli.format),
        Command::Weather(args) => {
            let args = WeatherCommandArgs {
                airport: args.airport,
                real_weather: args.real_weather,
                weather_severity: args.weather_severity,
            };
            handle_weather_command(&args, cli.format, weather_url)
        }
    }
}

fn parse_bounded(value: &str, min: f64, max: f64) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !(min..=max).contains(&parsed) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(parsed)
}

fn parse_severity(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.0, 50.0)
}

fn parse_fuel_efficiency(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.5, 2.0)
}

fn parse_cargo_load(value: &str) -> Result<f64, String> {
    parse_bounded(value, 1.0, 2.0)
}

fn parse_flight_level(value: &str) -> Result<u16, String> {
    let level: u16 = value
        .trim_start_matches(['F', 'L', 'f', 'l'])
        .parse()
        .map_err(|_| format!("'{value}' is not a flight level"))?;
    if !(300..=410).contains(&level) || level % 10 != 0 {
        return Err("must be a multiple of 10 between 300 and 410".to_string());
    }
    Ok(level)
}

fn parse_samples(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(samples) => Ok(samples),
        Err(_) => Err(format!("'{value}' is not a positive integer")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
