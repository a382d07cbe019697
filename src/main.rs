use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use vehicleforecast::configuration::ForecastConfiguration;
use vehicleforecast::data::aggregator::Aggregator;
use vehicleforecast::data::observation::RawRecord;
use vehicleforecast::forecast::distribution::latest_distribution;
use vehicleforecast::forecast::forecastengine::{
    ForecastEngine,
    ForecastOutput,
    ForecastRequest
};
use vehicleforecast::forecast::forecasterror::ForecastError;

#[derive(Debug, Parser)]
#[command(
    name = "vehicleforecast",
    about = "Linear regression and Newton interpolation forecasts of annual registration counts",
    version
)]
struct Cli {
    /// JSON configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Forecast from a JSON request holding historical observations.
    Predict {
        request: PathBuf
    },

    /// Aggregate raw records for one category (or all) and forecast.
    Records {
        records: PathBuf,
        #[arg(long)]
        category: String,
        #[arg(long = "from-year")]
        from_year: Option<i32>
    },

    /// List the distinct categories in a raw record file.
    Categories {
        records: PathBuf
    },

    /// Latest count and share per category.
    Distribution {
        records: PathBuf
    },

    /// Forecast every category of a raw record file independently.
    Forecasts {
        records: PathBuf,
        #[arg(long = "from-year")]
        from_year: Option<i32>
    }
}

// 單一類別的結果；失敗時只帶錯誤訊息
#[derive(Debug, Serialize)]
struct CategoryReport {
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<ForecastOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>
}

impl CategoryReport {
    fn new(category: String, result: Result<ForecastOutput, ForecastError>) -> CategoryReport {
        match result {
            Ok(forecast) => CategoryReport { category, forecast: Some(forecast), error: None },
            Err(err) => CategoryReport { category, forecast: None, error: Some(err.to_string()) },
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ForecastError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), ForecastError> {
    let configuration = match cli.config {
        Some(path) => ForecastConfiguration::from_reader(path)?,
        None => ForecastConfiguration::default(),
    };

    match cli.command {
        Commands::Predict { request } => {
            let request = ForecastRequest::from_reader(request)?;
            let engine = ForecastEngine::new(configuration);
            print_json(&engine.forecast(&request)?)
        }
        Commands::Records { records, category, from_year } => {
            let records = RawRecord::from_reader(records)?;
            let engine = ForecastEngine::new(configuration);
            print_json(&engine.forecast_records(&records, &category, from_year)?)
        }
        Commands::Categories { records } => {
            let records = RawRecord::from_reader(records)?;
            print_json(&Aggregator::new(&records).categories())
        }
        Commands::Distribution { records } => {
            let records = RawRecord::from_reader(records)?;
            print_json(&latest_distribution(&records, configuration.all_categories_label())?)
        }
        Commands::Forecasts { records, from_year } => {
            let records = RawRecord::from_reader(records)?;
            let engine = ForecastEngine::new(configuration);
            let reports: Vec<CategoryReport> = engine
                .forecast_categories(&records, from_year)
                .into_iter()
                .map(|(category, result)| CategoryReport::new(category, result))
                .collect();
            print_json(&reports)
        }
    }
}

fn main() -> Result<(), ForecastError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
