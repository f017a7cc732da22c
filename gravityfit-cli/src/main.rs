use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gravityfit_catalog::{load_table, locate_dataset, CsvRowSource, DatasetTable, DEFAULT_CANDIDATES};
use gravityfit_gravity::{
    intensity_index, validate_alpha, validate_fraction, validate_intensity, Mapping, DEFAULT_ALPHA,
};
use gravityfit_planner::generate_plan;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gravityfit", about = "Exoplanet gravity training planner")]
struct Cli {
    /// Exoplanet CSV; defaults to CDC_CH2.csv in the working directory or its parents.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Stats,
    Lookup {
        name: String,
    },
    Search {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// First rows of the dataset in file order.
    Sample {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    Predict {
        #[arg(long)]
        gravity_fraction: f64,
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
        #[arg(long, default_value = "linear")]
        mapping: Mapping,
    },
    Plan {
        #[arg(long)]
        intensity: i64,
        #[arg(long)]
        gravity_fraction: Option<f64>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Stats => {
            let table = open_table(cli.dataset).await?;
            println!("{}", serde_json::to_string_pretty(&table.statistics()?)?);
        }
        Command::Lookup { name } => {
            let table = open_table(cli.dataset).await?;
            match table.find_by_name(&name) {
                Some(planet) => println!("{}", serde_json::to_string_pretty(planet)?),
                None => anyhow::bail!("Exoplanet '{name}' not found"),
            }
        }
        Command::Search { query, limit, seed } => {
            let table = open_table(cli.dataset).await?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let hits = table.search(&query, limit, &mut rng);
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Command::Sample { limit } => {
            let table = open_table(cli.dataset).await?;
            println!("{}", serde_json::to_string_pretty(table.sample(limit))?);
        }
        Command::Predict {
            gravity_fraction,
            alpha,
            mapping,
        } => {
            let g = validate_fraction(gravity_fraction)?;
            let alpha = validate_alpha(alpha)?;
            let out = json!({
                "intensityIndex": intensity_index(g, alpha, mapping),
                "details": {
                    "gravityFraction": g,
                    "alphaUsed": alpha,
                    "mapping": mapping,
                    "formula": mapping.formula(alpha),
                }
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Plan {
            intensity,
            gravity_fraction,
            format,
        } => {
            let intensity = validate_intensity(intensity)?;
            let gravity = gravity_fraction.map(validate_fraction).transpose()?;
            let plan = generate_plan(intensity, gravity);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                Format::Yaml => print!("{}", serde_yaml::to_string(&plan)?),
            }
        }
    }

    Ok(())
}

async fn open_table(dataset: Option<PathBuf>) -> anyhow::Result<DatasetTable> {
    let path = match dataset {
        Some(path) => locate_dataset(&[path])?,
        None => locate_dataset(&DEFAULT_CANDIDATES)?,
    };
    Ok(load_table(&CsvRowSource::new(path)).await?)
}
