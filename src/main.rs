use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use coverage_atlas::config::{Config, ConfigOverrides};
use coverage_atlas::coverage::{CoverageAggregator, CoverageBuild, EntityProfile};
use coverage_atlas::ingest::{Dataset, IngestError, SourceLoader};
use coverage_atlas::output::csv::{
    comparison_to_csv, entities_to_csv, index_to_csv, profile_to_csv, rows_to_csv,
};
use coverage_atlas::output::json::render_json;
use coverage_atlas::output::table::{
    render_comparison_table, render_entities_table, render_heatmap_table, render_profile_table,
    render_rows_table, render_taxonomy_table,
};
use coverage_atlas::output::OutputFormat;
use coverage_atlas::taxonomy::Taxonomy;
use coverage_atlas::venn::{Comparison, RegionKey, Selection, SetRegionComputer};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "coverage-atlas",
    about = "Curriculum coverage heatmaps and entity comparisons"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[arg(short, long)]
    delimiter: Option<char>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Heatmap {
        file: PathBuf,
    },
    Entities {
        file: PathBuf,
    },
    Entity {
        file: PathBuf,
        id: String,
    },
    Compare {
        file: PathBuf,
        a: String,
        b: String,
        c: Option<String>,
        #[arg(long)]
        region: Option<RegionKey>,
    },
    Rows {
        file: PathBuf,
        #[arg(long, default_value = "")]
        search: String,
    },
    Taxonomy,
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        delimiter: cli.delimiter,
        format: cli.output,
    });
    let format = config.output.format;

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let taxonomy = Taxonomy::curriculum();
    let aggregator = CoverageAggregator::new(&taxonomy).with_columns(config.columns.clone());

    match &cli.command {
        Commands::Heatmap { file } => {
            let dataset = load_dataset(file, &config).await?;
            let build = aggregator.build_index(&dataset.rows);
            match format {
                OutputFormat::Table => {
                    let threshold = config.heatmap.crowded_threshold;
                    println!("{}", render_heatmap_table(&build.index, &taxonomy, threshold));
                }
                OutputFormat::Json => println!("{}", render_json(&build.index)?),
                OutputFormat::Csv => println!("{}", index_to_csv(&build.index, &taxonomy)?),
            }
        }
        Commands::Entities { file } => {
            let dataset = load_dataset(file, &config).await?;
            let build = aggregator.build_index(&dataset.rows);
            print_entities(&build, format)?;
        }
        Commands::Entity { file, id } => {
            let dataset = load_dataset(file, &config).await?;
            let id = id.trim();
            let profile = aggregator
                .profile(&dataset.rows, id)
                .ok_or_else(|| anyhow!("unknown entity: {id}"))?;
            print_profile(&profile, &taxonomy, format)?;
        }
        Commands::Compare {
            file,
            a,
            b,
            c,
            region,
        } => {
            let dataset = load_dataset(file, &config).await?;
            let build = aggregator.build_index(&dataset.rows);
            let mut ids = vec![a.as_str(), b.as_str()];
            ids.extend(c.as_deref());
            let comparison = Selection::resolve(&build, &ids)?
                .compare(&SetRegionComputer::new(&taxonomy));
            print_comparison(&comparison, &taxonomy, *region, format)?;
        }
        Commands::Rows { file, search } => {
            let dataset = load_dataset(file, &config).await?;
            let found = dataset.search(search);
            match format {
                OutputFormat::Table => println!("{}", render_rows_table(&dataset.headers, &found)),
                OutputFormat::Json => println!("{}", render_json(&found)?),
                OutputFormat::Csv => println!("{}", rows_to_csv(&dataset.headers, &found)?),
            }
        }
        Commands::Taxonomy => match format {
            OutputFormat::Table => println!("{}", render_taxonomy_table(&taxonomy)),
            OutputFormat::Json => println!("{}", render_json(&taxonomy)?),
            OutputFormat::Csv => {
                warn!("CSV output for taxonomy not implemented, using JSON");
                println!("{}", render_json(&taxonomy)?);
            }
        },
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

async fn load_dataset(file: &Path, config: &Config) -> Result<Dataset> {
    let mut loader = SourceLoader::new();
    loader.start(file);
    let text = loader
        .finish()
        .await?
        .ok_or_else(|| anyhow!("no read was started for {}", file.display()))?;

    let dataset = match Dataset::from_text(&text, &config.parser()) {
        Ok(dataset) => dataset,
        Err(IngestError::NoRows) => {
            return Err(anyhow!(
                "{} contains no data rows; check the header line and delimiter",
                file.display()
            ))
        }
    };
    if dataset.dropped_lines > 0 {
        warn!(
            "{} lines in {} did not match the header width and were skipped",
            dataset.dropped_lines,
            file.display()
        );
    }
    info!(
        "loaded {} rows from {} (sha256 {})",
        dataset.rows.len(),
        file.display(),
        dataset.digest
    );
    Ok(dataset)
}

fn print_entities(build: &CoverageBuild, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_entities_table(build)),
        OutputFormat::Json => println!("{}", render_json(&build.entities)?),
        OutputFormat::Csv => println!("{}", entities_to_csv(&build.entities)?),
    }
    Ok(())
}

fn print_profile(
    profile: &EntityProfile,
    taxonomy: &Taxonomy,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_profile_table(profile, taxonomy)),
        OutputFormat::Json => println!("{}", render_json(profile)?),
        OutputFormat::Csv => println!("{}", profile_to_csv(profile, taxonomy)?),
    }
    Ok(())
}

fn print_comparison(
    comparison: &Comparison,
    taxonomy: &Taxonomy,
    region: Option<RegionKey>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!(
            "{}",
            render_comparison_table(comparison, taxonomy, region)
        ),
        OutputFormat::Json => match region {
            Some(key) => println!("{}", render_json(comparison.regions.region(key))?),
            None => println!("{}", render_json(comparison)?),
        },
        OutputFormat::Csv => println!("{}", comparison_to_csv(comparison, taxonomy, region)?),
    }
    Ok(())
}
