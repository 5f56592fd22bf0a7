//! Evidence map CLI
//!
//! # Commands
//!
//! ```bash
//! evidence-map serve                          # Start HTTP server (port 3000)
//! evidence-map summary --country Brazil       # Counts and axis orders
//! evidence-map render -o map.svg              # Write the chart as SVG
//! evidence-map rows --format csv -o out.csv   # Export the filtered rows
//! evidence-map options                        # Dropdown values
//! ```
//!
//! The spreadsheet comes from `--data`, `EVIDENCE_MAP_DATA` or the default
//! file name, in that order.

use clap::{Args, Parser, Subcommand, ValueEnum};
use evidence_map::{
    parser::columns::Column, render, server::AppState, AppConfig, EvidenceDataset,
    FilterSelection, StudyRow,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "evidence-map")]
#[command(about = "Interactive evidence map for oncology research", long_about = None)]
struct Cli {
    /// Spreadsheet with the studies (.xlsx, .ods or .csv)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Keep only this country
    #[arg(long)]
    country: Option<String>,

    /// Keep only this population
    #[arg(long)]
    population: Option<String>,

    /// Keep only this adverse effect
    #[arg(long)]
    adverse_effect: Option<String>,

    /// Keep only this intervention group
    #[arg(long)]
    intervention_group: Option<String>,
}

impl From<FilterArgs> for FilterSelection {
    fn from(args: FilterArgs) -> Self {
        FilterSelection::from_raw(
            args.country,
            args.population,
            args.adverse_effect,
            args.intervention_group,
        )
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RowFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: EVIDENCE_MAP_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print counts, axis orders and group boundaries
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Render the scatter chart to an SVG file
    Render {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output SVG file
        #[arg(short, long, default_value = "evidence-map.svg")]
        output: PathBuf,

        /// Chart width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Chart height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Export the filtered rows
    Rows {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: RowFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show dropdown values and confidence categories found
    Options,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let port = match &cli.command {
        Commands::Serve { port } => *port,
        _ => None,
    };
    let config = AppConfig::from_env().with_overrides(cli.data, port);

    let result = match cli.command {
        Commands::Serve { .. } => cmd_serve(config).await,
        Commands::Summary { filters } => cmd_summary(&config, filters.into()),
        Commands::Render {
            filters,
            output,
            width,
            height,
        } => cmd_render(config, filters.into(), &output, width, height),
        Commands::Rows {
            filters,
            format,
            output,
        } => cmd_rows(&config, filters.into(), format, output.as_deref()),
        Commands::Options => cmd_options(&config),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load(config: &AppConfig) -> Result<EvidenceDataset, Box<dyn std::error::Error>> {
    Ok(EvidenceDataset::load(&config.data_path)?)
}

async fn cmd_serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load(&config)?;
    let state = AppState {
        dataset,
        chart: config.chart,
    };
    evidence_map::server::start_server(state, config.port).await?;
    Ok(())
}

fn cmd_summary(
    config: &AppConfig,
    selection: FilterSelection,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load(config)?;
    let map = dataset.build_map(&selection);

    println!("📊 Total unique studies: {}", map.unique_titles);
    println!("   Rows: {}", map.rows.len());
    println!("\nInterventions (bottom to top):");
    let mut previous: Option<&str> = None;
    for entry in &map.vertical {
        let marker = if previous.is_some_and(|g| g != entry.group) { "──" } else { "  " };
        println!("  {} [{}] {}", marker, entry.group, entry.label);
        previous = Some(entry.group.as_str());
    }
    println!("\nOutcomes (left to right):");
    for outcome in &map.horizontal_order {
        println!("     {}", outcome);
    }
    println!("\nGroup boundaries: {}", map.boundaries.join(", "));

    Ok(())
}

fn cmd_render(
    mut config: AppConfig,
    selection: FilterSelection,
    output: &Path,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(w) = width {
        config.chart.width = w;
    }
    if let Some(h) = height {
        config.chart.height = h;
    }

    let dataset = load(&config)?;
    let map = dataset.build_map(&selection);
    let chart = render(&map, &config.chart)?;

    fs::write(output, &chart.svg)?;
    eprintln!(
        "💾 {} points, {} separators written to: {}",
        chart.points,
        chart.separators,
        output.display()
    );
    Ok(())
}

fn cmd_rows(
    config: &AppConfig,
    selection: FilterSelection,
    format: RowFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load(config)?;
    let map = dataset.build_map(&selection);

    let content = match format {
        RowFormat::Csv => rows_to_csv(&map.rows)?,
        RowFormat::Json => serde_json::to_string_pretty(&map.rows)?,
    };
    write_output(&content, output)?;
    eprintln!("✅ {} rows", map.rows.len());
    Ok(())
}

fn cmd_options(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load(config)?;
    let options = dataset.filter_options();

    let lists = [
        ("🌍 Country", &options.countries),
        ("👥 Population", &options.populations),
        ("⚠️  Adverse effect", &options.adverse_effects),
        ("🧩 Intervention group", &options.intervention_groups),
    ];
    for (name, values) in lists {
        println!("{} ({}):", name, values.len());
        println!("   {}", evidence_map::ALL_OPTION);
        for value in values {
            println!("   {}", value);
        }
    }
    println!(
        "\nConfidence categories found: {}",
        dataset.confidence_categories().join(", ")
    );
    Ok(())
}

/// Filtered rows as CSV, using the canonical headers.
fn rows_to_csv(rows: &[StudyRow]) -> Result<String, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        Column::Title.header(),
        Column::Year.header(),
        Column::Country.header(),
        Column::Population.header(),
        Column::AdverseEffect.header(),
        Column::InterventionGroup.header(),
        Column::Intervention.header(),
        Column::OrderedIntervention.header(),
        Column::OutcomeGroup.header(),
        Column::Outcome.header(),
        Column::EffectResult.header(),
        Column::ConfidenceLevel.header(),
    ])?;

    for row in rows {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        writer.write_record([
            text(&row.title),
            row.year.map(|y| y.to_string()).unwrap_or_default(),
            text(&row.country),
            text(&row.population),
            text(&row.adverse_effect),
            text(&row.intervention_group),
            text(&row.intervention),
            text(&row.ordered_intervention),
            text(&row.outcome_group),
            text(&row.outcome),
            text(&row.effect_result),
            row.confidence.clone(),
        ])?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
