use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;

use alf_app::{
    AppResult, Catalog, ChartDocument, ChartRequest, ChartService, DashboardConfig, config, query,
};
use alf_core::{PlotType, Region, Replicate};
use alf_data::{RecordSource, ScenarioKey};

#[derive(Parser)]
#[command(name = "alf-cli")]
#[command(about = "ALFRESCO post-processing charts from exported simulation output", long_about = None)]
struct Cli {
    /// Dashboard configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a chart for one selection
    Chart {
        /// Plot type: AAB, CAB or VEG
        #[arg(short, long)]
        plot_type: Option<PlotType>,
        /// Region key, e.g. AIEM_Domain
        #[arg(short, long)]
        region: Option<Region>,
        /// Climate model, e.g. GFDL-CM3
        #[arg(short, long)]
        gcm: Option<String>,
        /// Emissions scenario, e.g. rcp60
        #[arg(long)]
        rcp: Option<String>,
        /// Replicate number
        #[arg(long)]
        replicate: Option<Replicate>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Figure)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the selectable plot types, regions, models and scenarios
    Options,
    /// List scenarios with data files in the data directory
    Scenarios,
    /// Summarize the modeled collection of one scenario
    Inspect {
        /// Climate model
        gcm: String,
        /// Emissions scenario
        rcp: String,
    },
    /// Write a configuration file populated with defaults
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plotly figure JSON
    Figure,
    /// Chart result with the request and a timestamp
    Json,
    /// series,year,value rows
    Csv,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut dashboard = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        dashboard.data_dir = dir.clone();
    }

    match cli.command {
        Commands::Chart {
            plot_type,
            region,
            gcm,
            rcp,
            replicate,
            format,
            output,
        } => {
            let defaults = dashboard.defaults.clone();
            let request = ChartRequest {
                plot_type: plot_type.unwrap_or(defaults.plot_type),
                region: region.unwrap_or(defaults.region),
                gcm: gcm.unwrap_or(defaults.gcm),
                rcp: rcp.unwrap_or(defaults.rcp),
                replicate: replicate.unwrap_or(defaults.replicate),
            };
            cmd_chart(&dashboard, &request, format, output.as_deref())
        }
        Commands::Options => cmd_options(&dashboard.catalog),
        Commands::Scenarios => cmd_scenarios(&dashboard),
        Commands::Inspect { gcm, rcp } => cmd_inspect(&dashboard, &ScenarioKey::new(gcm, rcp)),
        Commands::InitConfig { path } => cmd_init_config(&path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn cmd_chart(
    dashboard: &DashboardConfig,
    request: &ChartRequest,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let service = ChartService::from_config(dashboard)?;
    let chart = service.render(request)?;

    for warning in &chart.warnings {
        eprintln!("warning: {}", warning);
    }

    let rendered = match format {
        OutputFormat::Figure => serde_json::to_string_pretty(&alf_app::to_figure(&chart))?,
        OutputFormat::Json => serde_json::to_string_pretty(&ChartDocument::new(request, &chart))?,
        OutputFormat::Csv => alf_app::to_csv(&chart),
    };

    if let Some(path) = output {
        std::fs::write(path, rendered)?;
        let points: usize = chart.series.iter().map(|s| s.len()).sum();
        println!(
            "✓ Wrote {} series ({} points) to {}",
            chart.series.len(),
            points,
            path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_options(catalog: &Catalog) -> AppResult<()> {
    println!("Plot types:");
    for option in Catalog::plot_types() {
        println!("  {:<4} {}", option.value, option.label);
    }

    println!("\nRegions:");
    for option in &catalog.regions {
        println!("  {} ({})", option.value, option.label);
    }

    println!("\nClimate models:");
    for option in &catalog.gcms {
        println!("  {}", option.value);
    }

    println!("\nScenarios:");
    for option in &catalog.rcps {
        println!("  {} ({})", option.value, option.label);
    }

    println!("\nReplicates: 1-{}", catalog.max_replicate);
    Ok(())
}

fn cmd_scenarios(dashboard: &DashboardConfig) -> AppResult<()> {
    let store = dashboard.open_store()?;
    let scenarios = store.list_scenarios()?;

    if scenarios.is_empty() {
        println!("No scenario files found in {}", store.root_dir().display());
    } else {
        println!("Scenarios in {}:", store.root_dir().display());
        for scenario in scenarios {
            println!("  {} {}", scenario.gcm, scenario.rcp);
        }
    }
    Ok(())
}

fn cmd_inspect(dashboard: &DashboardConfig, scenario: &ScenarioKey) -> AppResult<()> {
    println!("Loading scenario: {}", scenario);

    let store = dashboard.open_store()?;
    let records = store.load_modeled(scenario)?;
    let summary = query::summarize_collection(&records)?;

    println!("\nCollection Summary:");
    println!("  Records: {}", summary.record_count);
    println!("  Fire records: {}", summary.fire_record_count);
    println!("  Vegetation records: {}", summary.veg_record_count);
    if let (Some(first), Some(last)) = (
        summary.replicates.first(),
        summary.replicates.last(),
    ) {
        println!(
            "  Replicates: {} ({} - {})",
            summary.replicates.len(),
            first,
            last
        );
    }
    if let Some((lo, hi)) = summary.fire_year_range {
        println!("  Fire years: {} - {}", lo, hi);
    }
    if let Some((lo, hi)) = summary.veg_year_range {
        println!("  Vegetation years: {} - {}", lo, hi);
    }

    println!("\nRegions:");
    for region in query::list_regions(&records) {
        match dashboard.catalog.region_label(&region) {
            Some(label) => println!("  {} ({})", region, label),
            None => println!("  {}", region),
        }
    }

    Ok(())
}

fn cmd_init_config(path: &Path) -> AppResult<()> {
    config::save_config(path, &DashboardConfig::default())?;
    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}
