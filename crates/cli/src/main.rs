//! Regionate CLI - dissolve boundary layers into labeled regions

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use regionate_algorithms::classify::{classify, presets, ClassifyParams};
use regionate_algorithms::dissolve::{aggregate, AggregateParams};
use regionate_core::io::{read_geojson, write_geojson};
use regionate_core::{ExclusionSet, GroupMapping, CRS};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "regionate")]
#[command(author, version, about = "Dissolve boundary layers into labeled regions", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a boundary layer, dissolve it into regions, write GeoJSON
    Build(BuildArgs),
    /// Show information about a boundary file
    Info {
        /// Input GeoJSON file
        input: PathBuf,
        /// Property holding each feature's identifying code
        #[arg(long, default_value = "STUSPS")]
        id_field: String,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Output GeoJSON file
    #[arg(short, long, default_value = "bea_regions_wgs84.geojson")]
    output: PathBuf,

    /// Read this local GeoJSON file instead of downloading
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Census release year
    #[arg(long, default_value_t = 2022)]
    year: u16,

    /// Cartographic boundary scale (5m is more detailed, larger file)
    #[arg(long, default_value = "20m", value_parser = ["5m", "20m"])]
    scale: String,

    /// Download URL override
    #[arg(long)]
    url: Option<String>,

    /// Property holding each feature's identifying code
    #[arg(long, default_value = "STUSPS")]
    id_field: String,

    /// Output property holding the region label
    #[arg(long, default_value = "bea_region")]
    label_field: String,

    /// JSON file mapping codes to region labels (default: built-in BEA regions)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Keep territories instead of excluding them
    #[arg(long)]
    no_exclusions: bool,

    /// Source EPSG code assumed when the input declares none
    #[arg(long, default_value_t = 4269)]
    assume_epsg: u32,

    /// Target EPSG code
    #[arg(long, default_value_t = 4326)]
    target_epsg: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build(args) => build(args),
        Commands::Info { input, id_field } => show_info(&input, &id_field),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// ─── Build ──────────────────────────────────────────────────────────────

fn build(args: BuildArgs) -> Result<()> {
    let started = Instant::now();

    let mut collection = match &args.input {
        Some(path) => read_geojson(path, &args.id_field)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let url = args
                .url
                .clone()
                .unwrap_or_else(|| regionate_fetch::census_boundary_url(args.year, &args.scale));
            download(&url, &args.id_field)?
        }
    };

    if collection.crs.is_none() {
        collection.crs = Some(CRS::from_epsg(args.assume_epsg));
    }

    let mapping = match &args.mapping {
        Some(path) => load_mapping(path)?,
        None => presets::bea_regions(),
    };
    let exclusions = if args.no_exclusions {
        ExclusionSet::new()
    } else {
        presets::us_territories()
    };

    info!(features = collection.len(), "classifying");
    let labeled = classify(collection, ClassifyParams { mapping, exclusions })?;

    info!(features = labeled.len(), "dissolving");
    let regions = aggregate(
        labeled,
        AggregateParams {
            target_crs: CRS::from_epsg(args.target_epsg),
        },
    )?;

    write_geojson(&args.output, &regions, &args.label_field)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        regions = regions.len(),
        elapsed = ?started.elapsed(),
        output = %args.output.display(),
        "done"
    );
    Ok(())
}

fn download(url: &str, id_field: &str) -> Result<regionate_core::FeatureCollection> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("downloading {url}"));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let collection = regionate_fetch::blocking::fetch_boundaries(url, id_field)
        .with_context(|| format!("downloading {url}"))?;

    spinner.finish_with_message(format!("downloaded {} features", collection.len()));
    Ok(collection)
}

fn load_mapping(path: &Path) -> Result<GroupMapping> {
    let file =
        File::open(path).with_context(|| format!("opening mapping file {}", path.display()))?;
    let mapping: GroupMapping = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing mapping file {}", path.display()))?;

    if mapping.is_empty() {
        bail!("mapping file {} has no entries", path.display());
    }
    Ok(mapping)
}

// ─── Info ───────────────────────────────────────────────────────────────

fn show_info(input: &Path, id_field: &str) -> Result<()> {
    let collection =
        read_geojson(input, id_field).with_context(|| format!("reading {}", input.display()))?;

    let crs = collection
        .crs
        .map(|c| c.to_string())
        .unwrap_or_else(|| "undeclared".to_string());
    let mut codes: Vec<&str> = collection.iter().map(|f| f.code.as_str()).collect();
    codes.sort_unstable();

    println!("Features: {}", collection.len());
    println!("CRS:      {crs}");
    println!("Codes:    {}", codes.join(", "));
    Ok(())
}
