//! U-Palletize command-line front end.

mod logging;
mod report;
mod request;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use u_palletize_core::{FluteKind, RankedConfiguration, SearchConfig, SearchResult};
use u_palletize_pallet::{box_interior_layout, pallet_layout, Palletizer, PlacedBox};

use crate::request::{load_config, SearchRequest};

#[derive(Parser)]
#[command(name = "palletize")]
#[command(about = "Box size and pallet pattern planner")]
#[command(version)]
struct Cli {
    /// Log search progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and rank box configurations for a product
    Search {
        #[command(flatten)]
        request: RequestArgs,

        /// Evaluate grid cells on all cores
        #[arg(long)]
        parallel: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Heuristic overrides (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the board strength table
    Materials {
        /// Heuristic overrides (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print placement coordinates of one ranked configuration
    Layout {
        #[command(flatten)]
        request: RequestArgs,

        /// 1-based rank of the configuration
        #[arg(long, default_value_t = 1)]
        rank: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Heuristic overrides (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Request file (TOML or JSON); replaces the product flags
    #[arg(short, long, conflicts_with = "dims")]
    request: Option<PathBuf>,

    /// Product length, width and height in mm
    #[arg(long, num_args = 3, value_names = ["L", "W", "H"])]
    dims: Option<Vec<u32>>,

    /// Unit weight in grams
    #[arg(long, default_value_t = 0.0)]
    weight: f64,

    /// Box weight ceiling in grams (0 = unlimited)
    #[arg(long, default_value_t = 0.0)]
    max_box_weight: f64,

    /// Board: a, b or ab
    #[arg(long, default_value = "a")]
    material: FluteKind,

    /// Box margin in mm (defaults to the board's margin)
    #[arg(long)]
    margin: Option<u32>,

    #[arg(long, default_value_t = 10)]
    min_qty: u32,

    #[arg(long, default_value_t = 100)]
    max_qty: u32,

    /// Pallet length, width and load height in mm
    #[arg(long, num_args = 3, value_names = ["L", "W", "H"], default_values_t = [1100, 1100, 1650])]
    pallet: Vec<u32>,

    /// Keep the product upright as entered
    #[arg(long)]
    no_rotation: bool,
}

impl RequestArgs {
    fn into_request(self) -> anyhow::Result<SearchRequest> {
        if let Some(path) = &self.request {
            return SearchRequest::from_file(path);
        }
        let Some(dims) = self.dims else {
            bail!("either --request or --dims is required");
        };

        let mut request = SearchRequest::new(triple(&dims, "--dims")?, self.weight);
        request.max_box_weight_g = self.max_box_weight;
        request.material = self.material;
        request.margin = self.margin;
        request.min_qty = self.min_qty;
        request.max_qty = self.max_qty;
        request.pallet = triple(&self.pallet, "--pallet")?;
        request.allow_rotation = !self.no_rotation;
        Ok(request)
    }
}

fn triple(values: &[u32], flag: &str) -> anyhow::Result<[u32; 3]> {
    <[u32; 3]>::try_from(values)
        .map_err(|_| anyhow::anyhow!("{} takes exactly three values, got {}", flag, values.len()))
}

fn search_config(path: Option<&Path>) -> anyhow::Result<SearchConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SearchConfig::default()),
    }
}

fn solve(request: &SearchRequest, config: SearchConfig) -> anyhow::Result<SearchResult> {
    tracing::debug!(?request, "solving");
    let result = Palletizer::new(config)
        .solve(&request.product(), &request.pallet(), &request.constraints())
        .context("search failed")?;
    Ok(result)
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    configuration: &'a RankedConfiguration,
    pallet: Vec<PlacedBox>,
    interior: Vec<PlacedBox>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "info" });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search {
            request,
            parallel,
            json,
            config,
        } => {
            let request = request.into_request()?;
            let mut config = search_config(config.as_deref())?;
            if parallel {
                config = config.with_parallel(true);
            }

            let result = solve(&request, config)?;
            if json {
                report::write_json(&mut out, &result)?;
            } else {
                report::write_table(&mut out, &result)?;
            }
        }

        Commands::Materials { config, json } => {
            let config = search_config(config.as_deref())?;
            if json {
                report::write_json(&mut out, &config.materials)?;
            } else {
                report::write_materials(&mut out, &config.materials)?;
            }
        }

        Commands::Layout {
            request,
            rank,
            json,
            config,
        } => {
            let request = request.into_request()?;
            let result = solve(&request, search_config(config.as_deref())?)?;
            let ranked = result.by_rank(rank).with_context(|| {
                format!("no configuration at rank {} ({} found)", rank, result.len())
            })?;

            let layout = LayoutReport {
                configuration: ranked,
                pallet: pallet_layout(&ranked.configuration, &result.pallet),
                interior: box_interior_layout(&ranked.configuration),
            };
            if json {
                report::write_json(&mut out, &layout)?;
            } else {
                report::write_layout(&mut out, ranked, &layout.pallet, &layout.interior)?;
            }
        }
    }

    Ok(())
}
