//! cityfinder: command-line interface for cityfinder-core
//!
//! Loads a city dataset once and answers prefix lookups against it.
//!
//! Usage examples
//! --------------
//!
//! - Show catalog stats
//!   $ cityfinder stats
//!
//! - List everything, grouped by initial
//!   $ cityfinder all --grouped
//!
//! - Prefix search (case-insensitive), as JSON
//!   $ cityfinder --json search lon
//!
//! - Accent-insensitive search
//!   $ cityfinder --fold ascii search zur
//!
//! - Pre-compile the JSON source into the binary format
//!   $ cityfinder -i cities_sorted.json build cities.bin.gz
//!
//! Data source
//! -----------
//!
//! By default the CLI loads the `cities_sorted.json` bundled with
//! `cityfinder-core`. Use `--input <path>` (or `CITYFINDER_DATA`) to point at
//! another `.json`, `.json.gz`, `.bin` or `.bin.gz` dataset.
mod args;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use cityfinder_core::api::{group_by_initial, CityView};
use cityfinder_core::loader::convert_to_binary;
use cityfinder_core::model::sort_by_name_then_country;
use cityfinder_core::{City, CityList, CityRepository, CompressionMode, RepositoryConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{CliArgs, Commands};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Flags (and their env fallbacks, handled by clap) over built-in defaults
    let mut config = RepositoryConfig::default();
    if let Some(input) = &args.input {
        config = config.with_data_path(input);
    }
    if let Some(fold) = &args.fold {
        config = config.with_folding(fold.parse()?);
    }
    tracing::debug!(?config, "resolved configuration");

    // Nothing is read until the first query.
    let repo = CityRepository::from_config(&config);

    match args.command {
        Commands::Stats => {
            let stats = repo.stats().map_err(report)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Catalog statistics:");
                println!("  Cities: {}", stats.cities);
                println!("  Distinct names: {}", stats.distinct_names);
                println!("  Index nodes: {}", stats.nodes);
                println!("  Folding: {}", repo.folding());
            }
        }

        Commands::All { limit, grouped } => {
            let all = repo.get_all_cities().map_err(report)?;
            print_cities(&all, limit, grouped, false, args.json)?;
        }

        Commands::Search {
            prefix,
            limit,
            grouped,
            sorted,
        } => {
            let hits = repo.search_cities_by_prefix(&prefix).map_err(report)?;
            if hits.is_empty() && !args.json {
                println!("No cities found starting with: {prefix}");
            } else {
                print_cities(&hits, limit, grouped, sorted, args.json)?;
            }
        }

        Commands::Build {
            output,
            no_compress,
        } => {
            let out = Path::new(&output);
            let compression = if no_compress {
                CompressionMode::None
            } else {
                CompressionMode::for_path(out)
            };
            let count = convert_to_binary(&config.data_path, out, compression)
                .map_err(report)
                .with_context(|| format!("building {}", out.display()))?;
            println!("Wrote {count} cities to {}", out.display());
        }
    }

    Ok(())
}

/// Keeps the end-user wording on top and the diagnostic detail underneath.
fn report(err: cityfinder_core::CityError) -> anyhow::Error {
    let message = err.user_message().to_string();
    anyhow::Error::new(err).context(message)
}

/// Rows to print: the whole list ordered first when `sorted`, then cut to `limit`.
fn select_rows(list: &CityList, limit: Option<usize>, sorted: bool) -> Vec<City> {
    let take = limit.unwrap_or(usize::MAX);
    if sorted {
        let mut cities = list.to_vec();
        sort_by_name_then_country(&mut cities);
        cities.truncate(take);
        cities
    } else {
        list.iter().take(take).cloned().collect()
    }
}

fn print_cities(
    list: &CityList,
    limit: Option<usize>,
    grouped: bool,
    sorted: bool,
    json: bool,
) -> anyhow::Result<()> {
    let cities = select_rows(list, limit, sorted);

    if json {
        let out = if grouped {
            serde_json::to_string_pretty(&group_by_initial(&cities))?
        } else {
            let views: Vec<CityView<'_>> = cities.iter().map(CityView::from).collect();
            serde_json::to_string_pretty(&views)?
        };
        println!("{out}");
        return Ok(());
    }

    if grouped {
        for group in group_by_initial(&cities) {
            println!("{}", group.letter);
            for city in group.cities {
                println!(
                    "  {}, {} ({:.4}, {:.4})",
                    city.name, city.country_code, city.latitude, city.longitude
                );
            }
        }
    } else {
        for city in &cities {
            let (lat, lon) = city.coordinates();
            println!("{}, {} ({lat:.4}, {lon:.4})", city.name(), city.country_code());
        }
    }

    if list.len() > cities.len() {
        println!("… {} more", list.len() - cities.len());
    }
    Ok(())
}
