//! Rough timing of catalog build and prefix lookups.
//!
//! ```text
//! cargo run --release --bin profile_search -- [DATASET] [PREFIX...]
//! RUST_LOG=info cargo run --release --bin profile_search
//! ```

use std::time::Instant;

use cityfinder_core::{CityRepository, RepositoryConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PREFIXES: &[&str] = &["a", "al", "san", "new y", "ber", "x", "zz", "lo"];
const ROUNDS: u32 = 1_000;

fn main() -> cityfinder_core::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = RepositoryConfig::from_env()?;
    if let Some(path) = args.next() {
        config = config.with_data_path(path);
    }
    let prefixes: Vec<String> = args.collect();
    let prefixes: Vec<&str> = if prefixes.is_empty() {
        DEFAULT_PREFIXES.to_vec()
    } else {
        prefixes.iter().map(String::as_str).collect()
    };

    let repo = CityRepository::from_config(&config);

    let started = Instant::now();
    repo.ensure_initialized()?;
    let stats = repo.stats()?;
    println!(
        "loaded {} cities ({} distinct names, {} nodes) in {:?}",
        stats.cities,
        stats.distinct_names,
        stats.nodes,
        started.elapsed()
    );

    for prefix in prefixes {
        let started = Instant::now();
        let mut hits = 0;
        for _ in 0..ROUNDS {
            hits = repo.search_cities_by_prefix(prefix)?.len();
        }
        println!(
            "{prefix:>10?}: {hits:>7} hits, {:?} per search",
            started.elapsed() / ROUNDS
        );
    }

    Ok(())
}
