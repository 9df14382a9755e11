//! Basic usage example for cityfinder-rs
//!
//! This example demonstrates how to:
//! - Load the bundled gazetteer through the shared repository
//! - List every city in dataset order
//! - Search by prefix, case-insensitively
//! - Group results under letter headers

use cityfinder_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== cityfinder-rs Basic Usage Example ===\n");

    let repo = default_repository();

    // Example 1: All cities (triggers the one-time load)
    println!("--- Example 1: List all cities ---");
    let all = repo.get_all_cities()?;
    println!("Total cities: {}", all.len());
    for (i, city) in all.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, city.name(), city.country_code());
    }
    println!("... and {} more\n", all.len().saturating_sub(5));

    // Example 2: Prefix search
    println!("--- Example 2: Cities starting with \"san\" ---");
    for city in &repo.search_cities_by_prefix("san")? {
        let (lat, lon) = city.coordinates();
        println!("  {}, {} ({lat:.4}, {lon:.4})", city.name(), city.country_code());
    }
    println!();

    // Example 3: Case does not matter
    println!("--- Example 3: \"LON\" vs \"lon\" ---");
    let upper = repo.search_cities_by_prefix("LON")?;
    let lower = repo.search_cities_by_prefix("lon")?;
    println!("  LON -> {} hits, lon -> {} hits", upper.len(), lower.len());
    println!();

    // Example 4: Grouped listing
    println!("--- Example 4: Grouped by initial ---");
    for group in group_by_initial(all.iter().take(12)) {
        let names: Vec<&str> = group.cities.iter().map(|c| c.name).collect();
        println!("  {}: {}", group.letter, names.join(", "));
    }
    println!();

    // Example 5: Stats
    let stats = repo.stats()?;
    println!(
        "Catalog: {} cities, {} distinct names, {} trie nodes",
        stats.cities, stats.distinct_names, stats.nodes
    );

    let first: Option<&City> = all.get(0);
    if let Some(city) = first {
        println!("First city in the store: {}", city.name());
    }

    Ok(())
}
