//! Error handling example for cityfinder-rs
//!
//! This example demonstrates the three failure kinds and the retry path

use std::fs;

use cityfinder_rs::prelude::*;

fn describe(err: &CityError) -> &'static str {
    match err.kind() {
        ErrorKind::Loading => "loading",
        ErrorKind::Parsing => "parsing",
        ErrorKind::Other => "other",
    }
}

fn main() -> Result<()> {
    println!("=== cityfinder-rs Error Handling Example ===\n");

    let dir = std::env::temp_dir().join(format!("cityfinder-demo-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("cities.json");
    let _ = fs::remove_file(&path);

    // Example 1: Missing dataset
    println!("--- Example 1: Dataset does not exist yet ---");
    let repo = CityRepository::new(FileSource::new(&path));
    match repo.get_all_cities() {
        Ok(all) => println!("  Unexpectedly loaded {} cities", all.len()),
        Err(e) => {
            println!("  ✗ {} failure: {e}", describe(&e));
            println!("  User message: {}", e.user_message());
        }
    }
    println!("  Phase: {:?}\n", repo.phase());

    // Example 2: Malformed dataset
    println!("--- Example 2: Dataset is malformed ---");
    fs::write(&path, r#"[{"country": "NO", "name": "Oslo""#)?;
    if let Err(e) = repo.search_cities_by_prefix("os") {
        println!("  ✗ {} failure: {e}", describe(&e));
    }
    println!();

    // Example 3: Fix the file and retry the same repository
    println!("--- Example 3: Retry after fixing the dataset ---");
    fs::write(
        &path,
        r#"[{"country": "NO", "name": "Oslo", "_id": 3143244, "coord": {"lon": 10.74609, "lat": 59.91273}}]"#,
    )?;
    let hits = repo.search_cities_by_prefix("os")?;
    println!("  ✓ Found {} city after {} load attempts", hits.len(), repo.loads());
    assert_eq!(repo.phase(), InitPhase::Ready);

    // Example 4: Unknown prefixes are not errors
    println!("--- Example 4: Searching for a prefix nobody has ---");
    for prefix in ["zzz", "😀", "Oslo "] {
        println!("  {prefix:?} -> {} hits", repo.search_cities_by_prefix(prefix)?.len());
    }

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}
