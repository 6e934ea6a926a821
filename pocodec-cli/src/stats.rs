use pocodec::{Codec, catalog_stats};

/// Run the stats command: per-state entry counts for one catalog.
pub fn run_stats_command(input: String, json_output: bool) {
    let codec = match Codec::read_from_path(&input) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            std::process::exit(1);
        }
    };

    let stats = catalog_stats(&codec.catalog);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats).unwrap());
        return;
    }

    let active = stats.total - stats.obsolete;
    let percent = if active == 0 {
        100.0
    } else {
        (stats.translated as f64) * 100.0 / (active as f64)
    };

    println!("=== Stats ===");
    println!("Total entries: {}", stats.total);
    println!("  translated: {}", stats.translated);
    println!("  untranslated: {}", stats.untranslated);
    println!("  fuzzy: {}", stats.fuzzy);
    println!("  same as source: {}", stats.same);
    println!("  obsolete: {}", stats.obsolete);
    println!("Completion: {:.1}%", percent);
}
