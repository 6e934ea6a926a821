use pocodec::formats::json::JsonEntry;
use pocodec::{Codec, diff_catalogs};

/// Run the diff command: compare two catalog snapshots and list the
/// new-or-changed entries worth reviewing.
pub fn run_diff_command(old: String, new: String, json_output: bool) {
    let old_codec = read_codec(&old);
    let new_codec = read_codec(&new);

    let diff = diff_catalogs(&old_codec.catalog, &new_codec.catalog);

    if json_output {
        let review: Vec<JsonEntry> = diff.review_entries.iter().map(JsonEntry::from).collect();
        let body = serde_json::json!({
            "stats": diff.stats,
            "review_entries": review,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap());
        return;
    }

    println!(
        "Added: {}, Changed: {}, Deleted: {}",
        diff.stats.added, diff.stats.changed, diff.stats.deleted
    );
    for entry in &diff.review_entries {
        println!("  {}", entry.msg_id);
    }
}

fn read_codec(path: &str) -> Codec {
    match Codec::read_from_path(path) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
