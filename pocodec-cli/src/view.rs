use pocodec::{Codec, Entry, EntryState, classify};

const PREVIEW_WIDTH: usize = 48;

/// Run the view command: print every entry with its translation state.
pub fn run_view_command(input: String, full: bool) {
    let codec = match Codec::read_from_path(&input) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            std::process::exit(1);
        }
    };

    for (index, entry) in codec.catalog.entries.iter().enumerate() {
        println!(
            "{:>4} [{}] {} => {}",
            index + 1,
            state_label(classify(entry)),
            preview(&entry.msg_id, full),
            preview(&translation_text(entry), full)
        );
    }
}

fn state_label(state: EntryState) -> &'static str {
    match state {
        EntryState::Translated => "translated",
        EntryState::Untranslated => "untranslated",
        EntryState::Fuzzy => "fuzzy",
        EntryState::Same => "same",
        EntryState::Obsolete => "obsolete",
    }
}

fn translation_text(entry: &Entry) -> String {
    if entry.is_plural() {
        entry.msg_str_plural.join(" / ")
    } else {
        entry.msg_str.clone()
    }
}

fn preview(text: &str, full: bool) -> String {
    if full || text.chars().count() <= PREVIEW_WIDTH {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_WIDTH - 1).collect();
    format!("{}…", cut)
}
