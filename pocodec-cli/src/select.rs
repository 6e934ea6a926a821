use pocodec::formats::po::WriteOptions;
use pocodec::{
    Codec, EntryStateFilter, FormatType, filter_entries, infer_format_from_extension,
    parse_entry_range,
};

/// State flags and range for the select command.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub range: Option<String>,
    pub translated: bool,
    pub untranslated: bool,
    pub fuzzy: bool,
    pub with_obsolete: bool,
    pub no_obsolete: bool,
    pub only_same: bool,
    pub only_obsolete: bool,
}

/// Run the select command: narrow a catalog to the entries matching the
/// state filter and range, and write the subset under the same header.
pub fn run_select_command(input: String, output: String, options: SelectOptions) {
    let codec = match Codec::read_from_path(&input) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            std::process::exit(1);
        }
    };

    let filter = EntryStateFilter {
        translated: options.translated,
        untranslated: options.untranslated,
        fuzzy: options.fuzzy,
        with_obsolete: options.with_obsolete,
        no_obsolete: options.no_obsolete,
        only_same: options.only_same,
        only_obsolete: options.only_obsolete,
    };
    let filtered = filter_entries(&codec.catalog.entries, &filter);

    let range = options.range.as_deref().unwrap_or("");
    let indices = match parse_entry_range(range, filtered.len()) {
        Ok(indices) => indices,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let entries = indices
        .iter()
        .map(|&index| filtered[index - 1].clone())
        .collect();
    let subset = codec.catalog.with_entries(entries);

    let format = infer_format_from_extension(&output).unwrap_or(FormatType::Po);
    let out_codec = Codec {
        catalog: subset,
        format,
    };
    if let Err(e) = out_codec.write_to_path(&output, format, &WriteOptions::default()) {
        eprintln!("Error writing to {}: {}", output, e);
        std::process::exit(1);
    }

    println!(
        "Selected {} of {} entries into {}",
        indices.len(),
        codec.catalog.entries.len(),
        output
    );
}
