use indicatif::{ProgressBar, ProgressStyle};
use pocodec::formats::po::WriteOptions;
use pocodec::{Codec, FormatType, infer_format_from_extension, merge_catalogs};

/// Run the merge command: combine partial catalogs into one output file.
/// Sources are ordered highest priority first; the first occurrence of a
/// key wins.
pub fn run_merge_command(inputs: Vec<String>, output: String) {
    if inputs.is_empty() {
        eprintln!("Error: At least one input file is required.");
        std::process::exit(1);
    }

    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap(),
    );

    let mut catalogs = Vec::new();
    for (i, input) in inputs.iter().enumerate() {
        progress_bar.set_message(format!(
            "Reading file {}/{}: {}",
            i + 1,
            inputs.len(),
            input
        ));
        match Codec::read_from_path(input) {
            Ok(codec) => catalogs.push(codec.catalog),
            Err(e) => {
                progress_bar.finish_with_message("Error reading input file");
                eprintln!("Error reading {}: {}", input, e);
                std::process::exit(1);
            }
        }
    }

    progress_bar.set_message("Merging catalogs...");
    let merged = merge_catalogs(&catalogs);

    progress_bar.set_message("Writing merged output...");
    let format = infer_format_from_extension(&output).unwrap_or(FormatType::Po);
    let codec = Codec {
        catalog: merged,
        format,
    };
    if let Err(e) = codec.write_to_path(&output, format, &WriteOptions::default()) {
        progress_bar.finish_with_message("Error writing output file");
        eprintln!("Error writing to {}: {}", output, e);
        std::process::exit(1);
    }

    progress_bar.finish_with_message(format!(
        "Merged {} files into {}",
        inputs.len(),
        output
    ));
}
