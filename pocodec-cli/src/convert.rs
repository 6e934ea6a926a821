use std::str::FromStr;

use pocodec::FormatType;

/// Run the convert command: rewrite a catalog in another serialization
/// format. The input format is always detected from content; the output
/// format comes from `--format` or the output file extension.
pub fn run_convert_command(input: String, output: String, format: Option<String>) {
    let result = match format {
        Some(name) => match FormatType::from_str(&name) {
            Ok(format_type) => pocodec::convert(&input, &output, format_type),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => pocodec::convert_auto(&input, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
