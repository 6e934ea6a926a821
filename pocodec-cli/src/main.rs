mod convert;
mod diff;
mod merge;
mod select;
mod stats;
mod view;

use clap::{Parser, Subcommand};

use crate::select::SelectOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert catalogs between PO text and gettext JSON.
    Convert {
        /// The input file to process (format detected from content)
        #[arg(short, long)]
        input: String,
        /// The output file to write the results to
        #[arg(short, long)]
        output: String,
        /// Output format (po|json); inferred from the output extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },

    /// View catalog entries with their translation state.
    View {
        /// The input file to view
        #[arg(short, long)]
        input: String,
        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Per-state entry counts for a catalog.
    Stats {
        /// The input file to inspect
        #[arg(short, long)]
        input: String,
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare two catalog snapshots.
    Diff {
        /// The older catalog
        #[arg(long)]
        old: String,
        /// The newer catalog
        #[arg(long)]
        new: String,
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Merge partial catalogs; the first occurrence of a key wins.
    Merge {
        /// Input files, highest priority first
        #[arg(short, long, num_args = 1..)]
        inputs: Vec<String>,
        /// The output file to write the merged catalog to
        #[arg(short, long)]
        output: String,
    },

    /// Select entries by translation state and a 1-based range.
    Select {
        /// The input file to select from
        #[arg(short, long)]
        input: String,
        /// The output file for the selected subset
        #[arg(short, long)]
        output: String,
        /// Range over the filtered list, e.g. "3,5,9-13", "-5", "50-"
        #[arg(short, long)]
        range: Option<String>,
        /// Keep entries with a confirmed translation
        #[arg(long)]
        translated: bool,
        /// Keep entries with no translation at all
        #[arg(long)]
        untranslated: bool,
        /// Keep fuzzy entries
        #[arg(long)]
        fuzzy: bool,
        /// Keep obsolete entries even when state flags are set
        #[arg(long)]
        with_obsolete: bool,
        /// Drop obsolete entries (overrides --with-obsolete)
        #[arg(long)]
        no_obsolete: bool,
        /// Keep only entries whose translation equals the source
        #[arg(long)]
        only_same: bool,
        /// Keep only obsolete entries
        #[arg(long)]
        only_obsolete: bool,
    },
}

fn main() {
    let args = Args::parse();

    match args.commands {
        Commands::Convert {
            input,
            output,
            format,
        } => convert::run_convert_command(input, output, format),
        Commands::View { input, full } => view::run_view_command(input, full),
        Commands::Stats { input, json } => stats::run_stats_command(input, json),
        Commands::Diff { old, new, json } => diff::run_diff_command(old, new, json),
        Commands::Merge { inputs, output } => merge::run_merge_command(inputs, output),
        Commands::Select {
            input,
            output,
            range,
            translated,
            untranslated,
            fuzzy,
            with_obsolete,
            no_obsolete,
            only_same,
            only_obsolete,
        } => select::run_select_command(
            input,
            output,
            SelectOptions {
                range,
                translated,
                untranslated,
                fuzzy,
                with_obsolete,
                no_obsolete,
                only_same,
                only_obsolete,
            },
        ),
    }
}
