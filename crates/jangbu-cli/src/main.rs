mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jangbu",
    version,
    about = "Sales/purchase journal PDFs and VAT notice summaries for bookkeeping offices"
)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render ledger workbooks into sales/purchase journal PDFs
    Ledger {
        /// Ledger workbooks (xlsx, xls, ods)
        files: Vec<PathBuf>,

        /// Hangul TrueType font embedded into the PDFs
        #[arg(long, env = "JANGBU_FONT", value_name = "FILE")]
        font: Option<PathBuf>,

        /// Directory the PDFs are written to
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,

        /// JSON layout file overriding page geometry
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
    /// Summarize VAT notice PDFs (or extracted .txt) into a client message
    Notice {
        /// Notice PDFs or text files; the business name comes from the first one
        files: Vec<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Parse a ledger workbook and show its records (without rendering)
    Parse {
        /// Path to a ledger workbook
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the default layout as JSON, as a starting point for --layout
    Layout,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Ledger {
            files,
            font,
            out_dir,
            layout,
        } => commands::ledger::run(files, font, &out_dir, layout),
        Commands::Notice { files, output } => commands::notice::run(files, &output),
        Commands::Parse { input_file, output } => commands::parse::run(input_file, &output),
        Commands::Layout => commands::layout::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
