mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "acopio",
    version,
    about = "Normalizes public COVID-19 case data into tidy CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the long-format global dataset from the Johns Hopkins time series
    Global {
        /// Output CSV path
        #[arg(short, long, default_value = "global_data.csv")]
        out: PathBuf,

        /// Merge strategy for rows sharing a (date, country) cell: sum or overwrite
        #[arg(short, long, default_value = "sum")]
        merge: String,

        /// Read confirmed.csv/deaths.csv/recovered.csv from a local directory
        /// instead of fetching
        #[arg(long, value_name = "DIR")]
        snapshot_dir: Option<PathBuf>,
    },
    /// Convert the Mexican confirmed-cases bulletin PDF into a CSV file
    Casos {
        /// Output CSV path
        #[arg(short, long, default_value = "casos_confirmados.csv")]
        out: PathBuf,

        /// Use a local PDF file instead of downloading the bulletin
        #[arg(short, long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        /// Custom extraction profile (JSON)
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Keep the downloaded PDF at this path
        #[arg(long, value_name = "FILE")]
        save_pdf: Option<PathBuf>,
    },
    /// Inspect and validate extraction profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the built-in extraction profile as JSON
    Show,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Global {
            out,
            merge,
            snapshot_dir,
        } => commands::global::run(out, &merge, snapshot_dir),
        Commands::Casos {
            out,
            pdf,
            profile,
            save_pdf,
        } => commands::casos::run(out, pdf, profile, save_pdf),
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
