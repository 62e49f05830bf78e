//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::Direction;
use crate::commands;
use crate::config::{Overrides, Settings};


/// DayTally - notes per calendar day with monthly and yearly totals
#[derive(Parser)]
#[command(name = "daytally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Profile database holding the local copy of all values
    #[arg(long, global = true, env = "DAYTALLY_PROFILE")]
    profile: Option<PathBuf>,

    /// Directory of the durable backup mirror
    #[arg(long, global = true, env = "DAYTALLY_BACKUP_DIR")]
    backup_dir: Option<PathBuf>,

    /// Directory exports are downloaded to without a desktop host
    #[arg(long, global = true, env = "DAYTALLY_DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,

    /// Run without the desktop host (no durable mirror, downloads for export)
    #[arg(long, global = true)]
    browser: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with its notes and totals
    Show {
        /// Year to show (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (default: current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Show the month before the selected one
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Show the month after the selected one
        #[arg(long)]
        next: bool,
    },

    /// Print the note stored for a day
    Get {
        /// Day as YYYY-MM-DD
        date: String,
    },

    /// Store a note for a day (blank text removes it)
    Set {
        /// Day as YYYY-MM-DD
        date: String,

        /// Note text
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, allow_negative_numbers = true)]
        text: Vec<String>,
    },

    /// Remove the note stored for a day
    Remove {
        /// Day as YYYY-MM-DD
        date: String,
    },

    /// Print monthly and yearly totals
    Totals {
        /// Year to total (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to total, 1-12 (default: every month of the year)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Export every note to a backup file
    Export {
        /// Output file or directory (prompts when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace every note with the contents of a backup file
    Import {
        /// Backup file (prompts when omitted)
        path: Option<PathBuf>,
    },

    /// Print the location of the durable backup mirror
    #[command(name = "backup-path")]
    BackupPath,
}


/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    crate::logging::init(cli.verbose);

    let settings = Settings::resolve(Overrides {
        profile_path: cli.profile,
        backup_dir: cli.backup_dir,
        download_dir: cli.download_dir,
        browser: cli.browser,
    });

    match cli.command {
        Some(Commands::Show { year, month, prev, next }) => {
            let step = match (prev, next) {
                (true, _) => Some(Direction::Prev),
                (_, true) => Some(Direction::Next),
                _ => None,
            };
            commands::show::run(&settings, year, month, step).await?
        }
        Some(Commands::Get { date }) => commands::entry::get(&settings, &date).await?,
        Some(Commands::Set { date, text }) => commands::entry::set(&settings, &date, &text.join(" ")).await?,
        Some(Commands::Remove { date }) => commands::entry::remove(&settings, &date).await?,
        Some(Commands::Totals { year, month }) => commands::totals::run(&settings, year, month).await?,
        Some(Commands::Export { output }) => commands::transfer::export(&settings, output).await?,
        Some(Commands::Import { path }) => commands::transfer::import(&settings, path).await?,
        Some(Commands::BackupPath) => commands::backup_path::run(&settings),
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
