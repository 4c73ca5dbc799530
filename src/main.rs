use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use signalvault::cli::{
    handle_backup, handle_decode, handle_restore, handle_version_command, VersionCommands,
};
use signalvault::config::{Settings, VaultPaths};

#[derive(Parser)]
#[command(
    name = "signalvault",
    version,
    about = "Backup, transport and version management for trading-signal service data",
    long_about = "SignalVault protects the persisted state of a trading-signal web \
                  service: it snapshots the symbol cache and database into compressed \
                  archives, delivers them over a configured channel, restores them, \
                  and manages named versions of the application files."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up user data and deliver the archive
    Backup,

    /// Restore user data from an archive or encoded text
    Restore {
        /// Path to a backup archive
        archive: Option<PathBuf>,

        /// Path to a file holding the base64 text emitted by a backup
        #[arg(short, long, conflicts_with = "archive")]
        encoded: Option<PathBuf>,
    },

    /// Decode a base64 text file into a backup archive
    Decode {
        /// Path to the base64 text file
        input: PathBuf,

        /// Output archive path (timestamped name if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Version catalog for application files
    #[command(subcommand)]
    Version(VersionCommands),
}

fn main() -> Result<()> {
    // Log level controlled by RUST_LOG, e.g. RUST_LOG=debug signalvault backup
    env_logger::init();

    let cli = Cli::parse();

    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Backup => handle_backup(&paths, &settings)?,
        Commands::Restore { archive, encoded } => {
            handle_restore(&paths, archive.as_deref(), encoded.as_deref())?;
        }
        Commands::Decode { input, output } => handle_decode(&input, output.as_deref())?,
        Commands::Version(cmd) => handle_version_command(&paths, cmd)?,
    }

    Ok(())
}
