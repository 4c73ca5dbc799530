//! Version manager CLI commands
//!
//! Implements the `version` subcommands: backup, list, restore, delete.
//! Restore and delete prompt for confirmation unless `--yes` is passed.

use clap::Subcommand;

use crate::config::VaultPaths;
use crate::confirm::{AssumeYes, ConfirmationGate, TerminalGate};
use crate::error::VaultResult;
use crate::versions::VersionManager;

/// Version catalog subcommands
#[derive(Subcommand)]
pub enum VersionCommands {
    /// Create a version from the current application files
    Backup {
        /// Version name (auto-derived from the timestamp if omitted)
        #[arg(short, long)]
        version: Option<String>,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all cataloged versions
    List,

    /// Restore a version over the live application files
    Restore {
        /// Version name to restore
        #[arg(short, long)]
        version: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a version from the catalog
    Delete {
        /// Version name to delete
        #[arg(short, long)]
        version: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn gate_for(yes: bool) -> Box<dyn ConfirmationGate> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalGate)
    }
}

/// Handle a version command
pub fn handle_version_command(paths: &VaultPaths, cmd: VersionCommands) -> VaultResult<()> {
    let manager = VersionManager::new(paths.clone())?;

    match cmd {
        VersionCommands::Backup {
            version,
            description,
        } => {
            let descriptor = manager.create(version.as_deref(), &description)?;
            println!("Version created: {}", descriptor.name);
            for file in &descriptor.files {
                println!("  {}", file);
            }
        }

        VersionCommands::List => {
            let versions = manager.list()?;

            if versions.is_empty() {
                println!("No versions cataloged.");
                println!("Create one with: signalvault version backup");
                return Ok(());
            }

            println!("Versions");
            println!("{}", "-".repeat(60));
            for descriptor in versions {
                println!("Version: {}", descriptor.name);
                match descriptor.created_at {
                    Some(created) => {
                        println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S UTC"))
                    }
                    None => println!("Created: unknown"),
                }
                if descriptor.description.is_empty() {
                    println!("Description: (none)");
                } else {
                    println!("Description: {}", descriptor.description);
                }
                println!("{}", "-".repeat(60));
            }
        }

        VersionCommands::Restore { version, yes } => {
            let gate = gate_for(yes);
            match manager.restore(&version, gate.as_ref())? {
                Some(restore) => {
                    println!("Pre-restore state saved as: {}", restore.safety_version);
                    for item in &restore.restored {
                        println!("Restored: {}", item);
                    }
                    println!("Version restore complete: {}", version);
                }
                None => println!("Restore cancelled."),
            }
        }

        VersionCommands::Delete { version, yes } => {
            let gate = gate_for(yes);
            if manager.delete(&version, gate.as_ref())? {
                println!("Version deleted: {}", version);
            } else {
                println!("Deletion cancelled.");
            }
        }
    }

    Ok(())
}
