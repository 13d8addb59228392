//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::util::STDIN_PATH;

/// Command line configuration for fieldhtml.
#[derive(Debug, Clone, Parser)]
#[command(name = "fieldhtml", version, about, long_about = None)]
pub struct Config {
    /// JSON file mapping email addresses to display names
    #[arg(short, long, global = true, env = "FIELDHTML_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Log progress at info level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Work to perform.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render one field value and print the HTML
    Render {
        /// File holding the raw value, `-` for standard input
        #[arg(default_value = STDIN_PATH)]
        input: PathBuf,
    },

    /// Build the projects data file from exported Jira projects
    Projects {
        /// JSON array of Jira projects
        #[arg(long)]
        projects: PathBuf,

        /// JSON object mapping project keys to metadata entries
        #[arg(long)]
        metadata: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "projects.json")]
        output: PathBuf,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the directory file or any input file does not exist.
    pub fn validate(&self) -> Result<()> {
        if let Some(directory) = &self.directory {
            require_file(directory, "Directory file")?;
        }

        match &self.command {
            Command::Render { input } => {
                if input != Path::new(STDIN_PATH) {
                    require_file(input, "Input file")?;
                }
            }
            Command::Projects {
                projects, metadata, ..
            } => {
                require_file(projects, "Projects file")?;
                require_file(metadata, "Metadata file")?;
            }
        }

        Ok(())
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        bail!("{} does not exist: {}", what, path.display());
    }
    Ok(())
}
