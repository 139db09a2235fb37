//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Style;

/// Convert images to ASCII art and keep them under short numeric ids
#[derive(Parser, Debug)]
#[command(name = "ascii-store")]
#[command(version, about = "Image to ASCII art converter with compact storage", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to ASCII art ("-" reads the image from stdin)
    Convert {
        /// Image file to convert
        path: PathBuf,

        /// Scale factor in percent (capped at 200)
        #[arg(long, short, allow_negative_numbers = true)]
        resize: Option<f64>,

        /// Display style
        #[arg(long, short)]
        style: Option<Style>,

        /// Store the result and print its id instead of the art
        #[arg(long)]
        save: bool,

        /// Print as an HTML <pre> block
        #[arg(long)]
        html: bool,
    },
    /// Print a stored image
    Show {
        id: u64,

        /// Print as an HTML <pre> block
        #[arg(long)]
        html: bool,
    },
    /// Print the metadata of a stored image
    Inspect {
        id: u64,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// List stored images
    List,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
