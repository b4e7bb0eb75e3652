use clap::{Parser, Subcommand};
use microbiobase_common::{Category, Theme};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "microbiobase")]
#[command(about = "Microorganism and antibiotic reference browser", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dataset file (overrides config and MICROBIOBASE_DATASET)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Fallback dataset used when the primary one fails to load
    #[arg(long, global = true)]
    pub fallback: Option<PathBuf>,

    /// Do not fall back to any other dataset
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Storage file for favorites and theme
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Alias dialect file (JSON) merged over the built-in aliases
    #[arg(long, global = true)]
    pub aliases: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List item cards
    List {
        /// Search text (name, description, classification)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category: all, favorites, antibiotics, gram+, gram- or a classification
        #[arg(short, long, default_value = "all")]
        category: Category,
    },

    /// Show the detail panel of one item
    Show {
        /// Item id
        #[arg(required = true)]
        id: String,
    },

    /// Toggle an item's favorite state
    Favorite {
        /// Item id
        #[arg(required = true)]
        id: String,
    },

    /// List favorited items
    Favorites,

    /// List browsable categories with item counts
    Categories,

    /// Export favorited items
    Export {
        /// Output format (xlsx/json)
        #[arg(short, long, default_value = "xlsx")]
        format: ExportFormat,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title row of the workbook
        #[arg(short, long, default_value = "MicroBioBase - Favorite Items")]
        title: String,
    },

    /// Show or change the display theme
    Theme {
        /// dark, light or toggle
        action: Option<ThemeAction>,
    },

    /// Print the normalized dataset as JSON
    Normalize {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse interactively
    Browse,

    /// Show or edit the configuration
    Config {
        /// Set the default dataset file
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// Set the storage file
        #[arg(long)]
        set_storage: Option<PathBuf>,

        /// Show the configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use xlsx or json", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeAction {
    Set(Theme),
    Toggle,
}

impl std::str::FromStr for ThemeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toggle" | "t" => Ok(ThemeAction::Toggle),
            other => other
                .parse::<Theme>()
                .map(ThemeAction::Set)
                .map_err(|_| format!("Unknown theme action: {}. Use dark, light or toggle", s)),
        }
    }
}
