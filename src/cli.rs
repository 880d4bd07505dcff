use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
    /// Show all available debugging information
    Debug,
}

impl VerbosityLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default `env_logger` filter for this level.
    pub fn log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::Debug => "debug",
        }
    }
}

/// An `OLD=NEW` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl FromStr for Rename {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(Self {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(format!("expected OLD=NEW, got '{s}'")),
        }
    }
}

/// Build XML documents from JSON input
#[derive(Parser, Debug, Clone)]
#[command(name = "xml-forge")]
#[command(about = "Build, edit and query XML documents from JSON input")]
#[command(version)]
pub struct Cli {
    /// JSON file describing the document
    #[arg(help = "JSON input file")]
    pub input: PathBuf,

    /// Tag of the root element
    #[arg(long = "root", default_value = "document")]
    pub root: String,

    /// Write the document here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Version written in the XML declaration
    #[arg(long = "xml-version")]
    pub xml_version: Option<String>,

    /// Encoding written in the XML declaration
    #[arg(long = "encoding")]
    pub encoding: Option<String>,

    /// Tag path to search for (e.g. 'fuc/avaliacao/componente')
    #[arg(long = "query", action = clap::ArgAction::Append)]
    pub queries: Vec<String>,

    /// Rename elements, OLD=NEW
    #[arg(long = "rename-element", action = clap::ArgAction::Append)]
    pub rename_elements: Vec<Rename>,

    /// Remove elements with this tag
    #[arg(long = "remove-element", action = clap::ArgAction::Append)]
    pub remove_elements: Vec<String>,

    /// Rename attributes, OLD=NEW
    #[arg(long = "rename-attribute", action = clap::ArgAction::Append)]
    pub rename_attributes: Vec<Rename>,

    /// Remove attributes with this name
    #[arg(long = "remove-attribute", action = clap::ArgAction::Append)]
    pub remove_attributes: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input does not exist: {}", self.input.display()));
        }
        if let Some(query) = self.queries.iter().find(|q| q.is_empty()) {
            return Err(format!("Invalid query: '{query}'"));
        }
        Ok(())
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        VerbosityLevel::from_flags(self.verbose, self.quiet)
    }

    /// Whether any bulk edit was requested.
    pub fn has_edits(&self) -> bool {
        !(self.rename_elements.is_empty()
            && self.remove_elements.is_empty()
            && self.rename_attributes.is_empty()
            && self.remove_attributes.is_empty())
    }
}
