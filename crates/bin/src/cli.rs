//! CLI argument definitions for the formshape binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned columns
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Translate HTML form descriptions to and from JSON records
#[derive(Parser, Debug)]
#[command(name = "formshape")]
#[command(about = "formshape: form capture, population and fragment fetching")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture a form description into a JSON record
    Capture(CaptureArgs),
    /// Compute the assignments that populate a form from a record
    Populate(PopulateArgs),
    /// Fetch an HTML fragment from a server
    Fragment(FragmentArgs),
}

/// Arguments for the capture command
#[derive(clap::Args, Debug)]
pub struct CaptureArgs {
    /// JSON file holding the list of form inputs
    #[arg(short, long, env = "FORMSHAPE_FORM")]
    pub form: PathBuf,

    /// Include disabled inputs in the record
    #[arg(long)]
    pub record_disabled: bool,
}

/// Arguments for the populate command
#[derive(clap::Args, Debug)]
pub struct PopulateArgs {
    /// JSON file holding the list of form inputs
    #[arg(short, long, env = "FORMSHAPE_FORM")]
    pub form: PathBuf,

    /// JSON file holding the record to display
    #[arg(short, long, env = "FORMSHAPE_OBJECT")]
    pub object: PathBuf,

    /// Output format
    #[arg(long, default_value = "human", env = "FORMSHAPE_FORMAT")]
    pub format: Format,
}

/// Arguments for the fragment command
#[derive(clap::Args, Debug)]
pub struct FragmentArgs {
    /// Client configuration file; built-in endpoints are used when omitted
    #[arg(short, long, env = "FORMSHAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the server
    #[arg(short, long, env = "FORMSHAPE_BASE_URL")]
    pub base: String,

    /// Fragment id
    #[arg(long)]
    pub id: String,
}
