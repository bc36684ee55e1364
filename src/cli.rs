use std::path::PathBuf;

use clap::{Parser, Subcommand};

use founder_compass::domain::lead::CompanySizeBand;
use founder_compass::ports::ExportFormat;

/// Top-level CLI parser for the `founder-compass` binary.
#[derive(Debug, Parser)]
#[command(
    name = "founder-compass",
    version,
    about = "Founder diagnostic: answer twelve questions, get a clarity report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (toml, yaml or json); defaults to ./founder-compass.*
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the in-process mock backend instead of the HTTP API
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register as a lead, starting a new session
    Start {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// One of 15-35, 36-60, 61-95, 96-200
        #[arg(long)]
        company_size: CompanySizeBand,
    },

    /// Answer the diagnostic questions interactively
    Diagnose,

    /// Fetch and render the clarity report
    Results {
        /// Save the report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File format for --output: pdf or text
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,
    },

    /// Email the clarity report
    Email,

    /// Operator console
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },

    /// Forget the stored lead and result references
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Log in; the password is read from FOUNDER_COMPASS_ADMIN_PASSWORD or stdin
    Login {
        #[arg(long)]
        email: String,
    },
    /// Show lead and response totals
    Stats,
    /// List stored responses
    Responses,
    /// Forget the admin token
    Logout,
}
