//! Command-line interface

pub mod serve;
pub mod validate;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "dispatch-forecast",
    about = "Emergency dispatch forecast service",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
    /// Load a model from the registry and run a probe prediction
    ValidateModel {
        /// Registered model name (configuration default when omitted)
        #[arg(long)]
        name: Option<String>,
        /// Model version (latest when omitted)
        #[arg(long)]
        version: Option<String>,
    },
}
