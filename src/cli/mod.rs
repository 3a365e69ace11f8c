//! CLI module for Dandi Console
//!
//! Provides subcommands for running the console service.

pub mod serve;

use clap::{Parser, Subcommand};

/// Dandi Console - API key dashboard and playground gate service
#[derive(Parser)]
#[command(name = "dandi-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
