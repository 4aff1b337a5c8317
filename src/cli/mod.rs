//! CLI module for the tournament portal
//!
//! Provides the `serve` subcommand that runs the portal server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Tournament portal - role-gated sessions and team membership
#[derive(Parser)]
#[command(name = "torneo-portal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the portal server
    Serve,
}
