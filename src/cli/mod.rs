//! CLI module for clipreel
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// clipreel
///
/// Build looping playlists of video clips, share them as a single token and
/// play them back on a schedule.
#[derive(Parser, Debug)]
#[command(name = "clipreel")]
#[command(about = "clipreel - Shareable looping playlists of video clips")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: ./clipreel.toml if present)
    #[arg(long, global = true, env = "CLIPREEL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a playlist and print its share token
    Build(args::BuildArgs),
    /// List the clips held by a share token
    Inspect(args::InspectArgs),
    /// Play a share token in a loop
    Play(args::PlayArgs),
    /// Convert between seconds and HH:MM:SS
    Time(args::TimeArgs),
}
