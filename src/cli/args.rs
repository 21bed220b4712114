//! Command-line argument definitions

use clap::Args;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Clip to add, as URL[@START][@END] with times in HH:MM:SS (repeatable)
    #[arg(short, long = "entry", value_name = "ENTRY", required = true)]
    pub entries: Vec<String>,

    /// Zero-based position to remove after adding the entries (repeatable)
    #[arg(short, long = "remove", value_name = "INDEX")]
    pub removals: Vec<usize>,

    /// Print only the share token
    #[arg(long)]
    pub token_only: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Share token
    pub token: String,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the play command
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Share token
    pub token: String,

    /// Stop after this many passes over the playlist
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    pub seconds: Option<u64>,

    /// Position polling interval in milliseconds (0 disables)
    #[arg(long)]
    pub poll_ms: Option<u64>,
}

/// Arguments for the time command
#[derive(Args, Debug)]
pub struct TimeArgs {
    /// Whole seconds or HH:MM:SS
    pub value: String,
}
