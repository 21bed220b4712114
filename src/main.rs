//! clipreel
//!
//! Build looping playlists of video clips, share them as a single token and
//! play them back on a schedule.
//!
//! # Usage
//!
//! ```bash
//! clipreel build --entry "https://youtu.be/abc@00:00:10@00:00:15" --entry "https://youtu.be/xyz"
//! clipreel inspect <TOKEN>
//! clipreel play <TOKEN> --cycles 2
//! clipreel time 3661
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use clipreel::adapters::{init_logging, TomlConfigAdapter};
use clipreel::app::DefaultAppContainer;
use clipreel::cli::{commands, Cli, Commands};
use clipreel::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the clipreel CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = TomlConfigAdapter::new();
    let resolved = initialize_configuration_hierarchy(&config, &cli)
        .await
        .context("Failed to load configuration")?;

    // Initialize logging, then report where the configuration came from
    init_logging(resolved.settings.log_level, resolved.settings.log_format);
    info!("Starting clipreel");
    resolved.sources.log_summary(&resolved.settings);

    let container = DefaultAppContainer::new(resolved.settings);

    // Execute the requested command
    match cli.command {
        Commands::Build(args) => commands::build(&container, args)?,
        Commands::Inspect(args) => commands::inspect(&container, args)?,
        Commands::Play(args) => commands::play(&container, args).await?,
        Commands::Time(args) => commands::time(args)?,
    }

    info!("clipreel completed successfully");
    Ok(())
}
