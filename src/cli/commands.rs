//! Command implementations

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::player_interactor::{PlayRequest, StopReason};
use crate::app::playlist_interactor::{BuildRequest, InspectFormat};
use crate::app::AppContainer;
use crate::cli::args::{BuildArgs, InspectArgs, PlayArgs, TimeArgs};
use crate::codec::ShareToken;
use crate::domain::model::{LoadTicket, Phase};
use crate::scheduler::PlaybackStatus;
use crate::utils::time::{format_seconds_to_time, format_time_to_seconds};
use crate::utils::Utils;

/// Execute the build command
pub fn build(container: &dyn AppContainer, args: BuildArgs) -> Result<()> {
    info!("Building playlist from {} entries", args.entries.len());

    let response = container.playlist_interactor().build(BuildRequest {
        entries: args.entries,
        removals: args.removals,
    });

    for rejected in &response.rejected {
        eprintln!("Skipped '{}': {}", rejected.input, rejected.reason);
    }

    if response.state.is_empty() && !response.rejected.is_empty() {
        return Err(anyhow::anyhow!("No valid clips to share"));
    }

    let token = response.share_token();
    if args.token_only {
        println!("{}", token);
    } else {
        println!("Playlist: {}", response.plain_text());
        println!("Token: {}", token);
    }
    Ok(())
}

/// Execute the inspect command
pub fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    let format = if args.json {
        InspectFormat::Json
    } else {
        InspectFormat::parse(&args.format).context("Invalid --format")?
    };

    let token = ShareToken::from_text(&args.token);
    let response = container
        .playlist_interactor()
        .inspect(&token, format)
        .context("Failed to decode share token")?;

    println!("{}", response.summary.trim_end());
    Ok(())
}

/// Execute the play command
pub async fn play(container: &dyn AppContainer, args: PlayArgs) -> Result<()> {
    let request = PlayRequest {
        token: ShareToken::from_text(&args.token),
        cycles: args.cycles,
        duration: args.seconds.map(Duration::from_secs),
    };

    let mut printer = StatusPrinter::default();
    let started = std::time::Instant::now();
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let response = container
        .player_interactor()
        .play(
            request,
            |status| {
                if let Some(line) = printer.line(status) {
                    println!("{}", line);
                }
            },
            interrupt,
        )
        .await
        .context("Failed to play share token")?;

    let reason = match response.stop_reason {
        StopReason::CyclesCompleted => "requested cycles completed",
        StopReason::DurationElapsed => "time limit reached",
        StopReason::Interrupted => "interrupted",
        StopReason::EmptyPlaylist => "playlist is empty",
        StopReason::DriverStopped => "player stopped",
    };
    println!(
        "Stopped ({}) after {}: {} clips loaded, {} full passes, {} stale signals ignored",
        reason,
        Utils::format_duration(started.elapsed()),
        response.report.clips_loaded,
        response.report.completed_passes,
        response.report.stale_signals
    );
    Ok(())
}

/// Execute the time command
pub fn time(args: TimeArgs) -> Result<()> {
    println!("{}", convert_time(&args.value)?);
    Ok(())
}

/// Whole seconds become `HH:MM:SS`, anything else is parsed as `HH:MM:SS`
pub fn convert_time(value: &str) -> Result<String> {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let seconds: u64 = value
            .parse()
            .with_context(|| format!("Too many seconds: {}", value))?;
        return Ok(format_seconds_to_time(seconds));
    }

    let seconds = format_time_to_seconds(value).with_context(|| format!("Invalid time '{}'", value))?;
    Ok(seconds.to_string())
}

/// Turns status updates into console lines, skipping repeats
#[derive(Debug, Default)]
pub struct StatusPrinter {
    last_playing: Option<LoadTicket>,
    last_position: Option<String>,
}

impl StatusPrinter {
    pub fn line(&mut self, status: &PlaybackStatus) -> Option<String> {
        if status.cursor.phase == Phase::Playing && self.last_playing != Some(status.ticket) {
            self.last_playing = Some(status.ticket);
            self.last_position = None;
            return Some(format!(
                "Now playing clip {}: {} (pass {})",
                status.cursor.index + 1,
                status.reference.as_deref().unwrap_or("?"),
                status.completed_passes + 1
            ));
        }

        let position = status.position_seconds.map(Utils::format_position)?;
        if self.last_position.as_deref() == Some(position.as_str()) {
            return None;
        }
        self.last_position = Some(position.clone());
        Some(format!("Current playtime: {}", position))
    }
}
