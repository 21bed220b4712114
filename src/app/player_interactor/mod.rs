// Player interactor - Orchestrates looping playback of a shared playlist

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{info, warn};

use crate::adapters::simulated_surface::{SimulatedSurfaceAdapter, SimulatedSurfaceSettings};
use crate::codec::ShareToken;
use crate::domain::errors::*;
use crate::ports::signal_channel;
use crate::scheduler::{DriverReport, DriverSettings, PlaybackDriver, PlaybackStatus};

/// Settings for a playback session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSettings {
    pub driver: DriverSettings,
    pub surface: SimulatedSurfaceSettings,
}

/// Request to play a token
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub token: ShareToken,
    /// Stop after this many complete passes over the playlist
    pub cycles: Option<u64>,
    /// Stop after this much wall time
    pub duration: Option<Duration>,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CyclesCompleted,
    DurationElapsed,
    Interrupted,
    EmptyPlaylist,
    DriverStopped,
}

/// Result of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResponse {
    pub clips: usize,
    pub stop_reason: StopReason,
    pub report: DriverReport,
}

/// Interactor for the playback use case
pub struct PlayerInteractor {
    settings: PlayerSettings,
}

impl PlayerInteractor {
    /// Create new player interactor
    pub fn new(settings: PlayerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> PlayerSettings {
        self.settings
    }

    /// Play a token on the simulated surface until a stop condition is met.
    /// `on_status` sees every published status; `interrupt` ends the session
    /// early when it completes.
    pub async fn play<F, I>(
        &self,
        request: PlayRequest,
        mut on_status: F,
        interrupt: I,
    ) -> Result<PlayResponse, DomainError>
    where
        F: FnMut(&PlaybackStatus),
        I: Future<Output = ()>,
    {
        let (signals_tx, signals_rx) = signal_channel();
        let surface = Arc::new(SimulatedSurfaceAdapter::new(self.settings.surface, signals_tx));
        let (handle, driver) = PlaybackDriver::spawn(surface, signals_rx, self.settings.driver);

        let clips = match handle.load_token(&request.token).await {
            Ok(clips) => clips,
            Err(e) => {
                let _ = handle.shutdown().await;
                let _ = driver.await;
                return Err(e);
            }
        };

        let stop_reason = if clips == 0 {
            info!("Nothing to play");
            StopReason::EmptyPlaylist
        } else if request.cycles == Some(0) {
            StopReason::CyclesCompleted
        } else {
            info!(clips, cycles = ?request.cycles, duration = ?request.duration, "Playback session started");
            let deadline = request.duration.map(|duration| Instant::now() + duration);
            let mut status = handle.subscribe();
            tokio::pin!(interrupt);

            loop {
                tokio::select! {
                    changed = status.changed() => {
                        if changed.is_err() {
                            warn!("Player stopped unexpectedly");
                            break StopReason::DriverStopped;
                        }
                        let current = status.borrow_and_update().clone();
                        on_status(&current);
                        if request.cycles.is_some_and(|cycles| current.completed_passes >= cycles) {
                            break StopReason::CyclesCompleted;
                        }
                    }
                    _ = Self::until(deadline) => break StopReason::DurationElapsed,
                    _ = &mut interrupt => break StopReason::Interrupted,
                }
            }
        };

        let _ = handle.shutdown().await;
        let report = driver
            .await
            .map_err(|e| DomainError::Internal(format!("Player task failed: {}", e)))?;

        info!(?stop_reason, passes = report.completed_passes, "Playback session ended");
        Ok(PlayResponse {
            clips,
            stop_reason,
            report,
        })
    }

    async fn until(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::*;

    fn fast_settings() -> PlayerSettings {
        PlayerSettings {
            driver: DriverSettings::default(),
            surface: SimulatedSurfaceSettings {
                start_delay: Duration::from_millis(100),
                natural_length: Duration::from_secs(30),
            },
        }
    }

    fn token(entries: Vec<PlaylistEntry>) -> ShareToken {
        ShareToken::encode(&Playlist::new(entries))
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_requested_cycles() {
        let interactor = PlayerInteractor::new(fast_settings());
        let request = PlayRequest {
            token: token(vec![
                PlaylistEntry::new("a", Bound::At(0), Bound::At(2)).unwrap(),
                PlaylistEntry::new("b", Bound::At(5), Bound::At(8)).unwrap(),
            ]),
            cycles: Some(2),
            duration: None,
        };

        let mut seen = Vec::new();
        let response = interactor
            .play(
                request,
                |status| seen.push(status.reference.clone()),
                std::future::pending(),
            )
            .await
            .unwrap();

        assert_eq!(response.stop_reason, StopReason::CyclesCompleted);
        assert_eq!(response.clips, 2);
        assert_eq!(response.report.completed_passes, 2);
        assert_eq!(response.report.clips_loaded, 5);
        assert!(seen.contains(&Some("b".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_duration() {
        let interactor = PlayerInteractor::new(fast_settings());
        let request = PlayRequest {
            token: token(vec![PlaylistEntry::full("a").unwrap()]),
            cycles: None,
            duration: Some(Duration::from_secs(10)),
        };

        let begin = Instant::now();
        let response = interactor
            .play(request, |_| {}, std::future::pending())
            .await
            .unwrap();

        assert_eq!(response.stop_reason, StopReason::DurationElapsed);
        assert!(begin.elapsed() >= Duration::from_secs(10));
        assert_eq!(response.report.clips_loaded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_ends_session() {
        let interactor = PlayerInteractor::new(fast_settings());
        let request = PlayRequest {
            token: token(vec![PlaylistEntry::full("a").unwrap()]),
            cycles: None,
            duration: None,
        };

        let response = interactor
            .play(request, |_| {}, time::sleep(Duration::from_secs(3)))
            .await
            .unwrap();

        assert_eq!(response.stop_reason, StopReason::Interrupted);
    }

    #[tokio::test]
    async fn test_empty_token_has_nothing_to_play() {
        let interactor = PlayerInteractor::new(fast_settings());
        let request = PlayRequest {
            token: ShareToken::from_text(""),
            cycles: None,
            duration: None,
        };

        let response = interactor
            .play(request, |_| {}, std::future::pending())
            .await
            .unwrap();

        assert_eq!(response.stop_reason, StopReason::EmptyPlaylist);
        assert_eq!(response.report.clips_loaded, 0);
    }

    #[tokio::test]
    async fn test_malformed_token_is_reported() {
        let interactor = PlayerInteractor::new(fast_settings());
        let request = PlayRequest {
            token: ShareToken::from_text("%%%"),
            cycles: Some(1),
            duration: None,
        };

        let result = interactor.play(request, |_| {}, std::future::pending()).await;
        assert!(matches!(result, Err(DomainError::Format(_))));
    }
}
