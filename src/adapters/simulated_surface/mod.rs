// Simulated video surface - Stands in for a real player in the terminal

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Timing of the simulated surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedSurfaceSettings {
    /// Delay between `play` and the start confirmation
    pub start_delay: Duration,
    /// Length every simulated video has
    pub natural_length: Duration,
}

impl Default for SimulatedSurfaceSettings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(300),
            natural_length: Duration::from_secs(30),
        }
    }
}

#[derive(Default)]
struct SurfaceState {
    loaded: Option<LoadRequest>,
    started_at: Option<Instant>,
    playback: Option<JoinHandle<()>>,
}

/// Video surface that only keeps time. Every video is `natural_length` long.
pub struct SimulatedSurfaceAdapter {
    settings: SimulatedSurfaceSettings,
    signals: SignalSender,
    state: Arc<Mutex<SurfaceState>>,
}

impl SimulatedSurfaceAdapter {
    /// Create new simulated surface reporting on `signals`
    pub fn new(settings: SimulatedSurfaceSettings, signals: SignalSender) -> Self {
        Self {
            settings,
            signals,
            state: Arc::new(Mutex::new(SurfaceState::default())),
        }
    }

    fn lock(state: &Mutex<SurfaceState>) -> Result<MutexGuard<'_, SurfaceState>, DomainError> {
        state
            .lock()
            .map_err(|_| DomainError::Internal("Surface state lock poisoned".to_string()))
    }

    /// Time from the start confirmation until the simulated video ends
    fn remaining_length(&self, request: &LoadRequest) -> Duration {
        let start = Duration::from_secs(request.start_seconds.unwrap_or(0));
        self.settings.natural_length.saturating_sub(start)
    }
}

impl Drop for SimulatedSurfaceAdapter {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(task) = state.playback.take() {
                task.abort();
            }
        }
    }
}

#[async_trait]
impl VideoSurface for SimulatedSurfaceAdapter {
    async fn load(&self, request: &LoadRequest) -> Result<(), DomainError> {
        let mut state = Self::lock(&self.state)?;
        if let Some(task) = state.playback.take() {
            task.abort();
        }
        info!(
            reference = %request.reference,
            start = %request.start_seconds.map(Bound::At).unwrap_or(Bound::Full),
            end = %request.end_seconds.map(Bound::At).unwrap_or(Bound::Full),
            "Surface loaded clip"
        );
        state.loaded = Some(request.clone());
        state.started_at = None;
        Ok(())
    }

    async fn play(&self) -> Result<(), DomainError> {
        let mut state = Self::lock(&self.state)?;
        let request = state
            .loaded
            .clone()
            .ok_or_else(|| DomainError::BadArgs("Nothing loaded to play".to_string()))?;
        if let Some(task) = state.playback.take() {
            task.abort();
        }

        let ticket = request.ticket;
        let start_delay = self.settings.start_delay;
        let natural_end = request.end_seconds.is_none().then(|| self.remaining_length(&request));
        let signals = self.signals.clone();
        let shared = Arc::clone(&self.state);

        state.playback = Some(tokio::spawn(async move {
            time::sleep(start_delay).await;
            let marked = shared
                .lock()
                .map(|mut state| state.started_at = Some(Instant::now()))
                .is_ok();
            if !marked {
                return;
            }
            debug!(%ticket, "Surface playback started");
            if signals.send(SurfaceSignal::PlaybackStarted(ticket)).is_err() {
                return;
            }

            if let Some(length) = natural_end {
                time::sleep(length).await;
                debug!(%ticket, "Surface reached natural end");
                let _ = signals.send(SurfaceSignal::NaturallyEnded(ticket));
            }
        }));
        Ok(())
    }

    async fn current_position_seconds(&self) -> Result<f64, DomainError> {
        let state = Self::lock(&self.state)?;
        let Some(request) = state.loaded.as_ref() else {
            return Ok(0.0);
        };

        let start = request.start_seconds.unwrap_or(0) as f64;
        let elapsed = state
            .started_at
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        let natural_end = self.settings.natural_length.as_secs_f64().max(start);
        let end = request
            .end_seconds
            .map(|end| end as f64)
            .unwrap_or(natural_end);

        Ok((start + elapsed).min(end.max(start)))
    }
}
