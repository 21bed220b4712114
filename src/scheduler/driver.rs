//! Event loop around the playback state machine
//!
//! One task owns the scheduler, the surface and at most one pending advance
//! (a timer or a natural-end wait). Dropping the pending advance is how a
//! timer is cancelled, so a replaced load can never fire.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info, warn};

use crate::codec::ShareToken;
use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::ports::{SignalReceiver, SurfaceSignal, VideoSurface};
use crate::scheduler::machine::{Directive, PlaybackScheduler, SchedulerEvent};

const CONTROL_QUEUE_DEPTH: usize = 16;

/// Messages accepted by a running player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerControl {
    Load(Playlist),
    Skip,
    Restart,
    Shutdown,
}

/// Snapshot published after every step of the driver
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStatus {
    pub cursor: PlaybackCursor,
    pub ticket: LoadTicket,
    pub reference: Option<String>,
    pub position_seconds: Option<f64>,
    pub completed_passes: u64,
    pub clips_loaded: u64,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            cursor: PlaybackCursor::idle(),
            ticket: LoadTicket::default(),
            reference: None,
            position_seconds: None,
            completed_passes: 0,
            clips_loaded: 0,
        }
    }
}

/// Counters returned when the driver stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverReport {
    pub clips_loaded: u64,
    pub completed_passes: u64,
    pub stale_signals: u64,
}

/// Driver tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverSettings {
    /// How often to poll the surface position while a clip is active
    pub position_poll: Option<Duration>,
}

enum PendingAdvance {
    Timer {
        ticket: LoadTicket,
        sleep: Pin<Box<Sleep>>,
    },
    NaturalEnd {
        ticket: LoadTicket,
    },
}

impl PendingAdvance {
    fn ticket(&self) -> LoadTicket {
        match self {
            PendingAdvance::Timer { ticket, .. } | PendingAdvance::NaturalEnd { ticket } => *ticket,
        }
    }
}

/// Client side of a running player
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    control: mpsc::Sender<PlayerControl>,
    status: watch::Receiver<PlaybackStatus>,
}

impl PlayerHandle {
    async fn send(&self, control: PlayerControl) -> Result<(), DomainError> {
        self.control
            .send(control)
            .await
            .map_err(|_| DomainError::Internal("Player is no longer running".to_string()))
    }

    /// Replace the playlist
    pub async fn load(&self, playlist: Playlist) -> Result<(), DomainError> {
        self.send(PlayerControl::Load(playlist)).await
    }

    /// Decode a token and load it. A malformed token loads the empty
    /// playlist, leaving the player idle, and the decode error is returned.
    pub async fn load_token(&self, token: &ShareToken) -> Result<usize, DomainError> {
        match token.decode() {
            Ok(playlist) => {
                let clips = playlist.len();
                self.load(playlist).await?;
                Ok(clips)
            }
            Err(e) => {
                warn!(error = %e, "Could not decode share token");
                self.load(Playlist::empty()).await?;
                Err(e)
            }
        }
    }

    pub async fn skip(&self) -> Result<(), DomainError> {
        self.send(PlayerControl::Skip).await
    }

    pub async fn restart(&self) -> Result<(), DomainError> {
        self.send(PlayerControl::Restart).await
    }

    /// Ask the driver to stop. Pending timers are dropped with it.
    pub async fn shutdown(&self) -> Result<(), DomainError> {
        self.send(PlayerControl::Shutdown).await
    }

    /// Latest published status
    pub fn status(&self) -> PlaybackStatus {
        self.status.borrow().clone()
    }

    /// Receiver that is notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.clone()
    }
}

/// Owns the scheduler and is the only caller of the video surface
pub struct PlaybackDriver {
    scheduler: PlaybackScheduler,
    surface: Arc<dyn VideoSurface>,
    signals: SignalReceiver,
    signals_open: bool,
    control: mpsc::Receiver<PlayerControl>,
    status: watch::Sender<PlaybackStatus>,
    pending: Option<PendingAdvance>,
    position_poll: Option<Interval>,
    position_poll_period: Option<Duration>,
    position: Option<f64>,
    report: DriverReport,
}

impl PlaybackDriver {
    /// Create a driver and the handle that controls it
    pub fn new(
        surface: Arc<dyn VideoSurface>,
        signals: SignalReceiver,
        settings: DriverSettings,
    ) -> (Self, PlayerHandle) {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE_DEPTH);
        let (status_tx, status_rx) = watch::channel(PlaybackStatus::default());

        let driver = Self {
            scheduler: PlaybackScheduler::new(),
            surface,
            signals,
            signals_open: true,
            control: control_rx,
            status: status_tx,
            pending: None,
            position_poll: None,
            position_poll_period: settings.position_poll.filter(|p| !p.is_zero()),
            position: None,
            report: DriverReport::default(),
        };
        let handle = PlayerHandle {
            control: control_tx,
            status: status_rx,
        };
        (driver, handle)
    }

    /// Spawn the driver on the current runtime
    pub fn spawn(
        surface: Arc<dyn VideoSurface>,
        signals: SignalReceiver,
        settings: DriverSettings,
    ) -> (PlayerHandle, JoinHandle<DriverReport>) {
        let (driver, handle) = Self::new(surface, signals, settings);
        (handle, tokio::spawn(driver.run()))
    }

    /// Run until shut down or until every handle is dropped
    pub async fn run(mut self) -> DriverReport {
        info!("Player started");

        loop {
            tokio::select! {
                control = self.control.recv() => match control {
                    Some(PlayerControl::Shutdown) | None => break,
                    Some(control) => self.on_control(control).await,
                },
                signal = self.signals.recv(), if self.signals_open => match signal {
                    Some(signal) => self.on_signal(signal).await,
                    None => {
                        warn!("Video surface closed its signal channel");
                        self.signals_open = false;
                    }
                },
                ticket = Self::pending_timer(&mut self.pending) => {
                    self.pending = None;
                    self.dispatch(SchedulerEvent::TimerElapsed(ticket)).await;
                },
                _ = Self::poll_tick(&mut self.position_poll) => {
                    self.poll_position().await;
                },
            }
        }

        if let Some(pending) = self.pending.take() {
            debug!(ticket = %pending.ticket(), "Dropping pending advance on shutdown");
        }
        self.report.completed_passes = self.scheduler.completed_passes();
        info!(
            clips_loaded = self.report.clips_loaded,
            passes = self.report.completed_passes,
            stale_signals = self.report.stale_signals,
            "Player stopped"
        );
        self.report
    }

    async fn pending_timer(pending: &mut Option<PendingAdvance>) -> LoadTicket {
        match pending {
            Some(PendingAdvance::Timer { ticket, sleep }) => {
                sleep.as_mut().await;
                *ticket
            }
            _ => std::future::pending().await,
        }
    }

    async fn poll_tick(poll: &mut Option<Interval>) {
        match poll {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }

    async fn on_control(&mut self, control: PlayerControl) {
        match control {
            PlayerControl::Load(playlist) => {
                let directives = self.scheduler.load(playlist);
                self.execute(directives).await;
            }
            PlayerControl::Skip => self.dispatch(SchedulerEvent::Skip).await,
            PlayerControl::Restart => self.dispatch(SchedulerEvent::Restart).await,
            PlayerControl::Shutdown => {}
        }
    }

    async fn on_signal(&mut self, signal: SurfaceSignal) {
        let event = match signal {
            SurfaceSignal::PlaybackStarted(ticket) => SchedulerEvent::PlaybackStarted(ticket),
            SurfaceSignal::NaturallyEnded(ticket) => {
                match &self.pending {
                    Some(PendingAdvance::NaturalEnd { ticket: waiting }) if *waiting == ticket => {
                        self.pending = None;
                    }
                    _ => {}
                }
                SchedulerEvent::NaturallyEnded(ticket)
            }
        };

        if Self::signal_ticket(signal) != self.scheduler.ticket() {
            self.report.stale_signals += 1;
        }
        self.dispatch(event).await;
    }

    fn signal_ticket(signal: SurfaceSignal) -> LoadTicket {
        match signal {
            SurfaceSignal::PlaybackStarted(ticket) | SurfaceSignal::NaturallyEnded(ticket) => ticket,
        }
    }

    async fn dispatch(&mut self, event: SchedulerEvent) {
        let directives = self.scheduler.handle(event);
        self.execute(directives).await;
    }

    async fn execute(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::CancelPending => {
                    if let Some(pending) = self.pending.take() {
                        debug!(ticket = %pending.ticket(), "Cancelled pending advance");
                    }
                    self.position = None;
                }
                Directive::Load(request) => {
                    self.report.clips_loaded += 1;
                    if let Err(e) = self.surface.load(&request).await {
                        warn!(reference = %request.reference, error = %e, "Surface failed to load clip");
                    }
                }
                Directive::Play => {
                    if let Err(e) = self.surface.play().await {
                        warn!(error = %e, "Surface failed to start playback");
                    }
                }
                Directive::Arm { ticket, trigger } => {
                    self.pending = Some(match trigger {
                        AdvanceTrigger::After(delay) => {
                            debug!(%ticket, ?delay, "Advance timer armed");
                            PendingAdvance::Timer {
                                ticket,
                                sleep: Box::pin(time::sleep(delay)),
                            }
                        }
                        AdvanceTrigger::NaturalEnd => {
                            debug!(%ticket, "Waiting for natural end");
                            PendingAdvance::NaturalEnd { ticket }
                        }
                    });
                }
            }
        }
        self.sync_position_poll();
        self.publish();
    }

    /// Poll the position only while a clip is active
    fn sync_position_poll(&mut self) {
        let active = self.scheduler.cursor().phase != Phase::Idle;
        match (active, self.position_poll_period, self.position_poll.is_some()) {
            (true, Some(period), false) => {
                let mut interval = time::interval_at(time::Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.position_poll = Some(interval);
            }
            (false, _, true) => self.position_poll = None,
            _ => {}
        }
    }

    async fn poll_position(&mut self) {
        match self.surface.current_position_seconds().await {
            Ok(position) => {
                self.position = Some(position);
                self.publish();
            }
            Err(e) => debug!(error = %e, "Position unavailable"),
        }
    }

    fn publish(&self) {
        let status = PlaybackStatus {
            cursor: self.scheduler.cursor(),
            ticket: self.scheduler.ticket(),
            reference: self
                .scheduler
                .current_entry()
                .map(|entry| entry.reference().to_string()),
            position_seconds: self.position,
            completed_passes: self.scheduler.completed_passes(),
            clips_loaded: self.report.clips_loaded,
        };
        self.status.send_replace(status);
    }
}
