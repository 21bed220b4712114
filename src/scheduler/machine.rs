//! Playback state machine
//!
//! Pure and synchronous: events go in, directives come out. The driver
//! executes the directives in order, which is what gives the
//! cancel-before-load ordering on reload.

use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::domain::rules::AdvancePolicy;

/// Inputs to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Surface confirmed playback of the given load
    PlaybackStarted(LoadTicket),
    /// Surface reached the clip's natural end
    NaturallyEnded(LoadTicket),
    /// The advance timer armed for the given load elapsed
    TimerElapsed(LoadTicket),
    /// Manual advance to the next clip
    Skip,
    /// Back to the first clip
    Restart,
}

/// Side effects requested by the scheduler, to be executed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Drop the pending timer or natural-end wait, if any
    CancelPending,
    /// Hand a clip to the surface
    Load(LoadRequest),
    /// Tell the surface to start rendering
    Play,
    /// Arm the advance trigger for a load
    Arm {
        ticket: LoadTicket,
        trigger: AdvanceTrigger,
    },
}

/// Cursor over a decoded playlist
#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    playlist: Playlist,
    cursor: PlaybackCursor,
    ticket: LoadTicket,
    armed: Option<AdvanceTrigger>,
    completed_passes: u64,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the playlist and start over from the first clip
    pub fn load(&mut self, playlist: Playlist) -> Vec<Directive> {
        let mut directives = vec![Directive::CancelPending];
        self.armed = None;
        self.playlist = playlist;
        self.cursor = PlaybackCursor::idle();
        self.completed_passes = 0;

        if self.playlist.is_empty() {
            info!("Loaded empty playlist, staying idle");
            return directives;
        }

        info!(clips = self.playlist.len(), "Loaded playlist");
        directives.extend(self.enter_loading(0));
        directives
    }

    /// Feed an event and collect the directives it produces
    pub fn handle(&mut self, event: SchedulerEvent) -> Vec<Directive> {
        match event {
            SchedulerEvent::PlaybackStarted(ticket) => self.on_started(ticket),
            SchedulerEvent::TimerElapsed(ticket) => {
                self.on_advance_signal(ticket, AdvanceTrigger::is_timer, "timer")
            }
            SchedulerEvent::NaturallyEnded(ticket) => {
                self.on_advance_signal(ticket, AdvanceTrigger::is_natural_end, "natural end")
            }
            SchedulerEvent::Skip => {
                if self.cursor.phase == Phase::Idle {
                    return Vec::new();
                }
                debug!(index = self.cursor.index, "Skipping clip");
                self.advance()
            }
            SchedulerEvent::Restart => {
                if self.playlist.is_empty() {
                    return Vec::new();
                }
                debug!("Restarting playlist");
                self.armed = None;
                self.completed_passes = 0;
                let mut directives = vec![Directive::CancelPending];
                directives.extend(self.enter_loading(0));
                directives
            }
        }
    }

    fn on_started(&mut self, ticket: LoadTicket) -> Vec<Directive> {
        if ticket != self.ticket || self.cursor.phase != Phase::Loading {
            debug!(%ticket, current = %self.ticket, phase = %self.cursor.phase, "Ignoring stale start signal");
            return Vec::new();
        }
        let Some(entry) = self.playlist.get(self.cursor.index) else {
            warn!(index = self.cursor.index, "Cursor outside playlist");
            return Vec::new();
        };

        let trigger = AdvancePolicy::trigger_for(entry);
        self.cursor = PlaybackCursor::playing(self.cursor.index);
        self.armed = Some(trigger);
        debug!(index = self.cursor.index, ?trigger, "Playback started");

        vec![Directive::Arm { ticket, trigger }]
    }

    fn on_advance_signal(
        &mut self,
        ticket: LoadTicket,
        selected: fn(&AdvanceTrigger) -> bool,
        source: &str,
    ) -> Vec<Directive> {
        let current = ticket == self.ticket && self.cursor.phase == Phase::Playing;
        if !current || !self.armed.as_ref().is_some_and(selected) {
            debug!(%ticket, current = %self.ticket, source, "Ignoring advance signal");
            return Vec::new();
        }
        self.advance()
    }

    fn advance(&mut self) -> Vec<Directive> {
        let next = self.playlist.next_index(self.cursor.index);
        if next == 0 {
            self.completed_passes += 1;
        }
        self.armed = None;

        let mut directives = vec![Directive::CancelPending];
        directives.extend(self.enter_loading(next));
        directives
    }

    fn enter_loading(&mut self, index: usize) -> Vec<Directive> {
        let Some(entry) = self.playlist.get(index) else {
            self.cursor = PlaybackCursor::idle();
            return Vec::new();
        };

        self.ticket = self.ticket.next();
        self.cursor = PlaybackCursor::loading(index);
        info!(index, ticket = %self.ticket, entry = %entry, "Loading clip");

        vec![
            Directive::Load(LoadRequest::for_entry(self.ticket, index, entry)),
            Directive::Play,
        ]
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Entry under the cursor, if playing or loading
    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        match self.cursor.phase {
            Phase::Idle => None,
            _ => self.playlist.get(self.cursor.index),
        }
    }

    /// How many times playback wrapped from the last clip back to the first
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }
}
