// Domain models - Playlist, bounds and playback cursor

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::{format_seconds_to_time, format_time_to_seconds};

/// Literal used on the wire and in the builder for a natural boundary
pub const FULL_LITERAL: &str = "Full";

/// One side of a clip range: either the media's natural boundary or an
/// explicit offset in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// Play from the beginning / to the natural end
    #[default]
    Full,
    /// Explicit offset in seconds
    At(u64),
}

impl Bound {
    /// Parse `Full` or an `HH:MM:SS` offset
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value == FULL_LITERAL {
            return Ok(Bound::Full);
        }
        format_time_to_seconds(value).map(Bound::At)
    }

    /// Explicit offset, if any
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Bound::Full => None,
            Bound::At(seconds) => Some(*seconds),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Full => f.write_str(FULL_LITERAL),
            Bound::At(seconds) => f.write_str(&format_seconds_to_time(*seconds)),
        }
    }
}

/// A single clip in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    reference: String,
    start: Bound,
    end: Bound,
}

impl PlaylistEntry {
    /// Create a new entry. The reference must be non-empty; the range is not
    /// checked, an inverted range simply plays for zero seconds.
    pub fn new(reference: impl Into<String>, start: Bound, end: Bound) -> Result<Self, DomainError> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(DomainError::Format("Clip reference cannot be empty".to_string()));
        }
        Ok(Self { reference, start, end })
    }

    /// Entry that plays the whole clip
    pub fn full(reference: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(reference, Bound::Full, Bound::Full)
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn start(&self) -> Bound {
        self.start
    }

    pub fn end(&self) -> Bound {
        self.end
    }

    /// True when both bounds are explicit and the end does not come after the start
    pub fn is_degenerate(&self) -> bool {
        match (self.start, self.end) {
            (Bound::At(start), Bound::At(end)) => end <= start,
            (Bound::Full, Bound::At(end)) => end == 0,
            _ => false,
        }
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Start: {}, End: {})", self.reference, self.start, self.end)
    }
}

/// Ordered list of clips. Insertion order is playback order and references
/// may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaylistEntry> {
        self.entries.iter()
    }

    /// Index that follows `index`, wrapping back to the first entry
    pub fn next_index(&self, index: usize) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            (index + 1) % self.entries.len()
        }
    }

    /// Copy of this playlist with `entry` appended
    pub fn with_appended(&self, entry: PlaylistEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// Copy of this playlist without the entry at `index`; `None` if out of range
    pub fn without(&self, index: usize) -> Option<Self> {
        if index >= self.entries.len() {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        Some(Self { entries })
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a PlaylistEntry;
    type IntoIter = std::slice::Iter<'a, PlaylistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<PlaylistEntry> for Playlist {
    fn from_iter<I: IntoIterator<Item = PlaylistEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No playlist loaded, or the playlist is empty
    Idle,
    /// Clip requested from the surface, waiting for start confirmation
    Loading,
    /// Start confirmed, advance trigger armed
    Playing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Playing => "playing",
        };
        f.write_str(name)
    }
}

/// Position of the scheduler in its playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    pub index: usize,
    pub phase: Phase,
}

impl PlaybackCursor {
    pub fn idle() -> Self {
        Self {
            index: 0,
            phase: Phase::Idle,
        }
    }

    pub fn loading(index: usize) -> Self {
        Self {
            index,
            phase: Phase::Loading,
        }
    }

    pub fn playing(index: usize) -> Self {
        Self {
            index,
            phase: Phase::Playing,
        }
    }
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::idle()
    }
}

/// Generation number of a load. Signals and timers carry the ticket of the
/// load they belong to so that anything from a replaced load can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

impl LoadTicket {
    pub fn next(self) -> Self {
        LoadTicket(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What moves the cursor off the current entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTrigger {
    /// Fixed delay measured from the start confirmation
    After(Duration),
    /// The surface's end-of-media signal
    NaturalEnd,
}

impl AdvanceTrigger {
    pub fn is_timer(&self) -> bool {
        matches!(self, AdvanceTrigger::After(_))
    }

    pub fn is_natural_end(&self) -> bool {
        matches!(self, AdvanceTrigger::NaturalEnd)
    }
}

/// Request handed to the video surface for one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub index: usize,
    pub reference: String,
    /// `None` plays from the beginning
    pub start_seconds: Option<u64>,
    /// `None` plays to the natural end
    pub end_seconds: Option<u64>,
}

impl LoadRequest {
    pub fn for_entry(ticket: LoadTicket, index: usize, entry: &PlaylistEntry) -> Self {
        Self {
            ticket,
            index,
            reference: entry.reference().to_string(),
            start_seconds: entry.start().seconds(),
            end_seconds: entry.end().seconds(),
        }
    }
}
