//! clipreel library
//!
//! Playlists of video clips with optional start/end bounds, a compact share
//! token to pass them around, and a scheduler that plays them in an endless
//! loop against a video surface.

pub mod adapters;
pub mod app;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod scheduler;
pub mod utils;

// Re-export commonly used types
pub use builder::{BuilderAction, BuilderState};
pub use codec::{decode_text, encode_text, ShareToken};
pub use domain::errors::DomainError;
pub use domain::model::{Bound, LoadRequest, LoadTicket, PlaybackCursor, Phase, Playlist, PlaylistEntry};
pub use domain::rules::{AdvancePolicy, ReferenceExtractor};
pub use error::{ClipreelError, ClipreelResult};
pub use ports::{SurfaceSignal, VideoSurface};
pub use scheduler::{PlaybackDriver, PlaybackScheduler, PlaybackStatus, PlayerHandle};
