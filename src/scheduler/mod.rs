//! Playlist scheduler: the state machine and the task that drives it

pub mod driver;
pub mod machine;

pub use driver::{DriverReport, DriverSettings, PlaybackDriver, PlaybackStatus, PlayerControl, PlayerHandle};
pub use machine::{Directive, PlaybackScheduler, SchedulerEvent};
