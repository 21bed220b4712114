//! Playlist builder
//!
//! The builder is a value: every action produces a new state and leaves the
//! previous one untouched, so it can be driven and tested without any UI.

use tracing::{debug, warn};

use crate::codec::{encode_text, ShareToken};
use crate::domain::errors::DomainError;
use crate::domain::model::{Bound, Playlist, PlaylistEntry};
use crate::domain::rules::ReferenceExtractor;
use crate::utils::time::format_time_to_seconds;

/// Discrete builder actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderAction {
    /// Add a clip. Blank or missing times mean `Full`.
    Append {
        url: String,
        start: Option<String>,
        end: Option<String>,
    },
    /// Remove the clip at a position. Out-of-range positions change nothing.
    RemoveAt(usize),
}

impl BuilderAction {
    pub fn append(url: impl Into<String>, start: Option<&str>, end: Option<&str>) -> Self {
        BuilderAction::Append {
            url: url.into(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }
}

/// Snapshot of a playlist under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderState {
    playlist: Playlist,
}

impl BuilderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action. On error the caller keeps the previous state, which
    /// is never modified.
    pub fn apply(&self, action: BuilderAction) -> Result<BuilderState, DomainError> {
        match action {
            BuilderAction::Append { url, start, end } => {
                let entry = Self::parse_entry(&url, start.as_deref(), end.as_deref())?;
                if entry.is_degenerate() {
                    warn!(
                        reference = entry.reference(),
                        start = %entry.start(),
                        end = %entry.end(),
                        "Clip range is empty; the player will skip straight past it"
                    );
                }
                debug!(entry = %entry, "Appending clip");
                Ok(BuilderState {
                    playlist: self.playlist.with_appended(entry),
                })
            }
            BuilderAction::RemoveAt(index) => match self.playlist.without(index) {
                Some(playlist) => {
                    debug!(index, "Removed clip");
                    Ok(BuilderState { playlist })
                }
                None => {
                    debug!(index, len = self.playlist.len(), "Remove ignored, index out of range");
                    Ok(self.clone())
                }
            },
        }
    }

    fn parse_entry(
        url: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<PlaylistEntry, DomainError> {
        let reference = ReferenceExtractor::extract(url)?;
        let start = Self::parse_input_bound(start)?;
        let end = Self::parse_input_bound(end)?;
        PlaylistEntry::new(reference, start, end)
    }

    /// Form input for a time field: blank is `Full`, anything else must be `HH:MM:SS`
    fn parse_input_bound(input: Option<&str>) -> Result<Bound, DomainError> {
        match input.map(str::trim) {
            None | Some("") => Ok(Bound::Full),
            Some(text) => format_time_to_seconds(text).map(Bound::At),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Transport text of the current playlist
    pub fn plain_text(&self) -> String {
        encode_text(&self.playlist)
    }

    /// Share token of the current playlist
    pub fn share_token(&self) -> ShareToken {
        ShareToken::encode(&self.playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_with_times() {
        let state = BuilderState::new()
            .apply(BuilderAction::append(
                "https://www.youtube.com/watch?v=abc123",
                Some("00:00:10"),
                Some("00:00:15"),
            ))
            .unwrap();

        let entry = state.playlist().get(0).unwrap();
        assert_eq!(entry.reference(), "abc123");
        assert_eq!(entry.start(), Bound::At(10));
        assert_eq!(entry.end(), Bound::At(15));
    }

    #[test]
    fn test_blank_times_are_full() {
        let state = BuilderState::new()
            .apply(BuilderAction::append("https://youtu.be/abc123", Some("  "), None))
            .unwrap();

        let entry = state.playlist().get(0).unwrap();
        assert_eq!(entry.start(), Bound::Full);
        assert_eq!(entry.end(), Bound::Full);
    }

    #[test]
    fn test_invalid_url_leaves_state_untouched() {
        let state = BuilderState::new()
            .apply(BuilderAction::append("https://youtu.be/first", None, None))
            .unwrap();

        let result = state.apply(BuilderAction::append("https://vimeo.com/123", None, None));
        assert!(matches!(result, Err(DomainError::InvalidReference(_))));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let result = BuilderState::new().apply(BuilderAction::append(
            "https://youtu.be/abc",
            Some("ten seconds"),
            None,
        ));
        assert!(matches!(result, Err(DomainError::Format(_))));
    }

    #[test]
    fn test_inverted_range_is_accepted() {
        let state = BuilderState::new()
            .apply(BuilderAction::append(
                "https://youtu.be/abc",
                Some("00:00:20"),
                Some("00:00:10"),
            ))
            .unwrap();
        assert!(state.playlist().get(0).unwrap().is_degenerate());
    }

    #[test]
    fn test_remove_at() {
        let state = ["https://youtu.be/a", "https://youtu.be/b", "https://youtu.be/c"]
            .iter()
            .fold(BuilderState::new(), |state, url| {
                state.apply(BuilderAction::append(*url, None, None)).unwrap()
            });

        let removed = state.apply(BuilderAction::RemoveAt(1)).unwrap();
        let refs: Vec<&str> = removed.playlist().iter().map(|e| e.reference()).collect();
        assert_eq!(refs, vec!["a", "c"]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let state = BuilderState::new()
            .apply(BuilderAction::append("https://youtu.be/a", None, None))
            .unwrap();
        assert_eq!(state.apply(BuilderAction::RemoveAt(5)).unwrap(), state);
    }

    #[test]
    fn test_outputs_follow_playlist() {
        let state = BuilderState::new()
            .apply(BuilderAction::append("https://youtu.be/a", None, Some("00:01:00")))
            .unwrap();

        assert_eq!(state.plain_text(), "a,Full,00:01:00");
        assert_eq!(state.share_token().decode().unwrap(), *state.playlist());
    }

    #[test]
    fn test_empty_builder_outputs() {
        let state = BuilderState::new();
        assert_eq!(state.plain_text(), "");
        assert!(state.share_token().is_empty());
    }
}
