// Playlist interactor - Orchestrates building and inspecting shared playlists

use serde::Serialize;
use tracing::{error, info, warn};

use crate::builder::{BuilderAction, BuilderState};
use crate::codec::ShareToken;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::ReferenceExtractor;

/// Separates the URL from the optional bounds in an entry argument
pub const ENTRY_SEPARATOR: char = '@';

/// One clip as typed by the user: `URL[@START][@END]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInput {
    pub url: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl EntryInput {
    /// Split an entry argument. Blank bounds stay blank and mean `Full`.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.trim().splitn(3, ENTRY_SEPARATOR);
        let url = parts.next().unwrap_or_default().to_string();
        let start = parts.next().map(str::to_string);
        let end = parts.next().map(str::to_string);
        Self { url, start, end }
    }

    fn into_action(self) -> BuilderAction {
        BuilderAction::Append {
            url: self.url,
            start: self.start,
            end: self.end,
        }
    }
}

/// Request to build a playlist from scratch
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub entries: Vec<String>,
    /// Positions to remove, applied in order after all entries
    pub removals: Vec<usize>,
}

/// An entry the builder refused, with the reason shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub input: String,
    pub reason: DomainError,
}

/// Result of a build
#[derive(Debug, Clone)]
pub struct BuildResponse {
    pub state: BuilderState,
    pub rejected: Vec<RejectedEntry>,
}

impl BuildResponse {
    pub fn plain_text(&self) -> String {
        self.state.plain_text()
    }

    pub fn share_token(&self) -> ShareToken {
        self.state.share_token()
    }
}

/// Output format of `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectFormat {
    Text,
    Json,
    Yaml,
}

impl InspectFormat {
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.to_lowercase().as_str() {
            "text" => Ok(InspectFormat::Text),
            "json" => Ok(InspectFormat::Json),
            "yaml" => Ok(InspectFormat::Yaml),
            other => Err(DomainError::BadArgs(format!("Unknown output format: {}", other))),
        }
    }
}

/// One playlist entry as shown by `inspect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub index: usize,
    pub reference: String,
    pub start: Bound,
    pub end: Bound,
    pub watch_url: String,
}

/// Result of an inspection
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub entries: Vec<EntryView>,
    pub summary: String,
}

/// Interactor for the builder and inspection use cases
pub struct PlaylistInteractor {
    watch_base_url: String,
}

impl PlaylistInteractor {
    /// Create new playlist interactor linking clips under `watch_base_url`
    pub fn new(watch_base_url: impl Into<String>) -> Self {
        Self {
            watch_base_url: watch_base_url.into(),
        }
    }

    /// Run every entry through the builder, then every removal. Invalid
    /// entries are collected and skipped; the rest of the playlist is kept.
    pub fn build(&self, request: BuildRequest) -> BuildResponse {
        let mut state = BuilderState::new();
        let mut rejected = Vec::new();

        for input in request.entries {
            match state.apply(EntryInput::parse(&input).into_action()) {
                Ok(next) => state = next,
                Err(reason) => {
                    if reason.is_user_error() {
                        warn!(entry = %input, error = %reason, "Skipping entry");
                    } else {
                        error!(entry = %input, error = %reason, "Builder failed on entry");
                    }
                    rejected.push(RejectedEntry { input, reason });
                }
            }
        }

        for index in request.removals {
            match state.apply(BuilderAction::RemoveAt(index)) {
                Ok(next) => state = next,
                Err(reason) => warn!(index, error = %reason, "Skipping removal"),
            }
        }

        info!(clips = state.len(), rejected = rejected.len(), "Playlist built");
        BuildResponse { state, rejected }
    }

    /// Decode a token and render its entries
    pub fn inspect(
        &self,
        token: &ShareToken,
        format: InspectFormat,
    ) -> Result<InspectResponse, DomainError> {
        let playlist = token.decode()?;
        let entries: Vec<EntryView> = playlist
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryView {
                index,
                reference: entry.reference().to_string(),
                start: entry.start(),
                end: entry.end(),
                watch_url: ReferenceExtractor::watch_url(&self.watch_base_url, entry.reference()),
            })
            .collect();

        let summary = match format {
            InspectFormat::Json => self.format_as_json(&entries)?,
            InspectFormat::Yaml => self.format_as_yaml(&entries)?,
            InspectFormat::Text => self.format_as_text(&entries),
        };

        Ok(InspectResponse { entries, summary })
    }

    fn format_as_json(&self, entries: &[EntryView]) -> Result<String, DomainError> {
        serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::Internal(format!("JSON serialization failed: {}", e)))
    }

    fn format_as_yaml(&self, entries: &[EntryView]) -> Result<String, DomainError> {
        serde_yaml::to_string(entries)
            .map_err(|e| DomainError::Internal(format!("YAML serialization failed: {}", e)))
    }

    fn format_as_text(&self, entries: &[EntryView]) -> String {
        if entries.is_empty() {
            return "Playlist is empty\n".to_string();
        }

        let mut output = format!("Playlist ({} clips):\n", entries.len());
        for entry in entries {
            output.push_str(&format!(
                "  {}. {} (Start: {}, End: {})\n     {}\n",
                entry.index + 1,
                entry.reference,
                entry.start,
                entry.end,
                entry.watch_url
            ));
        }
        output
    }
}
