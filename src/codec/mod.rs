//! Transport format for playlists
//!
//! A playlist travels as `entry$entry$...`, each entry being
//! `reference,start,end` with bounds written as `Full` or `HH:MM:SS`.
//! The share token is that text in standard base64.

pub mod token;

pub use token::ShareToken;

use crate::domain::errors::DomainError;
use crate::domain::model::{Bound, Playlist, PlaylistEntry};
use crate::domain::rules::{FIELD_DELIMITER, RECORD_DELIMITER};

/// Render a playlist as transport text. Delimiters inside references are not
/// escaped.
pub fn encode_text(playlist: &Playlist) -> String {
    playlist
        .iter()
        .map(encode_record)
        .collect::<Vec<_>>()
        .join(&RECORD_DELIMITER.to_string())
}

fn encode_record(entry: &PlaylistEntry) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        entry.reference(),
        entry.start(),
        entry.end(),
        sep = FIELD_DELIMITER
    )
}

/// Parse transport text back into a playlist. Empty text is the empty playlist.
pub fn decode_text(text: &str) -> Result<Playlist, DomainError> {
    if text.is_empty() {
        return Ok(Playlist::empty());
    }

    text.split(RECORD_DELIMITER)
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect()
}

fn decode_record(index: usize, record: &str) -> Result<PlaylistEntry, DomainError> {
    let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
    let [reference, start, end] = fields.as_slice() else {
        return Err(DomainError::Format(format!(
            "Record {} has {} fields, expected 3: '{}'",
            index,
            fields.len(),
            record
        )));
    };

    let start = Bound::parse(start)
        .map_err(|e| DomainError::Format(format!("Record {} start: {}", index, e)))?;
    let end = Bound::parse(end)
        .map_err(|e| DomainError::Format(format!("Record {} end: {}", index, e)))?;

    PlaylistEntry::new(*reference, start, end)
        .map_err(|e| DomainError::Format(format!("Record {}: {}", index, e)))
}
