//! Share token: the base64 form of a playlist's transport text

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::codec::{decode_text, encode_text};
use crate::domain::errors::DomainError;
use crate::domain::model::Playlist;

/// The only artifact exchanged between the builder and the player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Encode a playlist into a token
    pub fn encode(playlist: &Playlist) -> Self {
        ShareToken(STANDARD.encode(encode_text(playlist).as_bytes()))
    }

    /// Wrap pasted text as a token without validating it. ASCII whitespace
    /// is dropped wherever it appears, so wrapped tokens still decode.
    pub fn from_text(text: &str) -> Self {
        ShareToken(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    }

    /// Decode the token into a playlist
    pub fn decode(&self) -> Result<Playlist, DomainError> {
        decode_text(&self.plain_text()?)
    }

    /// Recover the transport text carried by this token
    pub fn plain_text(&self) -> Result<String, DomainError> {
        let bytes = STANDARD
            .decode(self.0.as_bytes())
            .map_err(|e| DomainError::Format(format!("Share token is not valid base64: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|_| DomainError::Format("Share token does not hold UTF-8 text".to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareToken {
    type Err = DomainError;

    /// Parse and validate pasted text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = ShareToken::from_text(s);
        token.decode()?;
        Ok(token)
    }
}
