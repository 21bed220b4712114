// Domain rules - Reference extraction and advance policy

use std::time::Duration;

use url::Url;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Characters the transport format uses as separators and never escapes
pub const RECORD_DELIMITER: char = '$';
pub const FIELD_DELIMITER: char = ',';

/// Turns a clip URL into the bare reference stored in a playlist
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    /// Extract the video id from a watch URL or a short link.
    ///
    /// `youtube.com` / `www.youtube.com` use the `v` query parameter,
    /// `youtu.be` uses the path. Anything else is rejected.
    pub fn extract(clip_url: &str) -> Result<String, DomainError> {
        let url = Url::parse(clip_url.trim()).map_err(|e| {
            DomainError::InvalidReference(format!("'{}' is not a URL: {}", clip_url, e))
        })?;

        let reference = match url.host_str() {
            Some("youtube.com") | Some("www.youtube.com") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("youtu.be") => Some(url.path().trim_start_matches('/').to_string()),
            Some(host) => {
                return Err(DomainError::InvalidReference(format!(
                    "Unsupported host '{}'",
                    host
                )))
            }
            None => None,
        };

        let reference = reference
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidReference(format!("No video id in '{}'", clip_url))
            })?;

        if reference.contains(RECORD_DELIMITER) || reference.contains(FIELD_DELIMITER) {
            return Err(DomainError::InvalidReference(format!(
                "Video id '{}' contains a reserved character",
                reference
            )));
        }

        Ok(reference)
    }

    /// Watch link for a reference, for display
    pub fn watch_url(base: &str, reference: &str) -> String {
        format!("{}{}", base, reference)
    }
}

/// Decides how long a clip plays and what ends it
pub struct AdvancePolicy;

impl AdvancePolicy {
    /// Advance trigger selected by the entry's end bound.
    ///
    /// An explicit end arms a timer of `end - start` seconds (a `Full` start
    /// counts as zero); an inverted range saturates to zero. A `Full` end
    /// waits for the surface to report the natural end.
    pub fn trigger_for(entry: &PlaylistEntry) -> AdvanceTrigger {
        match entry.end() {
            Bound::Full => AdvanceTrigger::NaturalEnd,
            Bound::At(end) => {
                let start = entry.start().seconds().unwrap_or(0);
                AdvanceTrigger::After(Duration::from_secs(end.saturating_sub(start)))
            }
        }
    }
}

#[cfg(test)]
mod tests;
