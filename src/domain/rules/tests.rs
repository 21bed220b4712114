// Unit tests for domain rules

use std::time::Duration;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

#[test]
fn test_extract_watch_url() {
    let reference = ReferenceExtractor::extract("https://www.youtube.com/watch?v=abc123").unwrap();
    assert_eq!(reference, "abc123");
}

#[test]
fn test_extract_watch_url_without_www() {
    let reference = ReferenceExtractor::extract("https://youtube.com/watch?v=abc123").unwrap();
    assert_eq!(reference, "abc123");
}

#[test]
fn test_extract_watch_url_with_extra_params() {
    let reference =
        ReferenceExtractor::extract("https://www.youtube.com/watch?list=PL1&v=abc123&t=42").unwrap();
    assert_eq!(reference, "abc123");
}

#[test]
fn test_extract_short_link() {
    let reference = ReferenceExtractor::extract("https://youtu.be/abc123").unwrap();
    assert_eq!(reference, "abc123");
}

#[test]
fn test_extract_short_link_ignores_query() {
    let reference = ReferenceExtractor::extract("https://youtu.be/abc123?t=30").unwrap();
    assert_eq!(reference, "abc123");
}

#[test]
fn test_extract_rejects_other_hosts() {
    let result = ReferenceExtractor::extract("https://vimeo.com/123");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));
}

#[test]
fn test_extract_rejects_missing_parameter() {
    let result = ReferenceExtractor::extract("https://www.youtube.com/watch?list=PL1");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));

    let result = ReferenceExtractor::extract("https://www.youtube.com/watch?v=");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));
}

#[test]
fn test_extract_rejects_empty_short_link() {
    let result = ReferenceExtractor::extract("https://youtu.be/");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));
}

#[test]
fn test_extract_rejects_non_urls() {
    let result = ReferenceExtractor::extract("not a url");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));
}

#[test]
fn test_extract_rejects_delimiters() {
    let result = ReferenceExtractor::extract("https://www.youtube.com/watch?v=ab%24c");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));

    let result = ReferenceExtractor::extract("https://youtu.be/ab,c");
    assert!(matches!(result, Err(DomainError::InvalidReference(_))));
}

#[test]
fn test_watch_url() {
    assert_eq!(
        ReferenceExtractor::watch_url("https://youtube.com/watch?v=", "abc"),
        "https://youtube.com/watch?v=abc"
    );
}

#[test]
fn test_trigger_for_bounded_entry() {
    let entry = PlaylistEntry::new("a", Bound::At(10), Bound::At(15)).unwrap();
    assert_eq!(
        AdvancePolicy::trigger_for(&entry),
        AdvanceTrigger::After(Duration::from_secs(5))
    );
}

#[test]
fn test_trigger_for_full_start() {
    let entry = PlaylistEntry::new("a", Bound::Full, Bound::At(8)).unwrap();
    assert_eq!(
        AdvancePolicy::trigger_for(&entry),
        AdvanceTrigger::After(Duration::from_secs(8))
    );
}

#[test]
fn test_trigger_for_full_end() {
    let entry = PlaylistEntry::new("a", Bound::At(10), Bound::Full).unwrap();
    assert_eq!(AdvancePolicy::trigger_for(&entry), AdvanceTrigger::NaturalEnd);
}

#[test]
fn test_trigger_for_inverted_range_is_zero() {
    let entry = PlaylistEntry::new("a", Bound::At(20), Bound::At(10)).unwrap();
    assert_eq!(
        AdvancePolicy::trigger_for(&entry),
        AdvanceTrigger::After(Duration::ZERO)
    );
}
