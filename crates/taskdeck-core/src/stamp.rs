use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// Minute precision, zero padded: lexicographic order on the textual form is
// chronological order.
const MINUTE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Minute-precision timestamp kept in its `YYYY-MM-DD HH:MM` textual form.
///
/// The textual form is also the wire form, so whatever was last saved to the
/// backing file round-trips unchanged. Ordering is derived from the text;
/// absent stamps (`Option<Stamp>`) order before every real one.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stamp(String);

impl Stamp {
    /// Capture the current UTC time at minute precision.
    #[must_use]
    pub fn now() -> Self {
        // Formatting a valid datetime with a const description cannot fail.
        Self(OffsetDateTime::now_utc().format(MINUTE_FORMAT).unwrap_or_default())
    }

    /// Wrap an already formatted stamp.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_minute_precision_shape() {
        let stamp = Stamp::now();
        let text = stamp.as_str();
        assert_eq!(text.len(), 16, "unexpected stamp: {text}");
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[7..8], "-");
        assert_eq!(&text[10..11], " ");
        assert_eq!(&text[13..14], ":");
    }

    #[test]
    fn textual_order_is_chronological() {
        let earlier = Stamp::new("2024-01-01 23:59");
        let later = Stamp::new("2024-01-02 00:00");
        assert!(earlier < later);
    }

    #[test]
    fn absent_stamps_order_first() {
        let some = Some(Stamp::new("0001-01-01 00:00"));
        assert!(None < some);
    }

    #[test]
    fn round_trips_through_json() {
        let stamp = Stamp::new("2024-06-30 12:05");
        let json = serde_json::to_string(&stamp).unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(json, "\"2024-06-30 12:05\"");
        let back: Stamp = serde_json::from_str(&json).unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert_eq!(back, stamp);
    }
}
