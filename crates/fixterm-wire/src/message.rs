//! Owned FIX message type.
//!
//! A [`FixMessage`] is an ordered list of `tag=value` fields. Field order is
//! preserved exactly as built or parsed; FIX requires the standard header
//! fields in a fixed order and repeating groups are order-sensitive, so the
//! message never re-sorts or deduplicates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::WireError;
use crate::tags;

/// Separator used for the operator-facing text form of a message.
///
/// The wire form uses SOH (0x01), which is unreadable and untypeable in a
/// terminal, so `Display` and `FromStr` use a pipe instead.
pub const FIELD_SEPARATOR: char = '|';

/// An owned FIX message: an ordered sequence of `(tag, value)` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixMessage {
    fields: Vec<(u32, String)>,
}

impl FixMessage {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn push(&mut self, tag: u32, value: impl Into<String>) {
        self.fields.push((tag, value.into()));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_field(mut self, tag: u32, value: impl Into<String>) -> Self {
        self.push(tag, value);
        self
    }

    /// Value of the first occurrence of `tag`, if present.
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.fields
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, v)| v.as_str())
    }

    /// MsgType(35), if present.
    pub fn msg_type(&self) -> Option<&str> {
        self.get(tags::MSG_TYPE)
    }

    /// All fields in order.
    pub fn fields(&self) -> &[(u32, String)] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for FixMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FIELD_SEPARATOR)?;
            }
            write!(f, "{}={}", tag, value)?;
        }
        Ok(())
    }
}

impl FromStr for FixMessage {
    type Err = WireError;

    /// Parse the operator text form: pipe-separated `tag=value` fields.
    ///
    /// Empty segments (e.g. a trailing pipe) are skipped. Values may be
    /// empty; tags must be numeric.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut msg = FixMessage::new();
        for field in text.split(FIELD_SEPARATOR) {
            if field.is_empty() {
                continue;
            }
            let (tag, value) = field
                .split_once('=')
                .ok_or_else(|| WireError::BadField(field.to_string()))?;
            let tag: u32 = tag
                .parse()
                .map_err(|_| WireError::BadField(field.to_string()))?;
            msg.push(tag, value);
        }
        Ok(msg)
    }
}

/// Format a UTC timestamp as a FIX SendingTime(52) value with millisecond
/// precision, e.g. `20260826-14:03:07.251`.
pub fn sending_time(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_pipe_fields() {
        let msg: FixMessage = "35=D|55=ACME|44=10".parse().unwrap();
        assert_eq!(msg.len(), 3);
        assert_eq!(msg.msg_type(), Some("D"));
        assert_eq!(msg.get(55), Some("ACME"));
        assert_eq!(msg.get(44), Some("10"));
        assert_eq!(msg.get(99), None);
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        let msg: FixMessage = "35=0||112=hello|".parse().unwrap();
        assert_eq!(msg.len(), 2);
        assert_eq!(msg.get(112), Some("hello"));
    }

    #[test]
    fn test_parse_allows_empty_value() {
        let msg: FixMessage = "58=".parse().unwrap();
        assert_eq!(msg.get(58), Some(""));
    }

    #[test]
    fn test_parse_rejects_bad_field() {
        assert!(matches!(
            "notafield".parse::<FixMessage>(),
            Err(WireError::BadField(_))
        ));
        assert!(matches!(
            "x=1".parse::<FixMessage>(),
            Err(WireError::BadField(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let text = "35=D|55=ACME|44=10";
        let msg: FixMessage = text.parse().unwrap();
        assert_eq!(msg.to_string(), text);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let msg = FixMessage::new().with_field(58, "first").with_field(58, "second");
        assert_eq!(msg.get(58), Some("first"));
        assert_eq!(msg.fields().len(), 2);
    }

    #[test]
    fn test_sending_time_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 26, 14, 3, 7).unwrap();
        assert_eq!(sending_time(at), "20260826-14:03:07.000");
    }
}
