//! FIX framing codec for tokio.
//!
//! Frames look like `8=FIX.4.2<SOH>9=<len><SOH>...body...10=<cks><SOH>`.
//! BodyLength(9) counts the bytes between its own trailing SOH and the
//! `10=` of the CheckSum trailer; CheckSum(10) is the modulo-256 sum of
//! every byte preceding `10=`, rendered as three digits.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::config::FixVersion;
use crate::error::WireError;
use crate::message::FixMessage;
use crate::tags;

/// The FIX field delimiter (ASCII 0x01).
pub const SOH: u8 = 0x01;

/// Length of the `10=NNN<SOH>` trailer.
const TRAILER_LEN: usize = 7;

/// Default maximum accepted frame size.
const DEFAULT_MAX_FRAME: usize = 64 * 1024;

/// Tokio codec for encoding/decoding SOH-framed FIX messages.
///
/// The encoder writes BeginString(8), BodyLength(9), and CheckSum(10)
/// itself; any copies of those tags on the outgoing message are dropped.
/// The decoder returns the complete frame including the framing fields, so
/// callers see exactly what crossed the wire.
#[derive(Debug, Clone)]
pub struct FixCodec {
    begin_string: &'static str,
    max_frame: usize,
}

impl FixCodec {
    /// Create a codec for the given protocol version.
    pub fn new(version: FixVersion) -> Self {
        Self {
            begin_string: version.begin_string(),
            max_frame: DEFAULT_MAX_FRAME,
        }
    }

    /// Create a codec with a custom maximum frame size.
    pub fn with_max_frame(version: FixVersion, max_frame: usize) -> Self {
        Self {
            max_frame,
            ..Self::new(version)
        }
    }

    /// The BeginString(8) value this codec stamps on outgoing frames.
    pub fn begin_string(&self) -> &'static str {
        self.begin_string
    }
}

impl Decoder for FixCodec {
    type Item = FixMessage;
    type Error = WireError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<FixMessage>, WireError> {
        if src.len() < 2 {
            return Ok(None);
        }
        if !src.starts_with(b"8=") {
            return Err(WireError::Malformed(
                "frame does not start with BeginString(8)".to_string(),
            ));
        }

        // BeginString(8) and BodyLength(9) are fixed-position; everything
        // after them is located via the declared body length.
        let Some(soh8) = src.iter().position(|b| *b == SOH) else {
            return self.incomplete(src.len());
        };
        let after8 = &src[soh8 + 1..];
        if after8.len() < 2 {
            return self.incomplete(src.len());
        }
        if !after8.starts_with(b"9=") {
            return Err(WireError::Malformed(
                "BodyLength(9) must follow BeginString(8)".to_string(),
            ));
        }
        let Some(soh9) = after8.iter().position(|b| *b == SOH) else {
            return self.incomplete(src.len());
        };
        let body_len: usize = std::str::from_utf8(&after8[2..soh9])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| WireError::Malformed("invalid BodyLength(9)".to_string()))?;

        // The declared length is untrusted input; bound it before any
        // arithmetic so a hostile value cannot overflow the frame offset.
        if body_len > self.max_frame {
            return Err(WireError::FrameTooLong {
                actual: body_len,
                limit: self.max_frame,
            });
        }
        let body_start = soh8 + 1 + soh9 + 1;
        let total = body_start + body_len + TRAILER_LEN;
        if total > self.max_frame {
            return Err(WireError::FrameTooLong {
                actual: total,
                limit: self.max_frame,
            });
        }
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        let frame = src.split_to(total);

        let trailer = &frame[body_start + body_len..];
        if !trailer.starts_with(b"10=") || trailer[TRAILER_LEN - 1] != SOH {
            return Err(WireError::BodyLength { declared: body_len });
        }
        let declared: u32 = std::str::from_utf8(&trailer[3..6])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| WireError::Malformed("invalid CheckSum(10)".to_string()))?;
        let computed = frame[..body_start + body_len]
            .iter()
            .map(|b| u32::from(*b))
            .sum::<u32>()
            % 256;
        if declared != computed {
            return Err(WireError::CheckSum { declared, computed });
        }

        let mut msg = FixMessage::new();
        // Slice explicitly: BytesMut has its own zero-argument split().
        for field in frame[..].split(|b| *b == SOH) {
            if field.is_empty() {
                continue;
            }
            let field = std::str::from_utf8(field)
                .map_err(|_| WireError::Malformed("non-UTF-8 field".to_string()))?;
            let (tag, value) = field
                .split_once('=')
                .ok_or_else(|| WireError::BadField(field.to_string()))?;
            let tag: u32 = tag
                .parse()
                .map_err(|_| WireError::BadField(field.to_string()))?;
            msg.push(tag, value);
        }
        Ok(Some(msg))
    }
}

impl FixCodec {
    /// A full frame is not available yet. Errors out instead if the buffer
    /// already exceeds the frame limit without a parseable length.
    fn incomplete(&self, buffered: usize) -> Result<Option<FixMessage>, WireError> {
        if buffered > self.max_frame {
            return Err(WireError::FrameTooLong {
                actual: buffered,
                limit: self.max_frame,
            });
        }
        Ok(None)
    }
}

impl Encoder<FixMessage> for FixCodec {
    type Error = WireError;

    fn encode(&mut self, msg: FixMessage, dst: &mut BytesMut) -> Result<(), WireError> {
        let mut body = Vec::with_capacity(256);
        for (tag, value) in msg.fields() {
            if matches!(
                *tag,
                tags::BEGIN_STRING | tags::BODY_LENGTH | tags::CHECK_SUM
            ) {
                continue;
            }
            body.extend_from_slice(tag.to_string().as_bytes());
            body.push(b'=');
            body.extend_from_slice(value.as_bytes());
            body.push(SOH);
        }

        let header = format!("8={}\x019={}\x01", self.begin_string, body.len());
        let sum = (header.bytes().map(u32::from).sum::<u32>()
            + body.iter().map(|b| u32::from(*b)).sum::<u32>())
            % 256;

        dst.reserve(header.len() + body.len() + TRAILER_LEN);
        dst.extend_from_slice(header.as_bytes());
        dst.extend_from_slice(&body);
        dst.extend_from_slice(format!("10={:03}\x01", sum).as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat() -> FixMessage {
        FixMessage::new()
            .with_field(tags::MSG_TYPE, "0")
            .with_field(tags::MSG_SEQ_NUM, "2")
            .with_field(tags::SENDER_COMP_ID, "INITIATOR")
            .with_field(tags::TARGET_COMP_ID, "ACCEPTOR")
    }

    #[test]
    fn test_encode_then_decode() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::new();
        codec.encode(heartbeat(), &mut buf).unwrap();

        let decoded = codec.decode(&mut buf).unwrap().expect("one frame");
        assert_eq!(decoded.get(tags::BEGIN_STRING), Some("FIX.4.2"));
        assert_eq!(decoded.msg_type(), Some("0"));
        assert_eq!(decoded.get(tags::SENDER_COMP_ID), Some("INITIATOR"));
        assert!(decoded.get(tags::CHECK_SUM).is_some());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_frame() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::new();
        codec.encode(heartbeat(), &mut buf).unwrap();

        // Feed the frame one byte at a time; only the last byte completes it.
        let bytes = buf.split().freeze();
        let mut partial = BytesMut::new();
        for (i, b) in bytes.iter().enumerate() {
            partial.extend_from_slice(&[*b]);
            let result = codec.decode(&mut partial).unwrap();
            if i + 1 < bytes.len() {
                assert!(result.is_none(), "frame completed early at byte {}", i);
            } else {
                assert!(result.is_some());
            }
        }
    }

    #[test]
    fn test_decode_two_frames() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::new();
        codec.encode(heartbeat(), &mut buf).unwrap();
        codec
            .encode(
                FixMessage::new()
                    .with_field(tags::MSG_TYPE, "1")
                    .with_field(tags::TEST_REQ_ID, "ping"),
                &mut buf,
            )
            .unwrap();

        let first = codec.decode(&mut buf).unwrap().unwrap();
        let second = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(first.msg_type(), Some("0"));
        assert_eq!(second.msg_type(), Some("1"));
        assert_eq!(second.get(tags::TEST_REQ_ID), Some("ping"));
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::new();
        codec.encode(heartbeat(), &mut buf).unwrap();

        // Corrupt one body byte without touching the framing fields.
        let soh_positions: Vec<usize> = buf
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == SOH)
            .map(|(i, _)| i)
            .collect();
        let in_body = soh_positions[1] + 1;
        buf[in_body] = buf[in_body].wrapping_add(1);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(WireError::CheckSum { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_body_length() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        // BodyLength claims 5 bytes but the body is longer, so the trailer
        // offset lands mid-body rather than on "10=".
        let mut buf = BytesMut::from(&b"8=FIX.4.2\x019=5\x0135=0\x0134=2\x0110=123\x01"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(WireError::BodyLength { declared: 5 })
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\n"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(WireError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_enforces_frame_limit() {
        let mut codec = FixCodec::with_max_frame(FixVersion::Fix42, 32);
        let mut buf = BytesMut::from(&b"8=FIX.4.2\x019=9999\x01"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(WireError::FrameTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_huge_declared_body_length() {
        // A declared length near usize::MAX must be rejected, not fed
        // into the frame-offset arithmetic.
        let mut codec = FixCodec::new(FixVersion::Fix42);
        let mut buf = BytesMut::from(&b"8=FIX.4.2\x019=18446744073709551615\x01"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(WireError::FrameTooLong { .. })
        ));
    }

    #[test]
    fn test_encode_drops_framing_tags() {
        let mut codec = FixCodec::new(FixVersion::Fix44);
        let mut buf = BytesMut::new();
        let msg = FixMessage::new()
            .with_field(tags::BEGIN_STRING, "FIX.4.0")
            .with_field(tags::MSG_TYPE, "0");
        codec.encode(msg, &mut buf).unwrap();

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.get(tags::BEGIN_STRING), Some("FIX.4.4"));
    }
}
