//! Wire codec for the backend's date format.
//!
//! Dates travel as `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`, e.g.
//! `2015-07-14T15:55:52.133Z`: always UTC, always millisecond precision and,
//! when well formed, always exactly 24 characters.
//!
//! Decoding first checks the exact wire shape (24 ASCII bytes, digits and
//! separators at fixed offsets), so signs, padding spaces and a missing
//! fraction never reach a parser. Well-shaped input goes through a
//! fixed-offset fast path and falls back to chrono's parser. chrono is
//! authoritative: the fast path only ever accepts input the parser would
//! accept, and yields the same instant for it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::trace;

/// chrono pattern for the wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Length of a well-formed wire date.
const WIRE_DATE_LEN: usize = 24;

/// Offsets and expected bytes of the literal separators.
const SEPARATORS: [(usize, u8); 7] = [
    (4, b'-'),
    (7, b'-'),
    (10, b'T'),
    (13, b':'),
    (16, b':'),
    (19, b'.'),
    (23, b'Z'),
];

/// Encode a timestamp in the wire format.
///
/// Sub-millisecond precision is truncated.
pub fn encode_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decode a wire date. Returns `None` for anything that is not a valid date.
pub fn decode_date(date: &str) -> Option<DateTime<Utc>> {
    if !has_wire_shape(date.as_bytes()) {
        trace!(input = date, "not shaped like a wire date");
        return None;
    }
    parse_fixed(date).or_else(|| {
        trace!(input = date, "fixed-offset date parse failed, falling back");
        parse_with_format(date)
    })
}

/// Exactly 24 bytes: separators at their offsets, ASCII digits elsewhere.
fn has_wire_shape(bytes: &[u8]) -> bool {
    bytes.len() == WIRE_DATE_LEN
        && bytes.iter().enumerate().all(|(at, &b)| {
            match SEPARATORS.iter().find(|&&(offset, _)| offset == at) {
                Some(&(_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            }
        })
}

/// Fast path: read each field at its fixed offset.
pub(crate) fn parse_fixed(date: &str) -> Option<DateTime<Utc>> {
    let bytes = date.as_bytes();
    if !has_wire_shape(bytes) {
        return None;
    }

    let year = digits(&bytes[0..4])?;
    let month = digits(&bytes[5..7])?;
    let day = digits(&bytes[8..10])?;
    let hour = digits(&bytes[11..13])?;
    let minute = digits(&bytes[14..16])?;
    let second = digits(&bytes[17..19])?;
    let milli = digits(&bytes[20..23])?;

    let naive = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?
        .and_hms_milli_opt(hour, minute, second, milli)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Slow path: the general-purpose chrono parser.
pub(crate) fn parse_with_format(date: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(date, DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse an all-ASCII-digit slice. Signs and whitespace are rejected.
fn digits(field: &[u8]) -> Option<u32> {
    field.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 7, 14, 15, 55, 52).unwrap()
            + chrono::Duration::milliseconds(133)
    }

    #[test]
    fn encode_matches_wire_example() {
        assert_eq!(encode_date(&sample()), "2015-07-14T15:55:52.133Z");
    }

    #[test]
    fn decode_matches_wire_example() {
        assert_eq!(decode_date("2015-07-14T15:55:52.133Z"), Some(sample()));
    }

    #[test]
    fn encode_pads_every_field() {
        let date = Utc.with_ymd_and_hms(987, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(6);
        assert_eq!(encode_date(&date), "0987-01-02T03:04:05.006Z");
    }

    #[test]
    fn encode_truncates_below_millisecond() {
        let date = sample() + chrono::Duration::microseconds(999);
        assert_eq!(encode_date(&date), "2015-07-14T15:55:52.133Z");
    }

    #[test]
    fn malformed_input_is_none() {
        assert_eq!(decode_date("not-a-date"), None);
        assert_eq!(decode_date(""), None);
        assert_eq!(decode_date("2015-07-14"), None);
        assert_eq!(decode_date("2015-07-14T15:55:52.133"), None);
        assert_eq!(decode_date("2015-07-14T15:55:52Z"), None);
        assert_eq!(decode_date("+2015-07-14T15:55:52.133Z"), None);
        assert_eq!(decode_date("2015-07-14T 5:55:52.133Z"), None);
    }

    #[test]
    fn malformed_24_char_input_is_none() {
        assert_eq!(decode_date("2015-13-14T15:55:52.133Z"), None);
        assert_eq!(decode_date("2015-02-30T15:55:52.133Z"), None);
        assert_eq!(decode_date("2015-07-14T25:55:52.133Z"), None);
        assert_eq!(decode_date("2015/07/14T15:55:52.133Z"), None);
        assert_eq!(decode_date("2015-07-14T15:55:52.133X"), None);
        assert_eq!(decode_date("abcd-07-14T15:55:52.133Z"), None);
        assert_eq!(decode_date("2015-+7-14T15:55:52.133Z"), None);
    }

    #[test]
    fn non_ascii_24_byte_input_does_not_panic() {
        // 22 ASCII bytes plus one two-byte character.
        let input = "2015-07-14T15:55:52.13é";
        assert_eq!(input.len(), 24);
        assert_eq!(decode_date(input), None);
    }

    #[test]
    fn wire_shape_is_exact() {
        assert!(has_wire_shape(b"2015-07-14T15:55:52.133Z"));
        assert!(!has_wire_shape(b"2015-07-14T15:55:52.13Z"));
        assert!(!has_wire_shape(b"2015-07-14T15:55:52.1334"));
        assert!(!has_wire_shape(b" 015-07-14T15:55:52.133Z"));
        assert!(!has_wire_shape(b"-015-07-14T15:55:52.133Z"));
    }

    #[test]
    fn parser_reads_the_encoder_pattern() {
        let input = encode_date(&sample());
        assert_eq!(parse_with_format(&input), Some(sample()));
        assert_eq!(parse_with_format("2015-07-14T15:55:52Z"), None);
    }

    #[test]
    fn fast_path_rejects_what_it_cannot_read() {
        assert_eq!(parse_fixed("2015-07-14T15:55:52.1Z"), None);
        assert_eq!(parse_fixed("2015-07-14 15:55:52.133Z"), None);
    }

    #[test]
    fn fast_path_and_parser_agree_on_example() {
        let input = "2015-07-14T15:55:52.133Z";
        assert_eq!(parse_fixed(input), parse_with_format(input));
        assert!(parse_fixed(input).is_some());
    }

    #[test]
    fn epoch_roundtrip() {
        let epoch = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(encode_date(&epoch), "1970-01-01T00:00:00.000Z");
        assert_eq!(decode_date("1970-01-01T00:00:00.000Z"), Some(epoch));
    }

    // 0000-01-01T00:00:00.000Z ..= 9999-12-31T23:59:59.999Z
    const MIN_MS: i64 = -62_167_219_200_000;
    const MAX_MS: i64 = 253_402_300_799_999;

    proptest! {
        #[test]
        fn roundtrip_at_millisecond_precision(ms in MIN_MS..=MAX_MS) {
            let date = Utc.timestamp_millis_opt(ms).unwrap();
            let encoded = encode_date(&date);
            prop_assert_eq!(encoded.len(), WIRE_DATE_LEN);
            prop_assert_eq!(decode_date(&encoded), Some(date));
        }

        #[test]
        fn fast_path_equals_parser_on_well_formed(ms in MIN_MS..=MAX_MS) {
            let encoded = encode_date(&Utc.timestamp_millis_opt(ms).unwrap());
            let fast = parse_fixed(&encoded);
            prop_assert!(fast.is_some());
            prop_assert_eq!(fast, parse_with_format(&encoded));
        }

        #[test]
        fn fast_path_never_accepts_what_parser_rejects(
            year in 0u32..10000,
            month in 0u32..100,
            day in 0u32..100,
            hour in 0u32..100,
            minute in 0u32..100,
            second in 0u32..100,
            milli in 0u32..1000,
        ) {
            let input = format!(
                "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{milli:03}Z"
            );
            prop_assert_eq!(input.len(), WIRE_DATE_LEN);
            if let Some(fast) = parse_fixed(&input) {
                prop_assert_eq!(Some(fast), parse_with_format(&input));
            }
            prop_assert_eq!(decode_date(&input), parse_with_format(&input));
        }

        #[test]
        fn decode_never_panics(input in ".{0,40}") {
            let _ = decode_date(&input);
        }
    }
}
