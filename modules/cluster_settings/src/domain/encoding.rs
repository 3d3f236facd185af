//! Human-readable duration codec
//!
//! Magnitudes use the `humantime` format (`1h 30m`, `250ms`, `0s`); negative
//! durations carry a leading `-`. Anything produced by [`encode_duration`]
//! decodes back to the identical nanosecond count.

use chrono::Duration;

/// Encode `d` for display
pub fn encode_duration(d: Duration) -> String {
    let magnitude = d.abs().to_std().unwrap_or_default();
    let text = humantime::format_duration(magnitude).to_string();
    if d < Duration::zero() {
        format!("-{text}")
    } else {
        text
    }
}

/// Decode a duration produced by [`encode_duration`] or typed by an operator
///
/// The result must fit in a signed 64-bit count of nanoseconds.
pub fn decode_duration(s: &str) -> Result<Duration, String> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let magnitude = humantime::parse_duration(body).map_err(|e| e.to_string())?;
    let out_of_range = || format!("duration {trimmed:?} out of range");
    // Negatives reach one nanosecond further than positives (i64::MIN).
    let magnitude = i128::try_from(magnitude.as_nanos()).map_err(|_| out_of_range())?;
    let signed = if negative { -magnitude } else { magnitude };
    let nanos = i64::try_from(signed).map_err(|_| out_of_range())?;
    Ok(Duration::nanoseconds(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_common_values() {
        assert_eq!(encode_duration(Duration::zero()), "0s");
        assert_eq!(encode_duration(Duration::seconds(1)), "1s");
        assert_eq!(encode_duration(Duration::milliseconds(1500)), "1s 500ms");
        assert_eq!(encode_duration(Duration::seconds(-1)), "-1s");
        assert_eq!(encode_duration(Duration::minutes(90)), "1h 30m");
    }

    #[test]
    fn test_decode_operator_input() {
        assert_eq!(decode_duration("5s"), Ok(Duration::seconds(5)));
        assert_eq!(decode_duration(" 2m "), Ok(Duration::minutes(2)));
        assert_eq!(decode_duration("-250ms"), Ok(Duration::milliseconds(-250)));
        assert_eq!(decode_duration("1h 30m"), Ok(Duration::minutes(90)));
        assert_eq!(decode_duration("-0s"), Ok(Duration::zero()));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_duration("").is_err());
        assert!(decode_duration("-").is_err());
        assert!(decode_duration("five seconds").is_err());
        assert!(decode_duration("10").is_err());
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        let err = decode_duration("1000years").unwrap_err();
        assert!(err.contains("out of range"), "{err}");
    }

    #[test]
    fn test_decode_range_edges() {
        let min = encode_duration(Duration::nanoseconds(i64::MIN));
        assert_eq!(decode_duration(&min), Ok(Duration::nanoseconds(i64::MIN)));
        // The same magnitude without the sign is one past i64::MAX.
        let positive = min.trim_start_matches('-');
        assert!(decode_duration(positive).is_err());
    }

    #[test]
    fn test_round_trip_preserves_nanoseconds() {
        for nanos in [
            0i64,
            1,
            -1,
            999,
            1_000_000_007,
            -86_400_000_000_123,
            i64::MAX,
            -i64::MAX,
            i64::MIN,
        ] {
            let d = Duration::nanoseconds(nanos);
            assert_eq!(decode_duration(&encode_duration(d)), Ok(d), "{nanos}");
        }
    }
}
