//! Wire timestamps.

use chrono::{DateTime, Utc};

/// Seconds between 1904-01-01T00:00:00Z and the Unix epoch.
const EPOCH_OFFSET: i64 = 2_082_844_800;

/// A fixed-width wire timestamp.
///
/// This is the canonical `t` wire contract: 16 bytes, big-endian — an `i64`
/// of whole seconds since 1904-01-01T00:00:00Z followed by a `u64` fractional
/// component in units of 2⁻⁶⁴ seconds. The 1904 epoch and 64-bit fraction
/// match the instrument-bus ecosystem labwire interoperates with.
///
/// Conversions to and from [`chrono::DateTime<Utc>`] are nanosecond-exact;
/// the wire fraction is finer than a nanosecond, so values built directly
/// from raw `(seconds, fraction)` pairs round-trip bit-exactly while
/// datetime-derived values round-trip to the same nanosecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    seconds: i64,
    fraction: u64,
}

impl Timestamp {
    /// Builds a timestamp from raw wire components.
    pub fn new(seconds: i64, fraction: u64) -> Self {
        Self { seconds, fraction }
    }

    /// Whole seconds since 1904-01-01T00:00:00Z.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Fractional seconds in units of 2⁻⁶⁴ s.
    pub fn fraction(&self) -> u64 {
        self.fraction
    }

    /// Converts to a UTC datetime, truncating the fraction to nanoseconds.
    ///
    /// Returns `None` when the seconds component is outside chrono's
    /// representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let unix = self.seconds.checked_sub(EPOCH_OFFSET)?;
        let nanos = ((self.fraction as u128 * 1_000_000_000) >> 64) as u32;
        DateTime::from_timestamp(unix, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() + EPOCH_OFFSET;
        let nanos = dt.timestamp_subsec_nanos() as u128;
        let fraction = ((nanos << 64) / 1_000_000_000) as u64;
        Self { seconds, fraction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_offset_maps_1904_to_zero() {
        let epoch = DateTime::parse_from_rfc3339("1904-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from(epoch);
        assert_eq!(ts.seconds(), 0);
        assert_eq!(ts.fraction(), 0);
    }

    #[test]
    fn datetime_roundtrip_is_nanosecond_exact() {
        let dt = DateTime::parse_from_rfc3339("2024-05-17T12:34:56.789012345Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from(dt);
        assert_eq!(ts.to_datetime().unwrap(), dt);
    }

    #[test]
    fn pre_unix_epoch_times_are_representable() {
        let dt = DateTime::parse_from_rfc3339("1950-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from(dt);
        assert!(ts.seconds() > 0);
        assert_eq!(ts.to_datetime().unwrap(), dt);
    }
}
