use chrono::{DateTime, SecondsFormat, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

/*-------------------------------------------------------------------------------------------------
  DateTime Format
-------------------------------------------------------------------------------------------------*/

// Seconds from the Unix epoch to 0001-01-01T00:00:00Z.
const ZERO_TIMESTAMP_SECONDS: i64 = -62_135_596_800;

/// The zero timestamp, `0001-01-01T00:00:00Z`, used for absent or `null` timestamps.
pub fn zero() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ZERO_TIMESTAMP_SECONDS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_zero(date: &DateTime<Utc>) -> bool {
    *date == zero()
}

/// Format a timestamp as RFC3339 in UTC at second precision (`2023-01-01T00:00:00Z`).
pub fn to_rfc3339_seconds(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(zero()),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|date_time| date_time.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
