use time::OffsetDateTime;

/// Current UTC time as unix milliseconds, the unit every stored timestamp uses.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
