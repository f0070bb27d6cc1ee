//! Wall-clock helpers.

/// Current time in microseconds since the Unix epoch.
///
/// Returns 0 if the system clock is set before the epoch.
pub fn now_us() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
