//! Wall-clock access for the creation-time field

/// Current time in microseconds since the Unix epoch
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic_enough() {
        let first = now_micros();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let second = now_micros();
        assert!(second > first);
    }

    #[test]
    fn test_clock_is_in_a_plausible_range() {
        // Some time after 2020-01-01 in microseconds.
        assert!(now_micros() > 1_577_836_800_000_000);
    }
}
