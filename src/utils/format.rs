//! Time label formatting

/// Format seconds as `minutes:seconds.hundredths`.
///
/// Hundredths are truncated, not rounded. There is no hour field.
pub fn format_time(elapsed: f64) -> String {
    let elapsed = elapsed.max(0.0);
    let minutes = (elapsed / 60.0).floor() as u64;
    let seconds = (elapsed % 60.0).floor() as u64;
    let hundredths = ((elapsed % 1.0) * 100.0) as u64;
    format!("{}:{:02}.{:02}", minutes, seconds, hundredths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hundredths_are_truncated() {
        assert_eq!(format_time(65.256), "1:05.25");
        assert_eq!(format_time(5.999), "0:05.99");
    }

    #[test]
    fn test_minutes_are_unbounded() {
        assert_eq!(format_time(3725.0), "62:05.00");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_time(0.0), "0:00.00");
    }
}
