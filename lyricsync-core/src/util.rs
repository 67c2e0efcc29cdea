/// Format a clock position as `m:ss`. The sign is dropped and fractional
/// seconds are floored; non-finite values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.abs().floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(12.9), "0:12");
        assert_eq!(format_time(62.5), "1:02");
        assert_eq!(format_time(-75.0), "1:15");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
