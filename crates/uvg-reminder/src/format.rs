/// `H:MM:SS`, hours unpadded.
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{}:{:02}:{:02}", h, m, s)
}

/// Coarse English rendering of a duration, e.g. "3 hours" or "90 seconds".
pub fn describe_duration(total_secs: u64) -> String {
    let (n, unit) = if total_secs >= 3600 && total_secs % 3600 == 0 {
        (total_secs / 3600, "hour")
    } else if total_secs >= 60 && total_secs % 60 == 0 {
        (total_secs / 60, "minute")
    } else {
        (total_secs, "second")
    };

    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

pub const REMINDER_TITLE: &str = "Reapply Sunscreen!";

/// Body text of the reapplication dialog.
pub fn reminder_message(duration_secs: u64) -> String {
    format!(
        "It's been {}. Time to protect your skin again.",
        describe_duration(duration_secs)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "0:00:00");
        assert_eq!(format_hms(10), "0:00:10");
        assert_eq!(format_hms(61), "0:01:01");
        assert_eq!(format_hms(10_800), "3:00:00");
        assert_eq!(format_hms(10_799), "2:59:59");
        assert_eq!(format_hms(36_000 + 5), "10:00:05");
    }

    #[test]
    fn test_describe_duration() {
        assert_eq!(describe_duration(10_800), "3 hours");
        assert_eq!(describe_duration(3_600), "1 hour");
        assert_eq!(describe_duration(5_400), "90 minutes");
        assert_eq!(describe_duration(10), "10 seconds");
        assert_eq!(describe_duration(1), "1 second");
    }

    #[test]
    fn test_reminder_message() {
        assert_eq!(
            reminder_message(10_800),
            "It's been 3 hours. Time to protect your skin again."
        );
    }
}
