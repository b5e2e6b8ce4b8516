//! Formattazione di date e orari per le pagine e le email

use chrono::{DateTime, Utc};

/// Data leggibile: `Sat, 17 Oct 2026`, con l'orario `Sat, 17 Oct 2026 at 11:30`
pub fn humanize_date(date: &DateTime<Utc>, with_time: bool) -> String {
    if with_time {
        date.format("%a, %-d %b %Y at %H:%M").to_string()
    } else {
        date.format("%a, %-d %b %Y").to_string()
    }
}

/// `11:30 - 12:45` se è nota la fine, altrimenti solo `11:30`
pub fn time_range(begins_at: &DateTime<Utc>, ends_at: Option<&DateTime<Utc>>) -> String {
    match ends_at {
        Some(ends_at) => format!("{} - {}", begins_at.format("%H:%M"), ends_at.format("%H:%M")),
        None => begins_at.format("%H:%M").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_humanize_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 11, 30, 0).unwrap();
        assert_eq!(humanize_date(&date, false), "Sat, 17 Oct 2026");
        assert_eq!(humanize_date(&date, true), "Sat, 17 Oct 2026 at 11:30");
    }

    #[test]
    fn test_humanize_single_digit_day() {
        let date = Utc.with_ymd_and_hms(2026, 11, 7, 9, 5, 0).unwrap();
        assert_eq!(humanize_date(&date, true), "Sat, 7 Nov 2026 at 09:05");
    }

    #[test]
    fn test_time_range() {
        let begins = Utc.with_ymd_and_hms(2026, 10, 17, 11, 30, 0).unwrap();
        let ends = Utc.with_ymd_and_hms(2026, 10, 17, 12, 45, 0).unwrap();
        assert_eq!(time_range(&begins, Some(&ends)), "11:30 - 12:45");
        assert_eq!(time_range(&begins, None), "11:30");
    }
}
