//! Time parsing and formatting for 12-hour course times like "10:00 AM"

/// Parse a 12-hour clock string ("9:30 AM", "12:00 PM") to minutes since midnight.
///
/// Returns `None` for empty or malformed input. The hour is 1-12 with no leading
/// zero required, minutes are always two digits.
pub fn parse_time(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (clock, meridiem) = input.split_once(' ')?;
    let is_pm = if meridiem.eq_ignore_ascii_case("pm") {
        true
    } else if meridiem.eq_ignore_ascii_case("am") {
        false
    } else {
        log::trace!("parse_time: bad meridiem in {:?}", input);
        return None;
    };

    let (hour_str, minute_str) = clock.split_once(':')?;
    if hour_str.is_empty() || hour_str.len() > 2 || minute_str.len() != 2 {
        return None;
    }
    if !hour_str.bytes().all(|b| b.is_ascii_digit()) || !minute_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour = hour_str.parse::<u32>().ok()?;
    let minute = minute_str.parse::<u32>().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    // 12 AM is midnight, 12 PM is noon
    let hour_24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    Some(hour_24 * 60 + minute)
}

/// Format a 24-hour value (0-23) as a grid row label, e.g. 13 -> "1:00 PM"
pub fn format_hour_label(hour: u32) -> String {
    let suffix = if hour % 24 >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display_hour, suffix)
}

/// Label text for a course's meeting time: "10:00 AM – 11:15 AM"
pub fn format_time_range(start: &str, end: &str) -> String {
    format!("{} – {}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_morning_and_afternoon() {
        assert_eq!(parse_time("9:30 AM"), Some(9 * 60 + 30));
        assert_eq!(parse_time("10:00 AM"), Some(600));
        assert_eq!(parse_time("1:15 PM"), Some(13 * 60 + 15));
        assert_eq!(parse_time("11:59 PM"), Some(23 * 60 + 59));
    }

    #[test]
    fn noon_and_midnight() {
        assert_eq!(parse_time("12:00 AM"), Some(0));
        assert_eq!(parse_time("12:30 AM"), Some(30));
        assert_eq!(parse_time("12:00 PM"), Some(720));
        assert_eq!(parse_time("12:45 PM"), Some(765));
    }

    #[test]
    fn accepts_lowercase_meridiem_and_padding() {
        assert_eq!(parse_time("  2:00 pm "), Some(840));
        assert_eq!(parse_time("09:05 AM"), Some(545));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "   ", "10:00", "10 AM", "10:0 AM", "13:00 PM", "0:30 AM", "10:60 AM", "ab:cd PM", "10:00 XM", "-1:00 AM"] {
            assert_eq!(parse_time(bad), None, "expected None for {:?}", bad);
        }
    }

    #[test]
    fn hour_labels() {
        assert_eq!(format_hour_label(0), "12:00 AM");
        assert_eq!(format_hour_label(7), "7:00 AM");
        assert_eq!(format_hour_label(12), "12:00 PM");
        assert_eq!(format_hour_label(23), "11:00 PM");
    }

    #[test]
    fn hour_labels_round_trip() {
        for hour in 0..24 {
            assert_eq!(parse_time(&format_hour_label(hour)), Some(hour * 60));
        }
    }

    #[test]
    fn time_range_uses_en_dash() {
        assert_eq!(format_time_range("9:30 AM", "12:00 PM"), "9:30 AM – 12:00 PM");
    }
}
