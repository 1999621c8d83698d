#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use soulplanner::libs::formatter::{
        format_date_on, format_duration, is_overdue, parse_date, parse_duration, truncate_text, DateStyle,
    };

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29"), Some(day(2024, 2, 29)));
        assert_eq!(parse_date(" 2024-01-05 "), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("05.01.2024"), None);
    }

    #[test]
    fn test_format_date_styles() {
        let today = day(2024, 1, 10);
        assert_eq!(format_date_on("2024-01-05", DateStyle::Short, today), "Jan 05");
        assert_eq!(format_date_on("2024-01-05", DateStyle::Long, today), "January 05, 2024");
        assert_eq!(format_date_on("not a date", DateStyle::Long, today), "not a date");
        assert_eq!(format_date_on("", DateStyle::Short, today), "");
    }

    #[test]
    fn test_format_date_relative() {
        let today = day(2024, 1, 10);
        assert_eq!(format_date_on("2024-01-10", DateStyle::Relative, today), "Today");
        assert_eq!(format_date_on("2024-01-11", DateStyle::Relative, today), "Tomorrow");
        assert_eq!(format_date_on("2024-01-09", DateStyle::Relative, today), "Yesterday");
        assert_eq!(format_date_on("2024-01-07", DateStyle::Relative, today), "3 days ago");
        assert_eq!(format_date_on("2024-01-14", DateStyle::Relative, today), "In 4 days");
    }

    #[test]
    fn test_is_overdue() {
        assert!(is_overdue(Some("2000-01-01")));
        assert!(!is_overdue(Some("2999-01-01")));
        assert!(!is_overdue(Some("")));
        assert!(!is_overdue(Some("garbage")));
        assert!(!is_overdue(None));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_text("this is far too long", 10), "this is...");
        assert_eq!(truncate_text("ünïcödé text", 8), "ünïcö...");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(150), "2h 30m");
        assert_eq!(format_duration(1440), "1d");
        assert_eq!(format_duration(1440 + 5 * 60 + 10), "1d 5h");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("2h 30m"), Some(150));
        assert_eq!(parse_duration("1d 5h"), Some(1740));
        assert_eq!(parse_duration("45 min"), Some(45));
        assert_eq!(parse_duration("3H"), Some(180));
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("0m"), None);
        assert_eq!(parse_duration(""), None);
    }
}
