#[cfg(test)]
mod tests {
    use care::libs::formatter::{format_active, format_countdown, remaining_until};
    use care::libs::time_of_day::{Moment, TimeOfDay};
    use chrono::{Duration, Local, TimeZone};
    use serde_json::json;

    fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Moment {
        Moment::from(Local.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap())
    }

    #[test]
    fn test_parse_accepts_short_and_padded_forms() {
        assert_eq!(TimeOfDay::parse("9:00"), TimeOfDay::new(9, 0));
        assert_eq!(TimeOfDay::parse("09:05"), TimeOfDay::new(9, 5));
        assert_eq!(TimeOfDay::parse(" 18:30 "), TimeOfDay::new(18, 30));
        assert_eq!(TimeOfDay::parse("7:5"), TimeOfDay::new(7, 5));
        assert_eq!(TimeOfDay::parse("23:59"), TimeOfDay::new(23, 59));
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_garbage() {
        assert_eq!(TimeOfDay::parse("25:00"), None);
        assert_eq!(TimeOfDay::parse("24:00"), None);
        assert_eq!(TimeOfDay::parse("9:60"), None);
        assert_eq!(TimeOfDay::parse("nine"), None);
        assert_eq!(TimeOfDay::parse(""), None);
        assert_eq!(TimeOfDay::parse("9"), None);
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(TimeOfDay::parse("09:05").unwrap().to_string(), "9:05");
        assert_eq!(TimeOfDay::parse("18:0").unwrap().to_string(), "18:00");
    }

    #[test]
    fn test_every_minute_of_the_day_round_trips() {
        for hour in 0..24u32 {
            for minute in 0..60u32 {
                for text in [format!("{:02}:{:02}", hour, minute), format!("{}:{}", hour, minute)] {
                    let time = TimeOfDay::parse(&text).unwrap_or_else(|| panic!("{} did not parse", text));
                    assert_eq!(time.minutes(), hour * 60 + minute);
                    assert_eq!(TimeOfDay::parse(&time.to_string()), Some(time));
                }
            }
        }
    }

    #[test]
    fn test_normalize_falls_back_for_non_strings() {
        let fallback = TimeOfDay::new(9, 0).unwrap();
        assert_eq!(TimeOfDay::normalize(Some(&json!("10:15")), fallback), TimeOfDay::new(10, 15).unwrap());
        assert_eq!(TimeOfDay::normalize(Some(&json!(930)), fallback), fallback);
        assert_eq!(TimeOfDay::normalize(Some(&json!("25:00")), fallback), fallback);
        assert_eq!(TimeOfDay::normalize(None, fallback), fallback);
    }

    #[test]
    fn test_minutes_conversion() {
        let time = TimeOfDay::new(18, 10).unwrap();
        assert_eq!(time.minutes(), 1090);
        assert_eq!(TimeOfDay::from_minutes(1090), time);
    }

    #[test]
    fn test_moment_fields() {
        let m = moment(2025, 6, 14, 10, 31, 0);
        assert_eq!(m.date_key(), "2025-06-14");
        assert_eq!(m.minutes(), 631);
        assert_eq!(m.minute_of_hour(), 31);
        assert!(m.is_weekend());
        assert!(!moment(2025, 6, 16, 10, 0, 0).is_weekend());
        assert_eq!(m.month_day(), (6, 14));
        assert_eq!(m.plus_ms(60_000).minutes(), 632);
    }

    #[test]
    fn test_format_active() {
        assert_eq!(format_active(0), "0m");
        assert_eq!(format_active(59 * 60_000 + 59_000), "59m");
        assert_eq!(format_active(125 * 60_000), "2h 5m");
    }

    #[test]
    fn test_countdown() {
        let now = moment(2025, 6, 16, 17, 30, 0);
        let until = TimeOfDay::new(18, 0).unwrap();
        assert_eq!(remaining_until(&now, until), Duration::minutes(30));
        assert_eq!(remaining_until(&moment(2025, 6, 16, 18, 5, 0), until), Duration::zero());
        assert_eq!(format_countdown(&Duration::seconds(3725)), "1h 2m 5s");
    }
}
