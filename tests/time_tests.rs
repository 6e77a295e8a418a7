use chrono::{TimeDelta, Timelike};
use commute::shared::time::FeedTime;

#[test]
fn resolution_round_trip() {
    for hour in 0..=47u32 {
        for minute in [0u32, 17, 59] {
            for second in [0u32, 30, 59] {
                let raw = format!("{hour}:{minute:02}:{second:02}");
                let time = FeedTime::parse(&raw).unwrap();
                assert_eq!(time.day, hour / 24, "day offset for {raw}");
                assert_eq!(time.time.hour(), hour % 24, "hour for {raw}");
                assert_eq!(time.time.minute(), minute);
                assert_eq!(time.time.second(), second);
                assert_eq!(time.feed_hour(), hour, "round trip for {raw}");
            }
        }
    }
}

#[test]
fn overnight_duration_is_positive() {
    let departure = FeedTime::parse("23:50:00").unwrap();
    let arrival = FeedTime::parse("24:10:00").unwrap();
    assert_eq!(arrival - departure, TimeDelta::minutes(20));
}

#[test]
fn same_day_duration() {
    let departure = FeedTime::parse("08:00:00").unwrap();
    let arrival = FeedTime::parse("08:30:00").unwrap();
    assert_eq!(arrival - departure, TimeDelta::minutes(30));
}

#[test]
fn invalid_inputs_rejected() {
    assert!(FeedTime::parse("08:30").is_none());
    assert!(FeedTime::parse("08:30:00:00").is_none());
    assert!(FeedTime::parse("aa:30:00").is_none());
    assert!(FeedTime::parse("08:60:00").is_none());
}

#[test]
fn display_marks_day_overflow() {
    assert_eq!(FeedTime::parse("08:05:00").unwrap().to_string(), "08:05:00");
    assert_eq!(
        FeedTime::parse("24:10:00").unwrap().to_string(),
        "00:10:00 (+1d)"
    );
}
