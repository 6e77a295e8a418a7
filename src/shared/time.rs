use std::{fmt, ops::Sub};

use chrono::{NaiveTime, TimeDelta, Timelike};

/// A schedule clock reading. Feed hours may exceed 23 to describe service
/// that runs past midnight; the overflow is carried in `day` and the wall
/// clock normalized back into 00..24, so "24:30:00" becomes day 1,
/// 00:30:00.
///
/// Ordering is by `(day, time)`, i.e. by absolute instant within the
/// service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeedTime {
    pub day: u32,
    pub time: NaiveTime,
}

impl FeedTime {
    /// Parses an "H:MM:SS" schedule string. The hour may be any
    /// non-negative integer; minutes and seconds must be in range.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut split = raw.trim().split(':');
        let hours: u32 = split.next()?.trim().parse().ok()?;
        let minutes: u32 = split.next()?.trim().parse().ok()?;
        let seconds: u32 = split.next()?.trim().parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        let time = NaiveTime::from_hms_opt(hours % 24, minutes, seconds)?;
        Some(Self {
            day: hours / 24,
            time,
        })
    }

    /// The hour as the feed wrote it, i.e. 25 for a day-1 01:00 reading.
    pub fn feed_hour(&self) -> u32 {
        self.day * 24 + self.time.hour()
    }
}

impl Sub for FeedTime {
    type Output = TimeDelta;

    /// Signed span from `rhs` to `self`, day offsets included, so a span
    /// across midnight comes out positive.
    fn sub(self, rhs: Self) -> TimeDelta {
        TimeDelta::days(i64::from(self.day) - i64::from(rhs.day)) + (self.time - rhs.time)
    }
}

impl fmt::Display for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.day > 0 {
            write!(f, "{} (+{}d)", self.time.format("%H:%M:%S"), self.day)
        } else {
            write!(f, "{}", self.time.format("%H:%M:%S"))
        }
    }
}

#[test]
fn parse_plain_time() {
    let time = FeedTime::parse("08:30:15").unwrap();
    assert_eq!(time.day, 0);
    assert_eq!(time.time, NaiveTime::from_hms_opt(8, 30, 15).unwrap());
}

#[test]
fn parse_single_digit_hour() {
    let time = FeedTime::parse("8:05:00").unwrap();
    assert_eq!(time.day, 0);
    assert_eq!(time.feed_hour(), 8);
}

#[test]
fn parse_overflow_hour() {
    let time = FeedTime::parse("24:30:00").unwrap();
    assert_eq!(time.day, 1);
    assert_eq!(time.time, NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    assert_eq!(time.feed_hour(), 24);
}

#[test]
fn parse_two_day_overflow() {
    let time = FeedTime::parse("49:00:00").unwrap();
    assert_eq!(time.day, 2);
    assert_eq!(time.time, NaiveTime::from_hms_opt(1, 0, 0).unwrap());
}

#[test]
fn parse_missing_component() {
    assert!(FeedTime::parse("08:30").is_none());
}

#[test]
fn parse_garbage_component() {
    assert!(FeedTime::parse("08:30:0a").is_none());
}

#[test]
fn parse_out_of_range_minute() {
    assert!(FeedTime::parse("08:61:00").is_none());
}

#[test]
fn subtract_across_midnight() {
    let departure = FeedTime::parse("23:50:00").unwrap();
    let arrival = FeedTime::parse("24:10:00").unwrap();
    assert_eq!(arrival - departure, TimeDelta::minutes(20));
}

#[test]
fn subtract_backwards_is_negative() {
    let earlier = FeedTime::parse("08:00:00").unwrap();
    let later = FeedTime::parse("08:30:00").unwrap();
    assert_eq!(earlier - later, TimeDelta::minutes(-30));
}

#[test]
fn ordering_is_day_aware() {
    let late_tonight = FeedTime::parse("23:59:00").unwrap();
    let early_tomorrow = FeedTime::parse("24:01:00").unwrap();
    assert!(late_tonight < early_tomorrow);
}
