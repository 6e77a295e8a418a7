use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::shared::time::FeedTime;

/// A fare-zone-bearing rail station.
///
/// Identity is the canonical display name: two values with the same name
/// are the same station, and the zone rides along.
#[derive(Debug, Clone)]
pub struct Station {
    /// Canonical display name (e.g. "South San Francisco").
    pub name: Arc<str>,
    /// Fare zone, -1 when the feed does not assign one.
    pub zone: i32,
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// One calendar entry: either a recurring weekly window or a single-date
/// exception (`start == end`). A `removed` window suspends its service id
/// on that date; exceptions are kept ahead of the recurring entries in a
/// service id's window list so they are evaluated first.
#[derive(Debug, Clone)]
pub struct ServiceWindow {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Active weekdays, indexed from Monday.
    pub days: [bool; 7],
    pub removed: bool,
}

impl ServiceWindow {
    /// Whether this window covers `date` at all: inside the date range and
    /// on an active weekday.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start <= date
            && date <= self.end
            && self.days[date.weekday().num_days_from_monday() as usize]
    }
}

/// The timing of one train's call at one station.
#[derive(Debug, Clone, Copy)]
pub struct StopEvent {
    pub arrival: FeedTime,
    pub departure: FeedTime,
    /// Sequence index within the trip; strictly increasing along the
    /// direction of travel.
    pub stop_number: u32,
}

impl StopEvent {
    /// Signed span from this event's departure to `dest`'s arrival. The
    /// day offsets keep spans across midnight positive.
    pub fn duration_to(&self, dest: &StopEvent) -> TimeDelta {
        dest.arrival - self.departure
    }
}

/// Direction of travel along the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
}

/// Service category, read off the agency's trip-id numbering convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitKind {
    Shuttle,
    Local,
    Limited,
    /// High-speed limited-stop express service.
    Express,
    /// Special event service.
    Special,
    #[default]
    Unknown,
}

/// Leading trip-id character to service category. Agency convention;
/// adjust the table, not the classification code.
const KIND_TABLE: &[(char, TransitKind)] = &[
    ('s', TransitKind::Shuttle),
    ('7', TransitKind::Express),
    ('1', TransitKind::Local),
    ('3', TransitKind::Limited),
    ('4', TransitKind::Limited),
    ('5', TransitKind::Limited),
    ('2', TransitKind::Special),
];

impl TransitKind {
    pub fn from_trip_id(trip_id: &str) -> Self {
        let Some(first) = trip_id.chars().next() else {
            return Self::Unknown;
        };
        KIND_TABLE
            .iter()
            .find(|(c, _)| *c == first)
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for TransitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shuttle => "Shuttle",
            Self::Local => "Local",
            Self::Limited => "Limited",
            Self::Express => "Express",
            Self::Special => "Special",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// A single scheduled run from the feed.
#[derive(Debug, Clone)]
pub struct Train {
    /// Display identifier; the feed's short name, falling back to the
    /// trip id.
    pub name: Arc<str>,
    pub kind: TransitKind,
    pub direction: Direction,
    /// Stop events keyed by station identity.
    pub stops: HashMap<Station, StopEvent>,
    /// Applicable calendar windows, exceptions first. Shared between
    /// trains with the same service id.
    pub service_windows: Arc<[ServiceWindow]>,
}

/// A fare amount as the feed publishes it, split into major and minor
/// currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub dollars: u32,
    pub cents: u8,
}

impl Price {
    /// Parses a published "D.CC" amount; a bare "D" means whole dollars.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (dollars, cents) = match raw.split_once('.') {
            Some((dollars, cents)) => (dollars, cents),
            None => (raw, ""),
        };
        let dollars = dollars.parse().ok()?;
        let cents = match cents.len() {
            0 => 0,
            1 => cents.parse::<u8>().ok()? * 10,
            2 => cents.parse::<u8>().ok()?,
            _ => return None,
        };
        Some(Self { dollars, cents })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars, self.cents)
    }
}

/// One concrete query answer: a departure/arrival pair on a specific
/// train. Built by the query engine, never stored in the model.
#[derive(Debug, Clone, Copy)]
pub struct Trip<'a> {
    pub departure: FeedTime,
    pub arrival: FeedTime,
    /// Signed span from departure to arrival.
    pub duration: TimeDelta,
    pub train: &'a Train,
}

impl fmt::Display for Trip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}] Departs: {}, Arrives: {} ({} min)",
            self.train.kind,
            self.train.name,
            self.departure,
            self.arrival,
            self.duration.num_minutes()
        )
    }
}

#[test]
fn kind_follows_leading_character() {
    assert_eq!(TransitKind::from_trip_id("s205"), TransitKind::Shuttle);
    assert_eq!(TransitKind::from_trip_id("701"), TransitKind::Express);
    assert_eq!(TransitKind::from_trip_id("101"), TransitKind::Local);
    assert_eq!(TransitKind::from_trip_id("411"), TransitKind::Limited);
    assert_eq!(TransitKind::from_trip_id("207"), TransitKind::Special);
    assert_eq!(TransitKind::from_trip_id("x99"), TransitKind::Unknown);
    assert_eq!(TransitKind::from_trip_id(""), TransitKind::Unknown);
}

#[test]
fn price_parses_published_amounts() {
    assert_eq!(
        Price::parse("3.75"),
        Some(Price {
            dollars: 3,
            cents: 75
        })
    );
    assert_eq!(
        Price::parse("4.5"),
        Some(Price {
            dollars: 4,
            cents: 50
        })
    );
    assert_eq!(Price::parse("2"), Some(Price { dollars: 2, cents: 0 }));
    assert_eq!(Price::parse("3.755"), None);
    assert_eq!(Price::parse("abc"), None);
}

#[test]
fn price_displays_with_padded_cents() {
    let price = Price {
        dollars: 3,
        cents: 5,
    };
    assert_eq!(price.to_string(), "$3.05");
}
