use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::Arc,
};

use chrono::{NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use thiserror::Error;

mod loader;
mod models;
pub use models::*;

use crate::{
    feed::{self, FeedReader},
    shared::{names, time::FeedTime},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Feed(#[from] feed::Error),
    #[error("malformed {table} row {row}: {message}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        message: String,
    },
    #[error("{table} row {row} references unknown {what} {id:?}")]
    DanglingReference {
        table: &'static str,
        row: usize,
        what: &'static str,
        id: String,
    },
    #[error("unknown station {0:?}")]
    UnknownStation(String),
    #[error("no fare between zones {origin} and {destination}")]
    FareNotFound { origin: i32, destination: i32 },
}

/// A station argument: free text still to be resolved, or an
/// already-resolved [`Station`] passed through unchanged.
#[derive(Clone, Copy)]
pub enum StationRef<'a> {
    Name(&'a str),
    Resolved(&'a Station),
}

impl<'a> From<&'a str> for StationRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Station> for StationRef<'a> {
    fn from(station: &'a Station) -> Self {
        Self::Resolved(station)
    }
}

/// The immutable, queryable in-memory schedule built from one feed.
///
/// Nothing here changes after [`Schedule::load`] returns, so any number
/// of threads may query one instance concurrently. Reloading a feed means
/// building a fresh `Schedule` and swapping the whole value (behind an
/// `Arc`); a live model is never patched.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    pub(crate) trains: HashMap<Arc<str>, Train>,
    pub(crate) stations: HashMap<Arc<str>, Station>,
    pub(crate) unambiguous_stations: HashMap<Arc<str>, Station>,
    pub(crate) fares: HashMap<(i32, i32), Price>,
}

impl Schedule {
    /// Reads a feed archive and loads it in one go.
    pub fn from_zip<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let bundle = FeedReader::default().read_zip(path)?;
        Self::load(bundle)
    }

    /// All trains, keyed by feed trip id.
    pub fn trains(&self) -> &HashMap<Arc<str>, Train> {
        &self.trains
    }

    /// All stations, keyed by display key (e.g. "san_francisco").
    pub fn stations(&self) -> &HashMap<Arc<str>, Station> {
        &self.stations
    }

    /// Resolves a station from free text; casing, punctuation and the
    /// known aliases and abbreviations are all accepted. Passing an
    /// already-resolved [`Station`] returns it unchanged.
    pub fn station<'a>(&self, query: impl Into<StationRef<'a>>) -> Result<Station, Error> {
        match query.into() {
            StationRef::Resolved(station) => Ok(station.clone()),
            StationRef::Name(name) => {
                let key = names::canonical_key(name);
                self.unambiguous_stations
                    .get(key.as_str())
                    .cloned()
                    .ok_or_else(|| Error::UnknownStation(name.to_string()))
            }
        }
    }

    /// The published fare from `a` to `b`. The zone-pair table is
    /// authoritative: there is no fallback, and fares are not assumed
    /// symmetric.
    pub fn fare_between<'a>(
        &self,
        a: impl Into<StationRef<'a>>,
        b: impl Into<StationRef<'a>>,
    ) -> Result<Price, Error> {
        let a = self.station(a)?;
        let b = self.station(b)?;
        self.fares
            .get(&(a.zone, b.zone))
            .copied()
            .ok_or(Error::FareNotFound {
                origin: a.zone,
                destination: b.zone,
            })
    }

    /// All trips from `a` to `b` departing at or after `after`, soonest
    /// first. An empty list means no remaining service, not an error.
    ///
    /// Each train contributes at most one trip: its service windows are
    /// evaluated in list order (exceptions ahead of recurring entries)
    /// and the first window that validates the train wins. The departure
    /// cutoff compares day-offset-aware instants, so an overnight train
    /// written as "24:10" is still offered at a 23:50 query.
    pub fn next_trips<'a, 'b>(
        &'a self,
        a: impl Into<StationRef<'b>>,
        b: impl Into<StationRef<'b>>,
        after: NaiveDateTime,
    ) -> Result<Vec<Trip<'a>>, Error> {
        let a = self.station(a)?;
        let b = self.station(b)?;
        let date = after.date();
        let cutoff = FeedTime {
            day: 0,
            time: after.time(),
        };

        let mut trips: Vec<Trip<'a>> = self
            .trains
            .par_iter()
            .filter_map(|(_, train)| trip_for_train(train, &a, &b, date, cutoff))
            .collect();
        trips.par_sort_by_key(|trip| trip.departure);
        Ok(trips)
    }
}

fn trip_for_train<'a>(
    train: &'a Train,
    a: &Station,
    b: &Station,
    date: NaiveDate,
    cutoff: FeedTime,
) -> Option<Trip<'a>> {
    let mut suspended: HashSet<&str> = HashSet::new();
    for window in train.service_windows.iter() {
        if suspended.contains(window.id.as_ref()) {
            continue;
        }
        if !window.is_active_on(date) {
            continue;
        }
        if window.removed {
            // A removal exception beats every later window with the same
            // id for this date.
            suspended.insert(&window.id);
            continue;
        }
        let (Some(stop_a), Some(stop_b)) = (train.stops.get(a), train.stops.get(b)) else {
            continue;
        };
        // Wrong direction for this origin/destination pair.
        if stop_a.stop_number > stop_b.stop_number {
            continue;
        }
        // Already departed.
        if stop_a.departure < cutoff {
            continue;
        }
        return Some(Trip {
            departure: stop_a.departure,
            arrival: stop_b.arrival,
            duration: stop_a.duration_to(stop_b),
            train,
        });
    }
    None
}
