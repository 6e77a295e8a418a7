use std::{collections::HashMap, str::FromStr, sync::Arc, time::Instant};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::{
    feed::{FeedBundle, models::CalendarRow},
    schedule::{
        Direction, Error, Price, Schedule, ServiceWindow, Station, StopEvent, Train, TransitKind,
    },
    shared::{names, time::FeedTime},
};

const FARE_ATTRIBUTES: &str = "fare_attributes";
const FARE_RULES: &str = "fare_rules";
const CALENDAR: &str = "calendar";
const CALENDAR_DATES: &str = "calendar_dates";
const STOPS: &str = "stops";
const TRIPS: &str = "trips";
const STOP_TIMES: &str = "stop_times";

impl Schedule {
    /// Builds the queryable model from a decoded feed bundle.
    ///
    /// Tables are processed in dependency order: fares, calendars and
    /// their exceptions, stops, trains, stop events. Any malformed row or
    /// dangling reference aborts the load; a partially-built schedule is
    /// never returned.
    pub fn load(bundle: FeedBundle) -> Result<Self, Error> {
        Loader::default().load(&bundle)
    }
}

#[derive(Default)]
struct Loader {
    fares: HashMap<(i32, i32), Price>,
    service_windows: HashMap<Arc<str>, Vec<ServiceWindow>>,
    stations_by_stop_id: HashMap<String, Station>,
    trains: HashMap<Arc<str>, Train>,
}

impl Loader {
    fn load(mut self, bundle: &FeedBundle) -> Result<Schedule, Error> {
        self.load_fares(bundle)?;
        self.load_calendar(bundle)?;
        self.load_calendar_exceptions(bundle)?;
        self.load_stations(bundle)?;
        self.load_trains(bundle)?;
        self.load_stop_events(bundle)?;
        Ok(self.finish())
    }

    fn load_fares(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading fares...");
        let now = Instant::now();
        let mut fare_lookup: HashMap<&str, Price> = HashMap::new();
        for (i, row) in bundle.fare_attributes.iter().enumerate() {
            let price = Price::parse(&row.price).ok_or_else(|| {
                malformed(FARE_ATTRIBUTES, i, format!("invalid price {:?}", row.price))
            })?;
            fare_lookup.insert(&row.fare_id, price);
        }
        for (i, row) in bundle.fare_rules.iter().enumerate() {
            // Rules without a zone on both ends carry no fare information.
            if row.origin_id.trim().is_empty() || row.destination_id.trim().is_empty() {
                continue;
            }
            let origin: i32 = parse_field(FARE_RULES, i, "origin_id", &row.origin_id)?;
            let destination: i32 =
                parse_field(FARE_RULES, i, "destination_id", &row.destination_id)?;
            let price = fare_lookup
                .get(row.fare_id.as_str())
                .copied()
                .ok_or_else(|| dangling(FARE_RULES, i, "fare", &row.fare_id))?;
            self.fares.insert((origin, destination), price);
        }
        debug!("Loading fares took {:?}", now.elapsed());
        Ok(())
    }

    fn load_calendar(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading calendars...");
        let now = Instant::now();
        for (i, row) in bundle.calendar.iter().enumerate() {
            let id: Arc<str> = row.service_id.as_str().into();
            let window = ServiceWindow {
                id: id.clone(),
                name: row.service_name.as_str().into(),
                start: parse_date(CALENDAR, i, &row.start_date)?,
                end: parse_date(CALENDAR, i, &row.end_date)?,
                days: parse_weekdays(i, row)?,
                removed: false,
            };
            self.service_windows.entry(id).or_default().push(window);
        }
        debug!("Loading calendars took {:?}", now.elapsed());
        Ok(())
    }

    fn load_calendar_exceptions(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading calendar exceptions...");
        let now = Instant::now();
        for (i, row) in bundle.calendar_dates.iter().enumerate() {
            let when = parse_date(CALENDAR_DATES, i, &row.date)?;
            let removed = match row.exception_type.trim() {
                "1" => false,
                "2" => true,
                other => {
                    return Err(malformed(
                        CALENDAR_DATES,
                        i,
                        format!("invalid exception_type {other:?}"),
                    ));
                }
            };
            let mut days = [false; 7];
            days[when.weekday().num_days_from_monday() as usize] = true;
            let id: Arc<str> = row.service_id.as_str().into();
            let window = ServiceWindow {
                id: id.clone(),
                name: row.date.as_str().into(),
                start: when,
                end: when,
                days,
                removed,
            };
            // Exceptions go ahead of the recurring windows so a removed
            // date is seen before any window that would activate it.
            self.service_windows.entry(id).or_default().insert(0, window);
        }
        debug!("Loading calendar exceptions took {:?}", now.elapsed());
        Ok(())
    }

    fn load_stations(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        for (i, row) in bundle.stops.iter().enumerate() {
            // Non-numeric stop ids are auxiliary records, not stations.
            if row.stop_id.is_empty() || !row.stop_id.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let Some(base) = names::parse_station_display(&row.stop_name) else {
                continue;
            };
            let upper = base.to_uppercase();
            let name = names::title_case(names::rename(&upper));
            let zone = if row.zone_id.trim().is_empty() {
                -1
            } else {
                parse_field(STOPS, i, "zone_id", &row.zone_id)?
            };
            self.stations_by_stop_id.insert(
                row.stop_id.clone(),
                Station {
                    name: name.into(),
                    zone,
                },
            );
        }
        debug!("Loading stations took {:?}", now.elapsed());
        Ok(())
    }

    fn load_trains(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading trains...");
        let now = Instant::now();
        // Freeze the window lists so trains on the same service id share
        // one allocation.
        let frozen: HashMap<Arc<str>, Arc<[ServiceWindow]>> = self
            .service_windows
            .iter()
            .map(|(id, windows)| (id.clone(), Arc::from(windows.as_slice())))
            .collect();
        for (i, row) in bundle.trips.iter().enumerate() {
            let direction = match row.direction_id.trim() {
                "0" => Direction::North,
                "1" => Direction::South,
                other => {
                    return Err(malformed(
                        TRIPS,
                        i,
                        format!("invalid direction_id {other:?}"),
                    ));
                }
            };
            let service_windows = frozen
                .get(row.service_id.as_str())
                .cloned()
                .ok_or_else(|| dangling(TRIPS, i, "service", &row.service_id))?;
            let name: Arc<str> = if row.trip_short_name.trim().is_empty() {
                row.trip_id.as_str().into()
            } else {
                row.trip_short_name.as_str().into()
            };
            let train = Train {
                name,
                kind: TransitKind::from_trip_id(&row.trip_id),
                direction,
                stops: HashMap::new(),
                service_windows,
            };
            self.trains.insert(row.trip_id.as_str().into(), train);
        }
        debug!("Loading trains took {:?}", now.elapsed());
        Ok(())
    }

    fn load_stop_events(&mut self, bundle: &FeedBundle) -> Result<(), Error> {
        debug!("Loading stop events...");
        let now = Instant::now();
        for (i, row) in bundle.stop_times.iter().enumerate() {
            let station = self
                .stations_by_stop_id
                .get(row.stop_id.as_str())
                .cloned()
                .ok_or_else(|| dangling(STOP_TIMES, i, "stop", &row.stop_id))?;
            let train = self
                .trains
                .get_mut(row.trip_id.as_str())
                .ok_or_else(|| dangling(STOP_TIMES, i, "trip", &row.trip_id))?;
            let event = StopEvent {
                arrival: parse_time(STOP_TIMES, i, "arrival_time", &row.arrival_time)?,
                departure: parse_time(STOP_TIMES, i, "departure_time", &row.departure_time)?,
                stop_number: parse_field(STOP_TIMES, i, "stop_sequence", &row.stop_sequence)?,
            };
            train.stops.insert(station, event);
        }
        debug!("Loading stop events took {:?}", now.elapsed());
        Ok(())
    }

    fn finish(self) -> Schedule {
        debug!("Indexing stations...");
        let mut stations: HashMap<Arc<str>, Station> = HashMap::new();
        let mut unambiguous_stations: HashMap<Arc<str>, Station> = HashMap::new();
        for station in self.stations_by_stop_id.into_values() {
            let key = names::display_key(&station.name);
            unambiguous_stations.insert(key.replace('_', "").into(), station.clone());
            stations.insert(key.into(), station);
        }
        Schedule {
            trains: self.trains,
            stations,
            unambiguous_stations,
            fares: self.fares,
        }
    }
}

fn malformed(table: &'static str, index: usize, message: String) -> Error {
    Error::MalformedRow {
        table,
        row: index + 1,
        message,
    }
}

fn dangling(table: &'static str, index: usize, what: &'static str, id: &str) -> Error {
    Error::DanglingReference {
        table,
        row: index + 1,
        what,
        id: id.to_string(),
    }
}

fn parse_field<T: FromStr>(
    table: &'static str,
    index: usize,
    field: &str,
    raw: &str,
) -> Result<T, Error> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(table, index, format!("invalid {field}: {raw:?}")))
}

fn parse_date(table: &'static str, index: usize, raw: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
        .map_err(|_| malformed(table, index, format!("invalid date {raw:?}")))
}

fn parse_time(
    table: &'static str,
    index: usize,
    field: &str,
    raw: &str,
) -> Result<FeedTime, Error> {
    FeedTime::parse(raw).ok_or_else(|| malformed(table, index, format!("invalid {field}: {raw:?}")))
}

fn parse_weekdays(index: usize, row: &CalendarRow) -> Result<[bool; 7], Error> {
    let flags = [
        &row.monday,
        &row.tuesday,
        &row.wednesday,
        &row.thursday,
        &row.friday,
        &row.saturday,
        &row.sunday,
    ];
    let mut days = [false; 7];
    for (day, flag) in days.iter_mut().zip(flags) {
        *day = match flag.trim() {
            "0" => false,
            "1" => true,
            other => {
                return Err(malformed(
                    CALENDAR,
                    index,
                    format!("invalid weekday flag {other:?}"),
                ));
            }
        };
    }
    Ok(days)
}
