use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use commute::feed::FeedBundle;
use commute::feed::models::{
    CalendarDateRow, CalendarRow, FareAttributeRow, FareRuleRow, StopRow, StopTimeRow, TripRow,
};
use commute::schedule::{Error, Schedule, TransitKind};
use commute::shared::time::FeedTime;

fn weekday_calendar(service_id: &str) -> CalendarRow {
    CalendarRow {
        service_id: service_id.into(),
        service_name: "Weekday".into(),
        monday: "1".into(),
        tuesday: "1".into(),
        wednesday: "1".into(),
        thursday: "1".into(),
        friday: "1".into(),
        saturday: "0".into(),
        sunday: "0".into(),
        start_date: "20240101".into(),
        end_date: "20261231".into(),
    }
}

fn exception(service_id: &str, date: &str, exception_type: &str) -> CalendarDateRow {
    CalendarDateRow {
        service_id: service_id.into(),
        date: date.into(),
        exception_type: exception_type.into(),
    }
}

fn stop(stop_id: &str, stop_name: &str, zone_id: &str) -> StopRow {
    StopRow {
        stop_id: stop_id.into(),
        stop_name: stop_name.into(),
        zone_id: zone_id.into(),
    }
}

fn trip(trip_id: &str, service_id: &str, direction_id: &str) -> TripRow {
    TripRow {
        service_id: service_id.into(),
        trip_id: trip_id.into(),
        trip_short_name: trip_id.into(),
        direction_id: direction_id.into(),
    }
}

fn stop_time(trip_id: &str, stop_id: &str, time: &str, stop_sequence: &str) -> StopTimeRow {
    StopTimeRow {
        trip_id: trip_id.into(),
        arrival_time: time.into(),
        departure_time: time.into(),
        stop_id: stop_id.into(),
        stop_sequence: stop_sequence.into(),
    }
}

fn fare(fare_id: &str, price: &str) -> FareAttributeRow {
    FareAttributeRow {
        fare_id: fare_id.into(),
        price: price.into(),
    }
}

fn fare_rule(fare_id: &str, origin_id: &str, destination_id: &str) -> FareRuleRow {
    FareRuleRow {
        fare_id: fare_id.into(),
        origin_id: origin_id.into(),
        destination_id: destination_id.into(),
    }
}

/// Two stations (zone 1 and zone 2), one weekday train 08:00 -> 08:30,
/// fares published in both directions.
fn base_bundle() -> FeedBundle {
    FeedBundle {
        fare_attributes: vec![fare("f12", "3.75"), fare("f21", "4.25")],
        fare_rules: vec![fare_rule("f12", "1", "2"), fare_rule("f21", "2", "1")],
        calendar: vec![weekday_calendar("weekday")],
        calendar_dates: vec![],
        stops: vec![
            stop("70011", "San Francisco Caltrain Station", "1"),
            stop("70211", "Mountain View Caltrain Station", "2"),
        ],
        trips: vec![trip("101", "weekday", "1")],
        stop_times: vec![
            stop_time("101", "70011", "08:00:00", "1"),
            stop_time("101", "70211", "08:30:00", "2"),
        ],
    }
}

fn tuesday(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn morning_query_finds_the_train() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(7, 0))
        .unwrap();
    assert_eq!(trips.len(), 1);
    let trip = &trips[0];
    assert_eq!(trip.departure, FeedTime::parse("08:00:00").unwrap());
    assert_eq!(trip.arrival, FeedTime::parse("08:30:00").unwrap());
    assert_eq!(trip.duration, TimeDelta::minutes(30));
    assert_eq!(trip.train.kind, TransitKind::Local);
    assert_eq!(trip.train.name.as_ref(), "101");
    assert_eq!(
        trip.to_string(),
        "[Local 101] Departs: 08:00:00, Arrives: 08:30:00 (30 min)"
    );
}

#[test]
fn later_query_is_empty() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(9, 0))
        .unwrap();
    assert!(trips.is_empty());
}

#[test]
fn weekend_is_outside_the_service_window() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let saturday = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", saturday)
        .unwrap();
    assert!(trips.is_empty());
}

#[test]
fn fares_are_looked_up_per_direction() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let outbound = schedule.fare_between("SF", "Mountain View").unwrap();
    assert_eq!(outbound.to_string(), "$3.75");
    let inbound = schedule.fare_between("Mountain View", "SF").unwrap();
    assert_eq!(inbound.to_string(), "$4.25");
}

#[test]
fn missing_zone_pair_is_fare_not_found() {
    let mut bundle = base_bundle();
    bundle
        .stops
        .push(stop("70261", "San Jose Diridon Caltrain Station", "4"));
    let schedule = Schedule::load(bundle).unwrap();
    let err = schedule.fare_between("San Francisco", "San Jose").unwrap_err();
    assert!(matches!(
        err,
        Error::FareNotFound {
            origin: 1,
            destination: 4
        }
    ));
}

#[test]
fn unknown_station_is_an_error() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    assert!(matches!(
        schedule.station("Atlantis"),
        Err(Error::UnknownStation(_))
    ));
    assert!(matches!(
        schedule.next_trips("Atlantis", "Mountain View", tuesday(7, 0)),
        Err(Error::UnknownStation(_))
    ));
}

#[test]
fn aliases_resolve_to_the_same_station() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let by_alias = schedule.station("SF").unwrap();
    let by_name = schedule.station("San Francisco").unwrap();
    assert_eq!(by_alias, by_name);
    assert_eq!(by_alias.zone, 1);
}

#[test]
fn resolved_station_passes_through() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let station = schedule.station("SF").unwrap();
    let again = schedule.station(&station).unwrap();
    assert_eq!(station, again);
}

#[test]
fn stations_are_keyed_for_display() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    assert!(schedule.stations().contains_key("san_francisco"));
    assert!(schedule.stations().contains_key("mountain_view"));
}

#[test]
fn empty_zone_means_unassigned() {
    let mut bundle = base_bundle();
    bundle
        .stops
        .push(stop("70101", "College Park Caltrain Station", ""));
    let schedule = Schedule::load(bundle).unwrap();
    assert_eq!(schedule.station("College Park").unwrap().zone, -1);
}

#[test]
fn removal_exception_suspends_the_date() {
    let mut bundle = base_bundle();
    bundle
        .calendar_dates
        .push(exception("weekday", "20240305", "2"));
    let schedule = Schedule::load(bundle).unwrap();

    let on_the_date = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(7, 0))
        .unwrap();
    assert!(on_the_date.is_empty());

    let next_week = NaiveDate::from_ymd_opt(2024, 3, 12)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let after = schedule
        .next_trips("San Francisco", "Mountain View", next_week)
        .unwrap();
    assert_eq!(after.len(), 1);
}

#[test]
fn added_exception_activates_a_date() {
    let mut bundle = base_bundle();
    // Service defined only through a single-date exception on a Saturday.
    bundle.calendar_dates.push(exception("special", "20240309", "1"));
    bundle.trips.push(trip("201", "special", "1"));
    bundle.stop_times.push(stop_time("201", "70011", "10:00:00", "1"));
    bundle.stop_times.push(stop_time("201", "70211", "10:30:00", "2"));
    let schedule = Schedule::load(bundle).unwrap();

    let saturday = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", saturday)
        .unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].train.kind, TransitKind::Special);
}

#[test]
fn wrong_direction_is_filtered() {
    let schedule = Schedule::load(base_bundle()).unwrap();
    let trips = schedule
        .next_trips("Mountain View", "San Francisco", tuesday(7, 0))
        .unwrap();
    assert!(trips.is_empty());
}

#[test]
fn results_come_back_in_departure_order() {
    let mut bundle = base_bundle();
    bundle.trips.push(trip("103", "weekday", "1"));
    bundle.stop_times.push(stop_time("103", "70011", "09:00:00", "1"));
    bundle.stop_times.push(stop_time("103", "70211", "09:30:00", "2"));
    bundle.trips.push(trip("105", "weekday", "1"));
    bundle.stop_times.push(stop_time("105", "70011", "08:15:00", "1"));
    bundle.stop_times.push(stop_time("105", "70211", "08:45:00", "2"));
    let schedule = Schedule::load(bundle).unwrap();

    let trips = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(7, 0))
        .unwrap();
    assert_eq!(trips.len(), 3);
    for pair in trips.windows(2) {
        assert!(pair[0].departure <= pair[1].departure);
    }
    assert_eq!(trips[0].train.name.as_ref(), "101");
    assert_eq!(trips[1].train.name.as_ref(), "105");
    assert_eq!(trips[2].train.name.as_ref(), "103");
}

#[test]
fn one_trip_per_train_even_with_overlapping_windows() {
    let mut bundle = base_bundle();
    // A second identical recurring window for the same service id.
    bundle.calendar.push(weekday_calendar("weekday"));
    let schedule = Schedule::load(bundle).unwrap();
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(7, 0))
        .unwrap();
    assert_eq!(trips.len(), 1);
}

#[test]
fn overnight_departure_not_cut_off() {
    let mut bundle = base_bundle();
    bundle.trips.push(trip("191", "weekday", "1"));
    bundle.stop_times.push(stop_time("191", "70011", "24:10:00", "1"));
    bundle.stop_times.push(stop_time("191", "70211", "24:40:00", "2"));
    let schedule = Schedule::load(bundle).unwrap();

    // 23:50 on the service date: the 08:00 train is long gone, but the
    // "24:10" departure (00:10 the next morning) is still upcoming even
    // though its wall-clock value is smaller than the query time.
    let trips = schedule
        .next_trips("San Francisco", "Mountain View", tuesday(23, 50))
        .unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].departure, FeedTime::parse("24:10:00").unwrap());
    assert_eq!(trips[0].duration, TimeDelta::minutes(30));
}

#[test]
fn dangling_fare_reference_fails_the_load() {
    let mut bundle = base_bundle();
    bundle.fare_rules.push(fare_rule("missing", "1", "4"));
    assert!(matches!(
        Schedule::load(bundle),
        Err(Error::DanglingReference { what: "fare", .. })
    ));
}

#[test]
fn dangling_trip_reference_fails_the_load() {
    let mut bundle = base_bundle();
    bundle.stop_times.push(stop_time("999", "70011", "08:00:00", "1"));
    assert!(matches!(
        Schedule::load(bundle),
        Err(Error::DanglingReference { what: "trip", .. })
    ));
}

#[test]
fn dangling_service_reference_fails_the_load() {
    let mut bundle = base_bundle();
    bundle.trips.push(trip("301", "holiday", "0"));
    assert!(matches!(
        Schedule::load(bundle),
        Err(Error::DanglingReference { what: "service", .. })
    ));
}

#[test]
fn malformed_price_fails_the_load() {
    let mut bundle = base_bundle();
    bundle.fare_attributes.push(fare("bad", "three-ish"));
    assert!(matches!(
        Schedule::load(bundle),
        Err(Error::MalformedRow {
            table: "fare_attributes",
            ..
        })
    ));
}

#[test]
fn malformed_stop_sequence_fails_the_load() {
    let mut bundle = base_bundle();
    bundle.stop_times.push(stop_time("101", "70011", "08:00:00", "first"));
    assert!(matches!(
        Schedule::load(bundle),
        Err(Error::MalformedRow {
            table: "stop_times",
            ..
        })
    ));
}
