use serde::Deserialize;

// Raw rows as the feed publishes them. Column names are the agency's
// fixed external contract. Fields the loader has to interpret (prices,
// zones, dates, flags, sequences) stay text here so the loader owns the
// error report for a bad value.

#[derive(Deserialize, Debug, Clone)]
pub struct FareAttributeRow {
    pub fare_id: String,
    pub price: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FareRuleRow {
    pub fare_id: String,
    pub origin_id: String,
    pub destination_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CalendarRow {
    pub service_id: String,
    pub service_name: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CalendarDateRow {
    pub service_id: String,
    pub date: String,
    pub exception_type: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StopRow {
    pub stop_id: String,
    pub stop_name: String,
    pub zone_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TripRow {
    pub service_id: String,
    pub trip_id: String,
    pub trip_short_name: String,
    pub direction_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: String,
}
