/// File names of the tables a feed archive must carry. The defaults match
/// the agency's published layout; override individual paths when a feed
/// packages them differently.
pub struct Config {
    pub fare_attributes_path: String,
    pub fare_rules_path: String,
    pub calendar_path: String,
    pub calendar_dates_path: String,
    pub stops_path: String,
    pub trips_path: String,
    pub stop_times_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fare_attributes_path: "fare_attributes.txt".into(),
            fare_rules_path: "fare_rules.txt".into(),
            calendar_path: "calendar.txt".into(),
            calendar_dates_path: "calendar_dates.txt".into(),
            stops_path: "stops.txt".into(),
            trips_path: "trips.txt".into(),
            stop_times_path: "stop_times.txt".into(),
        }
    }
}
