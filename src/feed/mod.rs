use csv::Reader;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self},
    path::Path,
};
use thiserror::Error;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("required table {0} is missing from the feed")]
    UnexpectedLayout(String),
    #[error("malformed row in {table}: {source}")]
    Malformed { table: String, source: csv::Error },
}

/// The decoded tabular records of one published feed, one list of rows
/// per table. This is [`crate::schedule::Schedule::load`]'s input;
/// [`FeedReader`] fills it from a zip archive, but callers are free to
/// assemble the rows from any other source.
#[derive(Debug, Default, Clone)]
pub struct FeedBundle {
    pub fare_attributes: Vec<FareAttributeRow>,
    pub fare_rules: Vec<FareRuleRow>,
    pub calendar: Vec<CalendarRow>,
    pub calendar_dates: Vec<CalendarDateRow>,
    pub stops: Vec<StopRow>,
    pub trips: Vec<TripRow>,
    pub stop_times: Vec<StopTimeRow>,
}

/// Decodes the required tables out of a feed archive.
#[derive(Default)]
pub struct FeedReader {
    config: Config,
}

impl FeedReader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads every required table from the archive at `path`. A table
    /// missing from the archive is a layout error; a row the decoder
    /// cannot make sense of is reported with its table name.
    pub fn read_zip<P: AsRef<Path>>(&self, path: P) -> Result<FeedBundle, Error> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut bundle = FeedBundle::default();
        parse_table(
            &mut bundle.fare_attributes,
            &mut archive,
            &self.config.fare_attributes_path,
        )?;
        parse_table(
            &mut bundle.fare_rules,
            &mut archive,
            &self.config.fare_rules_path,
        )?;
        parse_table(&mut bundle.calendar, &mut archive, &self.config.calendar_path)?;
        parse_table(
            &mut bundle.calendar_dates,
            &mut archive,
            &self.config.calendar_dates_path,
        )?;
        parse_table(&mut bundle.stops, &mut archive, &self.config.stops_path)?;
        parse_table(&mut bundle.trips, &mut archive, &self.config.trips_path)?;
        parse_table(
            &mut bundle.stop_times,
            &mut archive,
            &self.config.stop_times_path,
        )?;
        Ok(bundle)
    }
}

fn parse_table<T>(buf: &mut Vec<T>, archive: &mut ZipArchive<File>, name: &str) -> Result<(), Error>
where
    T: DeserializeOwned,
{
    let index = archive
        .index_for_name(name)
        .ok_or_else(|| Error::UnexpectedLayout(name.to_string()))?;
    let file = archive.by_index(index)?;
    let mut rdr = Reader::from_reader(file);
    for result in rdr.deserialize() {
        let record: T = result.map_err(|source| Error::Malformed {
            table: name.to_string(),
            source,
        })?;
        buf.push(record);
    }
    Ok(())
}
