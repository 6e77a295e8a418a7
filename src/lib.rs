//! An in-memory timetable engine for commuter rail feeds.
//!
//! A published schedule feed is decoded into a [`feed::FeedBundle`] (one
//! list of rows per table) and loaded with [`schedule::Schedule::load`],
//! or read straight from a zip archive with
//! [`schedule::Schedule::from_zip`]. The resulting [`schedule::Schedule`]
//! is immutable and answers station, fare and next-trip queries; share it
//! behind an `Arc` and swap the whole value to pick up a new feed.
//!
//! ```no_run
//! # fn main() -> Result<(), commute::schedule::Error> {
//! use chrono::NaiveDate;
//! use commute::schedule::Schedule;
//!
//! let schedule = Schedule::from_zip("feed.zip")?;
//! let after = NaiveDate::from_ymd_opt(2026, 3, 3)
//!     .unwrap()
//!     .and_hms_opt(7, 0, 0)
//!     .unwrap();
//! for trip in schedule.next_trips("SF", "Mountain View", after)? {
//!     println!("{trip}");
//! }
//! println!("{}", schedule.fare_between("SF", "Mountain View")?);
//! # Ok(())
//! # }
//! ```

pub mod feed;
pub mod schedule;
pub mod shared;

pub mod prelude {
    pub use crate::feed::{Config, FeedBundle, FeedReader};
    pub use crate::schedule::{
        Direction, Price, Schedule, Station, StationRef, StopEvent, Train, TransitKind, Trip,
    };
    pub use crate::shared::time::FeedTime;
}
