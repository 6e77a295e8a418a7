pub mod names;
pub mod time;

pub use time::*;
