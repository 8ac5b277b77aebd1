// src/shows/mod.rs

pub mod csv;
pub mod date;
pub mod record;
pub mod schedule;

pub use date::{format_long_date, parse_show_date};
pub use record::{ShowRecord, TicketAction};
pub use schedule::{classify, fetch_shows, CutoffPolicy, Schedule};
