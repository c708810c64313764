pub mod booking;
pub mod cedula;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod error;
pub mod io;
pub mod lenient;
pub mod lookup;
pub mod paths;
pub mod record;
pub mod repository;
pub mod status;
pub mod store;

pub use error::{HotelError, Result};
pub use lookup::{lookup, lookup_in, LookupNotice, LookupResult, MergedRecord, RecordKind};
