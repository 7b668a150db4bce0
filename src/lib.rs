#![warn(clippy::all, rust_2018_idioms)]

pub mod error;
pub mod ring;
pub mod settings;
pub use error::{Result, RingError};
pub use ring::{log_observer, Access, Event, Iter, Observer, RingBuffer};
pub use settings::Settings;
