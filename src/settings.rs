use crate::error::Result;
use crate::ring::{log_observer, RingBuffer};
use std::fmt;

/// Serializable buffer configuration.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct Settings {
    pub capacity: usize,
    /// Forward every buffer event to the `log` facade
    pub log_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: 100,
            log_events: false,
        }
    }
}

impl Settings {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Builds an empty buffer from these settings.
    pub fn build<T: fmt::Display + 'static>(&self) -> Result<RingBuffer<T>> {
        if self.log_events {
            RingBuffer::with_observer(self.capacity, log_observer::<T>())
        } else {
            RingBuffer::new(self.capacity)
        }
    }
}
