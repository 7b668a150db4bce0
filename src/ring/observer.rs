use log::info;
use std::fmt;

/// Callback notified of buffer state changes.
///
/// Called synchronously on the mutating thread. It must not try to reach
/// back into the buffer it observes.
pub type Observer<T> = Box<dyn Fn(&Event<'_, T>)>;

/// The read operation that hit an empty buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Peek,
    Remove,
}

/// Structured notification passed to an [`Observer`].
///
/// Values are borrowed for the duration of the call only. When `T`
/// implements `Display` the event renders as a short log line.
#[derive(Debug, PartialEq)]
pub enum Event<'a, T> {
    Inserted(&'a T),
    /// Oldest element dropped to make room for a new one
    Evicted(&'a T),
    Removed(&'a T),
    Cleared,
    Resized(usize),
    EmptyAccess(Access),
    /// One element of a `display` pass, front first
    Listed { index: usize, value: &'a T },
    ListedEmpty,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Peek => f.write_str("peek"),
            Access::Remove => f.write_str("remove"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Event<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Inserted(value) => write!(f, "inserted: {}", value),
            Event::Evicted(value) => write!(f, "evicted element due to overflow: {}", value),
            Event::Removed(value) => write!(f, "removed: {}", value),
            Event::Cleared => f.write_str("cleared"),
            Event::Resized(capacity) => write!(f, "resized to {}", capacity),
            Event::EmptyAccess(access) => write!(f, "empty buffer access: {}", access),
            Event::Listed { index, value } => write!(f, "element {}: {}", index, value),
            Event::ListedEmpty => f.write_str("buffer is empty"),
        }
    }
}

/// Observer that forwards every event to the `log` facade at info level.
pub fn log_observer<T: fmt::Display>() -> Observer<T> {
    Box::new(|event: &Event<'_, T>| info!(target: "ringq", "{}", event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_messages() {
        assert_eq!(Event::Inserted(&4).to_string(), "inserted: 4");
        assert_eq!(
            Event::Evicted(&1).to_string(),
            "evicted element due to overflow: 1"
        );
        assert_eq!(Event::Removed(&"a").to_string(), "removed: a");
        assert_eq!(Event::<i32>::Cleared.to_string(), "cleared");
        assert_eq!(Event::<i32>::Resized(5).to_string(), "resized to 5");
        assert_eq!(
            Event::<i32>::EmptyAccess(Access::Peek).to_string(),
            "empty buffer access: peek"
        );
        assert_eq!(
            Event::Listed { index: 2, value: &7 }.to_string(),
            "element 2: 7"
        );
        assert_eq!(Event::<i32>::ListedEmpty.to_string(), "buffer is empty");
    }

    #[test]
    fn log_observer_accepts_events() {
        let _ = env_logger::builder().is_test(true).try_init();
        let observer = log_observer::<u8>();
        observer(&Event::Inserted(&3));
        observer(&Event::Cleared);
    }
}
