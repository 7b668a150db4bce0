use super::observer::{Access, Event, Observer};
use crate::error::{Result, RingError};
use log::{debug, trace};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::FusedIterator;

/// A fixed-capacity ring buffer that evicts its oldest element on overflow.
///
/// Occupied slots are `head, head + 1, ..` (mod capacity) for `len` slots.
/// `head` is only meaningful while `len > 0` and is re-anchored to slot 0
/// whenever the buffer drains.
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
    observer: Option<Observer<T>>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with exactly `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity);
        }
        Ok(Self {
            slots: empty_slots(capacity),
            head: 0,
            len: 0,
            observer: None,
        })
    }

    /// Creates an empty buffer that reports its state changes to `observer`.
    pub fn with_observer<F>(capacity: usize, observer: F) -> Result<Self>
    where
        F: Fn(&Event<'_, T>) + 'static,
    {
        let mut buffer = Self::new(capacity)?;
        buffer.set_observer(observer);
        Ok(buffer)
    }

    /// Installs `observer`, replacing any previous one.
    ///
    /// The observer runs synchronously inside the mutating call and must not
    /// touch this buffer.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: Fn(&Event<'_, T>) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn take_observer(&mut self) -> Option<Observer<T>> {
        self.observer.take()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value` at the rear.
    ///
    /// A full buffer first evicts its oldest element, which is reported as
    /// [`Event::Evicted`] before the [`Event::Inserted`] for `value` and
    /// handed back to the caller.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            let oldest = self.slots[self.head].take();
            self.head = self.slot(1);
            self.len -= 1;
            if let Some(oldest) = &oldest {
                trace!("evicting oldest element at capacity {}", self.capacity());
                self.notify(&Event::Evicted(oldest));
            }
            oldest
        } else {
            None
        };

        if self.len == 0 {
            self.head = 0;
        }
        let rear = self.slot(self.len);
        self.slots[rear] = Some(value);
        self.len += 1;

        if let Some(value) = &self.slots[rear] {
            self.notify(&Event::Inserted(value));
        }
        evicted
    }

    /// Removes and returns the oldest element.
    pub fn remove(&mut self) -> Result<T> {
        if self.is_empty() {
            self.notify(&Event::EmptyAccess(Access::Remove));
            return Err(RingError::EmptyBuffer);
        }
        let value = self.slots[self.head]
            .take()
            .ok_or(RingError::EmptyBuffer)?;
        self.len -= 1;
        self.head = if self.len == 0 { 0 } else { self.slot(1) };

        self.notify(&Event::Removed(&value));
        Ok(value)
    }

    /// Returns a copy of the oldest element.
    pub fn peek(&self) -> Result<T>
    where
        T: Clone,
    {
        if self.is_empty() {
            self.notify(&Event::EmptyAccess(Access::Peek));
            return Err(RingError::EmptyBuffer);
        }
        self.slots[self.head]
            .clone()
            .ok_or(RingError::EmptyBuffer)
    }

    /// Returns a copy of the newest element.
    pub fn peek_rear(&self) -> Result<T>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Err(RingError::EmptyBuffer);
        }
        self.slots[self.slot(self.len - 1)]
            .clone()
            .ok_or(RingError::EmptyBuffer)
    }

    /// Returns a copy of the element `index` positions behind the front.
    ///
    /// Index 0 is the oldest element, `len() - 1` the newest.
    pub fn get_element_at(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        let out_of_range = RingError::IndexOutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }
        self.slots[self.slot(index)].clone().ok_or(out_of_range)
    }

    /// Copies the occupied elements out in front-to-rear order.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
        debug!("cleared buffer of capacity {}", self.capacity());
        self.notify(&Event::Cleared);
    }

    /// Reports every element to the observer, front first.
    ///
    /// Does nothing when no observer is installed.
    pub fn display(&self) {
        let Some(observer) = &self.observer else {
            return;
        };
        if self.is_empty() {
            observer(&Event::ListedEmpty);
            return;
        }
        for (index, value) in self.iter().enumerate() {
            observer(&Event::Listed { index, value });
        }
    }

    /// Moves the elements into a fresh store of `new_capacity` slots.
    ///
    /// The elements keep their order and start at slot 0 afterwards. Fails
    /// without touching the buffer if they would not fit.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.len {
            return Err(RingError::CapacityTooSmall {
                requested: new_capacity,
                len: self.len,
            });
        }
        if new_capacity == 0 {
            return Err(RingError::InvalidCapacity);
        }

        let mut slots = Vec::with_capacity(new_capacity);
        for offset in 0..self.len {
            let index = self.slot(offset);
            slots.push(self.slots[index].take());
        }
        slots.resize_with(new_capacity, || None);

        debug!(
            "resized buffer from {} to {} slots ({} elements)",
            self.capacity(),
            new_capacity,
            self.len
        );
        self.slots = slots;
        self.head = 0;
        self.notify(&Event::Resized(new_capacity));
        Ok(())
    }

    /// Iterates over the elements from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            pos: self.head,
            remaining: self.len,
        }
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }

    fn notify(&self, event: &Event<'_, T>) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

/// Front-to-rear iterator returned by [`RingBuffer::iter`].
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.pos].as_ref();
        self.pos = (self.pos + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
