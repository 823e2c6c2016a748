//! A fixed-capacity FIFO ring buffer that tells full from empty using only
//! its head and tail indices.
//!
//! Both indices use `None` as the "empty" sentinel. `head` is the slot that
//! was read last and `tail` is the slot that was written last, so the stored
//! elements always live in the cyclic range `(head, tail]`.
//!
//! ```
//! use ring_buffer::{Error, RingBuffer};
//!
//! let mut buffer: RingBuffer<i32, 2> = RingBuffer::new(0);
//! buffer.write(1).unwrap();
//! buffer.write(2).unwrap();
//! assert_eq!(buffer.write(3), Err(Error::Full));
//! assert_eq!(buffer.read(0), Ok(1));
//! assert_eq!(buffer.to_string(), "| 0 | 2 |");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

use core::{fmt, mem};

use tracing::{debug, trace};

/// Errors returned by [`RingBuffer::write`] and [`RingBuffer::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("buffer overflow: no free slot to write into")]
    Full,
    #[error("buffer underflow: no element to read")]
    Empty,
}

/// Coarse state of a buffer, as seen from its index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Empty,
    Partial,
    Full,
}

/// A circular buffer with a fixed capacity of `N` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer<T, const N: usize> {
    storage: [T; N],
    /// Last slot read, `None` when nothing was read since the buffer was last empty.
    head: Option<usize>,
    /// Last slot written, `None` when the buffer is empty.
    tail: Option<usize>,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "RingBuffer capacity must be > 0");

    /// Returns the maximum number of elements the buffer holds.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the slot read last, or `None` while no element has been read
    /// since the buffer was last empty.
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Index of the slot written last, or `None` when the buffer is empty.
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.tail.is_none()
    }

    /// Returns true if the buffer is full.
    pub fn is_full(&self) -> bool {
        match (self.head, self.tail) {
            (Some(head), Some(tail)) => head == tail,
            (None, Some(tail)) => tail == N - 1,
            _ => false,
        }
    }

    pub fn state(&self) -> State {
        if self.is_empty() {
            State::Empty
        } else if self.is_full() {
            State::Full
        } else {
            State::Partial
        }
    }

    /// Returns the number of buffered elements, computed from the indices.
    pub fn len(&self) -> usize {
        match (self.head, self.tail) {
            (_, None) => 0,
            (None, Some(tail)) => tail + 1,
            (Some(head), Some(tail)) if head == tail => N,
            (Some(head), Some(tail)) => (tail + N - head) % N,
        }
    }

    /// Writes an element to the buffer.
    /// Returns an error if the buffer is full.
    pub fn write(&mut self, data: T) -> Result<(), Error> {
        if self.is_full() {
            debug!(capacity = N, "rejecting write, buffer is full");
            return Err(Error::Full);
        }
        self.push(data);
        Ok(())
    }

    /// Reads the oldest element from the buffer and puts `fill_value` into
    /// the slot it leaves behind.
    /// Returns an error if the buffer is empty.
    pub fn read(&mut self, fill_value: T) -> Result<T, Error> {
        if self.is_empty() {
            debug!(capacity = N, "rejecting read, buffer is empty");
            return Err(Error::Empty);
        }

        let head = Self::advance(self.head);
        let data = mem::replace(&mut self.storage[head], fill_value);

        if self.tail == Some(head) {
            // Drained: go back to the single canonical empty encoding.
            self.head = None;
            self.tail = None;
            trace!(slot = head, "read last element, indices reset");
        } else {
            self.head = Some(head);
            trace!(head, tail = ?self.tail, "read element");
        }
        Ok(data)
    }

    /// Writes an element, evicting and returning the oldest one if the
    /// buffer is full. The evicted slot is refilled with `fill_value`
    /// before `data` is stored.
    pub fn overwrite(&mut self, data: T, fill_value: T) -> Option<T> {
        let evicted = if self.is_full() {
            let oldest = self.read(fill_value).ok();
            trace!(capacity = N, "evicted oldest element");
            oldest
        } else {
            None
        };
        self.push(data);
        evicted
    }

    /// Returns the oldest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.storage[Self::advance(self.head)])
    }

    /// Iterates over the buffered elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let start = Self::advance(self.head);
        (0..self.len()).map(move |offset| &self.storage[(start + offset) % N])
    }

    /// All `N` slots in array order, including slots that only hold the fill
    /// value.
    pub fn slots(&self) -> &[T; N] {
        &self.storage
    }

    /// Stores `data` one past the tail. Callers check for a full buffer first.
    fn push(&mut self, data: T) {
        let tail = Self::advance(self.tail);
        self.storage[tail] = data;
        self.tail = Some(tail);
        trace!(head = ?self.head, tail, "wrote element");
    }

    /// The slot following `index`, where `None` sits just before slot 0.
    fn advance(index: Option<usize>) -> usize {
        index.map_or(0, |index| (index + 1) % N)
    }
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Creates an empty buffer with every slot set to `fill_value`.
    /// Usable in `static` and `const` initializers.
    pub const fn new_filled(fill_value: T) -> Self {
        let () = Self::NONZERO_CAPACITY;
        Self {
            storage: [fill_value; N],
            head: None,
            tail: None,
        }
    }
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    /// Creates an empty buffer with every slot set to `fill_value`.
    pub fn new(fill_value: T) -> Self {
        let () = Self::NONZERO_CAPACITY;
        Self {
            storage: core::array::from_fn(|_| fill_value.clone()),
            head: None,
            tail: None,
        }
    }

    /// Empties the buffer and sets every slot to `fill_value`.
    pub fn initialize(&mut self, fill_value: T) {
        self.storage.fill(fill_value);
        self.head = None;
        self.tail = None;
        debug!(capacity = N, "ring buffer initialized");
    }
}

impl<T: Clone + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Renders the raw slots as `| a | b | ... |`, fill values included.
impl<T: fmt::Display, const N: usize> fmt::Display for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for slot in &self.storage {
            write!(f, " {slot} |")?;
        }
        Ok(())
    }
}
