//! Blocking bounded FIFO buffer.
//!
//! [`BoundedBuffer`] is a monitor: one mutex guards the item storage and the
//! closed flag, and two condition variables carry the wakeups. `not_empty` is
//! signaled once after every successful `put`, `not_full` once after every
//! successful `take`, and [`close`](BoundedBuffer::close) broadcasts on both
//! so every sleeper observes the shutdown.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{InvalidCapacity, PutError, TakeError, TryPutError, TryTakeError};
use crate::sync::{Condvar, Mutex, MutexGuard};

/// Fixed-capacity FIFO buffer shared by producer and consumer threads.
///
/// Any number of threads may call [`put`] and [`take`] concurrently through a
/// shared reference (typically an `Arc<BoundedBuffer<T>>`). Producers block
/// while the buffer is full, consumers block while it is empty, and items
/// come out in exactly the order they went in.
///
/// # Shutdown
///
/// [`close`] flips a one-way flag and wakes every blocked thread. After the
/// close, `put` fails immediately and hands the item back, while `take`
/// keeps draining whatever was buffered before failing. No operation blocks
/// on a closed buffer.
///
/// # Lock poisoning
///
/// The buffer holds its lock only for short, non-panicking critical
/// sections. If user code nevertheless poisons the lock (by panicking in a
/// thread that observed it mid-operation), subsequent operations panic
/// rather than run on inconsistent state.
///
/// # Examples
///
/// ```
/// use relay_buffer::BoundedBuffer;
/// use std::sync::Arc;
/// use std::thread;
///
/// let buffer = Arc::new(BoundedBuffer::new(4).unwrap());
/// let producer = Arc::clone(&buffer);
///
/// let handle = thread::spawn(move || {
///     for i in 0..8 {
///         producer.put(i).unwrap();
///     }
/// });
///
/// for i in 0..8 {
///     assert_eq!(buffer.take().unwrap(), i);
/// }
/// handle.join().unwrap();
/// ```
///
/// [`put`]: BoundedBuffer::put
/// [`take`]: BoundedBuffer::take
/// [`close`]: BoundedBuffer::close
pub struct BoundedBuffer<T> {
    /// Item storage plus the closed flag, guarded by one lock.
    state: Mutex<State<T>>,
    /// Signaled after every successful `take` and on `close`.
    not_full: Condvar,
    /// Signaled after every successful `put` and on `close`.
    not_empty: Condvar,
    /// Fixed at construction; read without the lock.
    capacity: usize,
}

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

impl<T> BoundedBuffer<T> {
    /// Creates a buffer that holds at most `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::<u32>::new(4).unwrap();
    /// assert_eq!(buffer.capacity(), 4);
    ///
    /// assert!(BoundedBuffer::<u32>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        if capacity == 0 {
            return Err(InvalidCapacity);
        }
        Ok(Self {
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().expect("buffer lock poisoned")
    }

    /// Inserts `item` at the tail, blocking while the buffer is full.
    ///
    /// Wakes one blocked consumer after the insert.
    ///
    /// # Errors
    ///
    /// Returns [`PutError`] carrying `item` back if the buffer is closed,
    /// whether it was closed before the call or while this thread was
    /// waiting for space.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(2).unwrap();
    /// buffer.put("a").unwrap();
    /// buffer.put("b").unwrap();
    /// assert_eq!(buffer.len(), 2);
    ///
    /// buffer.close();
    /// let err = buffer.put("c").unwrap_err();
    /// assert_eq!(err.into_inner(), "c");
    /// ```
    pub fn put(&self, item: T) -> Result<(), PutError<T>> {
        let mut state = self.lock_state();
        // Re-check on every wakeup; waits can resume spuriously.
        while state.items.len() == self.capacity && !state.closed {
            state = self.not_full.wait(state).expect("buffer lock poisoned");
        }
        if state.closed {
            return Err(PutError(item));
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes and returns the head item, blocking while the buffer is empty.
    ///
    /// Wakes one blocked producer after the removal. Items buffered before a
    /// [`close`](BoundedBuffer::close) are still handed out; the error below
    /// only appears once the buffer is both closed and drained.
    ///
    /// # Errors
    ///
    /// Returns [`TakeError`] if the buffer is closed and empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(2).unwrap();
    /// buffer.put("first").unwrap();
    /// buffer.close();
    ///
    /// assert_eq!(buffer.take().unwrap(), "first");
    /// assert!(buffer.take().is_err());
    /// ```
    ///
    /// Blocking handoff between two threads:
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    /// use std::sync::Arc;
    /// use std::thread;
    ///
    /// let buffer = Arc::new(BoundedBuffer::new(1).unwrap());
    /// let producer = Arc::clone(&buffer);
    ///
    /// let handle = thread::spawn(move || {
    ///     producer.put(7).unwrap();
    /// });
    ///
    /// assert_eq!(buffer.take().unwrap(), 7);
    /// handle.join().unwrap();
    /// ```
    pub fn take(&self) -> Result<T, TakeError> {
        let mut state = self.lock_state();
        while state.items.is_empty() && !state.closed {
            state = self.not_empty.wait(state).expect("buffer lock poisoned");
        }
        // Drain buffered items before reporting the close.
        match state.items.pop_front() {
            Some(item) => {
                drop(state);
                self.not_full.notify_one();
                Ok(item)
            }
            None => Err(TakeError),
        }
    }

    /// Attempts to insert `item` without blocking.
    ///
    /// A closed buffer reports [`Closed`] even when it is also full.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] when the buffer is at capacity and [`Closed`] after
    /// a close; both variants carry `item` back.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::{BoundedBuffer, TryPutError};
    ///
    /// let buffer = BoundedBuffer::new(1).unwrap();
    /// buffer.try_put(1).unwrap();
    /// assert!(matches!(buffer.try_put(2), Err(TryPutError::Full(2))));
    ///
    /// buffer.close();
    /// assert!(matches!(buffer.try_put(3), Err(TryPutError::Closed(3))));
    /// ```
    ///
    /// [`Full`]: TryPutError::Full
    /// [`Closed`]: TryPutError::Closed
    pub fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        let mut state = self.lock_state();
        if state.closed {
            return Err(TryPutError::Closed(item));
        }
        if state.items.len() == self.capacity {
            return Err(TryPutError::Full(item));
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Attempts to remove the head item without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Empty`] when an open buffer has nothing buffered and
    /// [`Closed`] once a closed buffer has drained.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::{BoundedBuffer, TryTakeError};
    ///
    /// let buffer = BoundedBuffer::new(1).unwrap();
    /// assert!(matches!(buffer.try_take(), Err(TryTakeError::Empty)));
    ///
    /// buffer.put(1).unwrap();
    /// assert_eq!(buffer.try_take().unwrap(), 1);
    ///
    /// buffer.close();
    /// assert!(matches!(buffer.try_take(), Err(TryTakeError::Closed)));
    /// ```
    ///
    /// [`Empty`]: TryTakeError::Empty
    /// [`Closed`]: TryTakeError::Closed
    pub fn try_take(&self) -> Result<T, TryTakeError> {
        let mut state = self.lock_state();
        match state.items.pop_front() {
            Some(item) => {
                drop(state);
                self.not_full.notify_one();
                Ok(item)
            }
            None if state.closed => Err(TryTakeError::Closed),
            None => Err(TryTakeError::Empty),
        }
    }

    /// Removes up to `max` items from the head without blocking.
    ///
    /// Returns fewer than `max` items when the buffer holds fewer, and an
    /// empty vector when it holds none, open or closed. The returned items
    /// keep their buffer order.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(4).unwrap();
    /// for i in 0..4 {
    ///     buffer.put(i).unwrap();
    /// }
    ///
    /// assert_eq!(buffer.try_take_batch(3), vec![0, 1, 2]);
    /// assert_eq!(buffer.try_take_batch(3), vec![3]);
    /// assert!(buffer.try_take_batch(3).is_empty());
    /// ```
    pub fn try_take_batch(&self, max: usize) -> Vec<T> {
        let mut state = self.lock_state();
        let n = max.min(state.items.len());
        let batch: Vec<T> = state.items.drain(..n).collect();
        drop(state);
        if !batch.is_empty() {
            // Several slots may have opened at once.
            self.not_full.notify_all();
        }
        batch
    }

    /// Closes the buffer and wakes every blocked thread.
    ///
    /// Closing is one-way and idempotent. Buffered items survive the close
    /// and remain takeable; only inserts are cut off.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(2).unwrap();
    /// buffer.put(1).unwrap();
    /// buffer.close();
    /// buffer.close(); // no effect the second time
    ///
    /// assert!(buffer.put(2).is_err());
    /// assert_eq!(buffer.take().unwrap(), 1);
    /// assert!(buffer.take().is_err());
    /// ```
    pub fn close(&self) {
        let mut state = self.lock_state();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Returns the maximum number of items the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of items currently buffered.
    ///
    /// The count is a snapshot; concurrent threads may change it before the
    /// caller acts on it.
    pub fn len(&self) -> usize {
        self.lock_state().items.len()
    }

    /// Returns `true` if the buffer holds no items.
    pub fn is_empty(&self) -> bool {
        self.lock_state().items.is_empty()
    }

    /// Returns `true` if the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        self.lock_state().items.len() == self.capacity
    }

    /// Returns `true` once [`close`](BoundedBuffer::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }
}

impl<T> fmt::Debug for BoundedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("BoundedBuffer")
            .field("capacity", &self.capacity)
            .field("len", &state.items.len())
            .field("closed", &state.closed)
            .finish_non_exhaustive()
    }
}


#[cfg(all(test, loom))]
mod loom_tests {
    use loom::sync::Arc;
    use loom::thread;

    use super::BoundedBuffer;

    #[test]
    fn handoff_through_full_and_empty() {
        loom::model(|| {
            let buffer = Arc::new(BoundedBuffer::new(1).unwrap());
            let producer = Arc::clone(&buffer);

            let handle = thread::spawn(move || {
                producer.put(1).unwrap();
                producer.put(2).unwrap();
            });

            let first = buffer.take().unwrap();
            let second = buffer.take().unwrap();
            assert_eq!((first, second), (1, 2));

            handle.join().unwrap();
        });
    }

    #[test]
    fn close_wakes_blocked_taker() {
        loom::model(|| {
            let buffer = Arc::new(BoundedBuffer::<u32>::new(1).unwrap());
            let consumer = Arc::clone(&buffer);

            let handle = thread::spawn(move || consumer.take());

            buffer.close();
            assert!(handle.join().unwrap().is_err());
        });
    }

    #[test]
    fn close_wakes_blocked_putter() {
        loom::model(|| {
            let buffer = Arc::new(BoundedBuffer::new(1).unwrap());
            buffer.put(1).unwrap();

            let producer = Arc::clone(&buffer);
            let handle = thread::spawn(move || producer.put(2));

            buffer.close();
            assert!(handle.join().unwrap().is_err());

            // The pre-close item survives the shutdown.
            assert_eq!(buffer.take().unwrap(), 1);
            assert!(buffer.take().is_err());
        });
    }

    #[test]
    fn two_producers_conserve_items() {
        loom::model(|| {
            let buffer = Arc::new(BoundedBuffer::new(2).unwrap());
            let first = Arc::clone(&buffer);
            let second = Arc::clone(&buffer);

            let ha = thread::spawn(move || first.put(1).unwrap());
            let hb = thread::spawn(move || second.put(2).unwrap());
            ha.join().unwrap();
            hb.join().unwrap();

            let mut drained = vec![buffer.try_take().unwrap(), buffer.try_take().unwrap()];
            drained.sort_unstable();
            assert_eq!(drained, [1, 2]);
        });
    }
}
