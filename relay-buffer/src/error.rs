//! Error types for buffer construction and operations.

use core::fmt;

/// Error returned by [`BoundedBuffer::new`] when the requested capacity is zero.
///
/// A zero-capacity buffer could never hold an item, so every `put` would
/// block forever and every `take` would never observe data.
///
/// [`BoundedBuffer::new`]: crate::BoundedBuffer::new
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCapacity;

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capacity must be at least 1")
    }
}

impl std::error::Error for InvalidCapacity {}

/// Error returned by [`BoundedBuffer::put`] when the buffer has been closed.
///
/// The rejected item is returned so it can be recovered or rerouted.
///
/// [`BoundedBuffer::put`]: crate::BoundedBuffer::put
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutError<T>(pub T);

impl<T> PutError<T> {
    /// Consumes the error, returning the item that was not inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for PutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer closed")
    }
}

impl<T: fmt::Debug> std::error::Error for PutError<T> {}

/// Error returned by [`BoundedBuffer::take`] when the buffer is closed and
/// no items remain.
///
/// Items buffered before the close are always handed out first; this error
/// only appears once the buffer has fully drained.
///
/// [`BoundedBuffer::take`]: crate::BoundedBuffer::take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeError;

impl fmt::Display for TakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer closed and empty")
    }
}

impl std::error::Error for TakeError {}

/// Error returned by [`BoundedBuffer::try_put`].
///
/// [`BoundedBuffer::try_put`]: crate::BoundedBuffer::try_put
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryPutError<T> {
    /// The buffer is at capacity but still open.
    ///
    /// The item is returned so it can be retried or handled.
    Full(T),

    /// The buffer has been closed.
    ///
    /// The item is returned; it will never be accepted.
    Closed(T),
}

impl<T> TryPutError<T> {
    /// Consumes the error, returning the item that was not inserted.
    pub fn into_inner(self) -> T {
        match self {
            TryPutError::Full(v) => v,
            TryPutError::Closed(v) => v,
        }
    }

    /// Returns `true` if this error is the `Full` variant.
    pub fn is_full(&self) -> bool {
        matches!(self, TryPutError::Full(_))
    }

    /// Returns `true` if this error is the `Closed` variant.
    pub fn is_closed(&self) -> bool {
        matches!(self, TryPutError::Closed(_))
    }
}

impl<T> fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPutError::Full(_) => write!(f, "buffer full"),
            TryPutError::Closed(_) => write!(f, "buffer closed"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for TryPutError<T> {}

/// Error returned by [`BoundedBuffer::try_take`].
///
/// [`BoundedBuffer::try_take`]: crate::BoundedBuffer::try_take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryTakeError {
    /// The buffer is empty but still open.
    ///
    /// More items may arrive; a blocking [`take`] would wait for them.
    ///
    /// [`take`]: crate::BoundedBuffer::take
    Empty,

    /// The buffer is closed and fully drained.
    ///
    /// No item will ever be available again.
    Closed,
}

impl TryTakeError {
    /// Returns `true` if this error is the `Empty` variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, TryTakeError::Empty)
    }

    /// Returns `true` if this error is the `Closed` variant.
    pub fn is_closed(&self) -> bool {
        matches!(self, TryTakeError::Closed)
    }
}

impl fmt::Display for TryTakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryTakeError::Empty => write!(f, "buffer empty"),
            TryTakeError::Closed => write!(f, "buffer closed and empty"),
        }
    }
}

impl std::error::Error for TryTakeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_put_error_accessors() {
        let full: TryPutError<u32> = TryPutError::Full(7);
        assert!(full.is_full());
        assert!(!full.is_closed());
        assert_eq!(full.into_inner(), 7);

        let closed: TryPutError<u32> = TryPutError::Closed(9);
        assert!(closed.is_closed());
        assert_eq!(closed.into_inner(), 9);
    }

    #[test]
    fn try_take_error_accessors() {
        assert!(TryTakeError::Empty.is_empty());
        assert!(!TryTakeError::Empty.is_closed());
        assert!(TryTakeError::Closed.is_closed());
    }

    #[test]
    fn put_error_returns_item() {
        let err = PutError("payload");
        assert_eq!(err.into_inner(), "payload");
    }

    #[test]
    fn display_messages() {
        assert_eq!(InvalidCapacity.to_string(), "capacity must be at least 1");
        assert_eq!(PutError(1).to_string(), "buffer closed");
        assert_eq!(TakeError.to_string(), "buffer closed and empty");
        assert_eq!(TryPutError::Full(1).to_string(), "buffer full");
        assert_eq!(TryTakeError::Empty.to_string(), "buffer empty");
    }
}
