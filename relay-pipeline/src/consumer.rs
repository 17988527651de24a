//! Consumer loops that move items from the buffer into a sink.

use relay_buffer::BoundedBuffer;

use crate::sink::ItemSink;

/// Counters reported by a finished consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Items taken from the buffer and handed to the sink.
    pub consumed: u64,
}

/// Drains `buffer` into `sink` until the buffer is closed and empty.
///
/// Blocks whenever the buffer is empty. After a close the loop keeps
/// consuming whatever was buffered before ending, so no accepted item is
/// left behind.
///
/// # Examples
///
/// ```
/// use relay_buffer::BoundedBuffer;
/// use relay_pipeline::run_consumer;
///
/// let buffer = BoundedBuffer::new(8).unwrap();
/// for i in 0..3 {
///     buffer.put(i).unwrap();
/// }
/// buffer.close();
///
/// let mut received = Vec::new();
/// let stats = run_consumer(&buffer, |item| received.push(item));
///
/// assert_eq!(stats.consumed, 3);
/// assert_eq!(received, vec![0, 1, 2]);
/// ```
pub fn run_consumer<T, K>(buffer: &BoundedBuffer<T>, mut sink: K) -> ConsumerStats
where
    K: ItemSink<T>,
{
    let mut stats = ConsumerStats::default();
    while let Ok(item) = buffer.take() {
        sink.accept(item);
        stats.consumed += 1;
    }
    tracing::debug!(consumed = stats.consumed, "consumer finished");
    stats
}
