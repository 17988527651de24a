//! Producer loops that move items from a source into the buffer.

use crossbeam_utils::Backoff;
use relay_buffer::{BoundedBuffer, TryPutError};

use crate::source::ItemSource;

/// Counters reported by a finished producer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    /// Items the buffer accepted.
    pub produced: u64,
    /// Items the buffer refused because it was closed.
    pub rejected: u64,
}

/// Feeds `source` into `buffer` until the source is exhausted or the buffer
/// is closed.
///
/// Blocks whenever the buffer is full. A close observed mid-stream counts
/// the in-flight item as rejected and stops the loop; items the source had
/// not yet yielded are not counted at all.
///
/// # Examples
///
/// ```
/// use relay_buffer::BoundedBuffer;
/// use relay_pipeline::run_producer;
///
/// let buffer = BoundedBuffer::new(8).unwrap();
/// let stats = run_producer(&buffer, 0..5);
///
/// assert_eq!(stats.produced, 5);
/// assert_eq!(stats.rejected, 0);
/// assert_eq!(buffer.len(), 5);
/// ```
pub fn run_producer<T, S>(buffer: &BoundedBuffer<T>, mut source: S) -> ProducerStats
where
    S: ItemSource<T>,
{
    let mut stats = ProducerStats::default();
    while let Some(item) = source.next_item() {
        match buffer.put(item) {
            Ok(()) => stats.produced += 1,
            Err(_) => {
                stats.rejected += 1;
                break;
            }
        }
    }
    tracing::debug!(
        produced = stats.produced,
        rejected = stats.rejected,
        "producer finished"
    );
    stats
}

/// Like [`run_producer`], but spins through a [`Backoff`] before committing
/// to a blocking `put`.
///
/// Under a fast consumer the full condition usually clears within a few
/// spins, which keeps the producer off the condition variable entirely. Once
/// the backoff is exhausted the loop falls back to the blocking path, so a
/// stalled consumer never turns this into a busy wait.
pub fn run_producer_with_backoff<T, S>(buffer: &BoundedBuffer<T>, mut source: S) -> ProducerStats
where
    S: ItemSource<T>,
{
    let mut stats = ProducerStats::default();
    'items: while let Some(mut item) = source.next_item() {
        let backoff = Backoff::new();
        loop {
            match buffer.try_put(item) {
                Ok(()) => {
                    stats.produced += 1;
                    continue 'items;
                }
                Err(TryPutError::Full(returned)) => {
                    if backoff.is_completed() {
                        match buffer.put(returned) {
                            Ok(()) => stats.produced += 1,
                            Err(_) => {
                                stats.rejected += 1;
                                break 'items;
                            }
                        }
                        continue 'items;
                    }
                    item = returned;
                    backoff.snooze();
                }
                Err(TryPutError::Closed(_)) => {
                    stats.rejected += 1;
                    break 'items;
                }
            }
        }
    }
    tracing::debug!(
        produced = stats.produced,
        rejected = stats.rejected,
        "producer finished"
    );
    stats
}
