//! Thread harness wiring producers and consumers to one shared buffer.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use relay_buffer::BoundedBuffer;

use crate::consumer::{run_consumer, ConsumerStats};
use crate::producer::{run_producer, run_producer_with_backoff, ProducerStats};
use crate::sink::ItemSink;
use crate::source::ItemSource;

/// Owns the threads of one producer/consumer run over a shared buffer.
///
/// Producers and consumers are spawned one at a time, then the whole run is
/// wound down with [`complete`](Pipeline::complete) (let the sources finish)
/// or [`shutdown`](Pipeline::shutdown) (cut the sources off now). Both wake
/// every blocked thread, join everything, and aggregate the per-thread
/// counters into a [`PipelineReport`].
///
/// # Examples
///
/// ```
/// use relay_buffer::BoundedBuffer;
/// use relay_pipeline::{Collector, Pipeline};
/// use std::sync::Arc;
///
/// let buffer = Arc::new(BoundedBuffer::new(8).unwrap());
/// let mut pipeline = Pipeline::new(Arc::clone(&buffer));
///
/// let collector = Collector::new();
/// pipeline.spawn_producer(0..100).unwrap();
/// pipeline.spawn_consumer(collector.clone()).unwrap();
///
/// let report = pipeline.complete();
/// assert_eq!(report.produced, 100);
/// assert_eq!(report.consumed, 100);
/// assert!(report.is_conserved());
///
/// // One producer and one consumer, so arrival order is put order.
/// assert_eq!(collector.into_items(), (0..100).collect::<Vec<_>>());
/// ```
pub struct Pipeline<T> {
    buffer: Arc<BoundedBuffer<T>>,
    producers: Vec<JoinHandle<ProducerStats>>,
    consumers: Vec<JoinHandle<ConsumerStats>>,
}

/// Totals aggregated from every thread after a pipeline has wound down.
///
/// `produced` counts buffer-accepted puts, `rejected` counts puts refused by
/// the close, and `leftover` counts items still buffered once every thread
/// exited. Leftovers can only appear on runs with no consumers or with
/// sources still mid-stream at shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Items accepted by the buffer across all producers.
    pub produced: u64,
    /// Items refused by a closed buffer across all producers.
    pub rejected: u64,
    /// Items taken from the buffer across all consumers.
    pub consumed: u64,
    /// Items still in the buffer after the run.
    pub leftover: usize,
}

impl PipelineReport {
    /// Returns `true` if every accepted item was either consumed or is
    /// still sitting in the buffer.
    pub fn is_conserved(&self) -> bool {
        self.produced == self.consumed + self.leftover as u64
    }
}

impl<T: Send + 'static> Pipeline<T> {
    /// Creates a pipeline around an existing buffer.
    ///
    /// The buffer is shared, so callers can keep their own handle to it and
    /// close it out from under the pipeline at any point.
    pub fn new(buffer: Arc<BoundedBuffer<T>>) -> Self {
        Self {
            buffer,
            producers: Vec::new(),
            consumers: Vec::new(),
        }
    }

    /// Returns the buffer this pipeline runs over.
    pub fn buffer(&self) -> &Arc<BoundedBuffer<T>> {
        &self.buffer
    }

    /// Spawns a producer thread feeding `source` into the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn_producer<S>(&mut self, source: S) -> io::Result<()>
    where
        S: ItemSource<T> + Send + 'static,
    {
        let name = format!("producer-{}", self.producers.len());
        tracing::debug!(worker = %name, "spawning producer");
        let buffer = Arc::clone(&self.buffer);
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || run_producer(&buffer, source))?;
        self.producers.push(handle);
        Ok(())
    }

    /// Spawns a producer thread that spins briefly before blocking on a
    /// full buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn_backoff_producer<S>(&mut self, source: S) -> io::Result<()>
    where
        S: ItemSource<T> + Send + 'static,
    {
        let name = format!("producer-{}", self.producers.len());
        tracing::debug!(worker = %name, "spawning backoff producer");
        let buffer = Arc::clone(&self.buffer);
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || run_producer_with_backoff(&buffer, source))?;
        self.producers.push(handle);
        Ok(())
    }

    /// Spawns a consumer thread draining the buffer into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn_consumer<K>(&mut self, sink: K) -> io::Result<()>
    where
        K: ItemSink<T> + Send + 'static,
    {
        let name = format!("consumer-{}", self.consumers.len());
        tracing::debug!(worker = %name, "spawning consumer");
        let buffer = Arc::clone(&self.buffer);
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || run_consumer(&buffer, sink))?;
        self.consumers.push(handle);
        Ok(())
    }

    /// Closes the buffer without joining anything.
    ///
    /// Blocked threads wake and wind down on their own; a later
    /// [`complete`](Pipeline::complete) or [`shutdown`](Pipeline::shutdown)
    /// still joins them.
    pub fn close(&self) {
        self.buffer.close();
    }

    /// Lets every producer finish, closes the buffer, then joins the
    /// consumers.
    ///
    /// The close sits between the two join rounds, so consumers drain every
    /// accepted item before they see the shutdown. With at least one
    /// consumer the report comes back with `leftover == 0`.
    ///
    /// # Panics
    ///
    /// Panics if a producer or consumer thread panicked.
    pub fn complete(mut self) -> PipelineReport {
        let mut report = PipelineReport::default();

        for handle in self.producers.drain(..) {
            let stats = handle.join().expect("producer thread panicked");
            report.produced += stats.produced;
            report.rejected += stats.rejected;
        }

        self.buffer.close();

        for handle in self.consumers.drain(..) {
            let stats = handle.join().expect("consumer thread panicked");
            report.consumed += stats.consumed;
        }

        report.leftover = self.buffer.len();
        tracing::info!(
            produced = report.produced,
            rejected = report.rejected,
            consumed = report.consumed,
            leftover = report.leftover,
            "pipeline complete"
        );
        report
    }

    /// Closes the buffer immediately, then joins every thread.
    ///
    /// Producers mid-stream get their current item back as a rejection and
    /// stop; consumers drain what was accepted before the close. Items a
    /// consumer never took show up as `leftover`.
    ///
    /// # Panics
    ///
    /// Panics if a producer or consumer thread panicked.
    pub fn shutdown(self) -> PipelineReport {
        self.buffer.close();
        self.complete()
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("producers", &self.producers.len())
            .field("consumers", &self.consumers.len())
            .field("buffer", &self.buffer)
            .finish()
    }
}
