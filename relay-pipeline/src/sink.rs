//! Item sinks receiving what consumer threads take.

use std::sync::{Arc, Mutex};

/// Receives the items a consumer pulls out of the buffer.
///
/// Blanket-implemented for every `FnMut(T)` closure, so a consumer can be
/// wired up with nothing more than `|item| process(item)`.
pub trait ItemSink<T> {
    /// Handles one item taken from the buffer.
    fn accept(&mut self, item: T);
}

impl<T, F> ItemSink<T> for F
where
    F: FnMut(T),
{
    fn accept(&mut self, item: T) {
        self(item);
    }
}

/// Sink that gathers items into shared storage.
///
/// Clones share the same underlying storage, so one `Collector` can be
/// handed to several consumer threads and inspected from the outside after
/// the run. Insertion order across threads is whatever order the consumers
/// drained the buffer in.
///
/// # Examples
///
/// ```
/// use relay_pipeline::{Collector, ItemSink};
///
/// let mut collector = Collector::new();
/// collector.accept(1);
/// collector.accept(2);
///
/// assert_eq!(collector.len(), 2);
/// assert_eq!(collector.snapshot(), vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct Collector<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Collector<T> {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the number of items collected so far.
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    /// Returns `true` if nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    /// Returns a copy of everything collected so far.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock_items().clone()
    }

    /// Consumes the collector and returns the collected items.
    ///
    /// When other clones are still alive their shared storage stays intact
    /// and this returns the items collected up to this point, leaving the
    /// clones with empty storage.
    pub fn into_items(self) -> Vec<T> {
        match Arc::try_unwrap(self.items) {
            Ok(mutex) => mutex.into_inner().expect("collector lock poisoned"),
            Err(shared) => shared
                .lock()
                .expect("collector lock poisoned")
                .drain(..)
                .collect(),
        }
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<T>> {
        self.items.lock().expect("collector lock poisoned")
    }
}

impl<T> Clone for Collector<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemSink<T> for Collector<T> {
    fn accept(&mut self, item: T) {
        self.lock_items().push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut total = 0;
        {
            let mut sink = |item: i32| total += item;
            sink.accept(1);
            sink.accept(2);
            sink.accept(3);
        }
        assert_eq!(total, 6);
    }

    #[test]
    fn collector_gathers_in_accept_order() {
        let mut collector = Collector::new();
        collector.accept("a");
        collector.accept("b");
        assert_eq!(collector.snapshot(), vec!["a", "b"]);
    }

    #[test]
    fn clones_share_storage() {
        let collector = Collector::new();
        let mut clone = collector.clone();

        clone.accept(7);
        assert_eq!(collector.len(), 1);
        assert_eq!(collector.snapshot(), vec![7]);
    }

    #[test]
    fn into_items_with_live_clone_drains_shared_storage() {
        let collector = Collector::new();
        let mut clone = collector.clone();
        clone.accept(1);

        assert_eq!(collector.into_items(), vec![1]);
        assert!(clone.is_empty());
    }
}
