//! # relay-buffer
//!
//! Blocking bounded FIFO buffer for producer/consumer pipelines, built on a
//! mutex and a pair of condition variables.
//!
//! ## Features
//!
//! - **Bounded**: capacity is fixed at construction; producers block instead
//!   of growing the buffer
//! - **FIFO**: items come out in exactly the order they went in
//! - **MPMC**: any number of producers and consumers share one buffer through
//!   an `Arc`
//! - **Graceful shutdown**: [`close`](BoundedBuffer::close) wakes every
//!   blocked thread, rejects new inserts, and lets consumers drain what is
//!   already buffered
//! - **Non-blocking variants**: [`try_put`](BoundedBuffer::try_put),
//!   [`try_take`](BoundedBuffer::try_take), and
//!   [`try_take_batch`](BoundedBuffer::try_take_batch) for callers that
//!   cannot wait
//!
//! ## Design
//!
//! The buffer is a classic monitor. One mutex guards a `VecDeque` plus a
//! `closed` flag; two condition variables split the wakeups by role so a
//! producer never burns a wakeup on another producer. Blocking calls re-check
//! their predicate in a loop, which makes spurious wakeups harmless, and
//! every successful operation signals the opposite side once.
//!
//! This is deliberately not a lock-free queue. Throughput under heavy
//! contention will trail `crossbeam`'s channels, but blocking semantics,
//! close-then-drain shutdown, and item handback on rejection fall out
//! naturally from the monitor shape.
//!
//! ## Example
//!
//! ```
//! use relay_buffer::BoundedBuffer;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let buffer = Arc::new(BoundedBuffer::new(2).unwrap());
//!
//! let producer = Arc::clone(&buffer);
//! let handle = thread::spawn(move || {
//!     for i in 0..10 {
//!         // Blocks whenever the two slots are occupied.
//!         producer.put(i).unwrap();
//!     }
//!     producer.close();
//! });
//!
//! let mut received = Vec::new();
//! while let Ok(item) = buffer.take() {
//!     received.push(item);
//! }
//!
//! handle.join().unwrap();
//! assert_eq!(received, (0..10).collect::<Vec<_>>());
//! ```
//!
//! ## Model checking
//!
//! The blocking paths are verified with [`loom`]:
//!
//! ```text
//! RUSTFLAGS="--cfg loom" cargo test -p relay-buffer --lib
//! ```
//!
//! [`loom`]: https://docs.rs/loom

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod buffer;
mod error;
mod sync;

pub use buffer::BoundedBuffer;
pub use error::{InvalidCapacity, PutError, TakeError, TryPutError, TryTakeError};
