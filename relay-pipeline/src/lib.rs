//! # relay-pipeline
//!
//! Thread harness for running producer/consumer pipelines over a
//! [`relay_buffer::BoundedBuffer`].
//!
//! The crate splits a pipeline into three pieces:
//!
//! - **Sources** ([`ItemSource`]): where producers get items. Every
//!   [`Iterator`] is a source, and [`RandomStrings`] generates endless
//!   test payloads.
//! - **Sinks** ([`ItemSink`]): where consumers put items. Every `FnMut(T)`
//!   closure is a sink, and [`Collector`] gathers items for inspection.
//! - **The harness** ([`Pipeline`]): spawns named producer and consumer
//!   threads over one shared buffer, then winds the run down and reports
//!   aggregate counters.
//!
//! Two wind-down modes cover the common cases. [`Pipeline::complete`] lets
//! every source run dry, closes the buffer, and joins the consumers once
//! they have drained it. [`Pipeline::shutdown`] closes first, so producers
//! stop mid-stream and whatever the consumers never reached is reported as
//! leftover. Either way the report satisfies
//! `produced == consumed + leftover`.
//!
//! ## Example
//!
//! ```
//! use relay_buffer::BoundedBuffer;
//! use relay_pipeline::{Collector, Pipeline, RandomStrings};
//! use std::sync::Arc;
//!
//! let buffer = Arc::new(BoundedBuffer::new(4).unwrap());
//! let mut pipeline = Pipeline::new(Arc::clone(&buffer));
//!
//! let collector = Collector::new();
//! pipeline.spawn_producer(RandomStrings::with_seed(5, 1).take(50)).unwrap();
//! pipeline.spawn_producer(RandomStrings::with_seed(5, 2).take(50)).unwrap();
//! pipeline.spawn_consumer(collector.clone()).unwrap();
//!
//! let report = pipeline.complete();
//! assert_eq!(report.produced, 100);
//! assert_eq!(report.consumed, 100);
//! assert!(report.is_conserved());
//! assert_eq!(collector.len(), 100);
//! ```
//!
//! ## Logging
//!
//! Threads emit [`tracing`] events as they spawn, finish, and report. The
//! events are no-ops unless the embedding program installs a subscriber;
//! see `examples/pipeline_demo.rs` for a `tracing-subscriber` setup.

mod consumer;
mod pipeline;
mod producer;
mod sink;
mod source;

pub use consumer::{run_consumer, ConsumerStats};
pub use pipeline::{Pipeline, PipelineReport};
pub use producer::{run_producer, run_producer_with_backoff, ProducerStats};
pub use sink::{Collector, ItemSink};
pub use source::{ItemSource, RandomStrings};
