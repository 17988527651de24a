//! Two producers of random strings, two logging consumers, one buffer.
//!
//! Run with:
//!
//! ```text
//! cargo run --example pipeline_demo -p relay-pipeline
//! RUST_LOG=debug cargo run --example pipeline_demo -p relay-pipeline
//! ```

use std::sync::Arc;

use relay_buffer::BoundedBuffer;
use relay_pipeline::{Pipeline, RandomStrings};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let buffer = Arc::new(BoundedBuffer::<String>::new(100).expect("capacity is non-zero"));
    let mut pipeline = Pipeline::new(Arc::clone(&buffer));

    for seed in 0..2 {
        let source = RandomStrings::with_seed(5, seed).take(500);
        pipeline.spawn_producer(source).expect("spawn producer");
    }
    for _ in 0..2 {
        pipeline
            .spawn_consumer(|item: String| tracing::debug!(%item, "consumed"))
            .expect("spawn consumer");
    }

    let report = pipeline.complete();
    tracing::info!(
        produced = report.produced,
        consumed = report.consumed,
        leftover = report.leftover,
        "run finished"
    );
    assert!(report.is_conserved());
}
