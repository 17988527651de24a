//! Synchronization primitives, swappable for [`loom`] model checking.
//!
//! Everything in the crate goes through these aliases so that building with
//! `RUSTFLAGS="--cfg loom"` replaces the real mutex and condition variables
//! with loom's instrumented versions.
//!
//! [`loom`]: https://docs.rs/loom

#[cfg(loom)]
pub(crate) use loom::sync::{Condvar, Mutex, MutexGuard};

#[cfg(not(loom))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};
