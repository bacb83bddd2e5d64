//! Filesystem utilities for configmerge.

pub mod atomic;

pub use atomic::atomic_write;
