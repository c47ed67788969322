//! Storage layer for Finsight
//!
//! Snapshots are plain JSON documents read and written with atomic
//! replacement and automatic directory creation.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use snapshot::Snapshot;
