//! Field-keyed line sorting in Rust
//!
//! This crate sorts lines of text by a single selected field, interpreted
//! lexicographically, numerically, as a human-readable size or as a month
//! name. It can also verify that an input is already in that order without
//! sorting it.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod key;
pub mod field;
pub mod compare;
pub mod core_sort;
pub mod input;

// Re-export commonly used types
pub use error::{SortError, SortResult};
pub use config::{FieldSplit, SortConfig, SortConfigBuilder, SortMode};
pub use core_sort::{CheckOutcome, CoreSort};

/// Successful run, or input already sorted in check mode
pub const EXIT_SUCCESS: i32 = 0;
/// Check mode found the input out of order
pub const EXIT_FAILURE: i32 = 1;
/// Malformed command line
pub const USAGE_FAILURE: i32 = 2;
/// Input could not be opened or read, or output could not be written
pub const SORT_FAILURE: i32 = 3;

/// Main sort function that processes input according to configuration
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    config.validate()?;
    if config.reading_from_stdin() {
        log::debug!("reading from standard input");
    }

    let core_sort = CoreSort::new(config.clone());
    core_sort.sort()?;
    Ok(EXIT_SUCCESS)
}
