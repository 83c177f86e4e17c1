pub mod hosts;
pub mod iterator;
pub mod logging;
pub mod model;
pub mod traits;

// Re-export common types for convenience
pub use hosts::HostParser;
pub use iterator::{
    make_iterator_from, ErrorKind, IterError, IterStats, IteratorOptions, RowError, RowIterator,
};
pub use model::*;
pub use traits::*;
