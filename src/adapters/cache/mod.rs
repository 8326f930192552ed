//! Local Cache Adapters
//!
//! Implementations of the LocalCache port.
//!
//! - **FileLocalCache** - one JSON object file on disk
//! - **InMemoryLocalCache** - process-local map (testing/development)

mod file;
mod in_memory;

pub use file::FileLocalCache;
pub use in_memory::InMemoryLocalCache;
