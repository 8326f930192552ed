//! Document store adapters.

mod file;
mod in_memory;

pub use file::FileDocumentStore;
pub use in_memory::InMemoryDocumentStore;
