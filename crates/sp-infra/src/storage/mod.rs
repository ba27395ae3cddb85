//! Key-value store adapters.

mod fallback;
mod file;
mod memory;

pub use fallback::FallbackKeyValueStore;
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
