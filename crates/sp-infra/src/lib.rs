pub mod storage;
pub mod time;

pub use storage::{FallbackKeyValueStore, FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
