// Storage layer: best-effort key-value persistence and the typed
// application accessors built on top of it.

mod app;
mod keyvalue;

pub use app::{AppStorage, PHRASE_KEY, PROGRESS_KEY, SETTINGS_KEY};
pub use keyvalue::{JsonFileStore, KeyValueStore, MemoryStore};
