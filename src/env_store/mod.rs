//! Typed environment store over a line-oriented key-value file.
//!
//! Parses `.env`-style files into a shared typed mapping, serves typed
//! lookups with optional defaults and memoised coercions, appends new
//! entries back to the file, and hot-reloads the mapping when the file
//! changes on disk.

mod changes;
mod diff;
mod error;
mod file_watcher;
mod file_watching;
pub mod global;
mod parser;
mod store;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use changes::{ChangeSource, EnvChange};
pub use error::EnvError;
pub use file_watcher::{FileEvent, FileEventKind, FileWatcher};
pub use parser::{parse_file, parse_str};
pub use store::EnvStore;
pub use value::{EnvValue, UnsupportedValueType, ValueType};
