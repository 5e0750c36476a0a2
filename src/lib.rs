//! EnvPilot - typed environment configuration with hot reload.
//!
//! EnvPilot manages process environment configuration stored in a
//! line-oriented key-value file (conventionally `.env`). The main
//! features include:
//!
//! - Typed in-memory store with memoised coercions and optional defaults
//! - Automatic reload when the backing file changes on disk
//! - Change broadcasting for reload- and write-driven updates
//! - `pilot` CLI for appending typed entries to the file
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use envpilot::EnvStore;
//!
//! # fn main() -> Result<(), envpilot::EnvError> {
//! // Load the store from a .env file
//! let store = EnvStore::load(".env")?;
//!
//! // Access typed values, with or without defaults
//! let port = store.get_as_int("PORT", Some(8080))?;
//! let debug = store.get_as_bool("DEBUG", Some(false))?;
//! println!("port {port}, debug {debug}");
//! # Ok(())
//! # }
//! ```

/// Typed environment store with coercion, write-back, and file watching.
pub mod env_store;

/// Command-line interface for appending typed entries.
pub mod cli;

/// Tracing initialisation for the `pilot` binary.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use env_store::{EnvError, EnvStore, EnvValue, ValueType};
