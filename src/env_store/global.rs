//! Process-wide store handle.
//!
//! Most callers bind one [`EnvStore`] to one file for the life of the
//! process. This module holds that handle: [`init`] performs the first
//! load, starts file watching, and publishes the store; the backing file
//! cannot be swapped without reinitialising. Independent stores remain
//! available through [`EnvStore`] directly.

use std::sync::OnceLock;

use super::{EnvError, EnvStore};

static STORE: OnceLock<EnvStore> = OnceLock::new();

/// Initialises the process-wide store from `path` and starts watching.
///
/// An empty `path` selects `.env` in the working directory. The store is
/// published before the watcher starts, so a watch-installation failure
/// leaves the handle initialised; treat such a failure as fatal to
/// startup.
///
/// # Errors
/// Returns [`EnvError::AlreadyInitialized`] on a second call, the load
/// errors of [`EnvStore::load`], or the watch errors of
/// [`EnvStore::start_file_watching`].
pub async fn init(path: &str) -> Result<&'static EnvStore, EnvError> {
    let store = EnvStore::load(path)?;

    STORE
        .set(store.clone())
        .map_err(|_| EnvError::AlreadyInitialized)?;

    store.start_file_watching().await?;

    Ok(STORE.get_or_init(|| store))
}

/// Returns the process-wide store, if [`init`] has completed.
pub fn get() -> Option<&'static EnvStore> {
    STORE.get()
}
