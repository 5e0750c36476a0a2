use std::{
    collections::HashMap,
    mem,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockWriteGuard},
};

use futures::Stream;
use tokio::sync::broadcast;

use super::{ChangeSource, EnvChange, EnvError, EnvValue, ValueType, diff, parser, writer};

/// Backing file used when the caller supplies an empty path.
const DEFAULT_ENV_FILE: &str = ".env";

/// A thread-safe typed store over one line-oriented env file.
///
/// The store holds the mapping from key to [`EnvValue`] behind a shared
/// lock and broadcasts [`EnvChange`]s when a reload or a write alters
/// the mapping. Cloning an `EnvStore` clones the handle, not the data;
/// all clones observe the same mapping.
#[derive(Clone, Debug)]
pub struct EnvStore {
    variables: Arc<RwLock<HashMap<String, EnvValue>>>,
    file_path: PathBuf,
    change_sender: broadcast::Sender<EnvChange>,
}

impl EnvStore {
    /// Creates an empty store bound to `path` without touching the file.
    ///
    /// An empty `path` selects `.env` in the working directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let (change_sender, _) = broadcast::channel(1000);

        Self {
            variables: Arc::new(RwLock::new(HashMap::new())),
            file_path: resolve_path(path),
            change_sender,
        }
    }

    /// Creates a store bound to `path` and performs the initial load.
    ///
    /// An empty `path` selects `.env` in the working directory.
    ///
    /// # Errors
    /// Returns [`EnvError::FileOpen`] if the file cannot be opened and
    /// [`EnvError::FileRead`] if reading fails mid-scan.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let store = Self::new(path);
        store.reload()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Replaces the whole mapping with a fresh parse of the backing file.
    ///
    /// The swap happens wholesale under the write lock: a racing lookup
    /// observes either the pre- or post-reload mapping in its entirety,
    /// never a half-reloaded state. Duplicate keys in the file resolve to
    /// their last occurrence. Per-key differences against the previous
    /// mapping are broadcast to subscribers after the swap; entries that
    /// merely lost a memoised tag do not count as changed.
    ///
    /// On error the previous mapping is retained.
    ///
    /// # Errors
    /// Returns [`EnvError::FileOpen`] or [`EnvError::FileRead`] when the
    /// backing file cannot be scanned.
    pub fn reload(&self) -> Result<(), EnvError> {
        let entries = parser::parse_file(&self.file_path)?;

        let fresh: HashMap<String, EnvValue> = entries
            .into_iter()
            .map(|(key, raw)| (key, EnvValue::Str(raw)))
            .collect();

        let previous = {
            let mut variables = self.write_variables();
            mem::replace(&mut *variables, fresh.clone())
        };

        for change in diff::diff_maps(&previous, &fresh, ChangeSource::Reload) {
            self.broadcast_change(change);
        }

        Ok(())
    }

    /// Looks up the current entry for `key`, whatever its tag.
    pub fn get(&self, key: &str) -> Option<EnvValue> {
        let variables = self
            .variables
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        variables.get(key).cloned()
    }

    /// Returns a clone of the current mapping.
    pub fn snapshot(&self) -> HashMap<String, EnvValue> {
        let variables = self
            .variables
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        variables.clone()
    }

    /// Retrieves the value of `key` as a string.
    ///
    /// Only a `Str`-tagged entry matches; a memoised scalar is a type
    /// mismatch, with no formatting back to string. On a miss or a
    /// mismatch the default is returned when supplied.
    ///
    /// # Errors
    /// Returns [`EnvError::NotFoundOrMismatch`] when the key is absent or
    /// mismatched and no default was provided.
    pub fn get_as_string(&self, key: &str, default: Option<&str>) -> Result<String, EnvError> {
        match self.coerced(key, ValueType::String) {
            Some(EnvValue::Str(value)) => Ok(value),
            _ => default
                .map(str::to_owned)
                .ok_or(EnvError::NotFoundOrMismatch),
        }
    }

    /// Retrieves the value of `key` as a signed integer.
    ///
    /// A `Str` entry that parses as decimal `i64` is memoised as `Int`
    /// in place, so later reads skip the reparse. Overflow is a coercion
    /// failure. On a miss or a failed coercion the default is returned
    /// when supplied.
    ///
    /// # Errors
    /// Returns [`EnvError::NotFoundOrMismatch`] when the key is absent or
    /// not coercible and no default was provided.
    pub fn get_as_int(&self, key: &str, default: Option<i64>) -> Result<i64, EnvError> {
        self.coerced(key, ValueType::Int)
            .as_ref()
            .and_then(EnvValue::as_int)
            .or(default)
            .ok_or(EnvError::NotFoundOrMismatch)
    }

    /// Retrieves the value of `key` as a boolean.
    ///
    /// A `Str` entry drawn from the fixed vocabulary (`1 t T TRUE true
    /// True` / `0 f F FALSE false False`) is memoised as `Bool` in place.
    /// On a miss or a failed coercion the default is returned when
    /// supplied.
    ///
    /// # Errors
    /// Returns [`EnvError::NotFoundOrMismatch`] when the key is absent or
    /// not coercible and no default was provided.
    pub fn get_as_bool(&self, key: &str, default: Option<bool>) -> Result<bool, EnvError> {
        self.coerced(key, ValueType::Bool)
            .as_ref()
            .and_then(EnvValue::as_bool)
            .or(default)
            .ok_or(EnvError::NotFoundOrMismatch)
    }

    /// Retrieves the value of `key` as a double-precision float.
    ///
    /// A `Str` entry that parses as `f64` (exponent notation included)
    /// is memoised as `Float` in place. On a miss or a failed coercion
    /// the default is returned when supplied.
    ///
    /// # Errors
    /// Returns [`EnvError::NotFoundOrMismatch`] when the key is absent or
    /// not coercible and no default was provided.
    pub fn get_as_float(&self, key: &str, default: Option<f64>) -> Result<f64, EnvError> {
        self.coerced(key, ValueType::Float)
            .as_ref()
            .and_then(EnvValue::as_float)
            .or(default)
            .ok_or(EnvError::NotFoundOrMismatch)
    }

    /// Retrieves the value of `key` coerced to `target`, as a tagged value.
    ///
    /// Applies the same coercion table and memoisation as the typed
    /// accessors. On a miss or a failed coercion the default is returned
    /// when supplied.
    ///
    /// # Errors
    /// Returns [`EnvError::NotFoundOrMismatch`] when the key is absent or
    /// not coercible and no default was provided.
    pub fn get_as_any(
        &self,
        key: &str,
        target: ValueType,
        default: Option<EnvValue>,
    ) -> Result<EnvValue, EnvError> {
        self.coerced(key, target)
            .or(default)
            .ok_or(EnvError::NotFoundOrMismatch)
    }

    /// Sets `key` to a typed value and appends the record to `file_path`.
    ///
    /// The raw value must parse as `value_type`; on failure nothing is
    /// touched. On success the in-memory entry is upserted with the
    /// scalar tag (`Str` for `string`), the change is broadcast, and the
    /// line `key=value` is appended to `file_path` (created if absent,
    /// empty meaning `.env`). Appends accumulate duplicates; a later
    /// reload resolves each key last-wins.
    ///
    /// # Errors
    /// Returns [`EnvError::InvalidValue`] when the raw value does not
    /// parse (file untouched), or [`EnvError::FileWrite`] when the append
    /// fails (in-memory state already updated).
    pub fn set(
        &self,
        key: &str,
        value: &str,
        value_type: ValueType,
        file_path: impl AsRef<Path>,
    ) -> Result<(), EnvError> {
        let typed = EnvValue::parse_as(value, value_type).ok_or_else(|| EnvError::InvalidValue {
            value_type,
            raw: value.to_owned(),
        })?;

        let old_value = {
            let mut variables = self.write_variables();
            variables.insert(key.to_owned(), typed.clone())
        };

        self.broadcast_change(EnvChange::new(
            key.to_owned(),
            old_value,
            Some(typed),
            ChangeSource::Set,
        ));

        writer::append_entry(&resolve_path(file_path), key, value)
    }

    /// Creates a stream of [`EnvChange`]s for one key.
    ///
    /// The pattern is an exact key, or `"*"` to receive every change.
    /// The stream ends when the store is dropped.
    pub fn subscribe_to_key(&self, pattern: &str) -> impl Stream<Item = EnvChange> {
        let pattern = pattern.to_owned();
        let receiver = self.change_sender.subscribe();

        futures::stream::unfold(receiver, move |mut receiver| {
            let pattern = pattern.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(change) => {
                            if key_matches(&change.key, &pattern) {
                                return Some((change, receiver));
                            }
                        }
                        Err(_) => return None,
                    }
                }
            }
        })
    }

    /// Coerces the current entry for `key` toward `target`, memoising a
    /// successful `Str` -> scalar coercion in place.
    ///
    /// Takes the write lock up-front: the memoisation side-effect may
    /// fire on any `Str` hit. No file I/O happens on this path.
    fn coerced(&self, key: &str, target: ValueType) -> Option<EnvValue> {
        let mut variables = self.write_variables();

        let current = variables.get(key)?;
        let coerced = current.coerce(target)?;
        let memoise =
            current.value_type() == ValueType::String && target != ValueType::String;

        if memoise {
            variables.insert(key.to_owned(), coerced.clone());
        }

        Some(coerced)
    }

    fn write_variables(&self) -> RwLockWriteGuard<'_, HashMap<String, EnvValue>> {
        self.variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast_change(&self, change: EnvChange) {
        let _ = self.change_sender.send(change);
    }
}

fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        PathBuf::from(DEFAULT_ENV_FILE)
    } else {
        path.to_path_buf()
    }
}

fn key_matches(key: &str, pattern: &str) -> bool {
    pattern == "*" || key == pattern
}
