use std::{fs::OpenOptions, io::Write, path::Path};

use super::EnvError;

/// Appends a single `key=value` record to the file at `path`.
///
/// The file is opened append + write-only and created with mode 0644 if
/// absent. The record carries the caller's raw value string, unparsed
/// and unquoted; the file is never rewritten or deduplicated, so
/// duplicate keys accumulate and resolve last-wins on the next reload.
///
/// # Errors
/// Returns [`EnvError::FileWrite`] if the file cannot be opened or the
/// record cannot be written.
pub fn append_entry(path: &Path, key: &str, value: &str) -> Result<(), EnvError> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path).map_err(|source| EnvError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    writeln!(file, "{key}={value}").map_err(|source| EnvError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
