use std::{fs::File, io::Read, path::Path};

use super::EnvError;

/// Parses env file content into `(key, raw value)` pairs.
///
/// Lines are newline-delimited (CRLF tolerated). Blank lines, comment
/// lines starting with `#`, lines without `=`, and lines whose key trims
/// to nothing are skipped silently. The split happens at the first `=`;
/// later `=` and `#` characters belong to the value. Both sides are
/// trimmed of surrounding whitespace. Duplicate keys are all emitted;
/// the store resolves them last-wins on insertion.
pub fn parse_str(content: &str) -> Vec<(String, String)> {
    content.lines().filter_map(parse_line).collect()
}

/// Opens and parses the file at `path`.
///
/// # Errors
/// Returns [`EnvError::FileOpen`] if the file cannot be opened and
/// [`EnvError::FileRead`] if reading fails mid-scan.
pub fn parse_file(path: &Path) -> Result<Vec<(String, String)>, EnvError> {
    let mut file = File::open(path).map_err(|source| EnvError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| EnvError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_str(&content))
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_owned(), value.trim().to_owned()))
}
