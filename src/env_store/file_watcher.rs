use std::path::{Path, PathBuf};

use notify::{
    Event, EventKind, RecommendedWatcher, Watcher, event::ModifyKind, recommended_watcher,
};
use tokio::sync::mpsc;
use tracing::warn;

/// A file system event for the watched env file.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// The path of the file that changed.
    pub path: PathBuf,
    /// The type of change that occurred.
    pub kind: FileEventKind,
}

/// The type of file system change that occurred.
///
/// Only content changes are surfaced; metadata and rename modifications
/// are dropped at the source, so a `Modified` event always means the
/// file was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// File content was written.
    Modified,
    /// File was created.
    Created,
    /// File was removed.
    Removed,
}

/// File system watcher for the backing env file.
///
/// Bridges the notify crate's callback interface onto a Tokio channel so
/// the reload loop can consume events asynchronously. Errors reported by
/// the observer at runtime are logged and otherwise ignored.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Creates a new file watcher and the receiver for its events.
    ///
    /// Uses an unbounded channel since file events are infrequent but
    /// bursty.
    ///
    /// # Errors
    /// Returns error if the underlying file system watcher cannot be
    /// initialized.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<FileEvent>), notify::Error> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!("file watcher error: {e}");
                    return;
                }
            };

            let kind = match event.kind {
                EventKind::Create(_) => FileEventKind::Created,
                EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => {
                    FileEventKind::Modified
                }
                EventKind::Remove(_) => FileEventKind::Removed,
                _ => return,
            };

            for path in event.paths {
                let _ = event_tx.send(FileEvent { path, kind });
            }
        })?;

        Ok((Self { watcher }, event_rx))
    }

    /// Installs a non-recursive watch on `path`.
    ///
    /// The path is canonicalized first, so the file must exist.
    ///
    /// # Errors
    /// Returns error if the path cannot be canonicalized or the watch
    /// cannot be installed.
    pub fn watch_file(&mut self, path: impl AsRef<Path>) -> Result<(), notify::Error> {
        let canonical = path.as_ref().canonicalize()?;

        self.watcher
            .watch(&canonical, notify::RecursiveMode::NonRecursive)
    }
}
