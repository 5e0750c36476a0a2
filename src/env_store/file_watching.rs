use std::time::Duration;

use tracing::{info, warn};

use super::{
    EnvError, EnvStore,
    file_watcher::{FileEventKind, FileWatcher},
};

/// Quiet window after the last write event before a reload fires.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

impl EnvStore {
    /// Starts observing the backing file and reloading on writes.
    ///
    /// Installs a watch on the backing file, then spawns the reload
    /// loop for the lifetime of the process. Only write events trigger
    /// a reload; rename, remove, and metadata events are ignored and may
    /// leave the underlying watch inert. Bursts of events coalesce into
    /// a single reload through a debounce window, and reloads are
    /// serialised by construction: the loop runs them one at a time.
    /// A failed background reload is logged and the previous mapping is
    /// retained.
    ///
    /// # Errors
    /// Returns [`EnvError::WatcherInit`] if the watcher cannot be
    /// created and [`EnvError::Watch`] if the watch cannot be installed
    /// on the backing file.
    pub async fn start_file_watching(&self) -> Result<(), EnvError> {
        let (mut watcher, mut event_rx) =
            FileWatcher::new().map_err(|e| EnvError::WatcherInit {
                details: e.to_string(),
            })?;

        watcher.watch_file(self.path()).map_err(|e| EnvError::Watch {
            path: self.path().to_path_buf(),
            details: e.to_string(),
        })?;

        let store = self.clone();

        tokio::spawn(async move {
            // The task owns the watcher; dropping it would tear down the
            // OS-level watch.
            let _watcher = watcher;

            let mut reload_pending = false;
            let debounce_sleep = tokio::time::sleep(DEBOUNCE_DURATION);
            tokio::pin!(debounce_sleep);

            loop {
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        let Some(event) = maybe_event else {
                            break;
                        };

                        if event.kind != FileEventKind::Modified {
                            continue;
                        }

                        reload_pending = true;
                        debounce_sleep
                            .as_mut()
                            .reset(tokio::time::Instant::now() + DEBOUNCE_DURATION);
                    }

                    _ = &mut debounce_sleep, if reload_pending => {
                        info!("env file changed, reloading");

                        if let Err(e) = store.reload() {
                            warn!("failed to reload env file: {e}");
                        }

                        reload_pending = false;
                    }
                }
            }
        });

        Ok(())
    }
}
