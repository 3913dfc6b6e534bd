//! File watching for automatic dataset reloads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use tipboard::Config;

use crate::errors::{Error, Result};
use crate::runner::RunnerEvent;

type NotifyDebouncer = Debouncer<RecommendedWatcher>;

fn get_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok()?.modified().ok()
}

/// Check if any paths have changed since last recorded.
/// First-time observations are recorded but do not count as changes.
fn has_actual_changes(paths: &[PathBuf], mtimes: &mut HashMap<PathBuf, SystemTime>) -> bool {
    let mut changed = false;
    for path in paths {
        if let Some(current_mtime) = get_mtime(path) {
            match mtimes.get(path) {
                Some(previous_mtime) if *previous_mtime != current_mtime => {
                    mtimes.insert(path.clone(), current_mtime);
                    changed = true;
                }
                Some(_) => {}
                None => {
                    mtimes.insert(path.clone(), current_mtime);
                }
            }
        }
    }
    changed
}

pub struct WatcherHandle {
    shutdown_tx: oneshot::Sender<()>,
    _debouncer: NotifyDebouncer,
}

impl WatcherHandle {
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Start watching the dataset file and emit a reload event on change.
///
/// The parent directory is watched rather than the file itself, since
/// editors and exporters commonly replace the file and would drop an
/// inode-level watch. Returns `None` if `config.auto_reload` is false.
pub async fn start_watcher(
    dataset_path: PathBuf,
    event_tx: mpsc::Sender<RunnerEvent>,
    config: &Config,
) -> Result<Option<WatcherHandle>> {
    if !config.auto_reload {
        return Ok(None);
    }

    let (tx, rx) = std::sync::mpsc::channel();

    let debounce_duration = Duration::from_millis(config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(|e| Error::Watch(e.to_string()))?;

    let watch_target = match dataset_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => dataset_path.clone(),
    };
    debouncer
        .watcher()
        .watch(&watch_target, RecursiveMode::NonRecursive)
        .map_err(|e| Error::Watch(e.to_string()))?;

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    let (file_event_tx, mut file_event_rx) = mpsc::channel(32);
    tokio::task::spawn_blocking(move || {
        while let Ok(event) = rx.recv() {
            if file_event_tx.blocking_send(event).is_err() {
                break;
            }
        }
    });

    let dataset_name = dataset_path.file_name().map(|n| n.to_os_string());
    let mut mtimes: HashMap<PathBuf, SystemTime> = HashMap::new();

    if let Ok(canonical) = dataset_path.canonicalize() {
        if let Some(mtime) = get_mtime(&canonical) {
            mtimes.insert(canonical, mtime);
        }
    }

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    break;
                }

                event = file_event_rx.recv() => {
                    match event {
                        Some(Ok(events)) => {
                            let dataset_paths: Vec<PathBuf> = events
                                .iter()
                                .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                                .filter(|e| {
                                    e.path.file_name().map(|n| Some(n.to_os_string()) == dataset_name).unwrap_or(false)
                                })
                                .filter_map(|e| e.path.canonicalize().ok())
                                .collect();

                            if !dataset_paths.is_empty() && has_actual_changes(&dataset_paths, &mut mtimes) {
                                let _ = event_tx.send(RunnerEvent::DatasetChanged).await;
                            }
                        }
                        Some(Err(e)) => {
                            warn!("watch error: {e:?}");
                        }
                        None => {
                            break;
                        }
                    }
                }
            }
        }
    });

    Ok(Some(WatcherHandle {
        shutdown_tx,
        _debouncer: debouncer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_not_a_change() {
        let dir = std::env::temp_dir().join(format!("tipboard-watch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tips.json");
        std::fs::write(&path, "[]").unwrap();

        let mut mtimes = HashMap::new();
        let paths = vec![path.clone()];
        assert!(!has_actual_changes(&paths, &mut mtimes));
        // A second check without modification stays quiet.
        assert!(!has_actual_changes(&paths, &mut mtimes));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn recorded_mtime_change_is_detected() {
        let dir = std::env::temp_dir().join(format!("tipboard-watch-mod-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tips.json");
        std::fs::write(&path, "[]").unwrap();

        let mut mtimes = HashMap::new();
        let paths = vec![path.clone()];
        has_actual_changes(&paths, &mut mtimes);

        let bumped = SystemTime::now() + Duration::from_secs(60);
        mtimes.insert(path.clone(), bumped);
        // Current on-disk mtime differs from the recorded one.
        assert!(has_actual_changes(&paths, &mut mtimes));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
