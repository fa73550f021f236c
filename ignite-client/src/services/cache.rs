//! Raw response cache
//!
//! One file per `(day_id, page_number)` key, holding the unmodified response
//! body bytes. All disk access runs on a single worker task that consumes
//! commands in arrival order, so every save and load is totally ordered
//! relative to every other, across all keys. Torn reads and overwrite races
//! are impossible by construction; no locking is needed.
//!
//! Saves are fire-and-forget: callers enqueue the write and move on. A
//! failure to replace an existing entry is logged and swallowed, never
//! propagated.

use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Command channel depth; writes beyond this apply backpressure to senders
const COMMAND_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug)]
enum CacheCommand {
    Save {
        day_id: i64,
        page_number: i64,
        bytes: Vec<u8>,
    },
    Load {
        day_id: i64,
        page_number: i64,
        reply: oneshot::Sender<Option<Vec<u8>>>,
    },
}

/// Per-page blob cache with strictly serialized disk access
///
/// Cheap to clone; clones share the same worker task and therefore the same
/// total order over operations.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    commands: mpsc::Sender<CacheCommand>,
}

impl ResponseCache {
    /// Open a cache rooted at `dir`, spawning its worker task.
    ///
    /// The directory is expected to exist (see
    /// `ignite_common::config::ensure_cache_dir`).
    pub fn open(dir: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                handle_command(&dir, command).await;
            }
            // all senders dropped: cache handle gone, worker exits
        });

        Self { commands: tx }
    }

    /// Store raw response bytes for a key, replacing any previous entry.
    ///
    /// Fire-and-forget: returns once the write is enqueued, not once it hits
    /// disk. Operations enqueued afterwards observe the new entry.
    pub async fn save(&self, day_id: i64, page_number: i64, bytes: Vec<u8>) {
        let command = CacheCommand::Save {
            day_id,
            page_number,
            bytes,
        };
        if self.commands.send(command).await.is_err() {
            warn!(day_id, page_number, "cache worker gone, dropping save");
        }
    }

    /// Load the cached bytes for a key, `None` if no entry exists.
    pub async fn load(&self, day_id: i64, page_number: i64) -> Option<Vec<u8>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = CacheCommand::Load {
            day_id,
            page_number,
            reply: reply_tx,
        };
        self.commands.send(command).await.ok()?;
        reply_rx.await.ok().flatten()
    }
}

/// File path for a cache key: `{dir}/{day_id}_{page_number}`
fn entry_path(dir: &Path, day_id: i64, page_number: i64) -> PathBuf {
    dir.join(format!("{}_{}", day_id, page_number))
}

async fn handle_command(dir: &Path, command: CacheCommand) {
    match command {
        CacheCommand::Save {
            day_id,
            page_number,
            bytes,
        } => {
            let path = entry_path(dir, day_id, page_number);
            if path.exists() {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!("can't delete existing cache file {}: {}", path.display(), e);
                }
            }
            if let Err(e) = tokio::fs::write(&path, &bytes).await {
                warn!("can't write cache file {}: {}", path.display(), e);
            }
        }
        CacheCommand::Load {
            day_id,
            page_number,
            reply,
        } => {
            let path = entry_path(dir, day_id, page_number);
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => Some(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    warn!("can't read cache file {}: {}", path.display(), e);
                    None
                }
            };
            // receiver may have given up; nothing to do about it
            let _ = reply.send(bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp_cache() -> (tempfile::TempDir, ResponseCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path().to_path_buf());
        (dir, cache)
    }

    #[tokio::test]
    async fn round_trip_returns_identical_bytes() {
        let (_dir, cache) = open_temp_cache();

        let payload = b"{\"PageNumber\":1}".to_vec();
        cache.save(1, 1, payload.clone()).await;

        assert_eq!(cache.load(1, 1).await, Some(payload));
    }

    #[tokio::test]
    async fn load_of_never_written_key_is_absent() {
        let (_dir, cache) = open_temp_cache();
        assert_eq!(cache.load(3, 9).await, None);
    }

    #[tokio::test]
    async fn overwrite_replaces_previous_entry_whole() {
        let (_dir, cache) = open_temp_cache();

        cache.save(1, 1, b"AAAAAAAAAAAAAAAA".to_vec()).await;
        cache.save(1, 1, b"B".to_vec()).await;

        // worker processes commands in order, so the load sees the second
        // write and only the second write
        assert_eq!(cache.load(1, 1).await, Some(b"B".to_vec()));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let (_dir, cache) = open_temp_cache();

        cache.save(1, 1, b"day1 page1".to_vec()).await;
        cache.save(1, 2, b"day1 page2".to_vec()).await;
        cache.save(2, 1, b"day2 page1".to_vec()).await;

        assert_eq!(cache.load(1, 2).await, Some(b"day1 page2".to_vec()));
        assert_eq!(cache.load(2, 1).await, Some(b"day2 page1".to_vec()));
        assert_eq!(cache.load(2, 2).await, None);
    }

    #[tokio::test]
    async fn entries_use_deterministic_file_names() {
        let (dir, cache) = open_temp_cache();

        cache.save(4, 7, b"x".to_vec()).await;
        // load after save forces the write to have been processed
        assert!(cache.load(4, 7).await.is_some());

        assert!(dir.path().join("4_7").is_file());
    }

    #[tokio::test]
    async fn interleaved_saves_and_loads_stay_ordered() {
        let (_dir, cache) = open_temp_cache();

        for i in 0..20u8 {
            cache.save(1, 1, vec![i; 4]).await;
            assert_eq!(cache.load(1, 1).await, Some(vec![i; 4]));
        }
    }
}
