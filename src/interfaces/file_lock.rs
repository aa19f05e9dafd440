//! Named cross-process locks backed by `flock(2)` on well-known lock files
//!
//! Every process on the host that opens the same lock path contends for the
//! same advisory lock, so a `NamedLock` gives "at most one holder system-wide".
//! Acquisition is a bounded wait: non-blocking attempts are retried with
//! exponential backoff until the configured timeout has elapsed.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use backoff::ExponentialBackoff;
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use thiserror::Error;

const INITIAL_RETRY_INTERVAL: Duration = Duration::from_millis(20);
const MAX_RETRY_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Error, Debug)]
pub enum LockError {
    #[error("timed out after {:.1}s waiting for lock {}", .waited.as_secs_f32(), .path.display())]
    Timeout { path: PathBuf, waited: Duration },
    #[error("cannot use lock file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An exclusive lock identified by a filesystem path
#[derive(Clone, Debug)]
pub struct NamedLock {
    path: PathBuf,
    timeout: Duration,
}

/// Held lock; released when dropped
pub struct LockGuard {
    _flock: Flock<File>,
    path: PathBuf,
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard").field("path", &self.path).finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        log::trace!("Released lock {}", self.path.display());
    }
}

impl NamedLock {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn acquire(&self) -> Result<LockGuard, LockError> {
        let started = Instant::now();
        let policy = ExponentialBackoff {
            initial_interval: INITIAL_RETRY_INTERVAL,
            current_interval: INITIAL_RETRY_INTERVAL,
            max_interval: MAX_RETRY_INTERVAL,
            max_elapsed_time: Some(self.timeout),
            ..Default::default()
        };

        let try_lock = || -> Result<Flock<File>, backoff::Error<LockError>> {
            let file = self.open_lock_file().map_err(backoff::Error::Permanent)?;
            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(flock) => Ok(flock),
                Err((_, errno)) if errno == Errno::EWOULDBLOCK => {
                    Err(backoff::Error::transient(self.timeout_error(started)))
                }
                Err((_, errno)) => Err(backoff::Error::Permanent(LockError::Io {
                    path: self.path.clone(),
                    source: io::Error::from(errno),
                })),
            }
        };

        match backoff::retry(policy, try_lock) {
            Ok(flock) => {
                log::trace!(
                    "Acquired lock {} after {:?}",
                    self.path.display(),
                    started.elapsed()
                );
                Ok(LockGuard {
                    _flock: flock,
                    path: self.path.clone(),
                })
            }
            Err(backoff::Error::Permanent(e)) => Err(e),
            Err(backoff::Error::Transient { .. }) => Err(self.timeout_error(started)),
        }
    }

    fn open_lock_file(&self) -> Result<File, LockError> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .map_err(|source| LockError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn timeout_error(&self, started: Instant) -> LockError {
        LockError::Timeout {
            path: self.path.clone(),
            waited: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_creates_lock_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let lock = NamedLock::new(tempdir.path().join("a.lock"), Duration::from_secs(1));

        let guard = lock.acquire().unwrap();
        assert!(lock.path().exists());
        drop(guard);
    }

    #[test]
    fn test_second_holder_times_out() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("busy.lock");
        let first = NamedLock::new(&path, Duration::from_secs(1));
        let second = NamedLock::new(&path, Duration::from_millis(200));

        let _guard = first.acquire().unwrap();
        match second.acquire() {
            Err(LockError::Timeout { path: p, waited }) => {
                assert_eq!(p, path);
                assert!(waited < Duration::from_secs(1));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_lock_is_reusable_after_release() {
        let tempdir = tempfile::tempdir().unwrap();
        let lock = NamedLock::new(tempdir.path().join("reuse.lock"), Duration::from_millis(200));

        let guard = lock.acquire().unwrap();
        drop(guard);
        assert!(lock.acquire().is_ok());
    }

    #[test]
    fn test_distinct_paths_do_not_contend() {
        let tempdir = tempfile::tempdir().unwrap();
        let config_lock = NamedLock::new(tempdir.path().join("config.lock"), Duration::from_millis(200));
        let bus_lock = NamedLock::new(tempdir.path().join("bus.lock"), Duration::from_millis(200));

        let _config_guard = config_lock.acquire().unwrap();
        assert!(bus_lock.acquire().is_ok());
    }

    #[test]
    fn test_unusable_lock_dir_is_io_error() {
        let tempdir = tempfile::tempdir().unwrap();
        let lock = NamedLock::new(
            tempdir.path().join("missing-dir").join("x.lock"),
            Duration::from_millis(200),
        );
        assert!(matches!(lock.acquire(), Err(LockError::Io { .. })));
    }
}
