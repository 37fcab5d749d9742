//! Append-only side log
//!
//! Each write opens the file in append mode, writes, flushes and syncs, all
//! under one lock so concurrent lines never interleave. The primary path is
//! tried first, then the package fallback; if neither opens, the line is dropped.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use xeno_env::settings::{DEFAULT_SIDE_LOG, PACKAGE_SIDE_LOG};

struct Paths {
    primary: PathBuf,
    fallback: PathBuf,
}

pub struct SideLog {
    paths: Mutex<Paths>,
}

static GLOBAL: Lazy<SideLog> = Lazy::new(|| SideLog::new(DEFAULT_SIDE_LOG, PACKAGE_SIDE_LOG));

/// The process-wide side log used by the subscriber and the crash handler.
pub fn global() -> &'static SideLog {
    &GLOBAL
}

impl SideLog {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            paths: Mutex::new(Paths {
                primary: primary.into(),
                fallback: fallback.into(),
            }),
        }
    }

    pub fn set_paths(&self, primary: PathBuf, fallback: PathBuf) {
        *self.paths.lock() = Paths { primary, fallback };
    }

    pub fn primary_path(&self) -> PathBuf {
        self.paths.lock().primary.clone()
    }

    /// Append one entry; a trailing newline is added when missing.
    pub fn append(&self, entry: &[u8]) -> io::Result<()> {
        let paths = self.paths.lock();
        write_entry(&paths, entry)
    }

    /// Non-blocking variant for signal context. Returns false when the lock
    /// is held or the write failed.
    pub fn try_append(&self, entry: &[u8]) -> bool {
        match self.paths.try_lock() {
            Some(paths) => write_entry(&paths, entry).is_ok(),
            None => false,
        }
    }

    pub fn writer(&'static self) -> SideLogWriter {
        SideLogWriter { log: self }
    }
}

fn write_entry(paths: &Paths, entry: &[u8]) -> io::Result<()> {
    ensure_parent_dir(&paths.primary);
    let mut file = open_append(&paths.primary).or_else(|_| open_append(&paths.fallback))?;
    file.write_all(entry)?;
    if !entry.ends_with(b"\n") {
        file.write_all(b"\n")?;
    }
    file.flush()?;
    file.sync_data()
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Best effort; a failure shows up when the open fails.
pub fn ensure_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
}

/// `io::Write` handle handed to the fmt subscriber, one per event.
pub struct SideLogWriter {
    log: &'static SideLog,
}

impl Write for SideLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Logging must never fail the caller
        let _ = self.log.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
