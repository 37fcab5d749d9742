//! Synchronous fallback preparation queue
//!
//! Every `ensure_ready` call appends a job and then walks the whole queue:
//! - pending jobs without a path get their path re-resolved
//! - pending jobs with a path are loaded and settle as ready or failed
//!
//! Settled jobs are never touched again. The queue is never pruned and the
//! full rescan repeats I/O for nothing once most jobs are settled; call volume
//! is a handful per process.

use crate::job::{FallbackJob, JobId, JobStatus};
use crate::locate::{locate_decoder, locate_with};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Outcome of one `ensure_ready` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub job: JobId,
    pub status: JobStatus,
    pub ready: usize,
    pub failed: usize,
    pub pending: usize,
}

struct Queue {
    search_paths: Vec<PathBuf>,
    jobs: Vec<FallbackJob>,
}

pub struct FallbackEngine {
    queue: Mutex<Queue>,
}

impl FallbackEngine {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            queue: Mutex::new(Queue {
                search_paths,
                jobs: Vec::new(),
            }),
        }
    }

    /// Replace the decoder directories; unresolved jobs pick them up on the next pass.
    pub fn set_search_paths(&self, search_paths: Vec<PathBuf>) {
        self.queue.lock().search_paths = search_paths;
    }

    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.queue.lock().search_paths.clone()
    }

    pub fn locate(&self, format: &str) -> Option<PathBuf> {
        let queue = self.queue.lock();
        locate_decoder(format, &queue.search_paths)
    }

    /// Queue a job for `format` and process every job synchronously.
    /// Duplicate formats are queued again.
    pub fn ensure_ready(&self, format: &str) -> PassReport {
        self.ensure_ready_with(format, |p| p.exists())
    }

    /// The new job is pushed unresolved; the rescan resolves it once.
    fn ensure_ready_with<F: FnMut(&Path) -> bool>(&self, format: &str, mut exists: F) -> PassReport {
        let mut queue = self.queue.lock();
        queue.jobs.push(FallbackJob::new(format, None));
        let id = JobId(queue.jobs.len() - 1);

        let Queue { search_paths, jobs } = &mut *queue;
        for job in jobs.iter_mut().filter(|j| !j.is_settled()) {
            if job.path.is_none() {
                job.path = locate_with(&job.format, search_paths.as_slice(), &mut exists);
            }
            let Some(path) = job.path.as_ref() else {
                continue;
            };
            match std::fs::read(path) {
                Ok(blob) => {
                    tracing::info!(format = %job.format, size = blob.len(), "prepared fallback");
                    job.mark_ready(blob);
                }
                Err(err) => {
                    tracing::warn!(format = %job.format, path = %path.display(), %err, "failed to prepare fallback");
                    job.mark_failed();
                }
            }
        }

        let count = |s: JobStatus| jobs.iter().filter(|j| j.status == s).count();
        PassReport {
            job: id,
            status: jobs[id.0].status,
            ready: count(JobStatus::Ready),
            failed: count(JobStatus::Failed),
            pending: count(JobStatus::Pending),
        }
    }

    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        self.queue.lock().jobs.get(id.0).map(|j| j.status)
    }

    /// Snapshot of every job in insertion order.
    pub fn jobs(&self) -> Vec<FallbackJob> {
        self.queue.lock().jobs.clone()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the first ready decoder for `format`.
    pub fn blob(&self, format: &str) -> Option<Vec<u8>> {
        self.queue
            .lock()
            .jobs
            .iter()
            .find(|j| j.status == JobStatus::Ready && j.format == format)
            .and_then(|j| j.blob.clone())
    }
}

impl Default for FallbackEngine {
    fn default() -> Self {
        Self::new(
            xeno_env::settings::DECODER_SEARCH_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
        )
    }
}
