//! Preparation jobs

use std::path::PathBuf;

/// Position of a job in the engine's queue. Jobs are never removed, so ids stay valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Ready,
    Failed,
}

/// One request to have a software decoder available for a format.
#[derive(Debug, Clone)]
pub struct FallbackJob {
    pub format: String,
    pub path: Option<PathBuf>,
    pub blob: Option<Vec<u8>>,
    pub status: JobStatus,
}

impl FallbackJob {
    pub fn new(format: &str, path: Option<PathBuf>) -> Self {
        Self {
            format: format.to_string(),
            path,
            blob: None,
            status: JobStatus::Pending,
        }
    }

    pub fn size(&self) -> usize {
        self.blob.as_ref().map_or(0, Vec::len)
    }

    pub fn is_settled(&self) -> bool {
        self.status != JobStatus::Pending
    }

    pub(crate) fn mark_ready(&mut self, blob: Vec<u8>) {
        debug_assert_eq!(self.status, JobStatus::Pending);
        self.blob = Some(blob);
        self.status = JobStatus::Ready;
    }

    pub(crate) fn mark_failed(&mut self) {
        debug_assert_eq!(self.status, JobStatus::Pending);
        self.status = JobStatus::Failed;
    }
}
