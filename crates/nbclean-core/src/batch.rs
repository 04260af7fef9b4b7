//! Batch processing
//!
//! Runs one operation per notebook, sequentially or on a rayon pool.
//! Outcomes are always reported in input order.

use crate::error::CleanError;
use rayon::prelude::*;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of processing one file
#[derive(Debug)]
pub struct FileOutcome {
    /// Processed file
    pub path: PathBuf,
    /// Operation result
    pub result: Result<(), CleanError>,
}

impl FileOutcome {
    /// Whether the operation succeeded
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run, in input order
///
/// Without keep-going, files after the first failure are not attempted and
/// do not appear here.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// All attempted files
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of attempted files
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no file was attempted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful files
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Failed files with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &CleanError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }

    /// Whether every attempted file succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_ok)
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ok = self.succeeded();
        write!(f, "{ok} succeeded, {} failed", self.len() - ok)
    }
}

/// Applies an operation to many notebooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRunner {
    jobs: usize,
    keep_going: bool,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchRunner {
    /// Sequential runner that stops at the first failure
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: 1,
            keep_going: false,
        }
    }

    /// Number of files processed concurrently (at least one)
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Keep processing after a failure
    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Concurrency level
    #[inline]
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Run `op` on every path
    pub fn run<F>(&self, paths: &[PathBuf], op: F) -> BatchReport
    where
        F: Fn(&Path) -> Result<(), CleanError> + Sync,
    {
        let outcomes = if self.jobs > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| self.run_parallel(paths, &op)),
                Err(e) => {
                    tracing::warn!(error = %e, "thread pool unavailable, running sequentially");
                    self.run_sequential(paths, &op)
                }
            }
        } else {
            self.run_sequential(paths, &op)
        };
        let report = BatchReport { outcomes };
        tracing::info!(total = paths.len(), %report, "batch finished");
        report
    }

    fn run_sequential<F>(&self, paths: &[PathBuf], op: &F) -> Vec<FileOutcome>
    where
        F: Fn(&Path) -> Result<(), CleanError>,
    {
        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let outcome = process(path, op);
            let failed = !outcome.is_ok();
            outcomes.push(outcome);
            if failed && !self.keep_going {
                break;
            }
        }
        outcomes
    }

    fn run_parallel<F>(&self, paths: &[PathBuf], op: &F) -> Vec<FileOutcome>
    where
        F: Fn(&Path) -> Result<(), CleanError> + Sync,
    {
        let stop = AtomicBool::new(false);
        paths
            .par_iter()
            .map(|path| {
                if stop.load(Ordering::Relaxed) {
                    return None;
                }
                let outcome = process(path, op);
                if !outcome.is_ok() && !self.keep_going {
                    stop.store(true, Ordering::Relaxed);
                }
                Some(outcome)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

fn process<F>(path: &Path, op: &F) -> FileOutcome
where
    F: Fn(&Path) -> Result<(), CleanError>,
{
    let result = op(path);
    match &result {
        Ok(()) => tracing::info!(path = %path.display(), "processed"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed"),
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}
