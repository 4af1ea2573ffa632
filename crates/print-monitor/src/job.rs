//! Print jobs submitted to the monitor.

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for print jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document waiting to be printed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    name: String,
    pages: u32,
}

impl Job {
    /// Creates a job, rejecting documents with no pages.
    pub fn new(id: impl Into<String>, name: impl Into<String>, pages: u32) -> Result<Self, MonitorError> {
        let name = name.into();
        if pages == 0 {
            return Err(MonitorError::EmptyJob(name));
        }
        Ok(Self {
            id: JobId(id.into()),
            name,
            pages,
        })
    }

    /// Builds the `n`-th job of `owner`, named `<owner>_doc.<n>`.
    pub fn for_owner(owner: &str, n: usize, pages: u32) -> Result<Self, MonitorError> {
        Self::new(format!("{owner}_id_{n}"), format!("{owner}_doc.{n}"), pages)
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }
}

/// What a caller gets back once its job has been printed.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintReceipt {
    pub job_id: JobId,
    pub pages: u32,
    /// Paper left in the tray right after this job.
    pub paper_left: u32,
    /// Toner left right after this job.
    pub toner_left: u32,
}
