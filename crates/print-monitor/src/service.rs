//! # ServicePrinter Trait
//!
//! The seam between the actors and the monitor. Students and technicians are
//! generic over [`ServicePrinter`], so the same actor loop runs against the real
//! [`LaserPrinter`](crate::LaserPrinter) in production and against
//! [`MockPrinter`](crate::mock::MockPrinter) in tests.

use crate::error::MonitorError;
use crate::job::{Job, PrintReceipt};
use crate::state::PrinterSnapshot;
use async_trait::async_trait;
use std::fmt::Display;

/// A consumable a technician can restock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Supply {
    Paper,
    Toner,
}

impl Display for Supply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Supply::Paper => write!(f, "paper"),
            Supply::Toner => write!(f, "toner"),
        }
    }
}

/// Result of a single refill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillOutcome {
    /// The supply was restocked; `level` is the new level.
    Refilled { level: u32 },
    /// No student was left to drain the supply, so the attempt gave up without touching it.
    Abandoned,
}

impl RefillOutcome {
    pub fn is_refilled(&self) -> bool {
        matches!(self, RefillOutcome::Refilled { .. })
    }
}

/// Operations a shared printer offers to the actors using it.
///
/// Every method runs under the printer's single exclusive lock.
#[async_trait]
pub trait ServicePrinter: Send + Sync {
    /// Prints `job`, waiting as long as paper or toner is short.
    ///
    /// # Errors
    /// Fails only if the job could never fit in the printer.
    async fn submit_job(&self, job: Job) -> Result<PrintReceipt, MonitorError>;

    /// Adds one paper pack once the tray has room for it.
    async fn refill_paper(&self) -> RefillOutcome;

    /// Replaces the toner cartridge once it runs low.
    async fn refill_toner(&self) -> RefillOutcome;

    /// Announces a student that will submit jobs.
    async fn register_consumer(&self);

    /// Announces that a student has finished for good.
    async fn deregister_consumer(&self) -> Result<(), MonitorError>;

    async fn paper_refill_count(&self) -> u64;

    async fn toner_refill_count(&self) -> u64;

    async fn snapshot(&self) -> PrinterSnapshot;

    /// Dispatches to the refill operation for `supply`.
    async fn refill(&self, supply: Supply) -> RefillOutcome {
        match supply {
            Supply::Paper => self.refill_paper().await,
            Supply::Toner => self.refill_toner().await,
        }
    }

    /// Refill count for `supply`.
    async fn refill_count(&self, supply: Supply) -> u64 {
        match supply {
            Supply::Paper => self.paper_refill_count().await,
            Supply::Toner => self.toner_refill_count().await,
        }
    }
}
