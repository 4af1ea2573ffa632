//! # Mock Printer & Testing Guide
//!
//! [`MockPrinter`] implements [`ServicePrinter`] entirely in memory. It records
//! every call and answers from a script, so actor loops can be tested without
//! a real monitor and without waiting on real thresholds.
//!
//! ## When to use the Mock vs the Real Monitor
//!
//! | Feature | MockPrinter | LaserPrinter |
//! |---------|-------------|--------------|
//! | **Blocking** | Never blocks | Blocks on shortages and thresholds |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **Outcomes** | Scripted (`return_outcome`) | Real counters |
//! | **Use Case** | Testing actor loops | Testing the monitor or the full system |
//!
//! ## Example
//!
//! ```rust
//! use print_monitor::mock::{MockPrinter, PrinterCall};
//! use print_monitor::{RefillOutcome, ServicePrinter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockPrinter::new();
//!     mock.expect_refill_paper().return_outcome(RefillOutcome::Refilled { level: 50 });
//!
//!     assert!(mock.refill_paper().await.is_refilled());
//!     // Unscripted refills give up, like a technician with no students left.
//!     assert_eq!(mock.refill_paper().await, RefillOutcome::Abandoned);
//!
//!     assert_eq!(mock.calls(), vec![PrinterCall::RefillPaper, PrinterCall::RefillPaper]);
//!     mock.verify();
//! }
//! ```

use crate::error::MonitorError;
use crate::job::{Job, PrintReceipt};
use crate::service::{RefillOutcome, ServicePrinter, Supply};
use crate::state::PrinterSnapshot;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded call against a [`MockPrinter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PrinterCall {
    Submit(Job),
    RefillPaper,
    RefillToner,
    Register,
    Deregister,
    RefillCount(Supply),
    Snapshot,
}

#[derive(Default)]
struct Script {
    calls: Vec<PrinterCall>,
    submits: VecDeque<Result<(), MonitorError>>,
    paper: VecDeque<RefillOutcome>,
    toner: VecDeque<RefillOutcome>,
    active: usize,
    printed: u64,
    paper_refills: u64,
    toner_refills: u64,
}

/// An in-memory [`ServicePrinter`] that records calls and replays scripted answers.
///
/// Unscripted calls fall back to a default: submissions succeed and refills
/// come back [`RefillOutcome::Abandoned`].
#[derive(Clone, Default)]
pub struct MockPrinter {
    script: Arc<Mutex<Script>>,
}

impl MockPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next `submit_job` call.
    pub fn expect_submit(&self) -> SubmitExpectationBuilder {
        SubmitExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Scripts the next `refill_paper` call.
    pub fn expect_refill_paper(&self) -> RefillExpectationBuilder {
        RefillExpectationBuilder {
            supply: Supply::Paper,
            script: self.script.clone(),
        }
    }

    /// Scripts the next `refill_toner` call.
    pub fn expect_refill_toner(&self) -> RefillExpectationBuilder {
        RefillExpectationBuilder {
            supply: Supply::Toner,
            script: self.script.clone(),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<PrinterCall> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Jobs submitted so far, in order.
    pub fn submitted_jobs(&self) -> Vec<Job> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PrinterCall::Submit(job) => Some(job),
                _ => None,
            })
            .collect()
    }

    /// Students registered and not yet deregistered.
    pub fn active_consumers(&self) -> usize {
        self.script.lock().unwrap().active
    }

    /// Verifies that every scripted answer was consumed.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        let remaining = script.submits.len() + script.paper.len() + script.toner.len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn record(&self, call: PrinterCall) {
        self.script.lock().unwrap().calls.push(call);
    }
}

/// Builder for `submit_job` expectations.
pub struct SubmitExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl SubmitExpectationBuilder {
    pub fn return_ok(self) {
        self.script.lock().unwrap().submits.push_back(Ok(()));
    }

    pub fn return_err(self, error: MonitorError) {
        self.script.lock().unwrap().submits.push_back(Err(error));
    }
}

/// Builder for refill expectations.
pub struct RefillExpectationBuilder {
    supply: Supply,
    script: Arc<Mutex<Script>>,
}

impl RefillExpectationBuilder {
    pub fn return_outcome(self, outcome: RefillOutcome) {
        let mut script = self.script.lock().unwrap();
        match self.supply {
            Supply::Paper => script.paper.push_back(outcome),
            Supply::Toner => script.toner.push_back(outcome),
        }
    }
}

#[async_trait]
impl ServicePrinter for MockPrinter {
    async fn submit_job(&self, job: Job) -> Result<PrintReceipt, MonitorError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::Submit(job.clone()));
        script.submits.pop_front().unwrap_or(Ok(()))?;
        script.printed += 1;
        Ok(PrintReceipt {
            job_id: job.id().clone(),
            pages: job.pages(),
            paper_left: 0,
            toner_left: 0,
        })
    }

    async fn refill_paper(&self) -> RefillOutcome {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::RefillPaper);
        let outcome = script.paper.pop_front().unwrap_or(RefillOutcome::Abandoned);
        if outcome.is_refilled() {
            script.paper_refills += 1;
        }
        outcome
    }

    async fn refill_toner(&self) -> RefillOutcome {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::RefillToner);
        let outcome = script.toner.pop_front().unwrap_or(RefillOutcome::Abandoned);
        if outcome.is_refilled() {
            script.toner_refills += 1;
        }
        outcome
    }

    async fn register_consumer(&self) {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::Register);
        script.active += 1;
    }

    async fn deregister_consumer(&self) -> Result<(), MonitorError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::Deregister);
        script.active = script
            .active
            .checked_sub(1)
            .ok_or(MonitorError::CounterUnderflow("active consumers"))?;
        Ok(())
    }

    async fn paper_refill_count(&self) -> u64 {
        self.record(PrinterCall::RefillCount(Supply::Paper));
        self.script.lock().unwrap().paper_refills
    }

    async fn toner_refill_count(&self) -> u64 {
        self.record(PrinterCall::RefillCount(Supply::Toner));
        self.script.lock().unwrap().toner_refills
    }

    async fn snapshot(&self) -> PrinterSnapshot {
        let mut script = self.script.lock().unwrap();
        script.calls.push(PrinterCall::Snapshot);
        PrinterSnapshot {
            name: "mock".to_string(),
            paper_level: 0,
            toner_level: 0,
            printed: script.printed,
            paper_refills: script.paper_refills,
            toner_refills: script.toner_refills,
            active_consumers: script.active,
        }
    }
}
