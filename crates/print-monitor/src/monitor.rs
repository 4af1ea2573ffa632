//! # The Printer Monitor
//!
//! [`LaserPrinter`] is the single shared resource every student and technician
//! talks to. It owns the paper and toner levels and the print and refill
//! counters, and hands out access to them one caller at a time.
//!
//! ## Wait Protocol
//!
//! All state sits behind one [`tokio::sync::Mutex`]. A [`Notify`] carries the
//! broadcast wakeup. Every blocking operation runs the same loop:
//!
//! 1. Lock the state and check the guard condition.
//! 2. If it holds, mutate, broadcast with [`Notify::notify_waiters`], and return.
//! 3. Otherwise register for the next broadcast *while still holding the lock*,
//!    drop the lock, and park.
//! 4. On wakeup go back to 1. A wakeup only means that something changed, not
//!    that this caller's condition now holds.
//!
//! Students park without a deadline. Technicians park for at most
//! [`PrinterConfig::refill_wait`] and then check whether any student is still
//! active. If none are, nobody will ever drain the supply below its threshold,
//! so the attempt is abandoned instead of waiting forever.

use crate::config::PrinterConfig;
use crate::error::MonitorError;
use crate::job::{Job, PrintReceipt};
use crate::service::{RefillOutcome, ServicePrinter, Supply};
use crate::state::{PrinterSnapshot, PrinterState, Shortage};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard, Notify};
use tracing::{debug, info, instrument, warn};

/// A shared printer guarded as a monitor.
///
/// Share it between actors with an `Arc`:
///
/// ```rust
/// use print_monitor::{Job, LaserPrinter, PrinterConfig, RefillOutcome};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let printer = Arc::new(LaserPrinter::new(PrinterConfig::default()).unwrap());
///     printer.register_consumer().await;
///
///     // The tray starts empty, so the job waits for the technician.
///     let job = Job::for_owner("student-0", 0, 5).unwrap();
///     let student = tokio::spawn({
///         let printer = printer.clone();
///         async move { printer.submit_job(job).await }
///     });
///
///     assert_eq!(printer.refill_paper().await, RefillOutcome::Refilled { level: 50 });
///     let receipt = student.await.unwrap().unwrap();
///     assert_eq!(receipt.paper_left, 45);
/// }
/// ```
pub struct LaserPrinter {
    config: PrinterConfig,
    state: Mutex<PrinterState>,
    changed: Notify,
}

impl LaserPrinter {
    /// Creates a printer after validating its configuration.
    pub fn new(config: PrinterConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let state = PrinterState::new(&config);
        info!(
            printer = %config.name,
            paper = state.paper_level,
            toner = state.toner_level,
            "Printer ready"
        );
        Ok(Self {
            state: Mutex::new(state),
            changed: Notify::new(),
            config,
        })
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Prints `job` once both paper and toner cover its page count.
    ///
    /// Both levels drop by the full page count in one step under the lock;
    /// a job is never half printed.
    #[instrument(name = "print", skip(self, job), fields(printer = %self.config.name, job = %job.name()))]
    pub async fn submit_job(&self, job: Job) -> Result<PrintReceipt, MonitorError> {
        debug!(?job, "submit_job called");
        let pages = job.pages();
        let max = self.config.max_job_pages();
        if pages > max {
            warn!(pages, max, "Job can never be printed");
            return Err(MonitorError::JobTooLarge {
                job: job.name().to_string(),
                pages,
                max,
            });
        }

        let mut seen = None;
        loop {
            let mut state = self.state.lock().await;
            report_interrupt(&state, seen);

            match state.shortage(pages) {
                None => {
                    state.consume(pages)?;
                    info!(
                        pages,
                        paper = state.paper_level,
                        toner = state.toner_level,
                        printed = state.printed,
                        "Print completed"
                    );
                    self.changed.notify_waiters();
                    return Ok(PrintReceipt {
                        job_id: job.id().clone(),
                        pages,
                        paper_left: state.paper_level,
                        toner_left: state.toner_level,
                    });
                }
                Some(Shortage::Both) => info!(
                    required = pages,
                    paper = state.paper_level,
                    toner = state.toner_level,
                    "Adequate paper and toner not available"
                ),
                Some(Shortage::Paper) => info!(
                    required = pages,
                    available = state.paper_level,
                    "No adequate paper level"
                ),
                Some(Shortage::Toner) => info!(
                    required = pages,
                    available = state.toner_level,
                    "No adequate toner level"
                ),
            }

            seen = Some(state.interrupts);
            self.suspend(state, None).await;
        }
    }

    /// Adds one pack of paper once the tray has dropped to the refill line.
    #[instrument(name = "refill", skip(self), fields(printer = %self.config.name))]
    pub async fn refill_paper(&self) -> RefillOutcome {
        self.restock(Supply::Paper).await
    }

    /// Replaces the toner cartridge once the level drops below the minimum.
    #[instrument(name = "replace", skip(self), fields(printer = %self.config.name))]
    pub async fn refill_toner(&self) -> RefillOutcome {
        self.restock(Supply::Toner).await
    }

    async fn restock(&self, supply: Supply) -> RefillOutcome {
        let mut seen = None;
        loop {
            let mut state = self.state.lock().await;
            if seen.is_some() {
                report_interrupt(&state, seen);
                if !state.students_active() {
                    info!(%supply, "No students active; abandoning attempt");
                    return RefillOutcome::Abandoned;
                }
            }

            match supply {
                Supply::Paper if state.paper_level <= self.config.paper_refill_line() => {
                    state.paper_level += self.config.paper_pack_size;
                    state.paper_refills += 1;
                    info!(paper = state.paper_level, "Refilling paper; new paper pack added");
                    self.changed.notify_waiters();
                    return RefillOutcome::Refilled {
                        level: state.paper_level,
                    };
                }
                Supply::Toner if state.toner_level < self.config.toner_minimum_level => {
                    state.toner_level = self.config.toner_full_level;
                    state.toner_refills += 1;
                    info!(toner = state.toner_level, "Replacing toner cartridge; new toner added");
                    self.changed.notify_waiters();
                    return RefillOutcome::Refilled {
                        level: state.toner_level,
                    };
                }
                Supply::Paper => info!(
                    paper = state.paper_level,
                    students_active = state.students_active(),
                    "Paper tray already full"
                ),
                Supply::Toner => info!(
                    toner = state.toner_level,
                    students_active = state.students_active(),
                    "Toner still available"
                ),
            }

            seen = Some(state.interrupts);
            self.suspend(state, Some(self.config.refill_wait())).await;
        }
    }

    /// Releases the lock and parks until the next broadcast or until `timeout` elapses.
    ///
    /// The `Notified` future is created before the guard is dropped, so it
    /// receives any broadcast issued by the next holder of the lock.
    async fn suspend(&self, state: MutexGuard<'_, PrinterState>, timeout: Option<Duration>) {
        let notified = self.changed.notified();
        drop(state);
        match timeout {
            Some(limit) => {
                if tokio::time::timeout(limit, notified).await.is_err() {
                    debug!(?limit, "Wait timed out");
                }
            }
            None => notified.await,
        }
    }

    /// Counts a student that is about to submit jobs.
    pub async fn register_consumer(&self) {
        let mut state = self.state.lock().await;
        state.active_consumers += 1;
        debug!(active = state.active_consumers, "Student registered");
        self.changed.notify_waiters();
    }

    /// Marks one student as finished and wakes technicians so they can re-check.
    pub async fn deregister_consumer(&self) -> Result<(), MonitorError> {
        let mut state = self.state.lock().await;
        state.active_consumers = state
            .active_consumers
            .checked_sub(1)
            .ok_or(MonitorError::CounterUnderflow("active consumers"))?;
        debug!(active = state.active_consumers, "Student finished");
        self.changed.notify_waiters();
        Ok(())
    }

    /// Interrupts every suspended actor. Each one logs the interruption and
    /// goes back to checking its own condition.
    pub async fn interrupt_waiters(&self) {
        let mut state = self.state.lock().await;
        state.interrupts = state.interrupts.wrapping_add(1);
        warn!(printer = %self.config.name, "Interrupting suspended actors");
        self.changed.notify_waiters();
    }

    pub async fn paper_refill_count(&self) -> u64 {
        self.state.lock().await.paper_refills
    }

    pub async fn toner_refill_count(&self) -> u64 {
        self.state.lock().await.toner_refills
    }

    /// All counters, read under a single lock acquisition.
    pub async fn snapshot(&self) -> PrinterSnapshot {
        self.state.lock().await.snapshot(&self.config.name)
    }
}

fn report_interrupt(state: &PrinterState, seen: Option<u64>) {
    if seen.is_some_and(|epoch| epoch != state.interrupts) {
        warn!("Wait interrupted; resuming");
    }
}

#[async_trait]
impl ServicePrinter for LaserPrinter {
    async fn submit_job(&self, job: Job) -> Result<PrintReceipt, MonitorError> {
        LaserPrinter::submit_job(self, job).await
    }

    async fn refill_paper(&self) -> RefillOutcome {
        LaserPrinter::refill_paper(self).await
    }

    async fn refill_toner(&self) -> RefillOutcome {
        LaserPrinter::refill_toner(self).await
    }

    async fn register_consumer(&self) {
        LaserPrinter::register_consumer(self).await
    }

    async fn deregister_consumer(&self) -> Result<(), MonitorError> {
        LaserPrinter::deregister_consumer(self).await
    }

    async fn paper_refill_count(&self) -> u64 {
        LaserPrinter::paper_refill_count(self).await
    }

    async fn toner_refill_count(&self) -> u64 {
        LaserPrinter::toner_refill_count(self).await
    }

    async fn snapshot(&self) -> PrinterSnapshot {
        LaserPrinter::snapshot(self).await
    }
}
