//! # Print Monitor
//!
//! A shared printer guarded as a monitor: many students submit print jobs
//! concurrently, while a paper technician and a toner technician keep the
//! printer stocked.
//!
//! ## Why a Monitor?
//!
//! Paper and toner deplete independently, and a job needs enough of *both*.
//! Students must wait until both cover their job. Technicians must wait until
//! their supply has actually run low. Every state change can unblock either
//! side, so all of it lives behind one lock with a broadcast wakeup:
//!
//! - **One lock**: at most one of print, refill or replace runs at a time.
//! - **Broadcast**: every change wakes every waiter; each re-checks its own condition.
//! - **Bounded technician waits**: once no student is left, technicians give up
//!   instead of waiting for a threshold that will never be crossed.
//!
//! See [`monitor`] for the wait protocol itself.
//!
//! ## Module Tour
//!
//! - [`config`] - [`PrinterConfig`]: capacities, thresholds, initial levels.
//! - [`job`] - [`Job`] and the [`PrintReceipt`] returned once it prints.
//! - [`monitor`] - [`LaserPrinter`], the monitor.
//! - [`service`] - [`ServicePrinter`], the trait actors are written against.
//! - [`state`] - [`PrinterSnapshot`], a consistent read of every counter.
//! - [`mock`] - [`MockPrinter`](mock::MockPrinter) for testing actors without a monitor.
//! - [`error`] - [`MonitorError`].
//! - [`tracing`] - subscriber setup.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p print-monitor
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod mock;
pub mod monitor;
pub mod service;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use config::PrinterConfig;
pub use error::MonitorError;
pub use job::{Job, JobId, PrintReceipt};
pub use monitor::LaserPrinter;
pub use service::{RefillOutcome, ServicePrinter, Supply};
pub use state::{PrinterSnapshot, Shortage};
