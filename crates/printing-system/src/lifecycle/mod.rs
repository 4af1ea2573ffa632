//! # System Lifecycle & Orchestration
//!
//! [`PrintingSystem`] is the conductor: it builds the shared printer, starts
//! every student and both technicians as independent tokio tasks, and waits
//! for all of them to finish.
//!
//! ## Startup Order
//!
//! 1. **Validate** - the settings are checked before anything is spawned.
//! 2. **Printer** - one [`LaserPrinter`](print_monitor::LaserPrinter), shared by `Arc`.
//! 3. **Students** - each is registered with the printer, then spawned.
//! 4. **Technicians** - spawned last, once the student count is final.
//!
//! ## Shutdown
//!
//! There is no shutdown signal. Students stop after their last document;
//! technicians stop after their last attempt, and attempts are abandoned once
//! every student has deregistered. [`PrintingSystem::wait`] just joins them.
//!
//! A student task that panics never deregisters itself, so `wait`
//! deregisters it on its behalf. Otherwise the technicians would keep waiting
//! for it.
//!
//! ```rust,no_run
//! use printing_system::config::SimulationConfig;
//! use printing_system::lifecycle::PrintingSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), printing_system::error::SystemError> {
//!     let system = PrintingSystem::start(SimulationConfig::default()).await?;
//!     let summary = system.wait().await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod printing_system;

pub use printing_system::*;
