//! # Observability & Tracing
//!
//! Every status line of the simulation is a structured `tracing` event. The
//! monitor tags its events with the printer name and the job being printed,
//! and each actor task runs inside a span carrying its name, so a line like
//!
//! ```text
//! INFO student{name="student-2"}:print{printer="LP:w1761350" job="student-2_doc.1"}: No adequate paper level required=7 available=3
//! ```
//!
//! tells who is waiting, on which printer, for what.
//!
//! ## Usage
//!
//! ```bash
//! # Status lines only
//! RUST_LOG=info cargo run
//!
//! # Also show full job payloads and wait timeouts
//! RUST_LOG=debug cargo run
//!
//! # Only the monitor's events
//! RUST_LOG=print_monitor=debug cargo run
//! ```
//!
//! Shortages and unmet refill thresholds are logged at `info`: they are the
//! normal blocking condition, not failures. Interruptions are `warn`.

/// Initializes the tracing subscriber.
///
/// Filtering comes from `RUST_LOG`. Call this once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
