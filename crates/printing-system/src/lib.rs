//! # Printing System
//!
//! A simulation of students sharing one laser printer while two technicians
//! keep it stocked with paper and toner. The monitor itself lives in
//! [`print_monitor`]; this crate supplies the actors and wires them together.
//!
//! ## Core Components
//!
//! - **[config]**: [`SimulationConfig`](config::SimulationConfig) and its figment-based loader.
//! - **[student_actor]**: students submitting documents.
//! - **[technician_actor]**: the paper and toner technicians.
//! - **[lifecycle]**: [`PrintingSystem`](lifecycle::PrintingSystem), which spawns and joins everyone.
//! - **[model]**: per-actor reports and the final [`RunSummary`](model::RunSummary).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -p printing-system -- --seed 42
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod student_actor;
pub mod technician_actor;
