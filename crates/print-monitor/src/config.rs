//! # Printer Configuration
//!
//! Construction constants for a [`LaserPrinter`](crate::LaserPrinter). They are
//! fixed for the lifetime of the monitor.

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capacities, thresholds and initial levels of a shared printer.
///
/// The defaults model the lab printer the simulation was built around: an
/// empty paper tray, a nearly spent toner cartridge, 50-sheet packs and a
/// 500-page cartridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Display name used in logs and in the run summary.
    pub name: String,
    /// Sheets in the tray at start-up.
    pub initial_paper: u32,
    /// Toner units in the cartridge at start-up.
    pub initial_toner: u32,
    /// A full paper tray.
    pub paper_capacity: u32,
    /// Sheets added by one paper refill.
    pub paper_pack_size: u32,
    /// Level a new toner cartridge starts at.
    pub toner_full_level: u32,
    /// Toner may only be replaced once the level drops below this value.
    pub toner_minimum_level: u32,
    /// Upper bound on a single technician wait before re-checking for students.
    pub refill_wait_ms: u64,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            name: "LP:w1761350".to_string(),
            initial_paper: 0,
            initial_toner: 20,
            paper_capacity: 250,
            paper_pack_size: 50,
            toner_full_level: 500,
            toner_minimum_level: 10,
            refill_wait_ms: 5000,
        }
    }
}

impl PrinterConfig {
    /// Paper may only be refilled while the tray holds at most this many sheets,
    /// so that a whole pack always fits.
    pub fn paper_refill_line(&self) -> u32 {
        self.paper_capacity - self.paper_pack_size
    }

    /// The largest job that could ever be satisfied.
    pub fn max_job_pages(&self) -> u32 {
        self.paper_capacity.min(self.toner_full_level)
    }

    pub fn refill_wait(&self) -> Duration {
        Duration::from_millis(self.refill_wait_ms)
    }

    /// Checks the relations between fields that the monitor relies on.
    pub fn validate(&self) -> Result<(), MonitorError> {
        let invalid = |msg: String| Err(MonitorError::InvalidConfig(msg));

        if self.paper_pack_size == 0 {
            return invalid("paper_pack_size must be positive".into());
        }
        if self.paper_pack_size > self.paper_capacity {
            return invalid(format!(
                "paper_pack_size {} exceeds paper_capacity {}",
                self.paper_pack_size, self.paper_capacity
            ));
        }
        if self.initial_paper > self.paper_capacity {
            return invalid(format!(
                "initial_paper {} exceeds paper_capacity {}",
                self.initial_paper, self.paper_capacity
            ));
        }
        if self.toner_minimum_level == 0 {
            return invalid("toner_minimum_level must be positive".into());
        }
        if self.toner_minimum_level > self.toner_full_level {
            return invalid(format!(
                "toner_minimum_level {} exceeds toner_full_level {}",
                self.toner_minimum_level, self.toner_full_level
            ));
        }
        if self.initial_toner > self.toner_full_level {
            return invalid(format!(
                "initial_toner {} exceeds toner_full_level {}",
                self.initial_toner, self.toner_full_level
            ));
        }
        if self.refill_wait_ms == 0 {
            return invalid("refill_wait_ms must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PrinterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paper_refill_line(), 200);
        assert_eq!(config.max_job_pages(), 250);
    }

    #[test]
    fn test_pack_larger_than_tray_is_rejected() {
        let config = PrinterConfig {
            paper_pack_size: 300,
            ..PrinterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MonitorError::InvalidConfig(msg)) if msg.contains("paper_pack_size")
        ));
    }

    #[test]
    fn test_overfilled_cartridge_is_rejected() {
        let config = PrinterConfig {
            initial_toner: 501,
            ..PrinterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
