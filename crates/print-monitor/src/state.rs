//! # Printer State
//!
//! The counters guarded by the monitor lock, and the consistent copy of them
//! handed out by [`LaserPrinter::snapshot`](crate::LaserPrinter::snapshot).
//!
//! Nothing in this module locks anything. Every method on [`PrinterState`] is
//! called with the monitor's mutex held.

use crate::config::PrinterConfig;
use crate::error::MonitorError;
use serde::Serialize;
use std::fmt::Display;

/// Which resource is holding a job back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortage {
    Paper,
    Toner,
    Both,
}

/// Mutable counters owned by a single printer.
#[derive(Debug)]
pub(crate) struct PrinterState {
    pub paper_level: u32,
    pub toner_level: u32,
    pub printed: u64,
    pub paper_refills: u64,
    pub toner_refills: u64,
    pub active_consumers: usize,
    /// Bumped by every interruption so suspended waiters can tell they were interrupted.
    pub interrupts: u64,
}

impl PrinterState {
    pub fn new(config: &PrinterConfig) -> Self {
        Self {
            paper_level: config.initial_paper,
            toner_level: config.initial_toner,
            printed: 0,
            paper_refills: 0,
            toner_refills: 0,
            active_consumers: 0,
            interrupts: 0,
        }
    }

    /// Returns what is missing for a job of `pages`, re-derived from the current levels.
    pub fn shortage(&self, pages: u32) -> Option<Shortage> {
        match (self.paper_level < pages, self.toner_level < pages) {
            (true, true) => Some(Shortage::Both),
            (true, false) => Some(Shortage::Paper),
            (false, true) => Some(Shortage::Toner),
            (false, false) => None,
        }
    }

    /// Takes `pages` of both resources in one step, or nothing at all.
    pub fn consume(&mut self, pages: u32) -> Result<(), MonitorError> {
        let paper = self
            .paper_level
            .checked_sub(pages)
            .ok_or(MonitorError::CounterUnderflow("paper level"))?;
        let toner = self
            .toner_level
            .checked_sub(pages)
            .ok_or(MonitorError::CounterUnderflow("toner level"))?;
        self.paper_level = paper;
        self.toner_level = toner;
        self.printed += 1;
        Ok(())
    }

    pub fn students_active(&self) -> bool {
        self.active_consumers > 0
    }

    pub fn snapshot(&self, name: &str) -> PrinterSnapshot {
        PrinterSnapshot {
            name: name.to_string(),
            paper_level: self.paper_level,
            toner_level: self.toner_level,
            printed: self.printed,
            paper_refills: self.paper_refills,
            toner_refills: self.toner_refills,
            active_consumers: self.active_consumers,
        }
    }
}

/// Every counter of a printer, read together under one lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterSnapshot {
    pub name: String,
    pub paper_level: u32,
    pub toner_level: u32,
    pub printed: u64,
    pub paper_refills: u64,
    pub toner_refills: u64,
    pub active_consumers: usize,
}

impl Display for PrinterSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "LaserPrinter [")?;
        writeln!(f, "\tPrinterKey:     '{}'", self.name)?;
        writeln!(f, "\tPaper Level:    {}", self.paper_level)?;
        writeln!(f, "\tToner Level:    {}", self.toner_level)?;
        writeln!(f, "\tSum of Prints:  {}", self.printed)?;
        writeln!(f, "\tPaper Refills:  {}", self.paper_refills)?;
        writeln!(f, "\tToner Replaces: {}", self.toner_refills)?;
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(paper: u32, toner: u32) -> PrinterState {
        PrinterState::new(&PrinterConfig {
            initial_paper: paper,
            initial_toner: toner,
            ..PrinterConfig::default()
        })
    }

    #[test]
    fn test_shortage_distinguishes_resources() {
        assert_eq!(state(0, 20).shortage(5), Some(Shortage::Paper));
        assert_eq!(state(20, 0).shortage(5), Some(Shortage::Toner));
        assert_eq!(state(1, 1).shortage(5), Some(Shortage::Both));
        assert_eq!(state(5, 5).shortage(5), None);
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let mut s = state(10, 3);
        assert_eq!(s.consume(5), Err(MonitorError::CounterUnderflow("toner level")));
        assert_eq!((s.paper_level, s.toner_level, s.printed), (10, 3, 0));

        s.consume(3).unwrap();
        assert_eq!((s.paper_level, s.toner_level, s.printed), (7, 0, 1));
    }

    #[test]
    fn test_snapshot_summary_lists_counters() {
        let summary = state(45, 15).snapshot("LP:test").to_string();
        assert!(summary.contains("'LP:test'"));
        assert!(summary.contains("Paper Level:    45"));
        assert!(summary.contains("Toner Level:    15"));
        assert!(summary.contains("Sum of Prints:  0"));
    }
}
