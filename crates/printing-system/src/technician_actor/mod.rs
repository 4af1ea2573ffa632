//! # Technician Actor
//!
//! A technician makes a fixed number of attempts to restock one supply,
//! pausing between attempts (not after the last). Each attempt blocks inside
//! the printer until the supply is low enough. An attempt is abandoned once no
//! student is left to use the printer. Abandoned attempts still count against
//! the budget; the technician goes home after `attempts` tries no matter how
//! they turned out.

use crate::config::{PauseRange, SimulationConfig};
use crate::model::TechnicianReport;
use print_monitor::{RefillOutcome, ServicePrinter, Supply};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

/// A technician keeping one supply of the printer stocked.
pub struct Technician {
    name: String,
    supply: Supply,
    attempts: u32,
    pause: PauseRange,
    rng: StdRng,
}

impl Technician {
    pub fn new(
        name: impl Into<String>,
        supply: Supply,
        attempts: u32,
        pause: PauseRange,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            supply,
            attempts,
            pause,
            rng,
        }
    }

    /// The paper technician, seeded after all students.
    pub fn paper(config: &SimulationConfig) -> Self {
        Self::from_config("PaperTechnician", Supply::Paper, config.students, config)
    }

    /// The toner technician, seeded after the paper technician.
    pub fn toner(config: &SimulationConfig) -> Self {
        Self::from_config("TonerTechnician", Supply::Toner, config.students + 1, config)
    }

    fn from_config(name: &str, supply: Supply, index: usize, config: &SimulationConfig) -> Self {
        Self::new(
            name,
            supply,
            config.technicians.attempts,
            config.technicians.pause,
            config.rng_for(index),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supply(&self) -> Supply {
        self.supply
    }

    pub async fn run<P>(mut self, printer: Arc<P>) -> TechnicianReport
    where
        P: ServicePrinter + ?Sized,
    {
        let mut report = TechnicianReport {
            name: self.name.clone(),
            supply: self.supply,
            attempts: 0,
            refills: 0,
            abandoned: 0,
            printer_total: 0,
        };

        for attempt in 0..self.attempts {
            match printer.refill(self.supply).await {
                RefillOutcome::Refilled { level } => {
                    report.refills += 1;
                    debug!(attempt, level, "Attempt restocked the printer");
                }
                RefillOutcome::Abandoned => {
                    report.abandoned += 1;
                    debug!(attempt, "Attempt abandoned");
                }
            }
            report.attempts += 1;

            if attempt + 1 < self.attempts {
                sleep(self.pause.sample(&mut self.rng)).await;
            }
        }

        report.printer_total = printer.refill_count(self.supply).await;
        match self.supply {
            Supply::Paper => info!(
                total = report.printer_total,
                "Concluded refillings. Total paper packs used"
            ),
            Supply::Toner => info!(
                total = report.printer_total,
                "Concluded replacements. Total cartridges used"
            ),
        }
        report
    }
}
