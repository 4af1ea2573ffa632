//! # Simulation Configuration
//!
//! Settings are merged from three sources, later ones overriding earlier ones:
//!
//! 1. [`SimulationConfig::default()`]
//! 2. A TOML file, when one is given
//! 3. Environment variables prefixed with `PRINTSIM_`, nested with `__`
//!    (e.g. `PRINTSIM_PRINTER__INITIAL_PAPER=100`)
//!
//! ```toml
//! students = 6
//! documents_per_student = 3
//! seed = 42
//!
//! [printer]
//! initial_paper = 100
//!
//! [pages]
//! min = 1
//! max = 8
//! ```

use crate::error::SystemError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use print_monitor::PrinterConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const CONFIG_ENV_PREFIX: &str = "PRINTSIM_";

/// Page counts drawn for each document; `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub min: u32,
    pub max: u32,
}

impl PageRange {
    /// The largest page count a document can have.
    pub fn largest(&self) -> u32 {
        self.max.saturating_sub(1)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..self.max)
    }
}

/// Random pause bounds in milliseconds; `max_ms` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl PauseRange {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..self.max_ms))
    }
}

/// Settings shared by both technicians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianConfig {
    /// Refill attempts each technician makes before going home.
    pub attempts: u32,
    pub pause: PauseRange,
}

/// Everything needed to run one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub printer: PrinterConfig,
    pub students: usize,
    pub documents_per_student: usize,
    pub pages: PageRange,
    pub student_pause: PauseRange,
    pub technicians: TechnicianConfig,
    /// Makes every actor's random choices reproducible.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            printer: PrinterConfig::default(),
            students: 4,
            documents_per_student: 5,
            pages: PageRange { min: 1, max: 10 },
            student_pause: PauseRange {
                min_ms: 1000,
                max_ms: 4000,
            },
            technicians: TechnicianConfig {
                attempts: 3,
                pause: PauseRange {
                    min_ms: 1000,
                    max_ms: 5000,
                },
            },
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Rejects settings under which the simulation could stall for good.
    ///
    /// A document larger than the toner minimum could wait on a cartridge
    /// that holds too little for it but too much to be replaced. The same
    /// holds for paper above the refill line. Both page bounds are checked
    /// up front.
    pub fn validate(&self) -> Result<(), SystemError> {
        self.printer.validate()?;

        let invalid = |msg: String| Err(SystemError::InvalidSettings(msg));
        if self.pages.min == 0 {
            return invalid("pages.min must be at least 1".into());
        }
        if self.pages.max <= self.pages.min {
            return invalid(format!(
                "pages.max {} must be greater than pages.min {}",
                self.pages.max, self.pages.min
            ));
        }

        let largest = self.pages.largest();
        if largest > self.printer.toner_minimum_level {
            return invalid(format!(
                "documents of up to {largest} pages can deadlock with the toner technician \
                 (toner_minimum_level is {})",
                self.printer.toner_minimum_level
            ));
        }
        let paper_limit = self.printer.paper_refill_line() + 1;
        if largest > paper_limit {
            return invalid(format!(
                "documents of up to {largest} pages can deadlock with the paper technician \
                 (at most {paper_limit} pages are guaranteed)"
            ));
        }

        for (what, pause) in [
            ("student_pause", self.student_pause),
            ("technicians.pause", self.technicians.pause),
        ] {
            if pause.max_ms < pause.min_ms {
                return invalid(format!("{what}.max_ms is below {what}.min_ms"));
            }
        }
        Ok(())
    }

    /// Builds the random generator for the actor at `index`.
    pub fn rng_for(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Loads a [`SimulationConfig`] from defaults, an optional TOML file and the environment.
#[derive(Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merges all sources, then validates the result.
    pub fn load(&self) -> Result<SimulationConfig, SystemError> {
        let mut figment = Figment::new().merge(Serialized::defaults(SimulationConfig::default()));

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(SystemError::InvalidSettings(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split("__"));

        let config: SimulationConfig = figment.extract()?;
        debug!(?config, "Configuration loaded");
        config.validate()?;
        Ok(config)
    }
}
