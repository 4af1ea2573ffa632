//! # Student Actor
//!
//! A student prints a fixed number of documents, one after another, pausing
//! for a random interval between them. Each document gets a random page count.
//!
//! ## Usage
//!
//! ```rust
//! use print_monitor::mock::MockPrinter;
//! use print_monitor::ServicePrinter;
//! use printing_system::config::{PageRange, PauseRange};
//! use printing_system::student_actor::Student;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let printer = Arc::new(MockPrinter::new());
//!     let pause = PauseRange { min_ms: 0, max_ms: 0 };
//!     let student = Student::new(
//!         "student-0",
//!         2,
//!         PageRange { min: 1, max: 10 },
//!         pause,
//!         rand::rngs::StdRng::seed_from_u64(1),
//!     );
//!
//!     // Register before the run, deregistration happens when it ends.
//!     printer.register_consumer().await;
//!     let report = student.run(printer.clone()).await.unwrap();
//!     assert_eq!(report.jobs, 2);
//!     assert_eq!(printer.active_consumers(), 0);
//! }
//! ```

use crate::config::{PageRange, PauseRange, SimulationConfig};
use crate::model::StudentReport;
use print_monitor::{Job, MonitorError, ServicePrinter};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

/// A student sharing the printer.
pub struct Student {
    name: String,
    documents: usize,
    pages: PageRange,
    pause: PauseRange,
    rng: StdRng,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        documents: usize,
        pages: PageRange,
        pause: PauseRange,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            documents,
            pages,
            pause,
            rng,
        }
    }

    /// Builds the student at `index` (named `student-<index>`) from the simulation settings.
    pub fn from_config(index: usize, config: &SimulationConfig) -> Self {
        Self::new(
            format!("student-{index}"),
            config.documents_per_student,
            config.pages,
            config.student_pause,
            config.rng_for(index),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prints every document, then deregisters from the printer.
    ///
    /// The student must already be registered with `printer`. Deregistration
    /// happens whether or not printing succeeded, so technicians are never
    /// left waiting on a student that has stopped.
    pub async fn run<P>(mut self, printer: Arc<P>) -> Result<StudentReport, MonitorError>
    where
        P: ServicePrinter + ?Sized,
    {
        let printed = self.print_documents(printer.as_ref()).await;
        printer.deregister_consumer().await?;
        let report = printed?;
        info!(
            jobs = report.jobs,
            total_pages = report.total_pages,
            "Printing completed successfully"
        );
        Ok(report)
    }

    async fn print_documents<P>(&mut self, printer: &P) -> Result<StudentReport, MonitorError>
    where
        P: ServicePrinter + ?Sized,
    {
        let mut report = StudentReport {
            name: self.name.clone(),
            jobs: 0,
            total_pages: 0,
        };

        for n in 0..self.documents {
            let job = Job::for_owner(&self.name, n, self.pages.sample(&mut self.rng))?;
            let receipt = printer.submit_job(job).await?;
            report.jobs += 1;
            report.total_pages += u64::from(receipt.pages);

            if n + 1 < self.documents {
                let pause = self.pause.sample(&mut self.rng);
                debug!(?pause, "Pausing before next document");
                sleep(pause).await;
            }
        }
        Ok(report)
    }
}
