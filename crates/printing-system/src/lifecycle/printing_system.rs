use crate::config::SimulationConfig;
use crate::error::SystemError;
use crate::model::{RunSummary, StudentReport, TechnicianReport};
use crate::student_actor::Student;
use crate::technician_actor::Technician;
use print_monitor::{LaserPrinter, MonitorError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, warn, Instrument};

type StudentHandle = JoinHandle<Result<StudentReport, MonitorError>>;
type TechnicianHandle = JoinHandle<TechnicianReport>;

/// Owns the shared printer and the tasks of every actor using it.
pub struct PrintingSystem {
    printer: Arc<LaserPrinter>,
    students: Vec<(String, StudentHandle)>,
    technicians: Vec<(String, TechnicianHandle)>,
}

impl PrintingSystem {
    /// Validates `config`, builds the printer and spawns every actor.
    ///
    /// Students are registered with the printer before any technician starts,
    /// so no technician can mistake an unstarted run for a finished one.
    pub async fn start(config: SimulationConfig) -> Result<Self, SystemError> {
        config.validate()?;
        let printer = Arc::new(LaserPrinter::new(config.printer.clone())?);
        info!(
            printer = printer.name(),
            students = config.students,
            documents = config.documents_per_student,
            "Starting printing system"
        );
        warn_if_paper_may_run_out(&config);

        let mut students = Vec::with_capacity(config.students);
        for index in 0..config.students {
            let student = Student::from_config(index, &config);
            let name = student.name().to_string();
            printer.register_consumer().await;

            let span = info_span!("student", name = %name);
            let handle = tokio::spawn(student.run(printer.clone()).instrument(span));
            students.push((name, handle));
        }

        let technicians = [Technician::paper(&config), Technician::toner(&config)]
            .into_iter()
            .map(|technician| {
                let name = technician.name().to_string();
                let span = info_span!("technician", name = %name, supply = %technician.supply());
                let handle = tokio::spawn(technician.run(printer.clone()).instrument(span));
                (name, handle)
            })
            .collect();

        Ok(Self {
            printer,
            students,
            technicians,
        })
    }

    pub fn printer(&self) -> Arc<LaserPrinter> {
        self.printer.clone()
    }

    /// Waits for every actor and returns the run summary.
    ///
    /// Every task is awaited even after a failure; the first failure is
    /// returned once they are all done.
    pub async fn wait(self) -> Result<RunSummary, SystemError> {
        let mut failure = None;

        let mut students = Vec::with_capacity(self.students.len());
        for (name, handle) in self.students {
            match handle.await {
                Ok(Ok(report)) => students.push(report),
                Ok(Err(e)) => {
                    error!(student = %name, error = %e, "Student stopped early");
                    failure = failure.or(Some(SystemError::Monitor(e)));
                }
                Err(join_error) => {
                    error!(student = %name, error = %join_error, "Student task failed");
                    // The task died before deregistering itself.
                    self.printer.deregister_consumer().await?;
                    failure = failure.or(Some(SystemError::ActorFailed {
                        name,
                        reason: join_error.to_string(),
                    }));
                }
            }
        }

        let mut technicians = Vec::with_capacity(self.technicians.len());
        for (name, handle) in self.technicians {
            match handle.await {
                Ok(report) => technicians.push(report),
                Err(join_error) => {
                    error!(technician = %name, error = %join_error, "Technician task failed");
                    failure = failure.or(Some(SystemError::ActorFailed {
                        name,
                        reason: join_error.to_string(),
                    }));
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        let printer = self.printer.snapshot().await;
        info!(
            paper = printer.paper_level,
            toner = printer.toner_level,
            printed = printer.printed,
            paper_refills = printer.paper_refills,
            toner_refills = printer.toner_refills,
            "All processes ended"
        );
        Ok(RunSummary {
            printer,
            students,
            technicians,
        })
    }
}

/// Students wait forever once the paper technician has used up its attempts.
fn warn_if_paper_may_run_out(config: &SimulationConfig) {
    let worst_case = config.students as u64
        * config.documents_per_student as u64
        * u64::from(config.pages.largest());
    let supply = u64::from(config.printer.initial_paper)
        + u64::from(config.technicians.attempts) * u64::from(config.printer.paper_pack_size);
    if worst_case > supply {
        warn!(
            worst_case,
            supply, "Students may need more paper than the technician can bring"
        );
    }
}
