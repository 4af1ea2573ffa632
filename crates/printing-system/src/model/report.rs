use print_monitor::{PrinterSnapshot, Supply};
use std::fmt::Display;

/// What a student got done before going home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentReport {
    pub name: String,
    pub jobs: usize,
    pub total_pages: u64,
}

/// How a technician's attempts went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicianReport {
    pub name: String,
    pub supply: Supply,
    pub attempts: u32,
    /// Attempts that restocked the printer.
    pub refills: u32,
    /// Attempts given up because no student was left.
    pub abandoned: u32,
    /// Refills of this supply recorded by the printer at the end of the shift.
    pub printer_total: u64,
}

/// Final state of a run: the printer's counters plus every actor's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub printer: PrinterSnapshot,
    pub students: Vec<StudentReport>,
    pub technicians: Vec<TechnicianReport>,
}

impl RunSummary {
    pub fn total_pages(&self) -> u64 {
        self.students.iter().map(|s| s.total_pages).sum()
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.printer)?;
        for student in &self.students {
            writeln!(
                f,
                "{}: {} documents, {} pages",
                student.name, student.jobs, student.total_pages
            )?;
        }
        for tech in &self.technicians {
            writeln!(
                f,
                "{}: {} {} refills in {} attempts ({} abandoned)",
                tech.name, tech.refills, tech.supply, tech.attempts, tech.abandoned
            )?;
        }
        Ok(())
    }
}
