use clap::Parser;
use print_monitor::tracing::setup_tracing;
use printing_system::config::ConfigLoader;
use printing_system::error::SystemError;
use printing_system::lifecycle::PrintingSystem;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[clap(about, version)]
struct Args {
    /// TOML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of students sharing the printer
    #[arg(long)]
    students: Option<usize>,

    /// Documents each student prints
    #[arg(long)]
    documents: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if let Some(students) = args.students {
        config.students = students;
    }
    if let Some(documents) = args.documents {
        config.documents_per_student = documents;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let system = PrintingSystem::start(config).await?;

    tokio::select! {
        summary = system.wait() => {
            let summary = summary?;
            println!("\nAll processes ended\n\nPrinting printer summary\n\n{summary}");
            info!("Application completed successfully");
            Ok(())
        }
        _ = interrupted() => {
            error!("Interrupted while waiting for students and technicians");
            Err(SystemError::Interrupted)
        }
    }
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
