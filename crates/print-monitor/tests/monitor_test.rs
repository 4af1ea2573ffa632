use print_monitor::{Job, LaserPrinter, MonitorError, PrinterConfig, RefillOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};

fn printer(paper: u32, toner: u32, refill_wait_ms: u64) -> Arc<LaserPrinter> {
    let config = PrinterConfig {
        name: "LP:test".to_string(),
        initial_paper: paper,
        initial_toner: toner,
        refill_wait_ms,
        ..PrinterConfig::default()
    };
    Arc::new(LaserPrinter::new(config).expect("valid config"))
}

fn job(owner: &str, n: usize, pages: u32) -> Job {
    Job::for_owner(owner, n, pages).expect("non-empty job")
}

/// Empty tray: the job blocks until the technician adds a pack.
#[tokio::test]
async fn test_job_waits_for_paper_then_prints() {
    let printer = printer(0, 20, 1000);
    printer.register_consumer().await;

    let student = tokio::spawn({
        let printer = printer.clone();
        async move { printer.submit_job(job("student-0", 0, 5)).await }
    });

    sleep(Duration::from_millis(50)).await;
    assert!(!student.is_finished(), "job should be blocked on paper");
    let before = printer.snapshot().await;
    assert_eq!((before.paper_level, before.toner_level, before.printed), (0, 20, 0));

    assert_eq!(printer.refill_paper().await, RefillOutcome::Refilled { level: 50 });

    let receipt = timeout(Duration::from_secs(2), student)
        .await
        .expect("job should complete after refill")
        .unwrap()
        .unwrap();
    assert_eq!(receipt.paper_left, 45);
    assert_eq!(receipt.toner_left, 15);

    let after = printer.snapshot().await;
    assert_eq!((after.paper_level, after.toner_level, after.printed), (45, 15, 1));
    assert_eq!(after.paper_refills, 1);
}

/// Toner drops below the minimum after 11 pages; the next replacement succeeds.
#[tokio::test]
async fn test_toner_replaced_once_below_minimum() {
    let printer = printer(250, 20, 1000);
    printer.register_consumer().await;

    printer.submit_job(job("student-0", 0, 5)).await.unwrap();
    printer.submit_job(job("student-0", 1, 6)).await.unwrap();
    assert_eq!(printer.snapshot().await.toner_level, 9);

    let outcome = timeout(Duration::from_secs(1), printer.refill_toner())
        .await
        .expect("toner below minimum should be replaced immediately");
    assert_eq!(outcome, RefillOutcome::Refilled { level: 500 });
    assert_eq!(printer.toner_refill_count().await, 1);
}

#[tokio::test]
async fn test_paper_refill_respects_refill_line() {
    // 201 sheets leave no room for a 50-sheet pack in a 250-sheet tray.
    let printer = printer(201, 500, 30_000);
    printer.register_consumer().await;

    let technician = tokio::spawn({
        let printer = printer.clone();
        async move { printer.refill_paper().await }
    });

    sleep(Duration::from_millis(50)).await;
    assert!(!technician.is_finished(), "tray above the refill line must not be refilled");
    assert_eq!(printer.snapshot().await.paper_level, 201);

    // One sheet printed puts the tray exactly on the line.
    printer.submit_job(job("student-0", 0, 1)).await.unwrap();

    let outcome = timeout(Duration::from_secs(2), technician)
        .await
        .expect("print should wake the technician")
        .unwrap();
    assert_eq!(outcome, RefillOutcome::Refilled { level: 250 });
}

#[tokio::test]
async fn test_toner_at_minimum_is_not_replaced() {
    let printer = printer(250, 10, 30_000);
    printer.register_consumer().await;

    let technician = tokio::spawn({
        let printer = printer.clone();
        async move { printer.refill_toner().await }
    });

    sleep(Duration::from_millis(50)).await;
    assert!(!technician.is_finished());
    assert_eq!(printer.snapshot().await.toner_level, 10);

    printer.submit_job(job("student-0", 0, 1)).await.unwrap();
    let outcome = timeout(Duration::from_secs(2), technician).await.unwrap().unwrap();
    assert_eq!(outcome, RefillOutcome::Refilled { level: 500 });
}

/// With no student left, a technician gives up within one wait period.
#[tokio::test]
async fn test_refill_abandoned_once_students_are_gone() {
    let printer = printer(250, 500, 100);

    let started = Instant::now();
    assert_eq!(printer.refill_paper().await, RefillOutcome::Abandoned);
    assert_eq!(printer.refill_toner().await, RefillOutcome::Abandoned);
    assert!(started.elapsed() < Duration::from_secs(2));

    let snapshot = printer.snapshot().await;
    assert_eq!((snapshot.paper_level, snapshot.toner_level), (250, 500));
    assert_eq!((snapshot.paper_refills, snapshot.toner_refills), (0, 0));
}

/// The last student leaving wakes technicians without waiting out the timeout.
#[tokio::test]
async fn test_last_student_leaving_wakes_technicians() {
    let printer = printer(250, 500, 60_000);
    printer.register_consumer().await;

    let paper = tokio::spawn({
        let printer = printer.clone();
        async move { printer.refill_paper().await }
    });
    let toner = tokio::spawn({
        let printer = printer.clone();
        async move { printer.refill_toner().await }
    });

    sleep(Duration::from_millis(50)).await;
    printer.deregister_consumer().await.unwrap();

    let paper = timeout(Duration::from_secs(2), paper).await.unwrap().unwrap();
    let toner = timeout(Duration::from_secs(2), toner).await.unwrap().unwrap();
    assert_eq!(paper, RefillOutcome::Abandoned);
    assert_eq!(toner, RefillOutcome::Abandoned);
}

#[tokio::test]
async fn test_oversized_job_is_rejected() {
    let printer = printer(250, 500, 1000);
    let result = printer.submit_job(job("student-0", 0, 251)).await;
    assert_eq!(
        result,
        Err(MonitorError::JobTooLarge {
            job: "student-0_doc.0".to_string(),
            pages: 251,
            max: 250,
        })
    );
    assert_eq!(printer.snapshot().await.printed, 0);
}

#[tokio::test]
async fn test_deregister_underflow_is_reported() {
    let printer = printer(0, 20, 1000);
    assert_eq!(
        printer.deregister_consumer().await,
        Err(MonitorError::CounterUnderflow("active consumers"))
    );
}

#[tokio::test]
async fn test_interrupted_student_keeps_waiting() {
    let printer = printer(0, 20, 1000);
    printer.register_consumer().await;

    let student = tokio::spawn({
        let printer = printer.clone();
        async move { printer.submit_job(job("student-0", 0, 4)).await }
    });

    sleep(Duration::from_millis(50)).await;
    printer.interrupt_waiters().await;
    sleep(Duration::from_millis(50)).await;
    assert!(!student.is_finished(), "an interruption must not abort the wait");

    printer.refill_paper().await;
    let receipt = timeout(Duration::from_secs(2), student).await.unwrap().unwrap().unwrap();
    assert_eq!(receipt.paper_left, 46);
}

/// Many students and both technicians hammering one printer. The final
/// counters must equal the sum of every individual successful operation.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_counters_match_operations_under_contention() {
    const STUDENTS: usize = 16;
    const JOBS: usize = 20;

    let printer = printer(0, 20, 20);
    for _ in 0..STUDENTS {
        printer.register_consumer().await;
    }

    let mut students = Vec::new();
    for s in 0..STUDENTS {
        let printer = printer.clone();
        students.push(tokio::spawn(async move {
            let mut pages = 0u64;
            for n in 0..JOBS {
                let size = ((s + n) % 9 + 1) as u32;
                let receipt = printer.submit_job(job(&format!("student-{s}"), n, size)).await.unwrap();
                assert_eq!(receipt.pages, size);
                pages += u64::from(size);
            }
            printer.deregister_consumer().await.unwrap();
            pages
        }));
    }

    let paper_tech = tokio::spawn({
        let printer = printer.clone();
        async move { while printer.refill_paper().await.is_refilled() {} }
    });
    let toner_tech = tokio::spawn({
        let printer = printer.clone();
        async move { while printer.refill_toner().await.is_refilled() {} }
    });

    let mut total_pages = 0u64;
    for student in students {
        total_pages += timeout(Duration::from_secs(30), student)
            .await
            .expect("students should not deadlock")
            .unwrap();
    }
    timeout(Duration::from_secs(5), paper_tech).await.unwrap().unwrap();
    timeout(Duration::from_secs(5), toner_tech).await.unwrap().unwrap();

    let snapshot = printer.snapshot().await;
    assert_eq!(snapshot.printed, (STUDENTS * JOBS) as u64);
    assert_eq!(
        u64::from(snapshot.paper_level),
        snapshot.paper_refills * 50 - total_pages
    );
    assert!(snapshot.paper_level <= 250);
    assert!(snapshot.toner_level <= 500);
    assert_eq!(snapshot.active_consumers, 0);
}
