use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use pdfbatch::source::Identifier;
use pdfbatch::worker::{FetchOutcome, FetchTask, TaskProcessor, TaskTemplate, WorkerPool};

/// Tracks how many tasks are inside `process` at once
#[derive(Default)]
struct GaugeProcessor {
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TaskProcessor for GaugeProcessor {
    async fn process(&self, task: FetchTask) -> FetchOutcome {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(15)).await;

        self.active.fetch_sub(1, Ordering::SeqCst);

        if task.identifier.as_str().ends_with('0') {
            FetchOutcome::Timeout
        } else {
            FetchOutcome::Success {
                location: task.file_name,
                size: 0,
            }
        }
    }
}

fn plan(count: u64) -> Vec<FetchTask> {
    TaskTemplate::new("http://localhost/{}", "ReglamentoConvivencia")
        .plan((1..=count).map(Identifier::from))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_never_exceeds_pool_size() {
    for workers in [1usize, 3, 8] {
        let processor = GaugeProcessor::default();
        let peak = Arc::clone(&processor.peak);
        let calls = Arc::clone(&processor.calls);

        let pool = WorkerPool::new(processor, workers);
        let summary = pool.run(plan(40)).await;

        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= workers, "peak {} exceeded {} workers", peak, workers);
        assert!(peak >= 1);
        assert_eq!(calls.load(Ordering::SeqCst), 40);

        assert_eq!(summary.total, 40);
        assert_eq!(summary.timed_out, 4);
        assert_eq!(summary.succeeded, 36);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_actually_runs_in_parallel() {
    let processor = GaugeProcessor::default();
    let peak = Arc::clone(&processor.peak);

    let pool = WorkerPool::new(processor, 4);
    pool.run(plan(32)).await;

    assert!(peak.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_fewer_tasks_than_workers() {
    let processor = GaugeProcessor::default();
    let peak = Arc::clone(&processor.peak);

    let pool = WorkerPool::new(processor, 30);
    let summary = pool.run(plan(2)).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 2);
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

/// Fails every task in a different way; none of them may stop the run
struct FlakyProcessor;

#[async_trait]
impl TaskProcessor for FlakyProcessor {
    async fn process(&self, task: FetchTask) -> FetchOutcome {
        let n: u64 = task.identifier.as_str().parse().unwrap();
        match n % 4 {
            0 => FetchOutcome::Success {
                location: task.file_name,
                size: 1,
            },
            1 => FetchOutcome::InvalidResponse {
                status: StatusCode::NOT_FOUND,
            },
            2 => FetchOutcome::Timeout,
            _ => FetchOutcome::TransportError {
                cause: "connection reset by peer".to_string(),
            },
        }
    }
}

#[tokio::test]
async fn test_failures_do_not_stop_other_tasks() {
    let pool = WorkerPool::new(FlakyProcessor, 5);

    let summary = pool.run(plan(100)).await;

    assert_eq!(summary.total, 100);
    assert_eq!(summary.succeeded, 25);
    assert_eq!(summary.invalid_response, 25);
    assert_eq!(summary.timed_out, 25);
    assert_eq!(summary.transport_failed, 25);
    assert_eq!(summary.failed(), 75);
}
