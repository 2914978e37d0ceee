use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use human_repr::{HumanCount, HumanDuration};
use kdam::{term, tqdm, Bar, BarExt};
use tracing::{debug, error, info};

use crate::fetcher::TranscriptFetcher;
use crate::queue_processor::{QueueProcessor, QueueProcessorMessage};
use crate::transcript_state::{BatchOutcome, TaskState};
use crate::transcript_task::VideoTask;

pub const DEFAULT_WORKERS: usize = 5;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs one fetch per video across a worker pool and reports each outcome
/// as it completes.
pub struct BatchFetcher {
    fetcher: Arc<TranscriptFetcher>,
    workers: usize,
    interrupt: Arc<AtomicBool>,
    progress: bool,
}

impl BatchFetcher {
    pub fn new(fetcher: Arc<TranscriptFetcher>, interrupt: Arc<AtomicBool>) -> Self {
        BatchFetcher {
            fetcher,
            interrupt,
            workers: DEFAULT_WORKERS,
            progress: true,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn interrupted(&self) -> bool { self.interrupt.load(Ordering::SeqCst) }

    /// `None` when progress display is off; outcome lines then go to stdout.
    fn progress_bar(&self, total: usize) -> Option<Bar> {
        if !self.progress {
            return None;
        }
        term::init(false);
        Some(tqdm!(
            total = total,
            desc = "Downloading Transcripts",
            unit = "video",
            position = 0,
            force_refresh = true
        ))
    }

    pub fn run(&self, tasks: Vec<VideoTask>) -> BatchOutcome {
        let started = Instant::now();
        let mut outcome = BatchOutcome::new(tasks.len());
        info!(videos = tasks.len(), workers = self.workers, "starting batch");

        let stop = Arc::new(AtomicBool::new(false));
        let mut processor = QueueProcessor::new(self.workers, Arc::clone(&stop));
        let mut states: HashMap<String, TaskState> = HashMap::new();
        for task in tasks {
            states.insert(task.video_id.clone(), TaskState::Pending);
            processor.enqueue(task);
        }
        let messages = processor.subscribe();
        let handles = processor.start(Arc::clone(&self.fetcher));

        let mut pbar = self.progress_bar(outcome.total);

        loop {
            if self.interrupted() {
                stop.store(true, Ordering::SeqCst);
                drain_ready(&messages, &mut states, &mut outcome, &mut pbar);
                outcome.interrupted = true;
                break;
            }

            match messages.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => handle_message(msg, &mut states, &mut outcome, &mut pbar),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if outcome.interrupted {
            let running = states.values().filter(|s| **s == TaskState::Running).count();
            debug!(processed = outcome.processed(), total = outcome.total, running, "batch interrupted; abandoning in-flight tasks");
        } else {
            let panicked = handles.into_iter().map(|handle| handle.join()).filter(Result::is_err).count();
            if panicked > 0 {
                error!(workers = panicked, processed = outcome.processed(), total = outcome.total, "worker thread panicked");
            }
        }

        if pbar.is_some() {
            eprintln!();
        }
        outcome.elapsed = started.elapsed();
        info!(saved = outcome.saved, skipped = outcome.skipped, failed = outcome.failed, "batch finished");
        outcome
    }
}

fn drain_ready(
    messages: &Receiver<QueueProcessorMessage>,
    states: &mut HashMap<String, TaskState>,
    outcome: &mut BatchOutcome,
    pbar: &mut Option<Bar>) {
    while let Ok(msg) = messages.try_recv() {
        handle_message(msg, states, outcome, pbar);
    }
}

fn handle_message(
    msg: QueueProcessorMessage,
    states: &mut HashMap<String, TaskState>,
    outcome: &mut BatchOutcome,
    pbar: &mut Option<Bar>) {
    match msg {
        QueueProcessorMessage::TaskStart(task) => {
            debug!(video_id = %task.video_id, "running");
            states.insert(task.video_id, TaskState::Running);
        },
        QueueProcessorMessage::TaskEnd(task_outcome) => {
            debug_assert!(task_outcome.state().is_terminal());
            states.insert(String::from(task_outcome.video_id()), task_outcome.state());
            outcome.record(&task_outcome);
            match pbar {
                Some(bar) => {
                    let _ = bar.write(task_outcome.to_string());
                    let _ = bar.update(1);
                },
                None => println!("{}", task_outcome),
            }
        },
    }
}

pub fn summary_line(outcome: &BatchOutcome) -> String {
    format!(
        "All transcripts downloaded: {} saved, {} skipped, {} failed in {} ({} written)",
        outcome.saved,
        outcome.skipped,
        outcome.failed,
        outcome.elapsed.human_duration(),
        outcome.bytes_written.human_count_bytes())
}

/// Reported instead of the summary when workers stopped before the queue
/// was drained.
pub fn incomplete_line(outcome: &BatchOutcome) -> String {
    format!(
        "Batch incomplete: {} of {} videos processed ({} saved, {} skipped, {} failed)",
        outcome.processed(),
        outcome.total,
        outcome.saved,
        outcome.skipped,
        outcome.failed)
}
