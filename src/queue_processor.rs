use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::debug;

use crate::fetcher::TranscriptFetcher;
use crate::transcript_state::TaskOutcome;
use crate::transcript_task::VideoTask;

#[derive(Clone, Debug)]
pub enum QueueProcessorMessage {
    TaskStart(VideoTask),
    TaskEnd(TaskOutcome),
}

/// Fixed-size pool of worker threads draining a shared task queue. Each
/// worker runs one task to completion before taking the next.
pub struct QueueProcessor {
    queue: Arc<Mutex<VecDeque<VideoTask>>>,
    stop: Arc<AtomicBool>,
    subscribers: Vec<Sender<QueueProcessorMessage>>,
    workers: usize,
}

impl QueueProcessor {
    pub fn new(workers: usize, stop: Arc<AtomicBool>) -> Self {
        QueueProcessor {
            stop,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            subscribers: vec![],
            workers: workers.max(1),
        }
    }

    pub fn enqueue(&mut self, task: VideoTask) {
        let mut q = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        q.push_back(task);
    }

    pub fn subscribe(&mut self) -> Receiver<QueueProcessorMessage> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Spawns the workers. Subscriber channels disconnect once every worker
    /// has exited, which happens when the queue is drained or on stop.
    pub fn start(self, fetcher: Arc<TranscriptFetcher>) -> Vec<JoinHandle<()>> {
        (0..self.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    queue: Arc::clone(&self.queue),
                    stop: Arc::clone(&self.stop),
                    subscribers: self.subscribers.clone(),
                    fetcher: Arc::clone(&fetcher),
                };
                thread::spawn(move || worker.forever())
            })
            .collect()
    }
}

struct Worker {
    id: usize,
    queue: Arc<Mutex<VecDeque<VideoTask>>>,
    stop: Arc<AtomicBool>,
    subscribers: Vec<Sender<QueueProcessorMessage>>,
    fetcher: Arc<TranscriptFetcher>,
}

impl Worker {
    fn should_stop(&self) -> bool { self.stop.load(Ordering::SeqCst) }

    fn next_item(&self) -> Option<VideoTask> {
        let mut q = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        q.pop_front()
    }

    fn publish(&self, msg: QueueProcessorMessage) {
        for tx in &self.subscribers {
            let _ = tx.send(msg.clone());
        }
    }

    fn forever(self) {
        while !self.should_stop() {
            match self.next_item() {
                None => break,
                Some(task) => {
                    debug!(worker = self.id, video_id = %task.video_id, "task started");
                    self.publish(QueueProcessorMessage::TaskStart(task.clone()));
                    let outcome = self.fetcher.fetch_one(&task);
                    self.publish(QueueProcessorMessage::TaskEnd(outcome));
                },
            };
        }
        debug!(worker = self.id, "worker exiting");
    }
}
