use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

/// Lifecycle of one video task. Terminal states are never left.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskState {
    Pending,
    Running,
    Saved,
    Skipped,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Saved | TaskState::Skipped | TaskState::Failed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TaskOutcome {
    Saved {
        video_id: String,
        title: String,
        language: String,
        path: PathBuf,
        bytes: usize,
    },
    Skipped {
        video_id: String,
        reason: String,
    },
    Failed {
        video_id: String,
        reason: String,
    },
}

impl TaskOutcome {
    pub fn video_id(&self) -> &str {
        match self {
            TaskOutcome::Saved { video_id, .. } => video_id,
            TaskOutcome::Skipped { video_id, .. } => video_id,
            TaskOutcome::Failed { video_id, .. } => video_id,
        }
    }

    pub fn state(&self) -> TaskState {
        match self {
            TaskOutcome::Saved { .. } => TaskState::Saved,
            TaskOutcome::Skipped { .. } => TaskState::Skipped,
            TaskOutcome::Failed { .. } => TaskState::Failed,
        }
    }
}

impl Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskOutcome::Saved { path, language, .. } => {
                let name = path.file_name().unwrap_or(path.as_os_str());
                write!(f, "Saved: {} ({})", name.to_string_lossy(), language)
            },
            TaskOutcome::Skipped { video_id, reason } => write!(f, "Skipping video {}: {}", video_id, reason),
            TaskOutcome::Failed { video_id, reason } => write!(f, "Unknown error for {}: {}", video_id, reason),
        }
    }
}

/// Aggregate of a batch run. `processed() <= total` always holds, with
/// equality at normal completion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchOutcome {
    pub total: usize,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes_written: usize,
    pub interrupted: bool,
    pub elapsed: Duration,
}

impl BatchOutcome {
    pub fn new(total: usize) -> Self {
        BatchOutcome {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Saved { bytes, .. } => {
                self.saved += 1;
                self.bytes_written += bytes;
            },
            TaskOutcome::Skipped { .. } => self.skipped += 1,
            TaskOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.saved + self.skipped + self.failed
    }

    pub fn is_complete(&self) -> bool {
        !self.interrupted && self.processed() == self.total
    }
}
