use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::fstools::transcript_path;
use crate::metadata::MetadataService;
use crate::transcript::formatter::TextFormatter;
use crate::transcript::TranscriptService;
use crate::transcript_state::TaskOutcome;
use crate::transcript_task::{LanguageSelection, VideoTask};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub output_dir: PathBuf,
    /// Pause after each saved transcript.
    pub delay: Duration,
    pub formatter: TextFormatter,
}

impl FetchOptions {
    pub fn new(output_dir: PathBuf) -> Self {
        FetchOptions {
            output_dir,
            delay: DEFAULT_DELAY,
            formatter: TextFormatter::default(),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

struct SavedTranscript {
    title: String,
    language: String,
    path: PathBuf,
    bytes: usize,
}

/// Downloads and saves the transcript of one video at a time. Shared by
/// every worker in the pool.
pub struct TranscriptFetcher {
    metadata: Arc<dyn MetadataService>,
    transcripts: Arc<dyn TranscriptService>,
    options: FetchOptions,
}

impl TranscriptFetcher {
    pub fn new(metadata: Arc<dyn MetadataService>, transcripts: Arc<dyn TranscriptService>, options: FetchOptions) -> Self {
        TranscriptFetcher {
            metadata,
            transcripts,
            options,
        }
    }

    /// Never fails: every error becomes a skipped or failed outcome.
    pub fn fetch_one(&self, task: &VideoTask) -> TaskOutcome {
        let video_id = task.video_id.clone();
        match self.save_transcript(task) {
            Ok(saved) => {
                debug!(video_id = %video_id, path = ?saved.path, bytes = saved.bytes, "saved transcript");
                if !self.options.delay.is_zero() {
                    thread::sleep(self.options.delay);
                }
                TaskOutcome::Saved {
                    video_id,
                    title: saved.title,
                    language: saved.language,
                    path: saved.path,
                    bytes: saved.bytes,
                }
            },
            Err(err) if err.is_skip() => {
                debug!(video_id = %video_id, error = %err, "skipping video");
                TaskOutcome::Skipped { video_id, reason: err.to_string() }
            },
            Err(err) => {
                debug!(video_id = %video_id, error = %err, "transcript download failed");
                TaskOutcome::Failed { video_id, reason: err.to_string() }
            },
        }
    }

    fn save_transcript(&self, task: &VideoTask) -> Result<SavedTranscript, FetchError> {
        let video_id = task.video_id.as_str();
        let languages = match &task.languages {
            LanguageSelection::All => self.transcripts.available_languages(video_id)?,
            LanguageSelection::Preferred(codes) => codes.clone(),
        };
        let transcript = self.transcripts.fetch(video_id, &languages)?;
        debug!(video_id, language = %transcript.language_code, generated = transcript.is_generated, "fetched transcript");
        let video = self.metadata.resolve_video(video_id)?;

        let path = transcript_path(&self.options.output_dir, &video.title, video_id);
        let text = self.options.formatter.format_transcript(&transcript);
        fs::write(&path, &text).map_err(|err| FetchError::for_file(&path, err))?;

        Ok(SavedTranscript {
            title: video.title,
            language: transcript.language_label(),
            path,
            bytes: text.len(),
        })
    }
}
