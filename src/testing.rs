use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::{MetadataError, TranscriptError};
use crate::metadata::{MetadataService, PlaylistInfo, VideoInfo};
use crate::transcript::{Transcript, TranscriptService, TranscriptSnippet};

pub struct FakeMetadata {
    title: String,
    video_ids: Vec<String>,
    playlist_error: Mutex<Option<MetadataError>>,
    titles: HashMap<String, String>,
    unavailable: Vec<String>,
    playlist_calls: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn playlist(title: &str, video_ids: &[&str]) -> Self {
        FakeMetadata {
            title: String::from(title),
            video_ids: video_ids.iter().map(|id| String::from(*id)).collect(),
            playlist_error: Mutex::new(None),
            titles: HashMap::new(),
            unavailable: vec![],
            playlist_calls: Mutex::new(vec![]),
        }
    }

    pub fn failing(error: MetadataError) -> Self {
        let metadata = FakeMetadata::playlist("", &[]);
        *metadata.playlist_error.lock().unwrap() = Some(error);
        metadata
    }

    pub fn title(mut self, video_id: &str, title: &str) -> Self {
        self.titles.insert(String::from(video_id), String::from(title));
        self
    }

    /// Title lookups for `video_id` fail as if the video had been removed.
    pub fn unavailable(mut self, video_id: &str) -> Self {
        self.unavailable.push(String::from(video_id));
        self
    }

    pub fn playlist_calls(&self) -> Vec<String> {
        self.playlist_calls.lock().unwrap().clone()
    }
}

impl MetadataService for FakeMetadata {
    fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, MetadataError> {
        self.playlist_calls.lock().unwrap().push(String::from(reference));
        if let Some(err) = self.playlist_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(PlaylistInfo {
            title: self.title.clone(),
            video_ids: self.video_ids.clone(),
        })
    }

    fn resolve_video(&self, video_id: &str) -> Result<VideoInfo, MetadataError> {
        if self.unavailable.iter().any(|id| id == video_id) {
            return Err(MetadataError::Unavailable(format!("[youtube] {video_id}: Video unavailable")));
        }
        Ok(VideoInfo {
            title: self.titles.get(video_id).cloned().unwrap_or_else(|| format!("Video {video_id}")),
        })
    }
}

#[derive(Clone, Debug)]
pub enum Script {
    Unavailable,
    Disabled,
    Text(String),
    /// The fetch panics, taking its worker thread down.
    Panic,
}

/// Scripted transcript service. Every video offers the same languages and,
/// unless scripted otherwise, returns `"<video id>:<language>"` as its text.
pub struct FakeTranscripts {
    available: Vec<String>,
    scripts: HashMap<String, Script>,
    fetch_calls: Mutex<Vec<(String, Vec<String>)>>,
    calls: AtomicUsize,
    interrupt: Option<(usize, Arc<AtomicBool>, Duration)>,
}

impl FakeTranscripts {
    pub fn new(available: &[&str]) -> Self {
        FakeTranscripts {
            available: available.iter().map(|code| String::from(*code)).collect(),
            scripts: HashMap::new(),
            fetch_calls: Mutex::new(vec![]),
            calls: AtomicUsize::new(0),
            interrupt: None,
        }
    }

    pub fn script(mut self, video_id: &str, script: Script) -> Self {
        self.scripts.insert(String::from(video_id), script);
        self
    }

    /// Raises `flag` when the fetch with index `after` starts, then stalls
    /// that fetch for `stall`.
    pub fn interrupt_after(mut self, after: usize, flag: &Arc<AtomicBool>, stall: Duration) -> Self {
        self.interrupt = Some((after, Arc::clone(flag), stall));
        self
    }

    pub fn fetch_calls(&self) -> Vec<(String, Vec<String>)> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TranscriptService for FakeTranscripts {
    fn available_languages(&self, video_id: &str) -> Result<Vec<String>, TranscriptError> {
        match self.scripts.get(video_id) {
            Some(Script::Unavailable) => Err(TranscriptError::VideoUnavailable(String::from(video_id))),
            _ => Ok(self.available.clone()),
        }
    }

    fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript, TranscriptError> {
        self.fetch_calls.lock().unwrap().push((String::from(video_id), languages.to_vec()));
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((after, flag, stall)) = &self.interrupt {
            if call == *after {
                flag.store(true, Ordering::SeqCst);
                thread::sleep(*stall);
            }
        }

        let language = match languages.iter().find(|code| self.available.contains(code)) {
            Some(code) => code.clone(),
            None => return Err(TranscriptError::NoTranscriptFound {
                video_id: String::from(video_id),
                requested: languages.to_vec(),
                available: self.available.clone(),
            }),
        };

        let text = match self.scripts.get(video_id) {
            Some(Script::Unavailable) => return Err(TranscriptError::VideoUnavailable(String::from(video_id))),
            Some(Script::Disabled) => return Err(TranscriptError::TranscriptsDisabled(String::from(video_id))),
            Some(Script::Text(text)) => text.clone(),
            Some(Script::Panic) => panic!("scripted panic for {video_id}"),
            None => format!("{video_id}:{language}"),
        };

        Ok(Transcript {
            language: format!("Language {language}"),
            language_code: language,
            is_generated: false,
            snippets: vec![TranscriptSnippet { text, start: 0.0 }],
        })
    }
}
