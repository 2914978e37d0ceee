use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("{0} could not be executed")]
    NotInstalled(String),

    #[error("video unavailable: {0}")]
    Unavailable(String),

    #[error("video unplayable: {0}")]
    Unplayable(String),

    #[error("yt-dlp failed: {0}")]
    Service(String),

    #[error("unable to parse yt-dlp output: {0}")]
    Parse(String),

    #[error("{0:?} is a single video")]
    NotAPlaylist(String),
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("{0:?} is not a playlist reference")]
    InvalidReference(String),

    #[error("{0:?} resolved to a single video, not a playlist")]
    NotAPlaylist(String),

    #[error("playlist {0:?} has no videos")]
    EmptyPlaylist(String),

    #[error("playlist {reference:?} is unavailable: {reason}")]
    Unavailable { reference: String, reason: String },

    #[error("unable to resolve playlist {reference:?}: {source}")]
    Service { reference: String, source: MetadataError },
}

impl ResolutionError {
    pub fn for_reference(reference: &str, source: MetadataError) -> Self {
        match source {
            MetadataError::Unavailable(reason) | MetadataError::Unplayable(reason) => ResolutionError::Unavailable {
                reference: String::from(reference),
                reason,
            },
            MetadataError::NotAPlaylist(_) => ResolutionError::NotAPlaylist(String::from(reference)),
            source => ResolutionError::Service {
                reference: String::from(reference),
                source,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("video {0} is unavailable")]
    VideoUnavailable(String),

    #[error("video {video_id} is unplayable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },

    #[error("no transcript found for video {video_id} in {requested:?} (available: {available:?})")]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("request for video {video_id} failed: {reason}")]
    Request { video_id: String, reason: String },

    #[error("unable to parse transcript for video {video_id}: {reason}")]
    Parse { video_id: String, reason: String },
}

impl TranscriptError {
    pub fn for_video(video_id: &str, source: MetadataError) -> Self {
        match source {
            MetadataError::Unavailable(_) => TranscriptError::VideoUnavailable(String::from(video_id)),
            MetadataError::Unplayable(reason) => TranscriptError::VideoUnplayable {
                video_id: String::from(video_id),
                reason,
            },
            MetadataError::Parse(reason) => TranscriptError::Parse {
                video_id: String::from(video_id),
                reason,
            },
            other => TranscriptError::Request {
                video_id: String::from(video_id),
                reason: other.to_string(),
            },
        }
    }

    fn is_skip(&self) -> bool {
        matches!(
            self,
            TranscriptError::VideoUnavailable(_)
                | TranscriptError::VideoUnplayable { .. }
                | TranscriptError::NoTranscriptFound { .. }
        )
    }
}

/// Everything that can go wrong while fetching and saving a single video.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("unable to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn for_file(path: &PathBuf, source: std::io::Error) -> Self {
        FetchError::Io {
            path: PathBuf::from(path),
            source,
        }
    }

    /// Skip conditions are expected outcomes for a playlist entry and are
    /// reported as skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        match self {
            FetchError::Transcript(err) => err.is_skip(),
            FetchError::Metadata(MetadataError::Unavailable(_) | MetadataError::Unplayable(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputDirError {
    #[error("{0:?} exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("unable to create {path:?}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}
