use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::TranscriptError;
use crate::ytdlp::YtDlp;
use crate::ytdlp::probe::CaptionTrack;
use super::json3::parse_json3;
use super::{find_track, language_codes, Transcript, TranscriptService};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transcript service backed by the caption tracks yt-dlp discovers.
pub struct YouTubeTranscripts {
    ytdlp: YtDlp,
    client: Client,
    tracks: Mutex<HashMap<String, Vec<CaptionTrack>>>,
}

impl YouTubeTranscripts {
    pub fn new(ytdlp: YtDlp) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(YouTubeTranscripts {
            ytdlp,
            client,
            tracks: Mutex::new(HashMap::new()),
        })
    }

    /// The track list is cached so that a languages query followed by a
    /// fetch costs one yt-dlp run. `fetch` evicts the entry.
    fn caption_tracks(&self, video_id: &str, evict: bool) -> Result<Vec<CaptionTrack>, TranscriptError> {
        {
            let mut cache = self.tracks.lock().unwrap_or_else(|e| e.into_inner());
            let cached = match evict {
                true => cache.remove(video_id),
                false => cache.get(video_id).cloned(),
            };
            if let Some(tracks) = cached {
                return Ok(tracks);
            }
        }

        let video = self.ytdlp
            .probe_video(video_id)
            .map_err(|err| TranscriptError::for_video(video_id, err))?;
        let tracks = video.caption_tracks();
        debug!(video_id, tracks = tracks.len(), "discovered caption tracks");

        if !evict {
            let mut cache = self.tracks.lock().unwrap_or_else(|e| e.into_inner());
            cache.insert(String::from(video_id), tracks.clone());
        }
        Ok(tracks)
    }

    fn download(&self, video_id: &str, track: &CaptionTrack) -> Result<String, TranscriptError> {
        let request_error = |err: reqwest::Error| TranscriptError::Request {
            video_id: String::from(video_id),
            reason: err.to_string(),
        };
        debug!(video_id, language = %track.language_code, generated = track.is_generated, "downloading transcript");
        self.client
            .get(&track.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(request_error)
    }
}

impl TranscriptService for YouTubeTranscripts {
    fn available_languages(&self, video_id: &str) -> Result<Vec<String>, TranscriptError> {
        Ok(language_codes(&self.caption_tracks(video_id, false)?))
    }

    fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript, TranscriptError> {
        let tracks = self.caption_tracks(video_id, true)?;
        if tracks.is_empty() {
            return Err(TranscriptError::TranscriptsDisabled(String::from(video_id)));
        }

        let track = find_track(&tracks, languages).ok_or_else(|| TranscriptError::NoTranscriptFound {
            video_id: String::from(video_id),
            requested: languages.to_vec(),
            available: language_codes(&tracks),
        })?;

        let body = self.download(video_id, track)?;
        let snippets = parse_json3(&body).map_err(|err| TranscriptError::Parse {
            video_id: String::from(video_id),
            reason: err.to_string(),
        })?;

        Ok(Transcript {
            language: track.language.clone(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated,
            snippets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ytdlp_is_request_error() {
        let service = YouTubeTranscripts::new(YtDlp::new("./definitely-not-yt-dlp")).unwrap();
        assert!(matches!(
            service.available_languages("abc"),
            Err(TranscriptError::Request { video_id, .. }) if video_id == "abc"));
        assert!(matches!(
            service.fetch("abc", &[String::from("en")]),
            Err(TranscriptError::Request { .. })));
    }
}
