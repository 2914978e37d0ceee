use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::WATCH_URL;

#[derive(Serialize, Deserialize, Debug)]
pub struct YtDlpPlaylist {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub entries: Option<Vec<Option<YtDlpEntry>>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct YtDlpEntry {
    pub id: Option<String>,
    pub url: Option<String>,
}

impl YtDlpEntry {
    /// Flat playlist entries normally carry the id; older extractors only
    /// give a watch URL.
    pub fn video_id(&self) -> Option<String> {
        match (&self.id, &self.url) {
            (Some(id), _) if !id.is_empty() => Some(id.clone()),
            (_, Some(url)) => video_id_from_url(url),
            _ => None,
        }
    }
}

pub fn video_id_from_url(url: &str) -> Option<String> {
    let id = match url.strip_prefix(WATCH_URL) {
        Some(rest) => rest,
        None => match url.split_once("v=") {
            Some((_, rest)) => rest,
            None => url,
        },
    };
    let id = id.split(['&', '#']).next().unwrap_or_default();
    if id.is_empty() { None } else { Some(String::from(id)) }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct YtDlpVideo {
    pub id: String,
    pub title: String,
    pub subtitles: Option<Map<String, Value>>,
    pub automatic_captions: Option<Map<String, Value>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct YtDlpSubtitleFormat {
    ext: Option<String>,
    url: Option<String>,
    name: Option<String>,
}

/// One caption track that can be downloaded in the `json3` format.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub language: String,
    pub is_generated: bool,
    pub url: String,
}

impl YtDlpVideo {
    /// Manually created tracks first, then generated ones, each in the order
    /// yt-dlp reported them. Machine translations are left out.
    pub fn caption_tracks(&self) -> Vec<CaptionTrack> {
        let mut tracks: Vec<CaptionTrack> = vec![];
        for (captions, is_generated) in [(&self.subtitles, false), (&self.automatic_captions, true)] {
            let Some(captions) = captions else { continue };
            for (code, formats) in captions {
                if code == "live_chat" {
                    continue;
                }
                let language_code = String::from(code.strip_suffix("-orig").unwrap_or(code));
                if tracks.iter().any(|t| t.language_code == language_code && t.is_generated == is_generated) {
                    continue;
                }
                if let Some((url, name)) = json3_format(formats) {
                    tracks.push(CaptionTrack {
                        language: name.unwrap_or_else(|| language_code.clone()),
                        language_code,
                        is_generated,
                        url,
                    });
                }
            }
        }

        tracks
    }
}

fn json3_format(formats: &Value) -> Option<(String, Option<String>)> {
    let formats: Vec<YtDlpSubtitleFormat> = serde_json::from_value(formats.clone()).ok()?;
    formats
        .into_iter()
        .filter(|f| f.ext.as_deref() == Some("json3"))
        .find_map(|f| match f.url {
            Some(url) if !url.contains("tlang=") => Some((url, f.name)),
            _ => None,
        })
}
