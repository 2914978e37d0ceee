use crate::error::TranscriptError;
use crate::ytdlp::probe::CaptionTrack;

pub mod formatter;
pub mod json3;
pub mod youtube;

#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSnippet {
    pub text: String,
    /// Seconds from the start of the video.
    pub start: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub snippets: Vec<TranscriptSnippet>,
}

impl Transcript {
    /// Human readable track name, e.g. `English (auto-generated)`.
    pub fn language_label(&self) -> String {
        match self.is_generated {
            true => format!("{} (auto-generated)", self.language),
            false => self.language.clone(),
        }
    }
}

/// Retrieves caption data for single videos.
pub trait TranscriptService: Send + Sync {
    fn available_languages(&self, video_id: &str) -> Result<Vec<String>, TranscriptError>;

    /// `languages` is a preference list; the first code with a transcript wins.
    fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript, TranscriptError>;
}

/// Language codes of `tracks`, deduplicated, in track order.
pub fn language_codes(tracks: &[CaptionTrack]) -> Vec<String> {
    let mut codes: Vec<String> = vec![];
    for track in tracks {
        if !codes.contains(&track.language_code) {
            codes.push(track.language_code.clone());
        }
    }
    codes
}

/// Walks `languages` in order; for each code a manually created track is
/// preferred over a generated one.
pub fn find_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|code| {
        tracks
            .iter()
            .find(|t| &t.language_code == code && !t.is_generated)
            .or_else(|| tracks.iter().find(|t| &t.language_code == code && t.is_generated))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, is_generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: String::from(code),
            language: String::from(code),
            is_generated,
            url: format!("https://example.com/{code}/{is_generated}"),
        }
    }

    fn codes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| String::from(*c)).collect()
    }

    #[test]
    fn test_language_label() {
        let mut transcript = Transcript {
            language: String::from("English"),
            language_code: String::from("en"),
            is_generated: false,
            snippets: vec![],
        };
        assert_eq!(transcript.language_label(), "English");
        transcript.is_generated = true;
        assert_eq!(transcript.language_label(), "English (auto-generated)");
    }

    #[test]
    fn test_language_codes() {
        let tracks = vec![track("de", false), track("en", true), track("de", true)];
        assert_eq!(language_codes(&tracks), codes(&["de", "en"]));
    }

    #[test]
    fn test_find_track_prefers_manual() {
        let tracks = vec![track("en", true), track("en", false)];
        let found = find_track(&tracks, &codes(&["en"])).unwrap();
        assert!(!found.is_generated);
    }

    #[test]
    fn test_find_track_preference_order() {
        let tracks = vec![track("en", false), track("de", true)];
        assert_eq!(find_track(&tracks, &codes(&["de", "en"])).unwrap().language_code, "de");
        assert_eq!(find_track(&tracks, &codes(&["fr", "en"])).unwrap().language_code, "en");
        assert!(find_track(&tracks, &codes(&["fr"])).is_none());
        assert!(find_track(&tracks, &[]).is_none());
    }
}
