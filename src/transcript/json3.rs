use serde::{Deserialize, Serialize};

use super::TranscriptSnippet;

#[derive(Serialize, Deserialize, Debug)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parses YouTube's `json3` caption format. Events without text (window
/// setup, line breaks between auto-caption rows) are dropped.
pub fn parse_json3(body: &str) -> Result<Vec<TranscriptSnippet>, serde_json::Error> {
    let document = serde_json::from_str::<Json3Document>(body)?;
    Ok(document
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSnippet {
                text: String::from(text),
                start: event.t_start_ms as f64 / 1000.0,
            })
        })
        .collect())
}
