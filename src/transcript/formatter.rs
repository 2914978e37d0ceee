use super::Transcript;

/// Renders a transcript as plain text, one snippet per line.
#[derive(Clone, Debug, Default)]
pub struct TextFormatter {
    pub timestamps: bool,
}

impl TextFormatter {
    pub fn timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn format_transcript(&self, transcript: &Transcript) -> String {
        transcript
            .snippets
            .iter()
            .map(|snippet| match self.timestamps {
                true => format!("[{}] {}", format_timestamp(snippet.start), snippet.text),
                false => snippet.text.clone(),
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    match hours {
        0 => format!("{minutes}:{seconds:02}"),
        _ => format!("{hours}:{minutes:02}:{seconds:02}"),
    }
}
