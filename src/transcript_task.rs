use std::fmt::Display;

/// Which transcript languages to ask for, in preference order.
#[derive(Clone, Debug, PartialEq)]
pub enum LanguageSelection {
    All,
    Preferred(Vec<String>),
}

impl LanguageSelection {
    pub fn parse(languages: &str) -> Self {
        let codes: Vec<String> = languages
            .split(',')
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(String::from)
            .collect();

        if codes.is_empty() || codes.iter().any(|code| code.eq_ignore_ascii_case("all")) {
            LanguageSelection::All
        } else {
            LanguageSelection::Preferred(codes)
        }
    }
}

impl Display for LanguageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageSelection::All => write!(f, "all"),
            LanguageSelection::Preferred(codes) => write!(f, "{}", codes.join(",")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoTask {
    pub video_id: String,
    pub languages: LanguageSelection,
}

impl VideoTask {
    pub fn new(video_id: &str, languages: &LanguageSelection) -> Self {
        VideoTask {
            video_id: String::from(video_id),
            languages: languages.clone(),
        }
    }
}
