use tracing::{debug, info};

use crate::error::ResolutionError;
use crate::metadata::MetadataService;
use crate::transcript_task::{LanguageSelection, VideoTask};

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPlaylist {
    pub title: String,
    pub video_ids: Vec<String>,
}

impl ResolvedPlaylist {
    /// One task per video, in playlist order.
    pub fn tasks(&self, languages: &LanguageSelection) -> Vec<VideoTask> {
        self.video_ids.iter().map(|id| VideoTask::new(id, languages)).collect()
    }
}

pub fn resolve_playlist(metadata: &dyn MetadataService, reference: &str) -> Result<ResolvedPlaylist, ResolutionError> {
    let reference = reference.trim();
    if reference.is_empty() || reference.chars().any(char::is_whitespace) {
        return Err(ResolutionError::InvalidReference(String::from(reference)));
    }

    debug!(reference, "resolving playlist");
    let playlist = metadata
        .resolve_playlist(reference)
        .map_err(|err| ResolutionError::for_reference(reference, err))?;

    let video_ids = playlist.video_ids;
    if video_ids.is_empty() {
        return Err(ResolutionError::EmptyPlaylist(String::from(reference)));
    }

    info!(title = %playlist.title, videos = video_ids.len(), "resolved playlist");
    Ok(ResolvedPlaylist {
        title: playlist.title,
        video_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use crate::testing::FakeMetadata;

    #[test]
    fn test_resolve_preserves_order() {
        let metadata = FakeMetadata::playlist("Lectures", &["c", "a", "b"]);
        let resolved = resolve_playlist(&metadata, " PL123 ").unwrap();
        assert_eq!(resolved.title, "Lectures");
        assert_eq!(resolved.video_ids, vec!["c", "a", "b"]);
        assert_eq!(metadata.playlist_calls(), vec!["PL123"]);

        let tasks = resolved.tasks(&LanguageSelection::All);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].video_id, "c");
        assert_eq!(tasks[2].languages, LanguageSelection::All);
    }

    #[test]
    fn test_resolve_empty() {
        let metadata = FakeMetadata::playlist("Empty", &[]);
        assert!(matches!(resolve_playlist(&metadata, "PL123"), Err(ResolutionError::EmptyPlaylist(r)) if r == "PL123"));
    }

    #[test]
    fn test_resolve_invalid_reference() {
        let metadata = FakeMetadata::playlist("Lectures", &["a"]);
        assert!(matches!(resolve_playlist(&metadata, "  "), Err(ResolutionError::InvalidReference(_))));
        assert!(matches!(resolve_playlist(&metadata, "not a url"), Err(ResolutionError::InvalidReference(_))));
        assert!(metadata.playlist_calls().is_empty());
    }

    #[test]
    fn test_resolve_unavailable() {
        let metadata = FakeMetadata::failing(MetadataError::Unavailable(String::from("private playlist")));
        assert!(matches!(resolve_playlist(&metadata, "PL123"), Err(ResolutionError::Unavailable { .. })));

        let metadata = FakeMetadata::failing(MetadataError::NotAPlaylist(String::from("PL123")));
        assert!(matches!(resolve_playlist(&metadata, "PL123"), Err(ResolutionError::NotAPlaylist(_))));
    }
}
