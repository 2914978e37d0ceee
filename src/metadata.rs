use crate::error::MetadataError;

#[derive(Clone, Debug, PartialEq)]
pub struct PlaylistInfo {
    pub title: String,
    /// In playlist order.
    pub video_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    pub title: String,
}

/// Resolves playlists and videos on the hosting platform.
pub trait MetadataService: Send + Sync {
    fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, MetadataError>;

    fn resolve_video(&self, video_id: &str) -> Result<VideoInfo, MetadataError>;
}
