use std::ffi::OsStr;
use std::process::{Command, Stdio};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::MetadataError;
use crate::metadata::{MetadataService, PlaylistInfo, VideoInfo};
use probe::{YtDlpPlaylist, YtDlpVideo};

pub mod probe;

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const UNAVAILABLE_MARKERS: [&str; 5] = [
    "Private video",
    "Video unavailable",
    "has been removed",
    "is not available",
    "does not exist",
];

const UNPLAYABLE_MARKERS: [&str; 4] = [
    "Sign in to confirm",
    "inappropriate",
    "members-only",
    "Join this channel",
];

/// Thin wrapper around the `yt-dlp` executable.
#[derive(Clone, Debug)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new(program: &str) -> Self {
        YtDlp {
            program: String::from(program),
        }
    }

    /// Children run in their own process group so a Ctrl-C at the terminal
    /// reaches only this process; in-flight lookups finish normally.
    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.stdin(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        command
    }

    pub fn is_installed(&self) -> bool {
        let cmd = self.command().arg("--version").output();
        match cmd {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    pub fn probe_playlist(&self, reference: &str) -> Result<YtDlpPlaylist, MetadataError> {
        self.dump_json(["-J", "--flat-playlist", "--no-warnings", reference])
    }

    pub fn probe_video(&self, video_id: &str) -> Result<YtDlpVideo, MetadataError> {
        let url = format!("{WATCH_URL}{video_id}");
        self.dump_json(["-J", "--skip-download", "--no-warnings", url.as_str()])
    }

    fn dump_json<T, I, S>(&self, args: I) -> Result<T, MetadataError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        debug!(program = %self.program, args = ?args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect::<Vec<_>>(), "running yt-dlp");

        let output = self.command()
            .args(&args)
            .output()
            .map_err(|_| MetadataError::NotInstalled(self.program.clone()))?;

        if output.status.success() {
            serde_json::from_slice::<T>(&output.stdout).map_err(|err| MetadataError::Parse(err.to_string()))
        } else {
            Err(classify_stderr(&String::from_utf8_lossy(&output.stderr)))
        }
    }
}

impl MetadataService for YtDlp {
    fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, MetadataError> {
        let playlist = self.probe_playlist(reference)?;
        let title = playlist.title.clone().unwrap_or_else(|| String::from("Untitled Playlist"));
        let video_ids = match playlist.entries {
            None => return Err(MetadataError::NotAPlaylist(String::from(reference))),
            Some(entries) => entries.iter().flatten().filter_map(|entry| entry.video_id()).collect(),
        };

        Ok(PlaylistInfo { title, video_ids })
    }

    fn resolve_video(&self, video_id: &str) -> Result<VideoInfo, MetadataError> {
        let video = self.probe_video(video_id)?;
        debug!(video_id = %video.id, title = %video.title, "resolved video");
        Ok(VideoInfo { title: video.title })
    }
}

/// Maps yt-dlp's error output onto the unavailable/unplayable conditions.
pub fn classify_stderr(stderr: &str) -> MetadataError {
    let message = stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("ERROR:"))
        .last()
        .unwrap_or_else(|| stderr.trim())
        .trim_start_matches("ERROR:")
        .trim()
        .to_string();

    if UNAVAILABLE_MARKERS.iter().any(|m| message.contains(m)) {
        MetadataError::Unavailable(message)
    } else if UNPLAYABLE_MARKERS.iter().any(|m| message.contains(m)) {
        MetadataError::Unplayable(message)
    } else {
        MetadataError::Service(message)
    }
}
