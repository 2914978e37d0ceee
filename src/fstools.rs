use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputDirError;

const ILLEGAL_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

pub enum DirEntryCategory {
    DoesNotExist,
    RegularFile,
    Directory,
    Unknown,
}

pub fn classify_file(path: &Path) -> DirEntryCategory {
    match fs::metadata(path) {
        Ok(metadata) => {
            if metadata.is_file() {
                DirEntryCategory::RegularFile
            } else if metadata.is_dir() {
                DirEntryCategory::Directory
            } else {
                DirEntryCategory::Unknown
            }
        },
        Err(_) => DirEntryCategory::DoesNotExist,
    }
}

/// Strips characters that are not allowed in file names on common
/// filesystems.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn transcript_path(output_dir: &Path, title: &str, video_id: &str) -> PathBuf {
    let stem = match sanitize_title(title) {
        s if s.is_empty() => sanitize_title(video_id),
        s => s,
    };
    output_dir.join(format!("{stem}.txt"))
}

pub fn default_output_dir(playlist_title: &str) -> PathBuf {
    match sanitize_title(playlist_title) {
        s if s.is_empty() => PathBuf::from("./Untitled Playlist"),
        s => PathBuf::from(".").join(s),
    }
}

pub fn ensure_output_dir(path: &Path) -> Result<(), OutputDirError> {
    match classify_file(path) {
        DirEntryCategory::Directory => Ok(()),
        DirEntryCategory::DoesNotExist => fs::create_dir_all(path).map_err(|source| OutputDirError::Create {
            path: PathBuf::from(path),
            source,
        }),
        DirEntryCategory::RegularFile | DirEntryCategory::Unknown => Err(OutputDirError::NotADirectory(PathBuf::from(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("My:Video?"), "MyVideo");
        assert_eq!(sanitize_title(r#"a\b/c*d?e:f"g<h>i|j"#), "abcdefghij");
        assert_eq!(sanitize_title("  Intro \t"), "Intro");
        assert_eq!(sanitize_title("Über Straße"), "Über Straße");
    }

    #[test]
    fn test_transcript_path() {
        let dir = PathBuf::from("out");
        assert_eq!(transcript_path(&dir, "My:Video?", "abc"), PathBuf::from("out/MyVideo.txt"));
        assert_eq!(transcript_path(&dir, "???", "abc"), PathBuf::from("out/abc.txt"));
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(default_output_dir("Lectures: 2024"), PathBuf::from("./Lectures 2024"));
        assert_eq!(default_output_dir("//"), PathBuf::from("./Untitled Playlist"));
    }

    #[test]
    fn test_ensure_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_output_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_output_dir(&nested).unwrap();

        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(ensure_output_dir(&file), Err(OutputDirError::NotADirectory(_))));
    }
}
