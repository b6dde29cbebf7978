use crate::utils::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Extensions recognized as video input, matched case-insensitively against the file name.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".mov", ".avi", ".flv", ".wmv"];

/// Input/output directory pair of a conversion job, both absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl JobPaths {
    /// Resolves both directories to absolute form. Fails if the input
    /// directory is missing; nothing is created here.
    pub fn resolve<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Self> {
        let input = std::path::absolute(input.as_ref())?;
        let output = std::path::absolute(output.as_ref())?;

        if !input.is_dir() {
            return Err(Error::directory_not_found(input));
        }

        Ok(Self { input, output })
    }
}

/// Lists the direct children of `dir` whose name ends with one of `extensions`,
/// sorted by file name. Symlinks count when they point at a regular file;
/// entries that cannot be read are skipped with a warning.
pub fn find_video_files<P: AsRef<Path>, S: AsRef<str>>(
    dir: P,
    extensions: &[S],
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(Error::directory_not_found(dir));
    }

    let mut video_files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if has_video_extension(entry.path(), extensions) && entry.path().is_file() {
            video_files.push(entry.into_path());
        }
    }

    Ok(video_files)
}

/// Case-insensitive suffix match on the raw file name, so names that are
/// not valid UTF-8 still match.
fn has_video_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();

    extensions.iter().any(|ext| {
        let ext = ext.as_ref().as_bytes();
        name.len() >= ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
    })
}

pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    Ok(())
}

/// File name for display, lossy for non UTF-8 names.
pub fn display_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_ref().display().to_string())
}
