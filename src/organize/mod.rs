//! Groups output files into folders by filename prefix.
//!
//! The prefix of a file is the text before the first delimiter, trimmed.
//! Prefixes shared by two or more files get a folder; lone files stay where
//! they are.

pub mod tree;

pub use tree::render_tree;

use crate::config::{CollisionPolicy, OrganizeConfig};
use crate::utils::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files sharing one prefix, in the order they were listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    pub prefix: String,
    pub files: Vec<String>,
}

impl PrefixGroup {
    pub fn is_movable(&self) -> bool {
        self.files.len() > 1 && is_usable_folder_name(&self.prefix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Folders that received at least one file.
    pub folders: Vec<PathBuf>,
    pub moved: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Text before the first `delimiter`, or the whole name, with surrounding whitespace trimmed.
pub fn prefix_of<'a>(file_name: &'a str, delimiter: &str) -> &'a str {
    file_name
        .split_once(delimiter)
        .map_or(file_name, |(head, _)| head)
        .trim()
}

/// Groups names by prefix. Groups appear in the order their prefix is first
/// seen; files keep their relative order within a group.
pub fn group_by_prefix<I, S>(file_names: I, delimiter: &str) -> Vec<PrefixGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: Vec<PrefixGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for name in file_names {
        let name = name.as_ref();
        let prefix = prefix_of(name, delimiter);

        match index.get(prefix) {
            Some(&i) => groups[i].files.push(name.to_string()),
            None => {
                index.insert(prefix.to_string(), groups.len());
                groups.push(PrefixGroup {
                    prefix: prefix.to_string(),
                    files: vec![name.to_string()],
                });
            }
        }
    }

    groups
}

// Empty, "." and ".." would put files outside a dedicated subfolder.
fn is_usable_folder_name(prefix: &str) -> bool {
    !prefix.is_empty() && prefix != "." && prefix != ".."
}

pub struct PrefixOrganizer {
    delimiter: String,
    on_collision: CollisionPolicy,
}

impl PrefixOrganizer {
    pub fn new(delimiter: impl Into<String>, on_collision: CollisionPolicy) -> Self {
        Self {
            delimiter: delimiter.into(),
            on_collision,
        }
    }

    pub fn from_config(config: &OrganizeConfig) -> Self {
        Self::new(config.delimiter.clone(), config.on_collision)
    }

    /// Visible regular files directly inside `dir`, sorted by name.
    pub fn list_candidates(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(
                    "Skipping non UTF-8 file name: {}",
                    entry.path().display()
                );
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Moves every multi-member prefix group in `dir` into `dir/<prefix>`.
    ///
    /// Filesystem errors abort the remaining work. Re-running on an organized
    /// directory changes nothing.
    pub fn organize(&self, dir: &Path) -> Result<OrganizeReport> {
        if !dir.is_dir() {
            return Err(Error::directory_not_found(dir));
        }

        info!("Organizing files in {}", dir.display());

        let names = self.list_candidates(dir)?;
        let groups = group_by_prefix(&names, &self.delimiter);
        let mut report = OrganizeReport::default();

        for group in groups.iter().filter(|g| g.files.len() > 1) {
            if !group.is_movable() {
                warn!(
                    "Skipping group with unusable prefix '{}' ({} files)",
                    group.prefix,
                    group.files.len()
                );
                report
                    .skipped
                    .extend(group.files.iter().map(|f| dir.join(f)));
                continue;
            }

            let folder = dir.join(&group.prefix);
            if folder.exists() && !folder.is_dir() {
                warn!(
                    "Skipping group '{}': {} exists and is not a directory",
                    group.prefix,
                    folder.display()
                );
                report
                    .skipped
                    .extend(group.files.iter().map(|f| dir.join(f)));
                continue;
            }
            if !folder.exists() {
                fs::create_dir_all(&folder)?;
                info!("Created folder {}", group.prefix);
            }

            let mut moved_any = false;
            for file in &group.files {
                let source = dir.join(file);
                let destination = folder.join(file);

                if self.move_file(&source, &destination)? {
                    info!("Moved {} -> {}/", file, group.prefix);
                    report.moved.push(destination);
                    moved_any = true;
                } else {
                    report.skipped.push(source);
                }
            }
            if moved_any {
                report.folders.push(folder);
            }
        }

        info!(
            "Files have been organized into folders: {} moved into {} folder(s), {} skipped",
            report.moved.len(),
            report.folders.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// Returns false if the move was skipped because of a collision.
    fn move_file(&self, source: &Path, destination: &Path) -> Result<bool> {
        if destination.exists() {
            match self.on_collision {
                CollisionPolicy::Skip => {
                    warn!(
                        "Skipping {}: {} already exists",
                        source.display(),
                        destination.display()
                    );
                    return Ok(false);
                }
                CollisionPolicy::Error => return Err(Error::collision(destination)),
                CollisionPolicy::Overwrite => {
                    debug!("Overwriting {}", destination.display());
                    if destination.is_dir() {
                        return Err(Error::collision(destination));
                    }
                    fs::remove_file(destination)?;
                }
            }
        }

        fs::rename(source, destination)?;
        Ok(true)
    }
}
