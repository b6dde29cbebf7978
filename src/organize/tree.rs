use crate::utils::{Error, Result};
use std::path::Path;
use walkdir::WalkDir;

const INDENT: &str = "    ";

/// Renders `dir` as an indented listing: folders end with `/`, each level
/// indents four spaces, entries sorted by name with files before folders.
pub fn render_tree(dir: &Path) -> Result<String> {
    let mut lines = Vec::new();

    let walker = WalkDir::new(dir).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::validation(format!("Failed to walk {}", dir.display())),
        })?;

        let name = if entry.depth() == 0 {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string())
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };
        let indent = INDENT.repeat(entry.depth());

        if entry.file_type().is_dir() {
            lines.push(format!("{}{}/", indent, name));
        } else {
            lines.push(format!("{}{}", indent, name));
        }
    }

    Ok(lines.join("\n"))
}
