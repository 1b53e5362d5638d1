//! Template substitution.
//!
//! The template is the user's `karabiner.json` with a marker comment where the
//! generated rules go. Ordinary lines are copied verbatim, other `//` comment
//! lines are dropped (Karabiner reads plain JSON), and the marker line is
//! replaced by the emitted blocks.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default marker comment.
pub const DEFAULT_MARKER: &str = "// ::commands";

/// Template structure errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No line starts with the marker.
    #[error("template has no marker line starting with '{marker}'")]
    MissingMarker {
        /// Marker searched for.
        marker: String,
    },

    /// More than one line starts with the marker.
    #[error("template has more than one marker line '{marker}' (lines {first} and {second})")]
    DuplicateMarker {
        /// Marker searched for.
        marker: String,
        /// 1-based line of the first marker.
        first: usize,
        /// 1-based line of the repeated marker.
        second: usize,
    },
}

/// Kind of a template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Marker,
    Comment,
    Content,
}

fn classify(line: &str, marker: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.starts_with(marker) {
        LineKind::Marker
    } else if trimmed.starts_with("//") {
        LineKind::Comment
    } else {
        LineKind::Content
    }
}

/// Replaces the marker line of `template` with `blocks`.
///
/// Line endings of copied lines are preserved. `blocks` is inserted as is
/// and is expected to end with a newline.
pub fn render_template(template: &str, blocks: &str, marker: &str) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len() + blocks.len());
    let mut marker_line: Option<usize> = None;
    let mut dropped = 0usize;

    for (idx, line) in template.split_inclusive('\n').enumerate() {
        match classify(line, marker) {
            LineKind::Marker => {
                if let Some(first) = marker_line {
                    return Err(TemplateError::DuplicateMarker {
                        marker: marker.to_string(),
                        first: first + 1,
                        second: idx + 1,
                    });
                }
                marker_line = Some(idx);
                output.push_str(blocks);
            }
            LineKind::Comment => dropped += 1,
            LineKind::Content => output.push_str(line),
        }
    }

    if marker_line.is_none() {
        return Err(TemplateError::MissingMarker {
            marker: marker.to_string(),
        });
    }

    debug!(dropped, "dropped template comment lines");
    Ok(output)
}

/// Writes `content` to `path` through a temp file and a rename, so a failed
/// run never leaves a half-written file behind.
///
/// The temp file is `<file name>.tmp` next to `path`.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path)?;

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e)
            .with_context(|| format!("Failed to rename temporary file to: {}", path.display()));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}
