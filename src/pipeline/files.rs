//! Input document discovery

use crate::error::{PipelineError, PipelineResult};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collect input documents under `dir_in` whose extension is in `extensions`.
///
/// Recursive, hidden entries skipped, ignore files not honoured. Entries are
/// visited sorted by file name within each directory, so the result is stable
/// across platforms and runs.
pub fn collect_documents(dir_in: &Path, extensions: &[String]) -> PipelineResult<Vec<PathBuf>> {
    if !dir_in.is_dir() {
        return Err(PipelineError::Config(format!(
            "input directory does not exist: {}",
            dir_in.display()
        )));
    }

    let mut builder = WalkBuilder::new(dir_in);
    builder
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .parents(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if has_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    debug!("Found {} documents under {}", files.len(), dir_in.display());
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
