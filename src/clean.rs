//! Removal of stale site artifacts left in the releases tree by earlier builds.
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Generated directories under `releases/` that every run rebuilds.
const STALE_DIRS: &[&str] = &["css", "build", "releases", "img"];
/// Extension of generated pages written directly into `releases/`.
const STALE_PAGE_EXT: &str = "html";

/// Remove generated artifacts under `releases_dir`, returning what was deleted.
///
/// Paths that are already gone are skipped; any other failure aborts.
pub fn clean_workspace(releases_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for page in stale_pages(releases_dir)? {
        if remove_path(&page)? {
            removed.push(page);
        }
    }
    for dir in STALE_DIRS {
        let path = releases_dir.join(dir);
        if remove_path(&path)? {
            removed.push(path);
        }
    }
    for path in &removed {
        tracing::info!(path = %path.display(), "removed stale artifact");
    }
    Ok(removed)
}

fn stale_pages(releases_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(releases_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("read {}", releases_dir.display()));
        }
    };
    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read {}", releases_dir.display()))?;
        let path = entry.path();
        let is_page = path.extension().and_then(|ext| ext.to_str()) == Some(STALE_PAGE_EXT);
        if is_page && path.is_file() {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}
