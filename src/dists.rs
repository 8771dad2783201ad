//! Distribution enumeration and current-version lookup.
use crate::paths::SitePaths;
use anyhow::{anyhow, Context, Result};
use std::fs;

/// One entry of the distributions directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    /// `no-site` marker present; the site skips this distribution.
    pub opted_out: bool,
}

/// List distributions under the dists directory, sorted by name.
///
/// Plain files next to the distribution directories are ignored.
pub fn enumerate(paths: &SitePaths) -> Result<Vec<Distribution>> {
    let root = paths.dists_dir();
    let entries = fs::read_dir(root).with_context(|| format!("read {}", root.display()))?;
    let mut dists = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read {}", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            tracing::debug!(path = %path.display(), "ignoring non-directory entry");
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "ignoring non UTF-8 entry");
            continue;
        };
        let opted_out = paths.no_site_marker_path(&name).exists();
        dists.push(Distribution { name, opted_out });
    }
    dists.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dists)
}

/// Keep only the named distributions; an unknown name is an error.
pub fn select(dists: Vec<Distribution>, only: &[String]) -> Result<Vec<Distribution>> {
    if only.is_empty() {
        return Ok(dists);
    }
    if let Some(missing) = only
        .iter()
        .find(|name| !dists.iter().any(|dist| &dist.name == *name))
    {
        return Err(anyhow!("unknown distribution {missing:?}"));
    }
    Ok(dists
        .into_iter()
        .filter(|dist| only.contains(&dist.name))
        .collect())
}

/// Read `dists/<name>/current`, trimmed.
pub fn current_version(paths: &SitePaths, name: &str) -> Result<String> {
    let path = paths.current_pointer_path(name);
    let raw =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let version = raw.trim();
    if version.is_empty() {
        return Err(anyhow!("{} is empty", path.display()));
    }
    Ok(version.to_string())
}
