//! Typed paths into the distributions project layout.
//!
//! Centralizing path construction keeps the inputs the pipeline reads and the
//! outputs it writes in one place.
use std::path::{Path, PathBuf};

pub const CURRENT_POINTER_FILE: &str = "current";
pub const NO_SITE_MARKER: &str = "no-site";
pub const DIST_METADATA_FILE: &str = "dist.json";
pub const MANIFEST_FILE: &str = "data.json";
pub const SITE_SUMMARY_FILE: &str = "siteroot.json";

/// Locations of the inputs and outputs for one project.
#[derive(Debug, Clone)]
pub struct SitePaths {
    root: PathBuf,
    dists: PathBuf,
    releases: PathBuf,
    data: PathBuf,
}

impl SitePaths {
    /// Derive the default layout under a project root.
    pub fn new(root: PathBuf) -> Self {
        Self {
            dists: root.join("dists"),
            releases: root.join("releases"),
            data: root.join("site").join("data"),
            root,
        }
    }

    pub fn with_dists_dir(mut self, dir: PathBuf) -> Self {
        self.dists = dir;
        self
    }

    pub fn with_releases_dir(mut self, dir: PathBuf) -> Self {
        self.releases = dir;
        self
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data = dir;
        self
    }

    /// Return the project root used for cleaning and display.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `dists/` directory path.
    pub fn dists_dir(&self) -> &Path {
        &self.dists
    }

    /// Return the `releases/` directory path.
    pub fn releases_dir(&self) -> &Path {
        &self.releases
    }

    /// Return the site generator data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    /// Return the `dists/<name>/` directory path.
    pub fn dist_dir(&self, name: &str) -> PathBuf {
        self.dists.join(name)
    }

    /// Return the `dists/<name>/current` pointer path.
    pub fn current_pointer_path(&self, name: &str) -> PathBuf {
        self.dist_dir(name).join(CURRENT_POINTER_FILE)
    }

    /// Return the `dists/<name>/no-site` marker path.
    pub fn no_site_marker_path(&self, name: &str) -> PathBuf {
        self.dist_dir(name).join(NO_SITE_MARKER)
    }

    /// Return the `releases/<name>/<version>/dist.json` path.
    pub fn local_metadata_path(&self, name: &str, version: &str) -> PathBuf {
        self.releases
            .join(name)
            .join(version)
            .join(DIST_METADATA_FILE)
    }

    /// Return the `<data>/releases/<name>/` directory path.
    pub fn manifest_dir(&self, name: &str) -> PathBuf {
        self.data.join("releases").join(name)
    }

    /// Return the `<data>/releases/<name>/data.json` path.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.manifest_dir(name).join(MANIFEST_FILE)
    }

    /// Return the `<data>/siteroot.json` path.
    pub fn site_summary_path(&self) -> PathBuf {
        self.data.join(SITE_SUMMARY_FILE)
    }
}

/// Key of a release document in the remote namespace.
///
/// Joined with `/` regardless of platform since it addresses the remote store.
pub fn remote_metadata_key(dist_root: &str, name: &str, version: &str) -> String {
    format!(
        "{}/{name}/{version}/{DIST_METADATA_FILE}",
        dist_root.trim_end_matches('/')
    )
}
