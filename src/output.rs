//! Site data outputs: per-distribution manifests and the site summary.
//!
//! The site generator reads `releases/<name>/data.json` for each distribution
//! page and `siteroot.json` for feed-level metadata.
use crate::date::{format_utc, latest};
use crate::metadata::ReleaseMetadata;
use crate::paths::SitePaths;
use crate::staging::write_json;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `siteroot.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    #[serde(rename = "lastBuildDate")]
    pub last_build_date: String,
}

impl SiteSummary {
    /// Summarize from the release instants of every staged distribution.
    pub fn from_release_dates(dates: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self {
            last_build_date: format_utc(&latest(dates)),
        }
    }
}

/// Write the normalized document to `<data>/releases/<name>/data.json`.
pub fn write_manifest_entry(
    paths: &SitePaths,
    name: &str,
    metadata: &ReleaseMetadata,
) -> Result<PathBuf> {
    let path = paths.manifest_path(name);
    write_json(&path, metadata)?;
    tracing::info!(dist = name, path = %path.display(), "wrote release data");
    Ok(path)
}

/// Write `<data>/siteroot.json`.
pub fn write_site_summary(paths: &SitePaths, summary: &SiteSummary) -> Result<PathBuf> {
    let path = paths.site_summary_path();
    write_json(&path, summary)?;
    tracing::info!(
        path = %path.display(),
        last_build_date = %summary.last_build_date,
        "wrote site summary"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatePolicy;
    use crate::date::parse_release_date;
    use crate::staging::read_json;

    #[test]
    fn manifest_reads_back_equal() {
        let temp = tempfile::tempdir().expect("temp dir");
        let paths = SitePaths::new(temp.path().to_path_buf());
        let metadata = ReleaseMetadata::from_json(
            r#"{"id":"kubo","version":"v0.20.0","date":"2023-05-09","platforms":{"linux":{"archs":{"amd64":{"link":"/kubo_v0.20.0_linux-amd64.tar.gz"}}}}}"#,
        )
        .expect("parse")
        .normalize(DatePolicy::Lenient)
        .expect("normalize");

        let path = write_manifest_entry(&paths, "kubo", &metadata).expect("write");

        assert_eq!(path, paths.manifest_path("kubo"));
        let read_back: ReleaseMetadata = read_json(&path).expect("read back");
        assert_eq!(read_back, metadata);
    }

    #[test]
    fn summary_serializes_last_build_date() {
        let temp = tempfile::tempdir().expect("temp dir");
        let paths = SitePaths::new(temp.path().to_path_buf());
        let summary = SiteSummary::from_release_dates(
            ["2021-01-01", "2022-06-15", "2020-12-31"]
                .iter()
                .filter_map(|raw| parse_release_date(raw)),
        );

        write_site_summary(&paths, &summary).expect("write");

        let text = std::fs::read_to_string(paths.site_summary_path()).expect("read");
        assert_eq!(
            text,
            "{\n  \"lastBuildDate\": \"Wed, 15 Jun 2022 00:00:00 GMT\"\n}"
        );
    }
}
