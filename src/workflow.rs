//! The staging run: clean, stage each distribution in order, summarize.
//!
//! A run moves through `Initializing -> Processing -> Finalizing -> Done`.
//! The first error ends it; manifests already written stay on disk and the
//! site summary is not written.
use crate::clean::clean_workspace;
use crate::cli::{CleanArgs, ResolveArgs, UpdateArgs};
use crate::config::{resolve_paths, SiteConfig};
use crate::dists::{self, Distribution};
use crate::metadata::{MetadataOrigin, MetadataSource, ReleaseMetadata};
use crate::output::{write_manifest_entry, write_site_summary, SiteSummary};
use crate::remote::{HttpStore, RemoteStore};
use crate::util::display_path;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Stage of a staging run, recorded on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initializing,
    Processing,
    Finalizing,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunPhase::Initializing => "initializing",
            RunPhase::Processing => "processing",
            RunPhase::Finalizing => "finalizing",
            RunPhase::Done => "done",
        };
        f.write_str(label)
    }
}

/// Knobs for a run beyond the resolved config.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub clean: bool,
    pub only: Vec<String>,
}

/// Result of staging one distribution.
#[derive(Debug, Clone)]
pub struct StagedRelease {
    pub name: String,
    pub version: String,
    pub origin: MetadataOrigin,
    pub manifest_path: PathBuf,
    /// Parsed `dateUTC`; `None` when it is the invalid placeholder.
    pub release_date: Option<DateTime<Utc>>,
}

/// Everything a completed run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<String>,
    pub staged: Vec<StagedRelease>,
    pub summary: SiteSummary,
    pub summary_path: PathBuf,
}

pub fn run_update(args: UpdateArgs) -> Result<()> {
    let config = SiteConfig::resolve(&args.layout, &args.remote, args.strict_dates)?;
    let store = HttpStore::new(config.remote.backend.clone(), config.remote.timeout);
    let options = UpdateOptions {
        clean: !args.no_clean,
        only: args.only,
    };
    let report = update(&config, &store, &options)?;
    let root = Some(config.paths.root());
    for release in &report.staged {
        let source = match &release.origin {
            MetadataOrigin::Local(path) => display_path(path, root),
            MetadataOrigin::Remote(key) => key.clone(),
        };
        println!(
            "{} {}: {} -> {}",
            release.name,
            release.version,
            source,
            display_path(&release.manifest_path, root)
        );
    }
    if !report.removed.is_empty() {
        println!("removed {} stale artifact(s)", report.removed.len());
    }
    println!(
        "staged {} distribution(s), skipped {}; lastBuildDate {}",
        report.staged.len(),
        report.skipped.len(),
        report.summary.last_build_date
    );
    println!("wrote {}", display_path(&report.summary_path, root));
    Ok(())
}

pub fn run_clean(args: CleanArgs) -> Result<()> {
    let paths = resolve_paths(&args.layout);
    let removed = clean_workspace(paths.releases_dir())?;
    for path in &removed {
        println!("removed {}", display_path(path, Some(paths.root())));
    }
    Ok(())
}

pub fn run_resolve(args: ResolveArgs) -> Result<()> {
    let config = SiteConfig::resolve(&args.layout, &args.remote, args.strict_dates)?;
    let store = HttpStore::new(config.remote.backend.clone(), config.remote.timeout);
    let metadata = resolve(&config, &store, &args.name)?;
    let text = serde_json::to_string_pretty(&metadata).context("serialize release data")?;
    println!("{text}");
    Ok(())
}

/// Run the full pipeline against `remote`.
pub fn update(
    config: &SiteConfig,
    remote: &dyn RemoteStore,
    options: &UpdateOptions,
) -> Result<RunReport> {
    let paths = &config.paths;

    tracing::info!(
        phase = %RunPhase::Initializing,
        dists = %paths.dists_dir().display(),
        data = %paths.data_dir().display(),
        "updating site data"
    );
    let removed = if options.clean {
        clean_workspace(paths.releases_dir())?
    } else {
        Vec::new()
    };

    let dists = dists::select(dists::enumerate(paths)?, &options.only)?;
    let source = MetadataSource::new(paths, &config.remote.dist_root, remote);
    let mut skipped = Vec::new();
    let mut staged = Vec::new();
    for dist in dists {
        let Distribution { name, opted_out } = dist;
        if opted_out {
            tracing::info!(phase = %RunPhase::Processing, dist = %name, "skipping site generation");
            skipped.push(name);
            continue;
        }
        tracing::info!(phase = %RunPhase::Processing, dist = %name, "generating site data");
        let release = stage_distribution(config, &source, &name)
            .with_context(|| format!("stage distribution {name}"))?;
        staged.push(release);
    }

    tracing::info!(phase = %RunPhase::Finalizing, staged = staged.len(), "writing site summary");
    let summary =
        SiteSummary::from_release_dates(staged.iter().filter_map(|release| release.release_date));
    let summary_path = write_site_summary(paths, &summary)?;

    tracing::info!(phase = %RunPhase::Done, "site data updated");
    Ok(RunReport {
        removed,
        skipped,
        staged,
        summary,
        summary_path,
    })
}

/// Resolve, normalize, and write the manifest for one distribution.
pub fn stage_distribution(
    config: &SiteConfig,
    source: &MetadataSource<'_>,
    name: &str,
) -> Result<StagedRelease> {
    let version = dists::current_version(&config.paths, name)?;
    let (metadata, origin) = source.load(name, &version)?;
    let metadata = metadata
        .normalize(config.date_policy)
        .with_context(|| format!("normalize release date for {name} {version}"))?;
    let manifest_path = write_manifest_entry(&config.paths, name, &metadata)?;
    Ok(StagedRelease {
        name: name.to_string(),
        release_date: metadata.date_utc_instant(),
        version,
        origin,
        manifest_path,
    })
}

/// Normalized metadata for one distribution, without writing anything.
pub fn resolve(
    config: &SiteConfig,
    remote: &dyn RemoteStore,
    name: &str,
) -> Result<ReleaseMetadata> {
    let version = dists::current_version(&config.paths, name)?;
    let source = MetadataSource::new(&config.paths, &config.remote.dist_root, remote);
    let (metadata, _) = source.load(name, &version)?;
    metadata.normalize(config.date_policy)
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
