//! Run configuration resolved from CLI flags, environment, and defaults.
//!
//! Each setting is resolved once, in priority order:
//! 1. CLI flag
//! 2. Environment variable (`DIST_ROOT`, `IPFS_API`, `IPFS_GATEWAY`)
//! 3. Built-in default
use crate::cli::{LayoutArgs, RemoteArgs};
use crate::paths::SitePaths;
use crate::remote::{RemoteBackend, DEFAULT_IPFS_API};
use anyhow::{anyhow, Result};
use std::time::Duration;

/// Published namespace that holds every released `dist.json`.
pub const DEFAULT_DIST_ROOT: &str = "/ipns/dist.ipfs.tech";
pub const DIST_ROOT_ENV: &str = "DIST_ROOT";
pub const IPFS_API_ENV: &str = "IPFS_API";
pub const IPFS_GATEWAY_ENV: &str = "IPFS_GATEWAY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How release dates that cannot be interpreted are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Write the "Invalid Date" placeholder and continue.
    #[default]
    Lenient,
    /// Abort the run.
    Strict,
}

impl DatePolicy {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            DatePolicy::Strict
        } else {
            DatePolicy::Lenient
        }
    }
}

/// Remote store settings after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub dist_root: String,
    pub backend: RemoteBackend,
    pub timeout: Duration,
}

/// Everything a staging run needs, independent of how it was supplied.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub paths: SitePaths,
    pub remote: RemoteConfig,
    pub date_policy: DatePolicy,
}

impl SiteConfig {
    pub fn resolve(layout: &LayoutArgs, remote: &RemoteArgs, strict_dates: bool) -> Result<Self> {
        Self::resolve_with_env(layout, remote, strict_dates, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup so tests never touch process env.
    pub fn resolve_with_env<F>(
        layout: &LayoutArgs,
        remote: &RemoteArgs,
        strict_dates: bool,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            paths: resolve_paths(layout),
            remote: resolve_remote(remote, env)?,
            date_policy: DatePolicy::from_flag(strict_dates),
        })
    }
}

pub fn resolve_paths(layout: &LayoutArgs) -> SitePaths {
    let mut paths = SitePaths::new(layout.root.clone());
    if let Some(dir) = &layout.dists_dir {
        paths = paths.with_dists_dir(dir.clone());
    }
    if let Some(dir) = &layout.releases_dir {
        paths = paths.with_releases_dir(dir.clone());
    }
    if let Some(dir) = &layout.data_dir {
        paths = paths.with_data_dir(dir.clone());
    }
    paths
}

fn resolve_remote<F>(args: &RemoteArgs, env: F) -> Result<RemoteConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let dist_root = non_empty(args.dist_root.clone())
        .or_else(|| non_empty(env(DIST_ROOT_ENV)))
        .unwrap_or_else(|| DEFAULT_DIST_ROOT.to_string());

    // A flag for one backend wins over the environment for either.
    let backend = if let Some(gateway) = non_empty(args.gateway.clone()) {
        RemoteBackend::Gateway(gateway)
    } else if let Some(api) = non_empty(args.ipfs_api.clone()) {
        RemoteBackend::KuboRpc(api)
    } else if let Some(gateway) = non_empty(env(IPFS_GATEWAY_ENV)) {
        RemoteBackend::Gateway(gateway)
    } else {
        RemoteBackend::KuboRpc(
            non_empty(env(IPFS_API_ENV)).unwrap_or_else(|| DEFAULT_IPFS_API.to_string()),
        )
    };

    let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(anyhow!("--timeout-secs must be greater than zero"));
    }

    Ok(RemoteConfig {
        dist_root,
        backend,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
