//! CLI argument parsing for the site data staging workflow.
//!
//! The CLI is intentionally thin: it collects paths and remote settings and
//! hands them to `config::SiteConfig`, so the pipeline never reads flags directly.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the staging workflow.
#[derive(Parser, Debug)]
#[command(
    name = "dist-site",
    version,
    about = "Stage release metadata for the dist website generator",
    after_help = "Commands:\n  update                 Clean stale output, stage every distribution, write siteroot.json\n  clean                  Remove stale generated site artifacts only\n  resolve <NAME>         Print normalized metadata for one distribution\n\nExamples:\n  dist-site update\n  dist-site update --root ../distributions --only kubo\n  DIST_ROOT=/ipns/dist.example.org dist-site update --gateway https://ipfs.io\n  dist-site resolve kubo",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Update(UpdateArgs),
    Clean(CleanArgs),
    Resolve(ResolveArgs),
}

/// Project layout shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Project root containing dists/, releases/ and site/
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Distributions directory (default: <root>/dists)
    #[arg(long, value_name = "DIR")]
    pub dists_dir: Option<PathBuf>,

    /// Local releases directory (default: <root>/releases)
    #[arg(long, value_name = "DIR")]
    pub releases_dir: Option<PathBuf>,

    /// Site generator data directory (default: <root>/site/data)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Remote store settings for metadata that is not available locally.
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// Remote namespace root (env: DIST_ROOT)
    #[arg(long, value_name = "PATH")]
    pub dist_root: Option<String>,

    /// Kubo RPC API address (env: IPFS_API)
    #[arg(long, value_name = "URL", conflicts_with = "gateway")]
    pub ipfs_api: Option<String>,

    /// Fetch through an HTTP gateway instead of the RPC API (env: IPFS_GATEWAY)
    #[arg(long, value_name = "URL")]
    pub gateway: Option<String>,

    /// Timeout for a single remote fetch, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

/// Update command inputs for a full staging run.
#[derive(Parser, Debug)]
#[command(about = "Stage data.json for every distribution and write siteroot.json")]
pub struct UpdateArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Only stage the named distribution (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Keep previously generated site artifacts in place
    #[arg(long)]
    pub no_clean: bool,

    /// Fail on a missing or malformed release date instead of writing "Invalid Date"
    #[arg(long)]
    pub strict_dates: bool,

    /// Emit debug-level logging
    #[arg(long)]
    pub verbose: bool,
}

/// Clean command inputs.
#[derive(Parser, Debug)]
#[command(about = "Remove stale generated site artifacts")]
pub struct CleanArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Emit debug-level logging
    #[arg(long)]
    pub verbose: bool,
}

/// Resolve command inputs for inspecting a single distribution.
#[derive(Parser, Debug)]
#[command(about = "Print normalized metadata for one distribution without writing")]
pub struct ResolveArgs {
    /// Distribution name (directory under dists/)
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Fail on a missing or malformed release date instead of writing "Invalid Date"
    #[arg(long)]
    pub strict_dates: bool,

    /// Emit debug-level logging
    #[arg(long)]
    pub verbose: bool,
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Update(args) => args.verbose,
            Command::Clean(args) => args.verbose,
            Command::Resolve(args) => args.verbose,
        }
    }
}
