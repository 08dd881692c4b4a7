//! Command-line arguments. Every option can also come from the environment so
//! the tool runs unchanged inside a CI workflow.

use std::path::PathBuf;

use clap::Parser;
use upcast_core::changelog::DEFAULT_CHANGELOG;
use upcast_core::mirror::DEFAULT_MIRROR_PREFIX;
use upcast_core::{DEFAULT_TAG_PAGE_SIZE, DEFAULT_UPDATER_TAG};
use upcast_github::{DEFAULT_API_URL, DEFAULT_UPLOADS_URL};

/// Publish an auto-update manifest for the latest tagged release.
#[derive(Parser, Debug, Clone)]
#[command(name = "upcast", version, about)]
pub struct Cli {
    /// API token used for every GitHub request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repo: Option<String>,

    /// Tag of the release that hosts the published manifests.
    #[arg(long, env = "UPCAST_UPDATER_TAG", default_value = DEFAULT_UPDATER_TAG)]
    pub updater_tag: String,

    /// Markdown changelog with one `## <tag>` section per release.
    #[arg(long, env = "UPCAST_CHANGELOG", default_value = DEFAULT_CHANGELOG)]
    pub changelog: PathBuf,

    /// Notes used when the changelog has no section for the tag.
    #[arg(long, env = "UPCAST_FALLBACK_NOTES")]
    pub fallback_notes: Option<String>,

    /// Proxy prefix used for the mirrored manifest.
    #[arg(long, env = "UPCAST_MIRROR_PREFIX", default_value = DEFAULT_MIRROR_PREFIX)]
    pub mirror_prefix: String,

    /// Number of recent tags scanned for a version tag.
    #[arg(long, default_value_t = DEFAULT_TAG_PAGE_SIZE)]
    pub tag_page_size: u8,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_UPLOADS_URL)]
    pub uploads_url: String,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the manifests to --out-dir instead of publishing them.
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Also append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Parses `args` as if none of the environment fallbacks were set.
#[cfg(test)]
pub(crate) fn parse_without_env<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::parser::ValueSource;
    use clap::{CommandFactory, FromArgMatches};

    let matches = Cli::command()
        .try_get_matches_from(args)
        .expect("arguments should parse");
    let mut cli = Cli::from_arg_matches(&matches).expect("matches should convert");
    let from_env = |id: &str| matches.value_source(id) == Some(ValueSource::EnvVariable);

    if from_env("token") {
        cli.token = None;
    }
    if from_env("repo") {
        cli.repo = None;
    }
    if from_env("fallback_notes") {
        cli.fallback_notes = None;
    }
    if from_env("updater_tag") {
        cli.updater_tag = DEFAULT_UPDATER_TAG.to_string();
    }
    if from_env("changelog") {
        cli.changelog = PathBuf::from(DEFAULT_CHANGELOG);
    }
    if from_env("mirror_prefix") {
        cli.mirror_prefix = DEFAULT_MIRROR_PREFIX.to_string();
    }
    if from_env("api_url") {
        cli.api_url = DEFAULT_API_URL.to_string();
    }
    cli
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "upcast",
            "--token",
            "secret",
            "--repo",
            "owner/app",
            "--dry-run",
            "--tag-page-size",
            "20",
            "-v",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.repo.as_deref(), Some("owner/app"));
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.tag_page_size, 20);
    }

    #[test]
    fn defaults_apply_when_flags_are_absent() {
        let cli = parse_without_env(["upcast"]);

        assert_eq!(cli.token, None);
        assert_eq!(cli.repo, None);
        assert_eq!(cli.fallback_notes, None);
        assert_eq!(cli.updater_tag, "updater");
        assert_eq!(cli.changelog, Path::new("UPDATELOG.md"));
        assert_eq!(cli.mirror_prefix, "https://mirror.ghproxy.com/");
        assert_eq!(cli.api_url, "https://api.github.com");
        assert_eq!(cli.tag_page_size, 10);
        assert!(!cli.dry_run);
    }
}
