use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use upcast_core::{PrefixMirror, PublishOptions};
use upcast_github::{ClientOptions, RepoSlug, RepoSlugError};

use crate::cli::Cli;

const MAX_TAG_PAGE_SIZE: u8 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN is required")]
    MissingToken,
    #[error("GITHUB_REPOSITORY is required")]
    MissingRepo,
    #[error(transparent)]
    Repo(#[from] RepoSlugError),
    #[error("mirror prefix `{0}` is not an absolute URL")]
    MirrorPrefix(String),
    #[error("tag page size must be between 1 and {MAX_TAG_PAGE_SIZE}, got {0}")]
    TagPageSize(u8),
    #[error("timeout must be at least one second")]
    Timeout,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub repo: RepoSlug,
    pub client: ClientOptions,
    pub publish: PublishOptions,
    pub mirror: PrefixMirror,
    pub changelog: PathBuf,
    pub dry_run: Option<PathBuf>,
}

impl Config {
    /// Validates parsed arguments. Runs before any network access.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let token = cli
            .token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let repo = cli
            .repo
            .filter(|repo| !repo.trim().is_empty())
            .ok_or(ConfigError::MissingRepo)?
            .parse::<RepoSlug>()?;

        if Url::parse(&cli.mirror_prefix).is_err() {
            return Err(ConfigError::MirrorPrefix(cli.mirror_prefix));
        }

        if cli.tag_page_size == 0 || cli.tag_page_size > MAX_TAG_PAGE_SIZE {
            return Err(ConfigError::TagPageSize(cli.tag_page_size));
        }

        if cli.timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }

        let fallback_notes = cli
            .fallback_notes
            .filter(|notes| !notes.trim().is_empty());

        Ok(Self {
            token,
            repo,
            client: ClientOptions {
                api_url: cli.api_url,
                uploads_url: cli.uploads_url,
                timeout: Duration::from_secs(cli.timeout_secs),
                ..ClientOptions::default()
            },
            publish: PublishOptions {
                updater_tag: cli.updater_tag,
                tag_page_size: cli.tag_page_size,
                fallback_notes,
            },
            mirror: PrefixMirror::new(cli.mirror_prefix),
            changelog: cli.changelog,
            dry_run: cli.dry_run.then_some(cli.out_dir),
        })
    }
}
