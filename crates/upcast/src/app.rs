use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use thiserror::Error;
use upcast_core::{Changelog, ManifestPair, PublishError, prepare, publish};
use upcast_github::GitHubClient;
use upcast_host::{HostError, ReleaseHost};

use crate::config::{Config, ConfigError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create GitHub client: {0}")]
    Client(#[source] HostError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Follow-up advice for failures caused by something missing on the host.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Publish(e) if e.is_not_found() => Some(
                "check --repo, that a `v` tag has a published release, \
                 and that the updater release exists",
            ),
            _ => None,
        }
    }
}

pub async fn run(config: &Config) -> Result<(), AppError> {
    let client = GitHubClient::new(config.repo.clone(), config.token.clone(), &config.client)
        .map_err(AppError::Client)?;
    info!("Publishing update manifest for {}", client.repo());
    run_with_host(&client, config).await
}

/// Builds the manifests and either publishes them or, in dry-run mode, writes
/// them to disk.
pub async fn run_with_host<H>(host: &H, config: &Config) -> Result<(), AppError>
where
    H: ReleaseHost + ?Sized,
{
    let changelog = Changelog::load_or_empty(&config.changelog);
    let pair = prepare(host, &changelog, &config.mirror, &config.publish, Utc::now()).await?;
    info!(
        "Manifest for {} covers {} platforms",
        pair.canonical.name,
        pair.canonical.platforms.len()
    );

    if let Some(out_dir) = &config.dry_run {
        for path in write_documents(out_dir, &pair).await? {
            info!("Dry run: wrote {}", path.display());
        }
        return Ok(());
    }

    let report = publish(host, &pair, &config.publish).await?;
    for asset in &report.uploaded {
        info!("Published {}", asset.download_url);
    }
    Ok(())
}

async fn write_documents(out_dir: &Path, pair: &ManifestPair) -> Result<Vec<PathBuf>, AppError> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| AppError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::new();
    for (name, body) in pair.documents()? {
        let path = out_dir.join(name);
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}
