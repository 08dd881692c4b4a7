use chrono::{DateTime, Utc};
use log::{error, info};
use upcast_host::{Asset, Release, ReleaseHost};

use crate::builder::{build_manifest, select_latest_tag};
use crate::changelog::{NotesSource, resolve_notes};
use crate::error::PublishError;
use crate::manifest::Manifest;
use crate::mirror::{UrlRewriter, mirror};

pub const UPDATE_JSON_FILE: &str = "update.json";
pub const UPDATE_PROXY_FILE: &str = "update-proxy.json";
pub const DEFAULT_UPDATER_TAG: &str = "updater";
pub const DEFAULT_TAG_PAGE_SIZE: u8 = 10;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub updater_tag: String,
    pub tag_page_size: u8,
    pub fallback_notes: Option<String>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            updater_tag: DEFAULT_UPDATER_TAG.to_string(),
            tag_page_size: DEFAULT_TAG_PAGE_SIZE,
            fallback_notes: None,
        }
    }
}

/// The canonical manifest and its mirrored twin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPair {
    pub canonical: Manifest,
    pub mirrored: Manifest,
}

impl ManifestPair {
    /// Renders both manifests as `(asset name, JSON)` pairs, canonical first.
    ///
    /// # Errors
    /// Returns [`PublishError::Encode`] if either manifest fails to serialize.
    pub fn documents(&self) -> Result<[(&'static str, String); 2], PublishError> {
        let encode = |name: &'static str, manifest: &Manifest| {
            manifest
                .to_pretty_json()
                .map_err(|source| PublishError::Encode { name, source })
        };
        Ok([
            (UPDATE_JSON_FILE, encode(UPDATE_JSON_FILE, &self.canonical)?),
            (UPDATE_PROXY_FILE, encode(UPDATE_PROXY_FILE, &self.mirrored)?),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub release_id: u64,
    pub uploaded: Vec<Asset>,
}

/// Builds the manifest pair for the most recent version tag.
///
/// # Errors
/// Fails when listing tags or fetching the release fails, when no version tag
/// exists, or when the tag has no release.
pub async fn prepare<H, N, R>(
    host: &H,
    notes: &N,
    rewriter: &R,
    options: &PublishOptions,
    pub_date: DateTime<Utc>,
) -> Result<ManifestPair, PublishError>
where
    H: ReleaseHost + ?Sized,
    N: NotesSource + ?Sized,
    R: UrlRewriter + ?Sized,
{
    let tags = host.list_tags(options.tag_page_size).await?;
    let tag = select_latest_tag(&tags)?;
    info!("Latest version tag is {}", tag.name);

    let release = require_release(host, &tag.name).await?;
    info!(
        "Release {} has {} assets",
        release.tag_name,
        release.assets.len()
    );

    let notes = resolve_notes(notes, &tag.name, options.fallback_notes.as_deref());
    let canonical = build_manifest(host, &tag.name, &notes, &release.assets, pub_date).await;
    let mirrored = mirror(&canonical, rewriter);

    Ok(ManifestPair {
        canonical,
        mirrored,
    })
}

/// Replaces the manifest assets on the updater release with `pair`.
///
/// A stale `update.json` that cannot be deleted aborts publication; a stale
/// `update-proxy.json` that cannot be deleted is only logged.
///
/// # Errors
/// Fails when the updater release is missing, when the stale canonical
/// manifest cannot be deleted, or when an upload fails.
pub async fn publish<H>(
    host: &H,
    pair: &ManifestPair,
    options: &PublishOptions,
) -> Result<PublishReport, PublishError>
where
    H: ReleaseHost + ?Sized,
{
    let documents = pair.documents()?;
    let release = require_release(host, &options.updater_tag).await?;

    if let Some(stale) = release.find_asset(UPDATE_JSON_FILE) {
        host.delete_asset(stale.id)
            .await
            .map_err(|source| PublishError::AssetCleanup {
                name: stale.name.clone(),
                source,
            })?;
        info!("Deleted stale {}", stale.name);
    }

    if let Some(stale) = release.find_asset(UPDATE_PROXY_FILE) {
        match host.delete_asset(stale.id).await {
            Ok(()) => info!("Deleted stale {}", stale.name),
            Err(source) => error!(
                "{}",
                PublishError::AssetCleanup {
                    name: stale.name.clone(),
                    source,
                }
            ),
        }
    }

    let mut uploaded = Vec::with_capacity(documents.len());
    for (name, body) in documents {
        let asset = host
            .upload_asset(release.id, name, JSON_CONTENT_TYPE, body.into_bytes())
            .await
            .map_err(|source| PublishError::Upload {
                name: name.to_string(),
                source,
            })?;
        info!("Uploaded {} to release {}", asset.name, release.tag_name);
        uploaded.push(asset);
    }

    Ok(PublishReport {
        release_id: release.id,
        uploaded,
    })
}

async fn require_release<H>(host: &H, tag: &str) -> Result<Release, PublishError>
where
    H: ReleaseHost + ?Sized,
{
    host.find_release(tag)
        .await?
        .ok_or_else(|| PublishError::ReleaseNotFound {
            tag: tag.to_string(),
        })
}
