use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use log::{debug, error, warn};
use upcast_host::{Asset, ReleaseHost, Tag};

use crate::classify::{Slot, classify};
use crate::error::PublishError;
use crate::manifest::Manifest;
use crate::platform::PlatformKey;

/// Prefix that marks a production release tag.
pub const VERSION_TAG_PREFIX: char = 'v';

/// Picks the most recent version tag from a most-recent-first listing.
///
/// # Errors
/// Returns [`PublishError::NoVersionTag`] when no tag starts with `v`.
pub fn select_latest_tag(tags: &[Tag]) -> Result<&Tag, PublishError> {
    tags.iter()
        .find(|tag| tag.name.starts_with(VERSION_TAG_PREFIX))
        .ok_or(PublishError::NoVersionTag {
            prefix: VERSION_TAG_PREFIX,
            scanned: tags.len(),
        })
}

/// Classifies `assets` into a manifest, fetching signature sidecars through
/// `host`.
///
/// Signature downloads run concurrently and are all awaited; a failed download
/// is logged and leaves that slot empty. Platforms that end up without a url
/// are dropped from the returned manifest.
pub async fn build_manifest<H>(
    host: &H,
    tag_name: &str,
    notes: &str,
    assets: &[Asset],
    pub_date: DateTime<Utc>,
) -> Manifest
where
    H: ReleaseHost + ?Sized,
{
    let mut candidate = Manifest::empty(tag_name, notes, pub_date);
    let mut signatures = Vec::new();

    for asset in assets {
        let Some(classification) = classify(&asset.name) else {
            debug!("Ignoring asset {}", asset.name);
            continue;
        };

        match classification.slot {
            Slot::Url => {
                debug!("Using {} as update bundle ({})", asset.name, classification.rule);
                fill(&mut candidate, classification.keys, Slot::Url, &asset.download_url);
            }
            Slot::Signature => signatures.push((asset, classification.keys)),
        }
    }

    let fetched = join_all(signatures.into_iter().map(|(asset, keys)| async move {
        let result = host.download_text(&asset.download_url).await;
        (asset, keys, result)
    }))
    .await;

    for (asset, keys, result) in fetched {
        match result {
            Ok(signature) => fill(&mut candidate, keys, Slot::Signature, &signature),
            Err(e) => error!("Failed to fetch signature {}: {e}", asset.name),
        }
    }

    retain_published(candidate)
}

fn fill(manifest: &mut Manifest, keys: &[PlatformKey], slot: Slot, value: &str) {
    for key in keys {
        let entry = manifest.platforms.entry(*key).or_default();
        let target = match slot {
            Slot::Url => &mut entry.url,
            Slot::Signature => &mut entry.signature,
        };
        if !target.is_empty() && target.as_str() != value {
            warn!("Overwriting {slot:?} for {key}: more than one asset matched");
        }
        value.clone_into(target);
    }
}

fn retain_published(candidate: Manifest) -> Manifest {
    let Manifest {
        name,
        notes,
        pub_date,
        platforms,
    } = candidate;

    let platforms = platforms
        .into_iter()
        .filter(|(key, entry)| {
            if entry.has_url() {
                true
            } else {
                error!("Failed to find an update bundle for {key}, dropping it");
                false
            }
        })
        .collect();

    Manifest {
        name,
        notes,
        pub_date,
        platforms,
    }
}
