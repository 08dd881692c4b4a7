use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{Asset, Release, Tag};

/// Operations the publisher needs from a source code hosting platform.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Lists the first page of tags, most recent first.
    async fn list_tags(&self, per_page: u8) -> Result<Vec<Tag>, HostError>;

    /// Looks up the release attached to `tag`.
    ///
    /// # Errors
    /// Returns [`HostError::NotFound`] when no release exists for the tag.
    async fn release_by_tag(&self, tag: &str) -> Result<Release, HostError>;

    /// Fetches the raw body at `url` and returns it as text.
    async fn download_text(&self, url: &str) -> Result<String, HostError>;

    async fn delete_asset(&self, asset_id: u64) -> Result<(), HostError>;

    async fn upload_asset(
        &self,
        release_id: u64,
        name: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Asset, HostError>;

    /// Fetches `release_by_tag`, mapping a missing release to `None`.
    async fn find_release(&self, tag: &str) -> Result<Option<Release>, HostError> {
        match self.release_by_tag(tag).await {
            Ok(release) => Ok(Some(release)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }
}
