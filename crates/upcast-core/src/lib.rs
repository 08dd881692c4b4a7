//! Update manifest assembly for desktop application releases.
//!
//! This crate holds the logic that is independent of any concrete hosting
//! platform:
//! - Platform keys and asset filename classification.
//! - Manifest building from a release's assets, including signature sidecars.
//! - Mirror URL rewriting.
//! - Release notes lookup from a Markdown changelog.
//! - The prepare/publish pipeline over a [`upcast_host::ReleaseHost`].

mod builder;
pub mod changelog;
pub mod classify;
mod error;
mod manifest;
pub mod mirror;
mod platform;
mod publish;

/// Tag selection and manifest building.
pub use builder::{VERSION_TAG_PREFIX, build_manifest, select_latest_tag};
/// Changelog-backed release notes.
pub use changelog::{Changelog, ChangelogError, NotesSource, resolve_notes};
pub use classify::{Classification, Slot, classify};
pub use error::PublishError;
pub use manifest::{Manifest, PlatformEntry};
/// Mirror URL rewriting.
pub use mirror::{PrefixMirror, UrlRewriter, mirror};
pub use platform::PlatformKey;
/// Manifest publication pipeline.
pub use publish::{
    DEFAULT_TAG_PAGE_SIZE, DEFAULT_UPDATER_TAG, ManifestPair, PublishOptions, PublishReport,
    UPDATE_JSON_FILE, UPDATE_PROXY_FILE, prepare, publish,
};
