//! GitHub REST implementation of [`upcast_host::ReleaseHost`].

mod api;
mod client;
mod repo;

pub use client::{ClientOptions, DEFAULT_API_URL, DEFAULT_UPLOADS_URL, GitHubClient};
pub use repo::{RepoSlug, RepoSlugError};
