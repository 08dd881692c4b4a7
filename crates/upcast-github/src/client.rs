use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use upcast_host::{Asset, HostError, Release, ReleaseHost, Tag};

use crate::api::{GitHubAsset, GitHubRelease, GitHubTag, response_snippet};
use crate::repo::RepoSlug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOADS_URL: &str = "https://uploads.github.com";

const API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";
const OCTET_STREAM: &str = "application/octet-stream";
const SNIPPET_CHARS: usize = 160;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub uploads_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Release host backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    repo: RepoSlug,
    token: String,
    api_url: Url,
    uploads_url: Url,
}

impl GitHubClient {
    /// Builds a client for `repo` authenticated with `token`.
    ///
    /// # Errors
    /// Returns an error when a base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(
        repo: RepoSlug,
        token: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self, HostError> {
        let api_url = parse_base("api url", &options.api_url)?;
        let uploads_url = parse_base("uploads url", &options.uploads_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(format!("upcast/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| HostError::network_request_from("build http client", e))?;

        Ok(Self {
            http,
            repo,
            token: token.into(),
            api_url,
            uploads_url,
        })
    }

    #[must_use]
    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    fn repo_url(&self, base: &Url, segments: &[&str]) -> Result<Url, HostError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| HostError::network_request("build url", format!("{base} cannot be a base")))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner(), self.repo.name()])
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn tags_url(&self, per_page: u8) -> Result<Url, HostError> {
        let mut url = self.repo_url(&self.api_url, &["tags"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", "1");
        Ok(url)
    }

    pub(crate) fn release_by_tag_url(&self, tag: &str) -> Result<Url, HostError> {
        self.repo_url(&self.api_url, &["releases", "tags", tag])
    }

    pub(crate) fn asset_url(&self, asset_id: u64) -> Result<Url, HostError> {
        self.repo_url(&self.api_url, &["releases", "assets", &asset_id.to_string()])
    }

    pub(crate) fn upload_url(&self, release_id: u64, name: &str) -> Result<Url, HostError> {
        let mut url = self.repo_url(
            &self.uploads_url,
            &["releases", &release_id.to_string(), "assets"],
        )?;
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }

    fn api_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
    }

    async fn send(
        &self,
        operation: &'static str,
        resource: impl FnOnce() -> String,
        request: RequestBuilder,
    ) -> Result<Response, HostError> {
        let response = request
            .send()
            .await
            .map_err(|e| HostError::network_request_from(operation, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(HostError::not_found(resource()));
        }

        let body_snippet = response
            .text()
            .await
            .ok()
            .map(|body| response_snippet(&body, SNIPPET_CHARS))
            .unwrap_or_default();
        Err(HostError::HttpStatus {
            operation,
            status: status.as_u16(),
            body_snippet,
        })
    }
}

#[async_trait]
impl ReleaseHost for GitHubClient {
    async fn list_tags(&self, per_page: u8) -> Result<Vec<Tag>, HostError> {
        let url = self.tags_url(per_page)?;
        debug!("Listing tags: {url}");

        let response = self
            .send(
                "list tags",
                || format!("repository {}", self.repo),
                self.api_request(Method::GET, url),
            )
            .await?;
        let tags: Vec<GitHubTag> = response
            .json()
            .await
            .map_err(|e| HostError::network_parse_from("list tags", e))?;

        Ok(tags.into_iter().map(Tag::from).collect())
    }

    async fn release_by_tag(&self, tag: &str) -> Result<Release, HostError> {
        let url = self.release_by_tag_url(tag)?;
        debug!("Fetching release: {url}");

        let response = self
            .send(
                "get release",
                || format!("release for tag `{tag}` in {}", self.repo),
                self.api_request(Method::GET, url),
            )
            .await?;
        let release: GitHubRelease = response
            .json()
            .await
            .map_err(|e| HostError::network_parse_from("get release", e))?;

        Ok(release.into())
    }

    async fn download_text(&self, url: &str) -> Result<String, HostError> {
        debug!("Downloading {url}");

        let response = self
            .send(
                "download asset",
                || format!("asset {url}"),
                self.http.get(url).header(ACCEPT, OCTET_STREAM),
            )
            .await?;

        response
            .text()
            .await
            .map_err(|e| HostError::network_parse_from("download asset", e))
    }

    async fn delete_asset(&self, asset_id: u64) -> Result<(), HostError> {
        let url = self.asset_url(asset_id)?;
        debug!("Deleting asset: {url}");

        self.send(
            "delete asset",
            || format!("asset {asset_id} in {}", self.repo),
            self.api_request(Method::DELETE, url),
        )
        .await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        release_id: u64,
        name: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Asset, HostError> {
        let url = self.upload_url(release_id, name)?;
        debug!("Uploading {} bytes to {url}", body.len());

        let response = self
            .send(
                "upload asset",
                || format!("release {release_id} in {}", self.repo),
                self.api_request(Method::POST, url)
                    .header(CONTENT_TYPE, content_type)
                    .body(body),
            )
            .await?;
        let asset: GitHubAsset = response
            .json()
            .await
            .map_err(|e| HostError::network_parse_from("upload asset", e))?;

        Ok(asset.into())
    }
}

fn parse_base(what: &'static str, raw: &str) -> Result<Url, HostError> {
    Url::parse(raw).map_err(|e| HostError::network_request(what, format!("`{raw}`: {e}")))
}
