use serde::Deserialize;
use upcast_host::{Asset, Release, Tag};

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub id: u64,
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

impl From<GitHubTag> for Tag {
    fn from(tag: GitHubTag) -> Self {
        Tag::new(tag.name)
    }
}

impl From<GitHubAsset> for Asset {
    fn from(asset: GitHubAsset) -> Self {
        Asset {
            id: asset.id,
            name: asset.name,
            download_url: asset.browser_download_url,
        }
    }
}

impl From<GitHubRelease> for Release {
    fn from(release: GitHubRelease) -> Self {
        Release {
            id: release.id,
            tag_name: release.tag_name,
            assets: release.assets.into_iter().map(Asset::from).collect(),
        }
    }
}

pub fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_payload_maps_to_host_release() {
        let payload = r#"{
            "id": 1234,
            "tag_name": "v1.0.0",
            "name": "App v1.0.0",
            "draft": false,
            "assets": [
                {
                    "id": 55,
                    "name": "App_1.0.0_x64_en-US.msi.zip",
                    "size": 1024,
                    "browser_download_url": "https://github.com/o/r/releases/download/v1.0.0/App_1.0.0_x64_en-US.msi.zip"
                }
            ]
        }"#;

        let release: Release = serde_json::from_str::<GitHubRelease>(payload)
            .expect("release payload should parse")
            .into();

        assert_eq!(release.id, 1234);
        assert_eq!(release.tag_name, "v1.0.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].id, 55);
        assert!(release.assets[0].download_url.ends_with("en-US.msi.zip"));
    }

    #[test]
    fn release_without_assets_defaults_to_empty() {
        let release: GitHubRelease =
            serde_json::from_str(r#"{"id": 1, "tag_name": "updater"}"#).expect("should parse");

        assert!(release.assets.is_empty());
    }

    #[test]
    fn tags_payload_maps_names() {
        let payload = r#"[
            {"name": "v1.1.0", "commit": {"sha": "abc"}},
            {"name": "updater", "commit": {"sha": "def"}}
        ]"#;

        let tags: Vec<Tag> = serde_json::from_str::<Vec<GitHubTag>>(payload)
            .expect("tags payload should parse")
            .into_iter()
            .map(Tag::from)
            .collect();

        assert_eq!(tags, [Tag::new("v1.1.0"), Tag::new("updater")]);
    }

    #[test]
    fn response_snippet_truncates_and_prefixes() {
        assert_eq!(response_snippet("", 10), "");
        assert_eq!(response_snippet("Bad credentials", 3), ": Bad");
    }
}
