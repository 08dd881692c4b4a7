use log::error;

use crate::manifest::Manifest;

pub const DEFAULT_MIRROR_PREFIX: &str = "https://mirror.ghproxy.com/";

/// Maps an origin download URL to an accelerated mirror URL.
pub trait UrlRewriter: Send + Sync {
    fn rewrite(&self, url: &str) -> String;
}

/// Routes downloads through a proxy by prepending its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMirror {
    prefix: String,
}

impl PrefixMirror {
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixMirror {
    fn default() -> Self {
        Self::new(DEFAULT_MIRROR_PREFIX)
    }
}

impl UrlRewriter for PrefixMirror {
    fn rewrite(&self, url: &str) -> String {
        if url.starts_with(&self.prefix) {
            return url.to_string();
        }
        format!("{}{}", self.prefix, url.trim_start_matches('/'))
    }
}

/// Returns a copy of `manifest` whose download URLs point at the mirror.
///
/// Signatures are copied unchanged. Entries without a url are logged and
/// left as they are.
#[must_use]
pub fn mirror<R>(manifest: &Manifest, rewriter: &R) -> Manifest
where
    R: UrlRewriter + ?Sized,
{
    let mut mirrored = manifest.clone();
    for (key, entry) in &mut mirrored.platforms {
        if entry.has_url() {
            entry.url = rewriter.rewrite(&entry.url);
        } else {
            error!("Cannot mirror {key}: no download url");
        }
    }
    mirrored
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::manifest::PlatformEntry;
    use crate::platform::PlatformKey;

    const ORIGIN: &str = "https://github.com/x/y/releases/download/v1/a.zip";

    fn manifest_with(key: PlatformKey, url: &str) -> Manifest {
        let mut manifest = Manifest::empty("v1", "notes", Utc::now());
        manifest.platforms.clear();
        manifest.platforms.insert(
            key,
            PlatformEntry {
                signature: "untouched-signature".to_string(),
                url: url.to_string(),
            },
        );
        manifest
    }

    #[test]
    fn prefix_mirror_prepends_proxy() {
        let mirror = PrefixMirror::new("https://proxy.example.com");

        assert_eq!(mirror.prefix(), "https://proxy.example.com/");
        assert_eq!(
            mirror.rewrite(ORIGIN),
            "https://proxy.example.com/https://github.com/x/y/releases/download/v1/a.zip"
        );
    }

    #[test]
    fn prefix_mirror_is_idempotent() {
        let mirror = PrefixMirror::default();
        let once = mirror.rewrite(ORIGIN);

        assert_eq!(mirror.rewrite(&once), once);
    }

    #[test]
    fn mirror_rewrites_url_and_keeps_signature() {
        let original = manifest_with(PlatformKey::WindowsX86_64, ORIGIN);

        let mirrored = mirror(&original, &PrefixMirror::default());

        let entry = mirrored
            .entry(PlatformKey::WindowsX86_64)
            .expect("entry is copied");
        assert_ne!(entry.url, ORIGIN);
        assert!(entry.url.ends_with(ORIGIN));
        assert_eq!(entry.signature, "untouched-signature");
        assert_eq!(
            original
                .entry(PlatformKey::WindowsX86_64)
                .map(|e| e.url.as_str()),
            Some(ORIGIN),
            "original manifest must not change"
        );
        assert_eq!(mirrored.name, original.name);
        assert_eq!(mirrored.pub_date, original.pub_date);
    }

    #[test]
    fn mirror_leaves_empty_urls_alone() {
        let original = manifest_with(PlatformKey::Linux, "");

        let mirrored = mirror(&original, &PrefixMirror::default());

        assert_eq!(mirrored, original);
    }

    struct Upper;

    impl UrlRewriter for Upper {
        fn rewrite(&self, url: &str) -> String {
            url.to_uppercase()
        }
    }

    #[test]
    fn mirror_accepts_trait_objects() {
        let rewriter: Box<dyn UrlRewriter> = Box::new(Upper);
        let mirrored = mirror(&manifest_with(PlatformKey::Darwin, "https://a/b"), rewriter.as_ref());

        assert_eq!(
            mirrored.entry(PlatformKey::Darwin).map(|e| e.url.as_str()),
            Some("HTTPS://A/B")
        );
    }
}
