//! Asset filename classification.
//!
//! Each rule pairs a filename predicate with the platform keys it feeds and
//! the manifest slot it fills. Rules are evaluated in order and the first
//! match wins; the suffixes are mutually exclusive in practice.

use crate::platform::PlatformKey;

/// Which half of a [`PlatformEntry`](crate::PlatformEntry) an asset fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Url,
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Name of the rule that matched, for diagnostics.
    pub rule: &'static str,
    pub keys: &'static [PlatformKey],
    pub slot: Slot,
}

pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub keys: &'static [PlatformKey],
    pub slot: Slot,
}

const WINDOWS: &[PlatformKey] = &[PlatformKey::Win64, PlatformKey::WindowsX86_64];
const DARWIN_INTEL: &[PlatformKey] = &[
    PlatformKey::Darwin,
    PlatformKey::DarwinIntel,
    PlatformKey::DarwinX86_64,
];
const DARWIN_AARCH64: &[PlatformKey] = &[PlatformKey::DarwinAarch64];
const LINUX: &[PlatformKey] = &[PlatformKey::Linux, PlatformKey::LinuxX86_64];

fn is_windows_bundle(name: &str) -> bool {
    name.ends_with(".msi.zip") && name.contains("en-US")
}

fn is_windows_signature(name: &str) -> bool {
    name.ends_with(".msi.zip.sig") && name.contains("en-US")
}

fn is_darwin_intel_bundle(name: &str) -> bool {
    name.ends_with(".app.tar.gz") && !name.contains("aarch")
}

fn is_darwin_intel_signature(name: &str) -> bool {
    name.ends_with(".app.tar.gz.sig") && !name.contains("aarch")
}

fn is_darwin_aarch64_bundle(name: &str) -> bool {
    name.ends_with("aarch64.app.tar.gz")
}

fn is_darwin_aarch64_signature(name: &str) -> bool {
    name.ends_with("aarch64.app.tar.gz.sig")
}

fn is_linux_bundle(name: &str) -> bool {
    name.ends_with(".AppImage.tar.gz")
}

fn is_linux_signature(name: &str) -> bool {
    name.ends_with(".AppImage.tar.gz.sig")
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "windows msi",
        matches: is_windows_bundle,
        keys: WINDOWS,
        slot: Slot::Url,
    },
    Rule {
        name: "windows msi signature",
        matches: is_windows_signature,
        keys: WINDOWS,
        slot: Slot::Signature,
    },
    Rule {
        name: "macos intel app",
        matches: is_darwin_intel_bundle,
        keys: DARWIN_INTEL,
        slot: Slot::Url,
    },
    Rule {
        name: "macos intel app signature",
        matches: is_darwin_intel_signature,
        keys: DARWIN_INTEL,
        slot: Slot::Signature,
    },
    Rule {
        name: "macos aarch64 app",
        matches: is_darwin_aarch64_bundle,
        keys: DARWIN_AARCH64,
        slot: Slot::Url,
    },
    Rule {
        name: "macos aarch64 app signature",
        matches: is_darwin_aarch64_signature,
        keys: DARWIN_AARCH64,
        slot: Slot::Signature,
    },
    Rule {
        name: "linux appimage",
        matches: is_linux_bundle,
        keys: LINUX,
        slot: Slot::Url,
    },
    Rule {
        name: "linux appimage signature",
        matches: is_linux_signature,
        keys: LINUX,
        slot: Slot::Signature,
    },
];

/// Maps an asset filename to the platform keys and slot it updates.
///
/// Returns `None` for assets the update manifest does not reference.
#[must_use]
pub fn classify(asset_name: &str) -> Option<Classification> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(asset_name))
        .map(|rule| Classification {
            rule: rule.name,
            keys: rule.keys,
            slot: rule.slot,
        })
}
