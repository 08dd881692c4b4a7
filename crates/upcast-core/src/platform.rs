use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform keys understood by the auto-update client.
///
/// Variant order is the order keys appear in the published manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlatformKey {
    #[serde(rename = "win64")]
    Win64,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "darwin")]
    Darwin,
    #[serde(rename = "darwin-aarch64")]
    DarwinAarch64,
    #[serde(rename = "darwin-intel")]
    DarwinIntel,
    #[serde(rename = "darwin-x86_64")]
    DarwinX86_64,
    #[serde(rename = "linux-x86_64")]
    LinuxX86_64,
    #[serde(rename = "windows-x86_64")]
    WindowsX86_64,
}

impl PlatformKey {
    pub const ALL: [PlatformKey; 8] = [
        PlatformKey::Win64,
        PlatformKey::Linux,
        PlatformKey::Darwin,
        PlatformKey::DarwinAarch64,
        PlatformKey::DarwinIntel,
        PlatformKey::DarwinX86_64,
        PlatformKey::LinuxX86_64,
        PlatformKey::WindowsX86_64,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win64 => "win64",
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::DarwinAarch64 => "darwin-aarch64",
            Self::DarwinIntel => "darwin-intel",
            Self::DarwinX86_64 => "darwin-x86_64",
            Self::LinuxX86_64 => "linux-x86_64",
            Self::WindowsX86_64 => "windows-x86_64",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
