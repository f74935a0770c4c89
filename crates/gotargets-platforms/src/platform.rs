//! The platform value type.
//!
//! A platform is one GOOS/GOARCH pair the Go toolchain can build for, with an
//! optional GOARM sub-version for 32-bit ARM.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Operating systems the Go toolchain has supported at some point.
pub const OS_LIST: &[&str] = &[
    "darwin",
    "dragonfly",
    "linux",
    "android",
    "solaris",
    "freebsd",
    "nacl",
    "netbsd",
    "openbsd",
    "plan9",
    "windows",
];

/// Architectures the Go toolchain has supported at some point.
pub const ARCH_LIST: &[&str] = &[
    "386",
    "amd64",
    "amd64p32",
    "arm",
    "arm64",
    "mips64",
    "mips64le",
    "ppc64",
    "ppc64le",
];

/// A combination of OS and architecture that can be built against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system (GOOS), e.g. "linux".
    pub os: String,
    /// Architecture (GOARCH), e.g. "amd64". Always "arm" for ARM variants.
    pub arch: String,
    /// ARM version (GOARM) such as "7". Only set when `arch` is "arm".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm: Option<String>,
    /// Whether this target is built when no explicit OS/arch is requested.
    ///
    /// Only popular or generally useful targets carry this flag. Android, for
    /// example, is rarely cross-compiled alongside desktop targets.
    #[serde(default)]
    pub default: bool,
}

impl Platform {
    /// A platform without an ARM version.
    pub fn new(os: impl Into<String>, arch: impl Into<String>, default: bool) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            arm: None,
            default,
        }
    }

    /// A 32-bit ARM platform pinned to a GOARM version.
    pub fn arm(os: impl Into<String>, version: impl Into<String>, default: bool) -> Self {
        Self {
            os: os.into(),
            arch: "arm".to_string(),
            arm: Some(version.into()),
            default,
        }
    }

    /// Build a platform from a raw OS and architecture string.
    ///
    /// An architecture of the form `armvN` is split into `arch = "arm"` and
    /// `arm = Some("N")`. Anything else is kept verbatim, including a bare
    /// `"arm"` or `"armv"`.
    pub fn from_parts(os: &str, arch: &str) -> Self {
        match arch.strip_prefix("armv") {
            Some(version) if !version.is_empty() => Self::arm(os, version, false),
            _ => Self::new(os, arch, false),
        }
    }

    /// The `vN` suffix for ARM variants, or an empty string.
    pub fn arm_version(&self) -> String {
        match self.arm.as_deref() {
            Some(v) if !v.is_empty() => format!("v{v}"),
            _ => String::new(),
        }
    }

    /// Canonical architecture string, e.g. "amd64" or "armv7".
    pub fn arch_string(&self) -> String {
        format!("{}{}", self.arch, self.arm_version())
    }

    /// Whether both platforms name the same OS/arch pair, ignoring the ARM
    /// version and the default flag.
    pub fn same_target(&self, other: &Platform) -> bool {
        self.os == other.os && self.arch == other.arch
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch_string())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    /// Parse an `os/arch` string such as "linux/armv7".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((os, arch)) if !os.is_empty() && !arch.is_empty() && !arch.contains('/') => {
                Ok(Self::from_parts(os, arch))
            }
            _ => Err(PlatformError::InvalidPlatform {
                input: s.to_string(),
            }),
        }
    }
}
