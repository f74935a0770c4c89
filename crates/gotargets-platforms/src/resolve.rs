//! Mapping Go version strings onto the release history.
//!
//! Resolution is fail-open: anything that cannot be placed in the history
//! resolves to the latest snapshot.

use std::sync::Arc;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{PlatformError, Result};
use crate::history::{history, History, Snapshot};
use crate::platform::Platform;

/// Prefix carried by every Go toolchain version string.
pub const GO_PREFIX: &str = "go";

/// Normalize a Go version (without the `go` prefix) into a semver version.
///
/// Go drops trailing zero components and glues pre-release tags straight onto
/// the number, so `"1.17"` becomes `1.17.0` and `"1.18beta1"` becomes
/// `1.18.0-beta1`. Build metadata after `+` is kept in `build`. Numeric
/// components past the third are validated and then ignored.
pub fn parse_go_version(s: &str) -> Result<Version> {
    let invalid = |detail: &str| PlatformError::InvalidVersion {
        version: s.to_string(),
        detail: detail.to_string(),
    };

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (core, rest) = s.split_at(split);
    if core.is_empty() {
        return Err(invalid("missing version number"));
    }

    let mut parts = [0u64; 3];
    for (i, part) in core.split('.').enumerate() {
        if part.is_empty() {
            return Err(invalid("empty version component"));
        }
        let value: u64 = part
            .parse()
            .map_err(|e: std::num::ParseIntError| invalid(&e.to_string()))?;
        if let Some(slot) = parts.get_mut(i) {
            *slot = value;
        }
    }

    let mut version = Version::new(parts[0], parts[1], parts[2]);
    let (tag, build) = match rest.split_once('+') {
        Some((tag, build)) => (tag, Some(build)),
        None => (rest, None),
    };
    let tag = tag.strip_prefix('-').unwrap_or(tag);
    if !tag.is_empty() {
        version.pre = Prerelease::new(tag).map_err(|e| invalid(&e.to_string()))?;
    }
    if let Some(build) = build {
        version.build = BuildMetadata::new(build).map_err(|e| invalid(&e.to_string()))?;
    }
    Ok(version)
}

impl History {
    /// The snapshot whose range contains `version`, or `None` when the
    /// version has no `go` prefix, does not parse, or is outside every range.
    pub fn resolve_release(&self, version: &str) -> Option<&Snapshot> {
        let rest = version.strip_prefix(GO_PREFIX)?;

        let current = match parse_go_version(rest) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Unable to parse current go version: {rest}: {e}");
                return None;
            }
        };

        let entry = self.table().iter().find(|entry| entry.req.matches(&current))?;
        let snapshot = self.entry_snapshot(entry);
        log::debug!(
            "go version {current} matched '{}' (release {})",
            entry.constraint,
            snapshot.release
        );
        Some(snapshot)
    }

    /// Platforms supported by `version`, falling back to the latest release.
    pub fn resolve(&self, version: &str) -> Arc<[Platform]> {
        match self.resolve_release(version) {
            Some(snapshot) => Arc::clone(&snapshot.platforms),
            None => {
                log::debug!(
                    "using latest release {} for '{version}'",
                    self.latest().release
                );
                Arc::clone(&self.latest().platforms)
            }
        }
    }
}

/// The full list of platforms supported by the given Go version, such as
/// `"go1.17"` or `"go1.16.5"`.
///
/// Never fails: an unexpected version string yields the latest list.
pub fn supported_platforms(version: &str) -> Arc<[Platform]> {
    history().resolve(version)
}
