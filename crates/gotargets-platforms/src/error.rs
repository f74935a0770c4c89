//! Error types for platform history construction and parsing.

/// Errors that can occur while building the platform history or parsing input.
///
/// Only `InvalidVersion` and `InvalidPlatform` describe caller input. The rest
/// mean the built-in release table is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// A drop entry had no `(os, arch)` match in the list being derived.
    #[error("release {release}: expected to remove {platform} but it is not in [{current}]")]
    MissingDrop {
        /// Release being derived.
        release: String,
        /// The platform that was asked to be removed.
        platform: String,
        /// Rendered contents of the list at the time of removal.
        current: String,
    },

    /// A range constraint in the resolution table failed to parse.
    #[error("invalid constraint '{constraint}' for release {release}: {source}")]
    InvalidConstraint {
        /// Release the constraint maps to.
        release: String,
        /// The constraint text.
        constraint: String,
        /// Underlying semver error.
        #[source]
        source: semver::Error,
    },

    /// A snapshot ended up with no platforms.
    #[error("release {release} has no platforms")]
    EmptySnapshot {
        /// The offending release.
        release: String,
    },

    /// A release name was referenced before it was defined.
    #[error("unknown release: {release}")]
    UnknownRelease {
        /// The missing release.
        release: String,
    },

    /// A Go version string could not be normalized.
    #[error("invalid go version '{version}': {detail}")]
    InvalidVersion {
        /// The text that was parsed (without the `go` prefix).
        version: String,
        /// Description of the problem.
        detail: String,
    },

    /// An `os/arch` string could not be parsed.
    #[error("invalid platform '{input}': expected <os>/<arch>")]
    InvalidPlatform {
        /// The rejected input.
        input: String,
    },
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
