//! Supported cross-compilation targets across Go toolchain releases.
//!
//! The history is a chain of snapshots, one per release that changed the
//! target list, each derived from an earlier one by appending new targets
//! and dropping retired ones:
//! - **Platform:** one GOOS/GOARCH pair, with an optional GOARM version
//! - **History:** every snapshot plus the version-range table that selects one
//! - **Resolution:** Go version string → platform list, falling back to latest
//!
//! The history is built once and never mutated.

pub mod error;
pub mod history;
pub mod platform;
pub mod resolve;
pub mod transform;

pub use error::{PlatformError, Result};
pub use history::{defaults, history, History, Snapshot, TableEntry, LATEST_RELEASE};
pub use platform::{Platform, ARCH_LIST, OS_LIST};
pub use resolve::{parse_go_version, supported_platforms, GO_PREFIX};
pub use transform::add_drop;
