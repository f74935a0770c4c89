//! The release-by-release history of supported Go targets.
//!
//! Each release that changed the target list gets a snapshot derived from an
//! earlier one with [`add_drop`]. Releases without changes share the previous
//! snapshot's data. The resolution table then maps version ranges onto those
//! snapshots.

use std::sync::{Arc, OnceLock};

use semver::VersionReq;

use crate::error::{PlatformError, Result};
use crate::platform::Platform;
use crate::transform::add_drop;

/// Newest release described by the history.
pub const LATEST_RELEASE: &str = "1.18";

/// Version range → release, checked in order. Ranges are contiguous and do
/// not overlap.
const RESOLUTION_TABLE: &[(&str, &str)] = &[
    ("<=1.0", "1.0"),
    (">=1.1, <1.3", "1.1"),
    (">=1.3, <1.4", "1.3"),
    (">=1.4, <1.5", "1.4"),
    (">=1.5, <1.6", "1.5"),
    (">=1.6, <1.7", "1.6"),
    (">=1.7, <1.8", "1.7"),
    (">=1.8, <1.9", "1.8"),
    (">=1.9, <1.10", "1.9"),
    (">=1.10, <1.11", "1.10"),
    (">=1.11, <1.12", "1.11"),
    (">=1.12, <1.13", "1.12"),
    (">=1.13, <1.14", "1.13"),
    (">=1.14, <1.15", "1.14"),
    (">=1.15, <1.16", "1.15"),
    (">=1.16, <1.17", "1.16"),
    (">=1.17, <1.18", "1.17"),
    (">=1.18, <1.19", "1.18"),
];

/// The full platform list of one release.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Release name, e.g. "1.17".
    pub release: &'static str,
    /// Supported platforms, shared with any aliasing release.
    pub platforms: Arc<[Platform]>,
}

/// One row of the resolution table.
#[derive(Debug, Clone)]
pub struct TableEntry {
    /// The constraint as written.
    pub constraint: &'static str,
    /// Parsed form of `constraint`.
    pub req: VersionReq,
    /// Index into [`History::snapshots`].
    snapshot: usize,
}

/// All snapshots plus the resolution table. Immutable once built.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    table: Vec<TableEntry>,
    latest: usize,
}

impl History {
    /// Build every snapshot, oldest first, then parse the resolution table.
    ///
    /// An error here means the built-in data is inconsistent.
    pub fn build() -> Result<Self> {
        let mut chain = Chain::default();

        chain.base(
            "1.0",
            vec![
                Platform::new("darwin", "386", true),
                Platform::new("darwin", "amd64", true),
                Platform::new("linux", "386", true),
                Platform::new("linux", "amd64", true),
                Platform::arm("linux", "5", true),
                Platform::arm("linux", "6", true),
                Platform::arm("linux", "7", true),
                Platform::arm("linux", "8", true),
                Platform::new("freebsd", "386", true),
                Platform::new("freebsd", "amd64", true),
                Platform::new("openbsd", "386", true),
                Platform::new("openbsd", "amd64", true),
                Platform::new("windows", "386", true),
                Platform::new("windows", "amd64", true),
            ],
        )?;

        chain.derive(
            "1.1",
            "1.0",
            &[
                Platform::new("freebsd", "arm", true),
                Platform::new("netbsd", "386", true),
                Platform::new("netbsd", "amd64", true),
                Platform::new("netbsd", "arm", true),
                Platform::new("plan9", "386", false),
            ],
            &[],
        )?;

        chain.derive(
            "1.3",
            "1.1",
            &[
                Platform::new("dragonfly", "386", false),
                Platform::new("dragonfly", "amd64", false),
                Platform::new("nacl", "amd64", false),
                Platform::new("nacl", "amd64p32", false),
                Platform::new("nacl", "arm", false),
                Platform::new("solaris", "amd64", false),
            ],
            &[],
        )?;

        chain.derive(
            "1.4",
            "1.3",
            &[
                Platform::new("android", "arm", false),
                Platform::new("plan9", "amd64", false),
            ],
            &[],
        )?;

        chain.derive(
            "1.5",
            "1.4",
            &[
                Platform::new("darwin", "arm", false),
                Platform::new("darwin", "arm64", false),
                Platform::new("linux", "arm64", false),
                Platform::new("linux", "ppc64", false),
                Platform::new("linux", "ppc64le", false),
            ],
            &[],
        )?;

        chain.derive(
            "1.6",
            "1.5",
            &[
                Platform::new("android", "386", false),
                Platform::new("android", "amd64", false),
                Platform::new("linux", "mips64", false),
                Platform::new("linux", "mips64le", false),
                Platform::new("nacl", "386", false),
                Platform::new("openbsd", "arm", true),
            ],
            &[],
        )?;

        // Derived from 1.5, not 1.6: the 1.6 additions come back with
        // mips64/mips64le promoted to defaults.
        chain.derive(
            "1.7",
            "1.5",
            &[
                // Not fully supported, but generally useful.
                Platform::new("linux", "s390x", true),
                Platform::new("plan9", "arm", false),
                Platform::new("android", "386", false),
                Platform::new("android", "amd64", false),
                Platform::new("linux", "mips64", true),
                Platform::new("linux", "mips64le", true),
                Platform::new("nacl", "386", false),
                Platform::new("openbsd", "arm", true),
            ],
            &[],
        )?;

        chain.derive(
            "1.8",
            "1.7",
            &[
                Platform::new("linux", "mips", true),
                Platform::new("linux", "mipsle", true),
            ],
            &[],
        )?;

        chain.alias("1.9", "1.8")?;

        // Dropped without announcement.
        chain.derive("1.10", "1.9", &[], &[Platform::new("android", "amd64", false)])?;

        chain.derive("1.11", "1.10", &[Platform::new("js", "wasm", true)], &[])?;

        chain.derive(
            "1.12",
            "1.11",
            &[
                Platform::new("aix", "ppc64", false),
                Platform::new("windows", "arm", true),
            ],
            &[],
        )?;

        chain.derive(
            "1.13",
            "1.12",
            &[
                Platform::new("illumos", "amd64", false),
                Platform::new("netbsd", "arm64", true),
                Platform::new("openbsd", "arm64", true),
            ],
            &[],
        )?;

        chain.derive(
            "1.14",
            "1.13",
            &[
                Platform::new("freebsd", "arm64", true),
                Platform::new("linux", "riscv64", true),
            ],
            &[
                Platform::new("nacl", "386", false),
                Platform::new("nacl", "amd64", false),
                Platform::new("nacl", "arm", false),
            ],
        )?;

        chain.derive(
            "1.15",
            "1.14",
            &[Platform::new("android", "arm64", false)],
            &[Platform::new("darwin", "386", false)],
        )?;

        chain.derive(
            "1.16",
            "1.15",
            &[
                Platform::new("android", "amd64", false),
                Platform::new("darwin", "arm64", true),
                Platform::new("openbsd", "mips64", false),
            ],
            &[],
        )?;

        chain.derive("1.17", "1.16", &[Platform::new("windows", "arm64", true)], &[])?;

        chain.alias("1.18", "1.17")?;

        Self::assemble(chain.snapshots, RESOLUTION_TABLE, LATEST_RELEASE)
    }

    /// Pair built snapshots with a resolution table.
    fn assemble(
        snapshots: Vec<Snapshot>,
        table: &[(&'static str, &'static str)],
        latest: &str,
    ) -> Result<Self> {
        let index_of = |release: &str| {
            snapshots
                .iter()
                .position(|s| s.release == release)
                .ok_or_else(|| PlatformError::UnknownRelease {
                    release: release.to_string(),
                })
        };

        let table = table
            .iter()
            .map(|&(constraint, release)| {
                let req = VersionReq::parse(constraint).map_err(|source| {
                    PlatformError::InvalidConstraint {
                        release: release.to_string(),
                        constraint: constraint.to_string(),
                        source,
                    }
                })?;
                Ok(TableEntry {
                    constraint,
                    req,
                    snapshot: index_of(release)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let latest = index_of(latest)?;

        Ok(Self {
            snapshots,
            table,
            latest,
        })
    }

    /// All snapshots in release order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Look up a snapshot by release name.
    pub fn snapshot(&self, release: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.release == release)
    }

    /// The newest snapshot, used whenever a version cannot be placed.
    pub fn latest(&self) -> &Snapshot {
        &self.snapshots[self.latest]
    }

    /// The resolution table in check order.
    pub fn table(&self) -> &[TableEntry] {
        &self.table
    }

    /// The snapshot a table entry points at.
    pub fn entry_snapshot(&self, entry: &TableEntry) -> &Snapshot {
        &self.snapshots[entry.snapshot]
    }
}

/// Accumulates snapshots in declaration order.
#[derive(Default)]
struct Chain {
    snapshots: Vec<Snapshot>,
}

impl Chain {
    fn base(&mut self, release: &'static str, platforms: Vec<Platform>) -> Result<()> {
        self.push(release, platforms.into())
    }

    fn derive(
        &mut self,
        release: &'static str,
        from: &str,
        add: &[Platform],
        drop: &[Platform],
    ) -> Result<()> {
        let base = self.get(from)?;
        let platforms = add_drop(release, &base, add, drop)?;
        self.push(release, platforms.into())
    }

    fn alias(&mut self, release: &'static str, of: &str) -> Result<()> {
        let platforms = self.get(of)?;
        self.push(release, platforms)
    }

    fn get(&self, release: &str) -> Result<Arc<[Platform]>> {
        self.snapshots
            .iter()
            .find(|s| s.release == release)
            .map(|s| Arc::clone(&s.platforms))
            .ok_or_else(|| PlatformError::UnknownRelease {
                release: release.to_string(),
            })
    }

    fn push(&mut self, release: &'static str, platforms: Arc<[Platform]>) -> Result<()> {
        if platforms.is_empty() {
            return Err(PlatformError::EmptySnapshot {
                release: release.to_string(),
            });
        }
        self.snapshots.push(Snapshot { release, platforms });
        Ok(())
    }
}

static HISTORY: OnceLock<History> = OnceLock::new();

/// The process-wide history.
///
/// The first call builds it; binaries call this once at startup so a broken
/// table stops the process before any query runs. Later calls return the
/// same value.
///
/// # Panics
///
/// Panics if the built-in release data is inconsistent.
pub fn history() -> &'static History {
    HISTORY.get_or_init(|| {
        History::build()
            .unwrap_or_else(|e| panic!("built-in platform history is inconsistent: {e}"))
    })
}

/// Only the platforms flagged as default build targets.
pub fn defaults(platforms: &[Platform]) -> Vec<Platform> {
    platforms.iter().filter(|p| p.default).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(platforms: &[Platform]) -> Vec<String> {
        platforms.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn builds_without_error() {
        let history = History::build().unwrap();
        assert_eq!(history.snapshots().len(), 18);
        assert_eq!(history.table().len(), RESOLUTION_TABLE.len());
        assert_eq!(history.latest().release, LATEST_RELEASE);
    }

    #[test]
    fn every_snapshot_non_empty() {
        let history = History::build().unwrap();
        for snapshot in history.snapshots() {
            assert!(!snapshot.platforms.is_empty(), "{} is empty", snapshot.release);
        }
    }

    #[test]
    fn base_release_contents() {
        let history = History::build().unwrap();
        let base = history.snapshot("1.0").unwrap();
        assert_eq!(base.platforms.len(), 14);
        assert!(base.platforms.iter().all(|p| p.default));
        assert!(names(&base.platforms).contains(&"linux/armv5".to_string()));
    }

    #[test]
    fn aliases_share_storage() {
        let history = History::build().unwrap();
        let a = &history.snapshot("1.8").unwrap().platforms;
        let b = &history.snapshot("1.9").unwrap().platforms;
        assert!(Arc::ptr_eq(a, b));

        let c = &history.snapshot("1.17").unwrap().platforms;
        let d = &history.snapshot("1.18").unwrap().platforms;
        assert!(Arc::ptr_eq(c, d));
    }

    #[test]
    fn release_1_7_promotes_mips64() {
        let history = History::build().unwrap();
        let v16 = history.snapshot("1.6").unwrap();
        let v17 = history.snapshot("1.7").unwrap();
        let mips64 = |s: &Snapshot| {
            s.platforms
                .iter()
                .find(|p| p.os == "linux" && p.arch == "mips64")
                .map(|p| p.default)
        };
        assert_eq!(mips64(v16), Some(false));
        assert_eq!(mips64(v17), Some(true));
        assert!(v17.platforms.iter().any(|p| p.arch == "s390x"));
    }

    #[test]
    fn retired_targets_are_gone() {
        let history = History::build().unwrap();

        let v110 = names(&history.snapshot("1.10").unwrap().platforms);
        assert!(!v110.contains(&"android/amd64".to_string()));

        let v114 = &history.snapshot("1.14").unwrap().platforms;
        assert!(v114.iter().all(|p| p.os != "nacl"));

        let v115 = names(&history.snapshot("1.15").unwrap().platforms);
        assert!(!v115.contains(&"darwin/386".to_string()));
        assert!(v115.contains(&"darwin/amd64".to_string()));

        let v116 = names(&history.snapshot("1.16").unwrap().platforms);
        assert!(v116.contains(&"android/amd64".to_string()));
    }

    #[test]
    fn derived_lists_keep_base_order() {
        let history = History::build().unwrap();
        let v10 = names(&history.snapshot("1.0").unwrap().platforms);
        let v11 = names(&history.snapshot("1.1").unwrap().platforms);
        assert_eq!(&v11[..v10.len()], &v10[..]);
        assert_eq!(v11[v10.len()], "freebsd/arm");
    }

    #[test]
    fn table_ranges_are_contiguous() {
        let history = History::build().unwrap();
        for minor in 0..=18u64 {
            let v = semver::Version::new(1, minor, 0);
            let hits = history.table().iter().filter(|e| e.req.matches(&v)).count();
            // 1.2 never shipped a target change but still falls in the 1.1 range.
            assert_eq!(hits, 1, "go1.{minor} matched {hits} entries");
        }
    }

    #[test]
    fn malformed_constraint_is_rejected() {
        let chain = vec![Snapshot {
            release: "1.0",
            platforms: vec![Platform::new("linux", "amd64", true)].into(),
        }];
        let err = History::assemble(chain, &[(">= one", "1.0")], "1.0").unwrap_err();
        assert!(matches!(err, PlatformError::InvalidConstraint { .. }));
    }

    #[test]
    fn table_referencing_unknown_release_is_rejected() {
        let chain = vec![Snapshot {
            release: "1.0",
            platforms: vec![Platform::new("linux", "amd64", true)].into(),
        }];
        let err = History::assemble(chain, &[("<=1.0", "1.1")], "1.0").unwrap_err();
        assert!(matches!(err, PlatformError::UnknownRelease { .. }));
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let mut chain = Chain::default();
        chain
            .base("1.0", vec![Platform::new("linux", "amd64", true)])
            .unwrap();
        let err = chain
            .derive("1.1", "1.0", &[], &[Platform::new("linux", "amd64", true)])
            .unwrap_err();
        assert!(matches!(err, PlatformError::EmptySnapshot { .. }));
    }

    #[test]
    fn derive_from_unknown_release_fails() {
        let mut chain = Chain::default();
        assert!(chain.derive("1.1", "1.0", &[], &[]).is_err());
        assert!(chain.alias("1.1", "1.0").is_err());
    }

    #[test]
    fn defaults_filter() {
        let history = History::build().unwrap();
        let latest = &history.latest().platforms;
        let defaults = defaults(latest);
        assert!(defaults.len() < latest.len());
        assert!(defaults.iter().all(|p| p.default));
        assert!(!names(&defaults).contains(&"android/arm".to_string()));
        assert!(names(&defaults).contains(&"darwin/arm64".to_string()));
    }

    #[test]
    fn global_history_is_shared() {
        let a = history();
        let b = history();
        assert!(std::ptr::eq(a, b));
    }
}
