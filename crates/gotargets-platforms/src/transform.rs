//! Deriving one release's platform list from the previous one.

use crate::error::{PlatformError, Result};
use crate::platform::Platform;

/// Append `add` to `base`, then drop each entry of `drop`.
///
/// Additions are not deduplicated. A drop removes the first entry with the
/// same OS/arch pair, ignoring the ARM version and the default flag, so a drop
/// of `linux/arm` removes only one of several ARM variants. A drop with no
/// match means the release table is wrong and is reported as
/// [`PlatformError::MissingDrop`].
pub fn add_drop(
    release: &str,
    base: &[Platform],
    add: &[Platform],
    drop: &[Platform],
) -> Result<Vec<Platform>> {
    let mut platforms = Vec::with_capacity(base.len() + add.len());
    platforms.extend_from_slice(base);
    platforms.extend_from_slice(add);

    // Linear scan per drop; this only runs while building the history.
    for platform in drop {
        let Some(found) = platforms.iter().position(|p| p.same_target(platform)) else {
            return Err(PlatformError::MissingDrop {
                release: release.to_string(),
                platform: platform.to_string(),
                current: render(&platforms),
            });
        };
        platforms.remove(found);
    }

    Ok(platforms)
}

fn render(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
