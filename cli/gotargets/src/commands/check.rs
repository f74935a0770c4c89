//! `gotargets check` — is one platform buildable with a Go version?

use anyhow::{bail, Context, Result};

use gotargets_platforms::{supported_platforms, History, Platform};

/// Whether `target` is in `platforms`.
///
/// A requested ARM version must match unless the listed entry carries none,
/// in which case any GOARM is accepted.
pub fn supports(platforms: &[Platform], target: &Platform) -> bool {
    platforms.iter().any(|p| {
        p.same_target(target)
            && match (&target.arm, &p.arm) {
                (Some(wanted), Some(listed)) => wanted == listed,
                _ => true,
            }
    })
}

/// Releases whose list contains `target`, oldest first.
pub fn releases_supporting<'h>(history: &'h History, target: &Platform) -> Vec<&'h str> {
    history
        .snapshots()
        .iter()
        .filter(|s| supports(&s.platforms, target))
        .map(|s| s.release)
        .collect()
}

/// Report whether `target` ("os/arch") is supported by `version`.
pub fn run(target: &str, version: &str) -> Result<()> {
    let platform: Platform = target
        .parse()
        .with_context(|| format!("cannot check '{target}'"))?;

    if supports(&supported_platforms(version), &platform) {
        println!("{platform}: supported");
        return Ok(());
    }

    let history = gotargets_platforms::history();
    match releases_supporting(history, &platform).as_slice() {
        [] => bail!("{platform} is not supported by any known Go release"),
        [first, .., last] => {
            bail!("{platform} is not supported by '{version}' (known in go{first} through go{last})")
        }
        [only] => bail!("{platform} is not supported by '{version}' (known in go{only})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_version_must_match_when_listed() {
        let platforms = [Platform::arm("linux", "6", true), Platform::new("freebsd", "arm", true)];
        assert!(supports(&platforms, &Platform::from_parts("linux", "armv6")));
        assert!(!supports(&platforms, &Platform::from_parts("linux", "armv9")));
        assert!(supports(&platforms, &Platform::from_parts("linux", "arm")));
        assert!(supports(&platforms, &Platform::from_parts("freebsd", "armv7")));
    }

    #[test]
    fn nacl_spans_1_3_to_1_13() {
        let history = History::build().unwrap();
        let releases = releases_supporting(&history, &Platform::new("nacl", "amd64p32", false));
        assert_eq!(releases.first(), Some(&"1.3"));
        assert_eq!(releases.last(), Some(&"1.13"));
    }

    #[test]
    fn supported_target_passes() {
        run("linux/amd64", "go1.10").unwrap();
        run("js/wasm", "go1.11").unwrap();
    }

    #[test]
    fn unsupported_target_fails() {
        assert!(run("js/wasm", "go1.10").is_err());
        assert!(run("darwin/386", "go1.16").is_err());
        assert!(run("haiku/amd64", "go1.17").is_err());
        assert!(run("not-a-platform", "go1.17").is_err());
    }
}
