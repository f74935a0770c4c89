//! `gotargets list` — platforms supported by a Go version.

use anyhow::{bail, Result};

use gotargets_platforms::{supported_platforms, Platform, ARCH_LIST, OS_LIST};

/// Which platforms to keep from a release's list.
#[derive(Debug, Default, Clone)]
pub struct Filter {
    /// Keep only default build targets.
    pub defaults_only: bool,
    /// Keep only these operating systems (any, if empty).
    pub os: Vec<String>,
    /// Keep only these architectures, matched against the canonical arch
    /// string or the bare arch (any, if empty).
    pub arch: Vec<String>,
}

impl Filter {
    fn keeps(&self, platform: &Platform) -> bool {
        if self.defaults_only && !platform.default {
            return false;
        }
        if !self.os.is_empty() && !self.os.iter().any(|os| *os == platform.os) {
            return false;
        }
        if !self.arch.is_empty() {
            let canonical = platform.arch_string();
            if !self
                .arch
                .iter()
                .any(|arch| *arch == canonical || *arch == platform.arch)
            {
                return false;
            }
        }
        true
    }
}

/// Apply a filter, keeping the release's order.
pub fn select(platforms: &[Platform], filter: &Filter) -> Vec<Platform> {
    platforms.iter().filter(|p| filter.keeps(p)).cloned().collect()
}

/// Render platforms in the requested format ("text" or "json").
pub fn render(platforms: &[Platform], format: Option<&str>) -> Result<String> {
    match format.unwrap_or("text") {
        "text" => Ok(platforms
            .iter()
            .map(|p| format!("{p}\n"))
            .collect::<String>()),
        "json" => Ok(serde_json::to_string_pretty(platforms)? + "\n"),
        other => bail!("unknown format: '{other}' (expected text or json)"),
    }
}

/// Print the platforms supported by `version`.
pub fn run(version: &str, filter: &Filter, format: Option<&str>) -> Result<()> {
    for os in &filter.os {
        if !OS_LIST.contains(&os.as_str()) {
            log::info!("'{os}' is not in the classic GOOS list; it may only exist in newer releases");
        }
    }
    for arch in &filter.arch {
        let bare = Platform::from_parts("", arch).arch;
        if !ARCH_LIST.contains(&bare.as_str()) {
            log::info!("'{arch}' is not in the classic GOARCH list; it may only exist in newer releases");
        }
    }

    let platforms = supported_platforms(version);
    let selected = select(&platforms, filter);
    if selected.is_empty() {
        log::warn!("no platforms match the given filters for '{version}'");
    }
    print!("{}", render(&selected, format)?);
    Ok(())
}
