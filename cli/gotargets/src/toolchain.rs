//! Finding out which Go version to resolve against.

use std::process::Command;

/// Pick the Go version: an explicit value wins, then the local `go` binary.
///
/// Returns an empty string when nothing is available, which resolves to the
/// latest release.
pub fn go_version(explicit: Option<&str>) -> String {
    if let Some(version) = explicit {
        return version.to_string();
    }

    match Command::new("go").arg("version").output() {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            match parse_go_version_output(&stdout) {
                Some(version) => {
                    log::debug!("detected {version} from `go version`");
                    version
                }
                None => {
                    log::warn!("unexpected `go version` output: {}", stdout.trim());
                    String::new()
                }
            }
        }
        Ok(output) => {
            log::warn!("`go version` exited with {}", output.status);
            String::new()
        }
        Err(e) => {
            log::warn!("could not run `go version` ({e}); assuming the latest release");
            String::new()
        }
    }
}

/// Extract the version token from `go version` output, e.g.
/// `go version go1.17.3 linux/amd64` → `go1.17.3`.
pub fn parse_go_version_output(output: &str) -> Option<String> {
    let mut words = output.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("go"), Some("version"), Some(version)) => Some(version.to_string()),
        _ => None,
    }
}
