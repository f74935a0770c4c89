//! gotargets CLI — which platforms can a Go toolchain release build for?

mod commands;
mod toolchain;

use std::process;

use clap::{Parser, Subcommand};

use commands::list::Filter;

#[derive(Parser)]
#[command(name = "gotargets", version, about = "Go cross-compilation target lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the platforms a Go version can build for
    List {
        /// Go version, e.g. go1.17 (default: output of `go version`)
        #[arg(long, env = "GOTARGETS_GO_VERSION")]
        go_version: Option<String>,
        /// Only platforms built by default
        #[arg(long)]
        defaults: bool,
        /// Restrict to an operating system (repeatable)
        #[arg(long)]
        os: Vec<String>,
        /// Restrict to an architecture, e.g. amd64 or armv7 (repeatable)
        #[arg(long)]
        arch: Vec<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the version ranges and their platform counts
    Releases,
    /// Check whether an os/arch pair is supported
    Check {
        /// Platform, e.g. linux/armv7
        platform: String,
        /// Go version, e.g. go1.17 (default: output of `go version`)
        #[arg(long, env = "GOTARGETS_GO_VERSION")]
        go_version: Option<String>,
    },
}

fn main() {
    env_logger::init();
    gotargets_platforms::history();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List {
            go_version,
            defaults,
            os,
            arch,
            format,
        } => {
            let version = toolchain::go_version(go_version.as_deref());
            let filter = Filter {
                defaults_only: defaults,
                os,
                arch,
            };
            commands::list::run(&version, &filter, format.as_deref())
        }

        Commands::Releases => commands::releases::run(),

        Commands::Check {
            platform,
            go_version,
        } => {
            let version = toolchain::go_version(go_version.as_deref());
            commands::check::run(&platform, &version)
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn parses_list_flags() {
        let cli = Cli::try_parse_from([
            "gotargets",
            "list",
            "--go-version",
            "go1.16",
            "--defaults",
            "--os",
            "linux",
            "--os",
            "darwin",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                go_version,
                defaults,
                os,
                arch,
                format,
            } => {
                assert_eq!(go_version.as_deref(), Some("go1.16"));
                assert!(defaults);
                assert_eq!(os, ["linux", "darwin"]);
                assert!(arch.is_empty());
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn check_requires_platform() {
        assert!(Cli::try_parse_from(["gotargets", "check"]).is_err());
    }

    #[test]
    fn run_releases_and_check() {
        let releases = Cli::try_parse_from(["gotargets", "releases"]).unwrap();
        run(releases).unwrap();

        let check =
            Cli::try_parse_from(["gotargets", "check", "windows/arm64", "--go-version", "go1.17"])
                .unwrap();
        run(check).unwrap();
    }
}
