//! Release packaging for the hints plugin.
//!
//! Stages per-platform plugin binaries into the bundle layout the host
//! expects (`<name>/{lin_x64,mac_x64,win_x64}/<Name>.xpl`), optionally
//! merging the two macOS architectures into a universal binary with `lipo`,
//! and zips the result into a versioned release archive.

use anyhow::{bail, Context as _};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Parser)]
struct Opts {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Parser)]
enum Cmd {
    /// Stage the per-platform bundle layout
    Stage(StageOpts),
    /// Zip a staged bundle into a release archive
    Archive(ArchiveOpts),
    /// Stage and archive in one step
    Release(ReleaseOpts),
}

#[derive(Debug, Parser)]
struct StageOpts {
    /// Bundle directory and plugin binary name
    #[clap(long, default_value = "FLChints")]
    name: String,

    /// Linux x86_64 plugin binary
    #[clap(long)]
    lin: PathBuf,

    /// Windows x86_64 plugin binary
    #[clap(long)]
    win: PathBuf,

    /// macOS plugin binary (already universal)
    #[clap(long)]
    mac: Option<PathBuf>,

    /// macOS arm64 binary, merged with --mac-x86 via lipo
    #[clap(long, conflicts_with = "mac", requires = "mac_x86")]
    mac_arm: Option<PathBuf>,

    /// macOS x86_64 binary, merged with --mac-arm via lipo
    #[clap(long, conflicts_with = "mac", requires = "mac_arm")]
    mac_x86: Option<PathBuf>,

    /// License file to include in the bundle
    #[clap(long, default_value = "LICENSE")]
    license: PathBuf,

    /// Readme file to include in the bundle
    #[clap(long, default_value = "README.md")]
    readme: PathBuf,

    /// Output directory the bundle is staged under
    #[clap(long, default_value = "dist")]
    out: PathBuf,
}

#[derive(Debug, Parser)]
struct ArchiveOpts {
    /// Staged bundle directory (e.g. dist/FLChints)
    #[clap(long)]
    bundle: PathBuf,

    /// Manifest file the version is read from
    #[clap(long, default_value = "Cargo.toml")]
    manifest: PathBuf,
}

#[derive(Debug, Parser)]
struct ReleaseOpts {
    #[clap(flatten)]
    stage: StageOpts,

    /// Manifest file the version is read from
    #[clap(long, default_value = "Cargo.toml")]
    manifest: PathBuf,
}

/// Per-platform subdirectories of the bundle, one binary each.
const PLATFORM_DIRS: &[&str] = &["lin_x64", "mac_x64", "win_x64"];

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    match opts.cmd {
        Cmd::Stage(opts) => {
            stage(&opts)?;
            Ok(())
        }
        Cmd::Archive(opts) => {
            archive(&opts.bundle, &opts.manifest)?;
            Ok(())
        }
        Cmd::Release(opts) => {
            let bundle = stage(&opts.stage)?;
            archive(&bundle, &opts.manifest)?;
            Ok(())
        }
    }
}

/// Stage the bundle layout and return the bundle directory.
fn stage(opts: &StageOpts) -> anyhow::Result<PathBuf> {
    let bundle = opts.out.join(&opts.name);
    if bundle.exists() {
        std::fs::remove_dir_all(&bundle)
            .with_context(|| format!("failed to clear staging directory {}", bundle.display()))?;
    }
    for dir in PLATFORM_DIRS {
        std::fs::create_dir_all(bundle.join(dir))
            .with_context(|| format!("failed to create {dir}"))?;
    }

    let binary_name = format!("{}.xpl", opts.name);

    copy_binary(&opts.lin, &bundle.join("lin_x64").join(&binary_name), "Linux")?;
    copy_binary(&opts.win, &bundle.join("win_x64").join(&binary_name), "Windows")?;

    let mac_target = bundle.join("mac_x64").join(&binary_name);
    match (&opts.mac, &opts.mac_arm, &opts.mac_x86) {
        (Some(mac), _, _) => copy_binary(mac, &mac_target, "macOS")?,
        (None, Some(arm), Some(x86)) => lipo_merge(arm, x86, &mac_target)?,
        _ => bail!("no macOS binary provided (--mac, or --mac-arm with --mac-x86)"),
    }

    copy_doc(&opts.license, &bundle, "license")?;
    copy_doc(&opts.readme, &bundle, "readme")?;

    println!("Staged bundle at {}", bundle.display());
    Ok(bundle)
}

fn copy_binary(from: &Path, to: &Path, platform: &str) -> anyhow::Result<()> {
    std::fs::copy(from, to)
        .with_context(|| format!("missing {platform} binary at {}", from.display()))?;
    println!("  {platform}: {} -> {}", from.display(), to.display());
    Ok(())
}

fn copy_doc(from: &Path, bundle: &Path, what: &str) -> anyhow::Result<()> {
    let file_name = from
        .file_name()
        .with_context(|| format!("{what} path {} has no file name", from.display()))?;
    std::fs::copy(from, bundle.join(file_name))
        .with_context(|| format!("missing {what} file at {}", from.display()))?;
    Ok(())
}

/// Merge two macOS architectures into a universal binary.
fn lipo_merge(arm: &Path, x86: &Path, output: &Path) -> anyhow::Result<()> {
    let status = Command::new("lipo")
        .arg("-create")
        .arg("-output")
        .arg(output)
        .arg(arm)
        .arg(x86)
        .status()
        .context("failed to run lipo (are the Xcode command line tools installed?)")?;
    if !status.success() {
        bail!("lipo exited with {status}");
    }
    println!("  macOS universal: {} + {}", arm.display(), x86.display());
    Ok(())
}

/// Zip a staged bundle into `<name>-<version>.zip` next to it.
fn archive(bundle: &Path, manifest: &Path) -> anyhow::Result<PathBuf> {
    let name = bundle
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("bundle path {} has no directory name", bundle.display()))?;

    let contents = std::fs::read_to_string(manifest)
        .with_context(|| format!("failed to read manifest {}", manifest.display()))?;
    let version = extract_version(&contents)
        .with_context(|| format!("no version in manifest {}", manifest.display()))?;

    let archive_name = archive_file_name(name, &version);
    let archive_path = bundle
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&archive_name);
    if archive_path.exists() {
        std::fs::remove_file(&archive_path)
            .with_context(|| format!("failed to remove stale {}", archive_path.display()))?;
    }

    // The archive holds the platform directories plus license and readme at
    // its root, so zip runs from inside the bundle.
    let mut entries: Vec<String> = std::fs::read_dir(bundle)
        .with_context(|| format!("failed to read bundle {}", bundle.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();

    let status = Command::new("zip")
        .current_dir(bundle)
        .arg("-r")
        .arg(Path::new("..").join(&archive_name))
        .args(&entries)
        .status()
        .context("failed to run zip")?;
    if !status.success() {
        bail!("zip exited with {status}");
    }

    println!("Created {}", archive_path.display());
    Ok(archive_path)
}

/// Extract the version from the first `version` line of a manifest,
/// stripping `=`, quotes, and spaces.
fn extract_version(manifest: &str) -> anyhow::Result<String> {
    let line = manifest
        .lines()
        .find(|line| line.starts_with("version"))
        .context("no line starting with 'version'")?;
    let version: String = line
        .strip_prefix("version")
        .unwrap_or(line)
        .chars()
        .filter(|c| !matches!(c, '=' | '"' | '\'' | ' ' | '\t' | '\r'))
        .collect();
    if version.is_empty() {
        bail!("version line '{line}' is empty after stripping");
    }
    Ok(version)
}

fn archive_file_name(name: &str, version: &str) -> String {
    format!("{name}-{version}.zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_double_quotes() {
        let manifest = "[package]\nname = \"hints\"\nversion = \"1.2.3\"\n";
        assert_eq!(extract_version(manifest).unwrap(), "1.2.3");
    }

    #[test]
    fn test_extract_version_single_quotes() {
        let manifest = "version = '0.9.0'\n";
        assert_eq!(extract_version(manifest).unwrap(), "0.9.0");
    }

    #[test]
    fn test_extract_version_no_spaces() {
        let manifest = "version=\"2.0\"\n";
        assert_eq!(extract_version(manifest).unwrap(), "2.0");
    }

    #[test]
    fn test_extract_version_first_match_wins() {
        let manifest = "version = \"1.0.0\"\nversion = \"9.9.9\"\n";
        assert_eq!(extract_version(manifest).unwrap(), "1.0.0");
    }

    #[test]
    fn test_extract_version_ignores_rust_version() {
        // rust-version does not start the line with 'version'
        let manifest = "rust-version = \"1.75\"\nversion = \"0.5.0\"\n";
        assert_eq!(extract_version(manifest).unwrap(), "0.5.0");
    }

    #[test]
    fn test_extract_version_missing() {
        let manifest = "[package]\nname = \"hints\"\n";
        assert!(extract_version(manifest).is_err());
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("FLChints", "0.5.0"), "FLChints-0.5.0.zip");
    }

    fn stage_opts(dir: &Path) -> StageOpts {
        std::fs::write(dir.join("lin.so"), b"lin").unwrap();
        std::fs::write(dir.join("win.dll"), b"win").unwrap();
        std::fs::write(dir.join("mac.dylib"), b"mac").unwrap();
        std::fs::write(dir.join("LICENSE"), b"license").unwrap();
        std::fs::write(dir.join("README.md"), b"readme").unwrap();
        StageOpts {
            name: "FLChints".to_string(),
            lin: dir.join("lin.so"),
            win: dir.join("win.dll"),
            mac: Some(dir.join("mac.dylib")),
            mac_arm: None,
            mac_x86: None,
            license: dir.join("LICENSE"),
            readme: dir.join("README.md"),
            out: dir.join("dist"),
        }
    }

    #[test]
    fn test_stage_layout() {
        let dir = tempfile::tempdir().unwrap();
        let opts = stage_opts(dir.path());

        let bundle = stage(&opts).unwrap();
        assert_eq!(bundle, dir.path().join("dist").join("FLChints"));

        for platform in PLATFORM_DIRS {
            let binary = bundle.join(platform).join("FLChints.xpl");
            assert!(binary.is_file(), "missing {}", binary.display());
        }
        assert!(bundle.join("LICENSE").is_file());
        assert!(bundle.join("README.md").is_file());
    }

    #[test]
    fn test_stage_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let opts = stage_opts(dir.path());

        let bundle = stage(&opts).unwrap();
        // A stale file from a previous run disappears on restage
        std::fs::write(bundle.join("stale.txt"), b"old").unwrap();
        let bundle = stage(&opts).unwrap();
        assert!(!bundle.join("stale.txt").exists());
    }

    #[test]
    fn test_stage_missing_binary_names_platform() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = stage_opts(dir.path());
        opts.win = dir.path().join("nonexistent.dll");

        let err = stage(&opts).unwrap_err();
        assert!(err.to_string().contains("Windows"));
    }

    #[test]
    fn test_stage_requires_a_mac_binary() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = stage_opts(dir.path());
        opts.mac = None;

        let err = stage(&opts).unwrap_err();
        assert!(err.to_string().contains("macOS"));
    }

    #[test]
    fn test_stage_missing_license() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = stage_opts(dir.path());
        opts.license = dir.path().join("nonexistent-license");

        let err = stage(&opts).unwrap_err();
        assert!(err.to_string().contains("license"));
    }
}
