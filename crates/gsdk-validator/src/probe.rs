use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::GoSdkConfig;

pub(crate) trait SdkProbe {
    fn detect(&self, home: &Path) -> Option<GoSdkConfig>;
}

// Detects a Go SDK from its install layout: the go tool under bin/, the
// standard library under src/, the release name in VERSION and the target
// platform from the pkg/tool/<os>_<arch> directory.
pub(crate) struct HostProbe;

impl SdkProbe for HostProbe {
    fn detect(&self, home: &Path) -> Option<GoSdkConfig> {
        let go_binary = match go_binary_path(home) {
            Some(path) => path,
            None => {
                debug!("No go binary under {}", home.display());
                return None;
            }
        };
        if !home.join("src").is_dir() {
            debug!("No src directory under {}", home.display());
            return None;
        }
        let version = match read_sdk_version(home) {
            Some(version) => version,
            None => {
                debug!("No usable VERSION file under {}", home.display());
                return None;
            }
        };
        let (target_os, target_arch) = tool_target(home).or_else(host_target)?;

        Some(GoSdkConfig {
            version,
            target_os,
            target_arch,
            go_binary: go_binary.to_string_lossy().into_owned(),
        })
    }
}

fn go_binary_path(home: &Path) -> Option<PathBuf> {
    let go = home.join("bin").join("go");
    if go.exists() {
        return Some(go);
    }
    let go_exe = home.join("bin").join("go.exe");
    if go_exe.exists() {
        return Some(go_exe);
    }
    None
}

// VERSION holds the release name on its first line, e.g. "go1.2.1".
fn read_sdk_version(home: &Path) -> Option<String> {
    let raw = fs::read_to_string(home.join("VERSION")).ok()?;
    let first = raw.lines().next()?.trim();
    let version = first.strip_prefix("go").unwrap_or(first);
    if version.is_empty() {
        return None;
    }
    Some(version.to_string())
}

fn tool_target(home: &Path) -> Option<(String, String)> {
    let entries = fs::read_dir(home.join("pkg").join("tool")).ok()?;
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some((os, arch)) = name.split_once('_') {
            if !os.is_empty() && !arch.is_empty() {
                return Some((os.to_string(), arch.to_string()));
            }
        }
    }
    None
}

fn host_target() -> Option<(String, String)> {
    let os = match std::env::consts::OS {
        "linux" => "linux",
        "macos" => "darwin",
        "windows" => "windows",
        "freebsd" => "freebsd",
        "openbsd" => "openbsd",
        _ => return None,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "arm" => "arm",
        "riscv64" => "riscv64",
        _ => return None,
    };
    Some((os.to_string(), arch.to_string()))
}
