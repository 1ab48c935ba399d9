use crate::probe::java_from_home;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable listing candidate JDK homes, delimited with the
/// platform path separator (like `PATH`).
pub const CANDIDATE_HOMES_ENV: &str = "JDK_CANDIDATE_HOMES";

/// Explicit, ordered candidate configuration for [`crate::JdkRegistry`].
///
/// Hosts that keep JDK locations in their own config files deserialize this
/// directly; everything else goes through [`RegistryConfig::from_env`] or the
/// platform defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Candidate home directories, probed in order. Later entries win on
    /// duplicate versions.
    #[serde(default)]
    pub candidate_homes: Vec<PathBuf>,
}

impl RegistryConfig {
    pub fn new(candidate_homes: Vec<PathBuf>) -> Self {
        Self { candidate_homes }
    }

    /// Candidate homes from `JDK_CANDIDATE_HOMES`. Empty or unset yields an
    /// empty candidate list, not an error.
    pub fn from_env() -> Self {
        let candidate_homes = env::var_os(CANDIDATE_HOMES_ENV)
            .map(|raw| {
                env::split_paths(&raw)
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { candidate_homes }
    }

    /// Add installations found under the platform's conventional JDK roots.
    /// Defaults are placed ahead of explicitly configured homes, so with
    /// last-write-wins indexing an explicit home always beats a default of
    /// the same version.
    pub fn with_default_roots(self) -> Self {
        let mut candidate_homes = default_candidate_homes();
        candidate_homes.extend(self.candidate_homes);
        Self { candidate_homes }
    }
}

/// Scan the platform's conventional JDK roots for installation homes.
///
/// Each root may itself be a home or a directory of homes (one per vendor or
/// version, as `/usr/lib/jvm` is laid out). Only directories with a `java`
/// executable under `bin/` qualify.
pub fn default_candidate_homes() -> Vec<PathBuf> {
    let mut homes = Vec::new();
    for root in known_jdk_roots() {
        collect_homes_under_root(&root, &mut homes);
    }
    homes
}

fn collect_homes_under_root(root: &Path, homes: &mut Vec<PathBuf>) {
    if !root.is_dir() {
        return;
    }

    if java_from_home(root).is_some() {
        homes.push(root.to_path_buf());
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        // macOS bundles keep the real home under Contents/Home.
        #[cfg(target_os = "macos")]
        let candidate = {
            let contents_home = path.join("Contents").join("Home");
            if contents_home.exists() {
                contents_home
            } else {
                path
            }
        };

        #[cfg(not(target_os = "macos"))]
        let candidate = path;

        if java_from_home(&candidate).is_some() {
            homes.push(candidate);
        }
    }
}

fn known_jdk_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    #[cfg(target_os = "windows")]
    {
        let program_files = env::var_os("ProgramFiles").map(PathBuf::from);
        let program_files_x86 = env::var_os("ProgramFiles(x86)").map(PathBuf::from);
        let common_roots = [
            PathBuf::from(r"C:\Java"),
            PathBuf::from(r"C:\Program Files\Java"),
            PathBuf::from(r"C:\Program Files\AdoptOpenJDK"),
            PathBuf::from(r"C:\Program Files\Eclipse Adoptium"),
            PathBuf::from(r"C:\Program Files\Microsoft"),
        ];

        roots.extend(common_roots);
        if let Some(dir) = program_files {
            roots.push(dir.join("Java"));
            roots.push(dir.join("Zulu"));
        }
        if let Some(dir) = program_files_x86 {
            roots.push(dir.join("Java"));
            roots.push(dir.join("Zulu"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines"));
        roots.push(PathBuf::from("/System/Library/Java/JavaVirtualMachines"));
        roots.push(PathBuf::from("/usr/local/Cellar/openjdk"));
        roots.push(PathBuf::from("/opt/homebrew/Cellar/openjdk"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        roots.push(PathBuf::from("/usr/lib/jvm"));
        roots.push(PathBuf::from("/usr/java"));
        roots.push(PathBuf::from("/opt/java"));
        roots.push(PathBuf::from("/opt/jdk"));
    }

    roots
}
