use crate::registry::JdkInstallation;
use crate::version::JavaVersion;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Not a JDK: no java executable under '{0}'")]
    NotAJdk(PathBuf),
    #[error("Failed to run '{command} -version': {source}")]
    ExecFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse a version from the output of '{command} -version': {detail}")]
    VersionParse { command: String, detail: String },
    #[error("Unable to locate the current JVM: {0}")]
    CurrentJvmNotFound(String),
}

/// Capability that validates candidate JDK homes and describes the JVM the
/// build itself runs on. Production code uses [`CommandProbe`]; tests swap in
/// an in-memory implementation.
pub trait JdkProbe {
    /// Validate that `home` is a JDK installation and return a fully
    /// populated record for it. Failure means the candidate is excluded,
    /// nothing more.
    fn check_jdk(&self, home: &Path) -> Result<JdkInstallation, ProbeError>;

    /// Describe the JVM the build process runs on. The registry treats a
    /// failure here as fatal: a build cannot proceed without knowing its own
    /// JVM.
    fn describe_current(&self) -> Result<JdkInstallation, ProbeError>;
}

/// Probe that shells out to `java -version` and parses the banner.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl JdkProbe for CommandProbe {
    fn check_jdk(&self, home: &Path) -> Result<JdkInstallation, ProbeError> {
        let java = java_from_home(home).ok_or_else(|| ProbeError::NotAJdk(home.to_path_buf()))?;
        let banner = run_version_command(&java)?;
        let token = extract_version_token(&banner).ok_or_else(|| ProbeError::VersionParse {
            command: java.display().to_string(),
            detail: "no quoted version token in output".to_string(),
        })?;
        let version = JavaVersion::from_token(token).ok_or_else(|| ProbeError::VersionParse {
            command: java.display().to_string(),
            detail: format!("unrecognized version token '{token}'"),
        })?;

        debug!(home = %home.display(), %version, "probed JDK");
        Ok(JdkInstallation::new(
            format!("jdk{version}"),
            display_name_from_banner(&banner, version),
            version,
            home.to_path_buf(),
        ))
    }

    fn describe_current(&self) -> Result<JdkInstallation, ProbeError> {
        let home = current_jvm_home()?;
        self.check_jdk(&home)
    }
}

/// Home directory of the JVM the build would run on, resolved from the
/// runtime environment: `JAVA_HOME` when it points at a usable installation,
/// otherwise derived from the `java` executable on `PATH`.
pub fn current_jvm_home() -> Result<PathBuf, ProbeError> {
    for var in ["JAVA_HOME", "JDK_HOME"] {
        if let Some(value) = env::var_os(var) {
            let home = PathBuf::from(value);
            if java_from_home(&home).is_some() {
                return Ok(home);
            }
        }
    }

    if let Ok(java) = which::which(java_executable()) {
        if let Some(home) = home_from_java(&java) {
            return Ok(home);
        }
    }

    Err(ProbeError::CurrentJvmNotFound(
        "JAVA_HOME is not set and no java executable was found on PATH".to_string(),
    ))
}

/// Locate the `java` executable for a candidate home. Accepts the home
/// directory itself, its `bin` directory, or a direct path to the executable.
pub(crate) fn java_from_home(home: &Path) -> Option<PathBuf> {
    let exe_name = java_executable();

    let candidate = home.join("bin").join(exe_name);
    if candidate.exists() {
        return Some(candidate);
    }

    if home.ends_with("bin") {
        let candidate = home.join(exe_name);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if home.file_name() == Some(std::ffi::OsStr::new(exe_name)) && home.is_file() {
        return Some(home.to_path_buf());
    }

    None
}

fn home_from_java(java: &Path) -> Option<PathBuf> {
    let bin_dir = java.parent()?;
    let home = bin_dir.parent()?;
    Some(home.to_path_buf())
}

fn run_version_command(java: &Path) -> Result<String, ProbeError> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .map_err(|error| ProbeError::ExecFailed {
            command: java.display().to_string(),
            source: error,
        })?;

    // The banner goes to stderr on every JDK in practice; fall back to
    // stdout for the odd wrapper script that redirects it.
    let mut banner = String::from_utf8_lossy(&output.stderr).to_string();
    if banner.trim().is_empty() {
        banner = String::from_utf8_lossy(&output.stdout).to_string();
    }
    Ok(banner)
}

/// Pull the quoted version token out of a `-version` banner, e.g. `21.0.2`
/// from `openjdk version "21.0.2" 2024-01-16`.
pub(crate) fn extract_version_token(output: &str) -> Option<&str> {
    for line in output.lines() {
        if let Some(start) = line.find('"') {
            let rest = &line[start + 1..];
            if let Some(end) = rest.find('"') {
                return Some(&rest[..end]);
            }
        }
    }
    None
}

/// Derive a human-readable label from the banner's first line, e.g.
/// `openjdk version "21.0.2"` becomes `OpenJDK 21`.
fn display_name_from_banner(banner: &str, version: JavaVersion) -> String {
    let vendor = banner
        .lines()
        .next()
        .and_then(|line| line.split(" version").next())
        .map(str::trim)
        .filter(|vendor| !vendor.is_empty());

    match vendor {
        Some(vendor) if vendor.eq_ignore_ascii_case("openjdk") => format!("OpenJDK {version}"),
        Some(vendor) if vendor.eq_ignore_ascii_case("java") => format!("Java {version}"),
        Some(vendor) => format!("{vendor} {version}"),
        None => format!("Java {version}"),
    }
}

pub(crate) fn java_executable() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}
