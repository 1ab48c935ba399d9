//! Shared fixtures for tests that stand up fake JDK homes or touch the
//! process environment.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Serializes tests that read or write process environment variables.
pub(crate) fn env_mutex() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct EnvVarGuard {
    key: &'static str,
    original: Option<OsString>,
}

impl EnvVarGuard {
    pub(crate) fn set_path(key: &'static str, value: &Path) -> Self {
        Self::set_os(key, value.as_os_str())
    }

    fn set_os(key: &'static str, value: &OsStr) -> Self {
        let original = env::var_os(key);
        env::set_var(key, value);
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(value) = self.original.take() {
            env::set_var(self.key, value);
        } else {
            env::remove_var(self.key);
        }
    }
}

/// Temporary directory laid out like a JDK home: `bin/java` exists but is a
/// plain file. Enough for path-shape checks; use [`TempJdk`] when the probe
/// actually has to execute `java`.
pub(crate) struct TempHome {
    home: PathBuf,
}

impl TempHome {
    pub(crate) fn fake_jdk(tag: &str) -> Self {
        let home = unique_temp_dir(tag);
        let bin_dir = home.join("bin");
        fs::create_dir_all(&bin_dir).expect("create fake jdk bin dir");
        fs::write(bin_dir.join(crate::probe::java_executable()), b"").expect("write fake java");
        Self { home }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.home
    }
}

impl Drop for TempHome {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.home);
    }
}

/// Temporary JDK home whose `bin/java` is an executable script printing a
/// chosen `-version` banner to stderr.
#[cfg(unix)]
pub(crate) struct TempJdk {
    home: PathBuf,
}

#[cfg(unix)]
impl TempJdk {
    pub(crate) fn new(java_version_line: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let home = unique_temp_dir("script-jdk");
        let bin_dir = home.join("bin");
        fs::create_dir_all(&bin_dir).expect("create fake jdk bin dir");

        let script = format!(
            "#!/bin/sh\ncat <<'__JDK_END__' 1>&2\n{}\n__JDK_END__\nexit 0\n",
            java_version_line
        );
        let java = bin_dir.join(crate::probe::java_executable());
        fs::write(&java, script).expect("write java script");
        let mut permissions = fs::metadata(&java).expect("metadata").permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&java, permissions).expect("set permissions");

        Self { home }
    }

    pub(crate) fn home(&self) -> &Path {
        &self.home
    }
}

#[cfg(unix)]
impl Drop for TempJdk {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.home);
    }
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    env::temp_dir().join(format!(
        "jdk-registry-test-{tag}-{}-{}",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}
