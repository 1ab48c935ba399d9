use crate::config::RegistryConfig;
use crate::probe::{current_jvm_home, CommandProbe, JdkProbe};
use crate::version::JavaVersion;
use crate::RegistryError;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One validated local JDK installation.
///
/// Records are created fully populated by the probe and never mutated after
/// the registry takes ownership of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInstallation {
    name: String,
    display_name: String,
    version: JavaVersion,
    home: PathBuf,
}

impl JdkInstallation {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        version: JavaVersion,
        home: PathBuf,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            version,
            home,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn version(&self) -> JavaVersion {
        self.version
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub(crate) fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }
}

impl fmt::Display for JdkInstallation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let home = std::path::absolute(&self.home).unwrap_or_else(|_| self.home.clone());
        write!(f, "{} ({})", self.display_name, home.display())
    }
}

/// Version-keyed index of local JDK installations.
///
/// Built once from an ordered candidate list; read-only afterwards. The JVM
/// the build runs on is tracked separately and takes precedence over an index
/// entry of the same version, so the build never re-probes its own JVM.
#[derive(Debug)]
pub struct JdkRegistry {
    index: HashMap<JavaVersion, JdkInstallation>,
    current: JdkInstallation,
}

impl JdkRegistry {
    /// Probe every candidate home in order and build the index.
    ///
    /// Candidates that fail probing contribute no entry and raise no error.
    /// When two candidates report the same version, the later one wins.
    /// Describing the current JVM must succeed; its recorded home is taken
    /// from the runtime environment, not from the probe.
    pub fn with_probe<P, I, S>(candidate_homes: I, probe: &P) -> Result<Self, RegistryError>
    where
        P: JdkProbe + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut index = HashMap::new();
        for home in candidate_homes {
            let home = home.as_ref();
            match probe.check_jdk(home) {
                Ok(installation) => {
                    let installation = installation.with_home(home.to_path_buf());
                    debug!(
                        home = %home.display(),
                        version = %installation.version(),
                        "indexed JDK candidate"
                    );
                    index.insert(installation.version(), installation);
                }
                Err(error) => {
                    debug!(home = %home.display(), %error, "skipping JDK candidate");
                }
            }
        }

        let current = probe.describe_current()?.with_home(current_jvm_home()?);
        Ok(Self { index, current })
    }

    /// Build a registry from configured candidates using [`CommandProbe`].
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        Self::with_probe(&config.candidate_homes, &CommandProbe)
    }

    /// Installation for an exact Java version, or `None` when no candidate
    /// matched. The current JVM wins over an index entry of its own version.
    pub fn lookup(&self, version: JavaVersion) -> Option<&JdkInstallation> {
        if self.current.version == version {
            Some(&self.current)
        } else {
            self.index.get(&version)
        }
    }

    /// The JVM the build process runs on.
    pub fn current(&self) -> &JdkInstallation {
        &self.current
    }

    /// All indexed installations, the current JVM excluded.
    pub fn installations(&self) -> impl Iterator<Item = &JdkInstallation> {
        self.index.values()
    }
}
