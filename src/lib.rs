// jdk_registry - local JDK discovery and version-keyed lookup
mod config;
mod probe;
mod registry;
mod version;

#[cfg(test)]
mod test_support;

pub use config::{default_candidate_homes, RegistryConfig, CANDIDATE_HOMES_ENV};
pub use probe::{current_jvm_home, CommandProbe, JdkProbe, ProbeError};
pub use registry::{JdkInstallation, JdkRegistry};
pub use version::{JavaVersion, JavaVersionParseError};

use thiserror::Error;

/// Errors fatal to registry construction. Individual bad candidates are
/// never an error; only failing to resolve the build's own JVM is.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to resolve the current JVM: {0}")]
    Probe(#[from] ProbeError),
}
