use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Major Java language version (8, 17, 21, ...).
///
/// Version tokens printed by `java -version` come in two schemes: the legacy
/// `1.x` scheme used up to Java 8 (`"1.8.0_362"`) and the modern scheme used
/// since Java 9 (`"21.0.2"`, `"25-ea"`). Both collapse to the major version,
/// which is the only component lookup cares about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JavaVersion(u32);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized Java version token: '{0}'")]
pub struct JavaVersionParseError(String);

impl JavaVersion {
    pub const fn new(major: u32) -> Self {
        JavaVersion(major)
    }

    pub const fn major(self) -> u32 {
        self.0
    }

    /// Interpret a version token as it appears inside the quotes of a
    /// `java -version` banner. Returns `None` for tokens in neither scheme.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(stripped) = token.strip_prefix("1.") {
            let mut parts = stripped.split(|ch| ch == '.' || ch == '_' || ch == '-');
            let minor = parts.next()?;
            return minor
                .chars()
                .take_while(|ch| ch.is_ascii_digit())
                .collect::<String>()
                .parse::<u32>()
                .ok()
                .map(JavaVersion);
        }

        let digits: String = token.chars().take_while(|ch| ch.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            digits.parse::<u32>().ok().map(JavaVersion)
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JavaVersion {
    type Err = JavaVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s.trim()).ok_or_else(|| JavaVersionParseError(s.to_string()))
    }
}

impl From<u32> for JavaVersion {
    fn from(major: u32) -> Self {
        JavaVersion(major)
    }
}
