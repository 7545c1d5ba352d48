use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source platform of an analytics export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
}

impl Platform {
    /// The value stored in a row's `platform` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facebook" | "fb" | "a" => Ok(Platform::Facebook),
            "instagram" | "ig" | "b" => Ok(Platform::Instagram),
            other => Err(format!(
                "unknown platform '{other}'; expected facebook or instagram"
            )),
        }
    }
}

/// Policy applied when a header set matches neither platform.
///
/// Older exports carried no platform marker and were always treated as
/// Facebook, so [`UnknownPlatformPolicy::AssumeFacebook`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPlatformPolicy {
    #[default]
    AssumeFacebook,
    AssumeInstagram,
    Reject,
}

impl FromStr for UnknownPlatformPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(UnknownPlatformPolicy::Reject),
            other => match other.parse::<Platform>() {
                Ok(Platform::Facebook) => Ok(UnknownPlatformPolicy::AssumeFacebook),
                Ok(Platform::Instagram) => Ok(UnknownPlatformPolicy::AssumeInstagram),
                Err(_) => Err(format!(
                    "unknown policy '{other}'; expected facebook, instagram or reject"
                )),
            },
        }
    }
}
