//! Regional API endpoints.
//!
//! Accounts live in exactly one region; API traffic must target the
//! matching regional host. All paths sit under `/api/v2` on every host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AtlasLinkError;

/// Hosting region for an Atlas account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States (default region for new accounts)
    Us,
    /// Australia
    Au,
    /// Canada
    Ca,
    /// European Union
    Eu,
}

impl Region {
    /// Base URL for the region, without the `/api/v2` suffix.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us => "https://api.atlasfield.io",
            Region::Au => "https://api.au.atlasfield.io",
            Region::Ca => "https://api.ca.atlasfield.io",
            Region::Eu => "https://api.eu.atlasfield.io",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Us => "us",
            Region::Au => "au",
            Region::Ca => "ca",
            Region::Eu => "eu",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Region {
    type Err = AtlasLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "au" => Ok(Region::Au),
            "ca" => Ok(Region::Ca),
            "eu" => Ok(Region::Eu),
            other => Err(AtlasLinkError::ConfigurationError(format!(
                "unknown region '{}' (expected us, au, ca, or eu)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls_are_https() {
        for region in [Region::Us, Region::Au, Region::Ca, Region::Eu] {
            assert!(region.base_url().starts_with("https://"));
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for region in [Region::Us, Region::Au, Region::Ca, Region::Eu] {
            let parsed: Region = region.to_string().parse().unwrap();
            assert_eq!(parsed, region);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("mars".parse::<Region>().is_err());
    }
}
