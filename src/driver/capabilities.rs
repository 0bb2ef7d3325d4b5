//! Desired capabilities and target platform.
//!
//! Capabilities arrive from the keyword layer as a single string of
//! comma-separated `key=value` pairs:
//!
//! ```ignore
//! use mobile_keywords::{Capabilities, Platform};
//!
//! let caps = Capabilities::parse("platformName=Android, deviceName=emulator-5554")?;
//! assert_eq!(caps.get("deviceName"), Some("emulator-5554"));
//! assert_eq!(caps.platform()?, Platform::Android);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Capability naming the target platform.
pub const PLATFORM_NAME: &str = "platformName";

// ============================================================================
// Platform
// ============================================================================

/// Mobile platform a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android device or emulator.
    Android,
    /// iOS device or simulator.
    Ios,
}

impl Platform {
    /// Returns the platform's native button class.
    #[must_use]
    pub fn button_class(self) -> &'static str {
        match self {
            Self::Android => "android.widget.Button",
            Self::Ios => "UIAButton",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android => f.write_str("Android"),
            Self::Ios => f.write_str("iOS"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    /// Parses `android` or `ios`, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("android") {
            Ok(Self::Android)
        } else if s.eq_ignore_ascii_case("ios") {
            Ok(Self::Ios)
        } else {
            Err(Error::config(format!(
                "Only support ios/android platform, but not the platform {s}"
            )))
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Parsed desired capabilities.
///
/// A key given more than once keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities {
    entries: BTreeMap<String, String>,
}

impl Capabilities {
    /// Parses a `k1=v1,k2=v2` capability string.
    ///
    /// Keys and values are trimmed. Empty entries after the last
    /// non-empty one are ignored, so a trailing comma is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilitiesFormat`] for the first entry that does
    /// not contain exactly one `=`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut raw_entries: Vec<&str> = raw.split(',').collect();
        while raw_entries.len() > 1 && raw_entries.last().is_some_and(|e| e.is_empty()) {
            raw_entries.pop();
        }

        let mut entries = BTreeMap::new();
        for entry in raw_entries {
            let entry = entry.trim();
            let mut parts = entry.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(Error::capabilities_format(entry));
            };
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self { entries })
    }

    /// Returns the value of a capability.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the number of capabilities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no capability is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over capabilities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Determines the platform from the `platformName` capability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the capability is missing or names
    /// anything other than `android`/`ios`.
    pub fn platform(&self) -> Result<Platform> {
        self.get(PLATFORM_NAME)
            .ok_or_else(|| Error::config(format!("Missing required capability '{PLATFORM_NAME}'")))?
            .parse()
    }

    /// Converts the capabilities into a JSON object for the driver.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
