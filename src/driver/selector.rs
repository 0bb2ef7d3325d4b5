//! Primitive element queries understood by the remote driver.
//!
//! Every locator strategy lowers to one or more [`By`] queries. The
//! `using` names are the ones the remote automation server expects on the
//! wire.
//!
//! # Example
//!
//! ```ignore
//! use mobile_keywords::By;
//!
//! let by = By::accessibility_id("login");
//! assert_eq!(by.using(), "accessibility id");
//! assert_eq!(by.value(), "login");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element query sent to the remote driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "using", content = "value")]
pub enum By {
    /// Element `id` (resource id on Android).
    #[serde(rename = "id")]
    Id(String),

    /// Element `name`.
    #[serde(rename = "name")]
    Name(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// By::XPath("//*[@id='login' or @name='login']".into())
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Platform class name (e.g. `android.widget.Button`).
    #[serde(rename = "class name")]
    ClassName(String),

    /// Accessibility identifier.
    #[serde(rename = "accessibility id")]
    AccessibilityId(String),

    /// Android UiAutomator expression.
    ///
    /// # Example
    /// ```ignore
    /// By::AndroidUiAutomator("new UiSelector().text(\"OK\")".into())
    /// ```
    #[serde(rename = "-android uiautomator")]
    AndroidUiAutomator(String),

    /// iOS UIAutomation expression.
    #[serde(rename = "-ios uiautomation")]
    IosUiAutomation(String),

    /// CSS selector (web contexts only).
    #[serde(rename = "css selector")]
    Css(String),
}

impl By {
    /// Creates an id query.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name query.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates an XPath query.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates a class name query.
    #[inline]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Creates an accessibility id query.
    #[inline]
    pub fn accessibility_id(id: impl Into<String>) -> Self {
        Self::AccessibilityId(id.into())
    }

    /// Creates an Android UiAutomator query.
    #[inline]
    pub fn android_uiautomator(expr: impl Into<String>) -> Self {
        Self::AndroidUiAutomator(expr.into())
    }

    /// Creates an iOS UIAutomation query.
    #[inline]
    pub fn ios_uiautomation(expr: impl Into<String>) -> Self {
        Self::IosUiAutomation(expr.into())
    }

    /// Creates a CSS selector query.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Returns the wire name of the query strategy.
    #[must_use]
    pub fn using(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::XPath(_) => "xpath",
            Self::ClassName(_) => "class name",
            Self::AccessibilityId(_) => "accessibility id",
            Self::AndroidUiAutomator(_) => "-android uiautomator",
            Self::IosUiAutomation(_) => "-ios uiautomation",
            Self::Css(_) => "css selector",
        }
    }

    /// Returns the query value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Name(v)
            | Self::XPath(v)
            | Self::ClassName(v)
            | Self::AccessibilityId(v)
            | Self::AndroidUiAutomator(v)
            | Self::IosUiAutomation(v)
            | Self::Css(v) => v,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
