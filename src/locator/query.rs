//! Strategy execution against a session.
//!
//! Each [`Strategy`] lowers a [`ParsedLocator`] to driver queries and
//! returns the matches in driver order. Most strategies then post-filter
//! by tag and constraints; raw XPath and the compound default query do not.
//!
//! # Default strategy
//!
//! Without a prefix the criteria is matched against the key attributes of
//! the element type:
//!
//! | Tag | Key attributes |
//! |-----|----------------|
//! | `a` | `@id`, `@name`, `@href`, text |
//! | `img` | `@id`, `@name`, `@src`, `@alt` |
//! | `input` | `@id`, `@name`, `@value`, `@src` |
//! | `button` | `@id`, `@name`, `@value`, text |
//! | other / none | `@id`, `@name` |
//!
//! `id=login` style locators skip this table entirely. For `login` with tag
//! `link` the query becomes:
//!
//! ```text
//! //a[(@id='login' or @name='login' or @href='login'
//!      or normalize-space(descendant-or-self::text())='login'
//!      or @href='http://host/app/login')]
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::debug;

use crate::driver::{By, Element, Platform, RemoteDriver};
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::session::Session;

use super::escape::escape_xpath_value;
use super::parser::ParsedLocator;
use super::strategy::{CustomStrategy, Strategy};

// ============================================================================
// Constants
// ============================================================================

/// Text-content matcher used as a key attribute.
const TEXT_CONTENT: &str = "normalize-space(descendant-or-self::text())";

/// Key attributes for untyped or unknown elements.
const DEFAULT_KEY_ATTRS: &[&str] = &["@id", "@name"];
const A_KEY_ATTRS: &[&str] = &["@id", "@name", "@href", TEXT_CONTENT];
const IMG_KEY_ATTRS: &[&str] = &["@id", "@name", "@src", "@alt"];
const INPUT_KEY_ATTRS: &[&str] = &["@id", "@name", "@value", "@src"];
const BUTTON_KEY_ATTRS: &[&str] = &["@id", "@name", "@value", TEXT_CONTENT];

/// Key attributes that also match the criteria as a page-relative URL.
const URL_ATTRS: &[&str] = &["@src", "@href"];

// ============================================================================
// Strategy - Execution
// ============================================================================

impl Strategy {
    /// Runs this strategy against `session`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedPlatform`] for `android`/`ios` on the other platform
    /// - Any error from the session's driver
    pub fn find_by(&self, session: &Session, parsed: &ParsedLocator) -> Result<Vec<Element>> {
        let driver = session.driver();
        let criteria = parsed.criteria.as_str();

        let ids = match self {
            Self::Default if criteria.starts_with("//") => driver.find_elements(&By::xpath(criteria))?,
            Self::Default => find_by_key_attrs(driver, parsed)?,
            Self::Identifier => {
                let mut ids = driver.find_elements(&By::id(criteria))?;
                ids.extend(driver.find_elements(&By::name(criteria))?);
                filter_elements(driver, ids, parsed)?
            }
            Self::Id => query_filtered(driver, &By::id(criteria), parsed)?,
            Self::Name => query_filtered(driver, &By::name(criteria), parsed)?,
            Self::XPath => driver.find_elements(&By::xpath(criteria))?,
            Self::Class => query_filtered(driver, &By::class_name(criteria), parsed)?,
            Self::AccessibilityId => query_filtered(driver, &By::accessibility_id(criteria), parsed)?,
            Self::Css => query_filtered(driver, &By::css(criteria), parsed)?,
            Self::Android => {
                self.require_platform(session, Platform::Android)?;
                query_filtered(driver, &By::android_uiautomator(criteria), parsed)?
            }
            Self::Ios => {
                self.require_platform(session, Platform::Ios)?;
                query_filtered(driver, &By::ios_uiautomation(criteria), parsed)?
            }
            Self::Custom(custom) => {
                let ids = run_custom(driver, custom, criteria)?;
                filter_elements(driver, ids, parsed)?
            }
        };

        debug!(
            session = %session.id(),
            strategy = %self,
            criteria,
            count = ids.len(),
            "Strategy query finished"
        );

        Ok(ids
            .into_iter()
            .map(|id| Element::new(id, session.id()))
            .collect())
    }

    /// Rejects platform-specific strategies on the wrong platform.
    fn require_platform(&self, session: &Session, platform: Platform) -> Result<()> {
        if session.platform() == platform {
            Ok(())
        } else {
            Err(Error::unsupported_platform(self.name(), session.platform()))
        }
    }
}

// ============================================================================
// Query Helpers
// ============================================================================

/// Runs one query and post-filters the matches.
fn query_filtered(
    driver: &dyn RemoteDriver,
    by: &By,
    parsed: &ParsedLocator,
) -> Result<Vec<ElementId>> {
    let ids = driver.find_elements(by)?;
    filter_elements(driver, ids, parsed)
}

/// Invokes a custom strategy's script with the split criteria.
fn run_custom(
    driver: &dyn RemoteDriver,
    custom: &CustomStrategy,
    criteria: &str,
) -> Result<Vec<ElementId>> {
    let args: Vec<Value> = custom
        .arguments(criteria)
        .into_iter()
        .map(Value::from)
        .collect();

    debug!(strategy = custom.name(), arg_count = args.len(), "Running custom strategy");
    Ok(driver.execute_script(custom.expression(), &args)?.into_elements())
}

/// Keeps only elements matching the locator's tag and constraints.
///
/// Without a tag every element is kept.
fn filter_elements(
    driver: &dyn RemoteDriver,
    ids: Vec<ElementId>,
    parsed: &ParsedLocator,
) -> Result<Vec<ElementId>> {
    let Some(tag) = parsed.tag.as_deref() else {
        return Ok(ids);
    };

    let mut kept = Vec::with_capacity(ids.len());
    for id in ids {
        if element_matches(driver, &id, tag, parsed)? {
            kept.push(id);
        }
    }
    Ok(kept)
}

fn element_matches(
    driver: &dyn RemoteDriver,
    id: &ElementId,
    tag: &str,
    parsed: &ParsedLocator,
) -> Result<bool> {
    if driver.tag_name(id)?.to_lowercase() != tag {
        return Ok(false);
    }

    for (name, expected) in &parsed.constraints {
        if driver.attribute(id, name)?.as_deref() != Some(expected.as_str()) {
            return Ok(false);
        }
    }

    Ok(true)
}

// ============================================================================
// Key Attribute XPath
// ============================================================================

/// Runs the compound key-attribute query of the default strategy.
fn find_by_key_attrs(driver: &dyn RemoteDriver, parsed: &ParsedLocator) -> Result<Vec<ElementId>> {
    let attrs = key_attrs(parsed.tag.as_deref());

    let base_url = if attrs.iter().any(|attr| URL_ATTRS.contains(attr)) {
        Some(page_directory(&driver.current_url()?).to_string())
    } else {
        None
    };

    let xpath = build_key_attrs_xpath(parsed, base_url.as_deref());
    debug!(xpath = %xpath, "Built key attribute query");

    driver.find_elements(&By::xpath(xpath))
}

/// Returns the key attributes for an element type, ignoring case.
fn key_attrs(tag: Option<&str>) -> &'static [&'static str] {
    let Some(tag) = tag else {
        return DEFAULT_KEY_ATTRS;
    };

    match tag.trim().to_ascii_lowercase().as_str() {
        "a" => A_KEY_ATTRS,
        "img" => IMG_KEY_ATTRS,
        "input" => INPUT_KEY_ATTRS,
        "button" => BUTTON_KEY_ATTRS,
        _ => DEFAULT_KEY_ATTRS,
    }
}

/// Strips everything from the final `/` of a URL.
fn page_directory(url: &str) -> &str {
    url.rfind('/').map_or(url, |idx| &url[..idx])
}

/// Builds the default strategy's compound XPath.
///
/// `base_url` is the directory of the current page; when given, `@src` and
/// `@href` also match the criteria resolved against it. Constraints are
/// ANDed in attribute-name order ahead of the ORed key attributes.
///
/// # Example
///
/// ```
/// use mobile_keywords::locator::{StrategyRegistry, build_key_attrs_xpath, resolve};
///
/// let (parsed, _) = resolve("login", Some("checkbox"), &StrategyRegistry::new());
/// assert_eq!(
///     build_key_attrs_xpath(&parsed, Some("http://host/app")),
///     "//input[@type='checkbox' and (@id='login' or @name='login' or @value='login' \
///      or @src='login' or @src='http://host/app/login')]"
/// );
/// ```
#[must_use]
pub fn build_key_attrs_xpath(parsed: &ParsedLocator, base_url: Option<&str>) -> String {
    let attrs = key_attrs(parsed.tag.as_deref());
    let criteria = escape_xpath_value(&parsed.criteria);

    let mut searchers: Vec<String> = attrs
        .iter()
        .map(|attr| format!("{attr}={criteria}"))
        .collect();

    if let Some(base_url) = base_url {
        let url = escape_xpath_value(&format!("{base_url}/{}", parsed.criteria));
        searchers.extend(
            URL_ATTRS
                .iter()
                .copied()
                .filter(|attr| attrs.contains(attr))
                .map(|attr| format!("{attr}={url}")),
        );
    }

    let constraints: Vec<String> = parsed
        .constraints
        .iter()
        .map(|(name, value)| format!("@{name}={}", escape_xpath_value(value)))
        .collect();

    let tag = parsed.tag.as_deref().unwrap_or("*");
    let prefix = if constraints.is_empty() {
        String::new()
    } else {
        format!("{} and ", constraints.join(" and "))
    };

    format!("//{tag}[{prefix}({})]", searchers.join(" or "))
}

// ============================================================================
// Tests
// ============================================================================
