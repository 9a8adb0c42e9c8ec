//! Automation Driver Contract
//!
//! The cursor controller never talks to a browser directly; everything it
//! needs (pointer I/O, selector resolution, element geometry, scrolling,
//! liveness) goes through the [`PointerDriver`] trait. Implementations wrap
//! whatever automation backend is in use; tests substitute mocks or scripted
//! fakes.

use std::time::Duration;

use async_trait::async_trait;

use crate::geometry::{BoundingBox, Vector};

mod error;

pub use error::{DriverError, Result};

/// Opaque handle identifying a DOM element for geometry queries and
/// interaction.
///
/// A locator remembers the selector it was resolved from so the protocol
/// session can rebuild an evaluation expression for the same element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: String,
}

impl Locator {
    /// Create a locator for the given selector
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    /// The selector this locator was resolved from
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// Remote object handle returned by the low-level protocol session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObjectId(pub String);

/// Node metadata reported by the protocol session.
#[derive(Debug, Clone)]
pub struct NodeDescription {
    /// Tag name of the node (e.g. `DIV`, `A`)
    pub node_name: String,
    /// Protocol-internal node identifier, when reported
    pub backend_node_id: Option<u64>,
}

/// The consumed collaborator contract: a browser-automation driver.
///
/// All operations are asynchronous, may fail, and carry no internally
/// enforced timeout beyond what the backend itself provides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointerDriver: Send + Sync {
    /// Move the pointer to an absolute position
    async fn move_pointer(&self, position: Vector) -> Result<()>;

    /// Press the primary button
    async fn press_button(&self) -> Result<()>;

    /// Release the primary button
    async fn release_button(&self) -> Result<()>;

    /// Resolve a selector string to a locator
    async fn resolve_selector(&self, selector: &str) -> Result<Locator>;

    /// Wait up to `timeout` for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Bounding box of the element, or `None` when the backend cannot report
    /// one (zero-size inline elements)
    async fn bounding_box(&self, locator: &Locator) -> Result<Option<BoundingBox>>;

    /// Geometry query evaluated against the live element, used as a fallback
    /// when [`bounding_box`](Self::bounding_box) reports nothing
    async fn element_geometry(&self, locator: &Locator) -> Result<BoundingBox>;

    /// Evaluate an expression and return a remote object handle for the
    /// matched node, if any
    async fn resolve_object(&self, expression: &str) -> Result<Option<RemoteObjectId>>;

    /// Describe a node by remote handle
    async fn describe_node(&self, object: &RemoteObjectId) -> Result<NodeDescription>;

    /// Scroll a node into view by remote handle (primary mechanism)
    async fn scroll_into_view(&self, object: &RemoteObjectId) -> Result<()>;

    /// In-page scroll fallback; the caller applies a settle delay afterwards
    async fn scroll_into_view_fallback(&self, locator: &Locator) -> Result<()>;

    /// Whether the underlying browser session is still connected
    fn is_connected(&self) -> bool;

    /// Current viewport size as (width, height)
    async fn viewport_size(&self) -> Result<(f64, f64)>;
}

/// Build the in-page evaluation expression for a selector.
///
/// Selectors beginning with `//` are interpreted as XPath expressions, all
/// others as CSS selectors. The selector is JSON-quoted so arbitrary quoting
/// inside it cannot break out of the expression.
pub fn selector_expression(selector: &str) -> String {
    // String serialization is infallible
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| format!("\"{selector}\""));

    if selector.starts_with("//") {
        format!(
            "document.evaluate({quoted}, document, null, \
             XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
        )
    } else {
        format!("document.querySelector({quoted})")
    }
}

/// Resolve a locator to a remote object handle via the protocol session.
///
/// Standalone utility, also usable outside the controller for custom flows.
pub async fn resolve_remote_object(
    driver: &dyn PointerDriver,
    locator: &Locator,
) -> Result<Option<RemoteObjectId>> {
    driver
        .resolve_object(&selector_expression(locator.selector()))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_selector_expression() {
        let expr = selector_expression("#login > button.primary");
        assert_eq!(
            expr,
            "document.querySelector(\"#login > button.primary\")"
        );
    }

    #[test]
    fn test_xpath_selector_expression() {
        let expr = selector_expression("//div[@id='app']/a");
        assert!(expr.starts_with("document.evaluate(\"//div[@id='app']/a\""));
        assert!(expr.contains("FIRST_ORDERED_NODE_TYPE"));
        assert!(expr.ends_with(".singleNodeValue"));
    }

    #[test]
    fn test_selector_quoting_is_escaped() {
        let expr = selector_expression("a[title=\"x\"]");
        assert_eq!(expr, "document.querySelector(\"a[title=\\\"x\\\"]\")");
    }

    #[tokio::test]
    async fn test_resolve_remote_object_builds_expression() {
        let mut driver = MockPointerDriver::new();
        driver
            .expect_resolve_object()
            .withf(|expr| expr == "document.querySelector(\".cta\")")
            .times(1)
            .returning(|_| Ok(Some(RemoteObjectId("obj-1".into()))));

        let locator = Locator::new(".cta");
        let object = resolve_remote_object(&driver, &locator).await.unwrap();
        assert_eq!(object, Some(RemoteObjectId("obj-1".into())));
    }
}
