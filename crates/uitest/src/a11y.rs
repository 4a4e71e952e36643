//! Minimal AT-SPI client.
//!
//! The accessibility tree is exposed over its own bus; every accessible
//! object is a `(bus name, object path)` pair implementing the
//! `org.a11y.atspi.*` interfaces. This walks just enough of that surface for
//! smoke tests: names, children, clicks, extents and text.

use crate::error::{HarnessError, HarnessResult};
use std::collections::VecDeque;
use zbus::zvariant::{OwnedObjectPath, OwnedValue};
use zbus::Connection;

const REGISTRY_NAME: &str = "org.a11y.atspi.Registry";
const ROOT_PATH: &str = "/org/a11y/atspi/accessible/root";

const ACCESSIBLE_IFACE: &str = "org.a11y.atspi.Accessible";
const ACTION_IFACE: &str = "org.a11y.atspi.Action";
const COMPONENT_IFACE: &str = "org.a11y.atspi.Component";
const TEXT_IFACE: &str = "org.a11y.atspi.Text";
const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

// ATSPI_COORD_TYPE_SCREEN
const COORD_TYPE_SCREEN: u32 = 0;

/// Connect to the accessibility bus advertised by the session bus.
pub async fn connect_a11y_bus(session: &Connection) -> HarnessResult<Connection> {
    let reply = session
        .call_method(
            Some("org.a11y.Bus"),
            "/org/a11y/bus",
            Some("org.a11y.Bus"),
            "GetAddress",
            &(),
        )
        .await?;
    let address: String = reply.body().deserialize()?;
    tracing::debug!("Accessibility bus at {}", address);

    let connection = zbus::connection::Builder::address(address.as_str())?
        .build()
        .await?;
    Ok(connection)
}

/// Reference to one accessible object.
#[derive(Clone)]
pub struct Node {
    connection: Connection,
    destination: String,
    path: OwnedObjectPath,
}

impl Node {
    /// The registry root. Running applications are its children.
    pub fn registry_root(connection: Connection) -> Self {
        Self {
            connection,
            destination: REGISTRY_NAME.to_string(),
            path: OwnedObjectPath::try_from(ROOT_PATH)
                .unwrap_or_else(|_| unreachable!("registry root path is valid")),
        }
    }

    /// The accessible name (widget label, application name).
    pub async fn name(&self) -> HarnessResult<String> {
        let value = self.get_property(ACCESSIBLE_IFACE, "Name").await?;
        Ok(String::try_from(value)?)
    }

    /// Direct children, in tree order.
    pub async fn children(&self) -> HarnessResult<Vec<Node>> {
        let reply = self
            .call(ACCESSIBLE_IFACE, "GetChildren", &())
            .await?;
        let refs: Vec<(String, OwnedObjectPath)> = reply.body().deserialize()?;
        Ok(refs
            .into_iter()
            .map(|(destination, path)| Node {
                connection: self.connection.clone(),
                destination,
                path,
            })
            .collect())
    }

    /// Trigger the node's default action (a click for buttons).
    pub async fn click(&self) -> HarnessResult<()> {
        let reply = self.call(ACTION_IFACE, "DoAction", &(0i32,)).await?;
        let accepted: bool = reply.body().deserialize()?;
        if !accepted {
            return Err(HarnessError::ActionRejected(self.path.to_string()));
        }
        Ok(())
    }

    /// Screen-coordinate extents as `(x, y, width, height)`.
    pub async fn extents(&self) -> HarnessResult<(i32, i32, i32, i32)> {
        let reply = self
            .call(COMPONENT_IFACE, "GetExtents", &(COORD_TYPE_SCREEN,))
            .await?;
        let extents: (i32, i32, i32, i32) = reply.body().deserialize()?;
        Ok(extents)
    }

    /// Whether layout has assigned the node a real on-screen rectangle.
    pub async fn has_settled_extents(&self) -> bool {
        matches!(self.extents().await, Ok((_, _, w, h)) if w > 0 && h > 0)
    }

    /// Give the node keyboard focus.
    pub async fn grab_focus(&self) -> HarnessResult<bool> {
        let reply = self.call(COMPONENT_IFACE, "GrabFocus", &()).await?;
        Ok(reply.body().deserialize()?)
    }

    /// The node's full text content, or `None` when it exposes no text
    /// interface.
    pub async fn text(&self) -> Option<String> {
        let reply = self.call(TEXT_IFACE, "GetText", &(0i32, -1i32)).await.ok()?;
        reply.body().deserialize().ok()
    }

    async fn call<B>(&self, iface: &str, method: &str, body: &B) -> zbus::Result<zbus::Message>
    where
        B: zbus::export::serde::ser::Serialize + zbus::zvariant::DynamicType,
    {
        self.connection
            .call_method(
                Some(self.destination.as_str()),
                self.path.as_str(),
                Some(iface),
                method,
                body,
            )
            .await
    }

    async fn get_property(&self, iface: &str, name: &str) -> HarnessResult<OwnedValue> {
        let reply = self
            .call(PROPERTIES_IFACE, "Get", &(iface, name))
            .await?;
        Ok(reply.body().deserialize()?)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("destination", &self.destination)
            .field("path", &self.path)
            .finish()
    }
}

/// Breadth-first search for a descendant by accessible name. Nodes whose
/// properties cannot be read are skipped. `Ok(None)` means a full scan found
/// nothing; callers that expect the node to appear should retry under
/// [`crate::wait::poll_until`].
pub async fn find_descendant_named(root: &Node, name: &str) -> HarnessResult<Option<Node>> {
    let mut queue = VecDeque::from([root.clone()]);
    while let Some(node) = queue.pop_front() {
        for child in node.children().await? {
            if matches!(child.name().await, Ok(n) if n == name) {
                return Ok(Some(child));
            }
            queue.push_back(child);
        }
    }
    Ok(None)
}

/// Reusable predicate: does the node's text content equal `expected`?
/// Nodes without a text interface never match.
pub async fn text_is(node: &Node, expected: &str) -> bool {
    matches!(node.text().await, Some(text) if text == expected)
}
