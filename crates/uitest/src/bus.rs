//! Session-bus client for the `org.freedesktop.Application` interface.

use crate::error::HarnessResult;
use std::collections::HashMap;
use tokio::sync::OnceCell;
use zbus::zvariant::Value;
use zbus::Connection;

const APPLICATION_IFACE: &str = "org.freedesktop.Application";

/// Client for one application's well-known bus name.
///
/// The session-bus connection is established on the first call and reused for
/// the client's lifetime.
pub struct AppBus {
    app_id: String,
    object_path: String,
    connection: OnceCell<Connection>,
}

impl AppBus {
    /// Client for `app_id`; the object path is derived from the id
    /// (`org.lumina.Photos` -> `/org/lumina/Photos`).
    pub fn new(app_id: &str) -> Self {
        let object_path = format!("/{}", app_id.replace('.', "/"));
        Self {
            app_id: app_id.to_string(),
            object_path,
            connection: OnceCell::new(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The cached session connection, established on first use.
    pub async fn connection(&self) -> zbus::Result<&Connection> {
        self.connection.get_or_try_init(Connection::session).await
    }

    /// `Activate` the application, launching it through bus activation when
    /// it is not yet running.
    pub async fn activate(&self) -> HarnessResult<()> {
        let platform_data: HashMap<&str, Value<'_>> = HashMap::new();
        self.call(APPLICATION_IFACE, "Activate", &(platform_data,))
            .await
    }

    /// Invoke a named application action with empty parameter lists.
    pub async fn activate_action(&self, action: &str) -> HarnessResult<()> {
        let parameters: Vec<Value<'_>> = Vec::new();
        let platform_data: HashMap<&str, Value<'_>> = HashMap::new();
        self.call(
            APPLICATION_IFACE,
            "ActivateAction",
            &(action, parameters, platform_data),
        )
        .await
    }

    /// Ask the application to quit. Returns as soon as the call is answered;
    /// does not wait for the process to exit.
    pub async fn quit(&self) -> HarnessResult<()> {
        tracing::info!("Requesting quit from {}", self.app_id);
        self.activate_action("quit").await
    }

    async fn call<B>(&self, iface: &str, method: &str, body: &B) -> HarnessResult<()>
    where
        B: zbus::export::serde::ser::Serialize + zbus::zvariant::DynamicType,
    {
        let connection = self.connection().await?;
        connection
            .call_method(
                Some(self.app_id.as_str()),
                self.object_path.as_str(),
                Some(iface),
                method,
                body,
            )
            .await?;
        Ok(())
    }
}
