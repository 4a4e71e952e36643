//! Launch/teardown fixture for smoke tests.

use crate::a11y::{self, Node};
use crate::bus::AppBus;
use crate::error::HarnessResult;
use crate::wait::poll_until;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Well-known bus name of the application under test.
pub const APP_ID: &str = "org.lumina.Photos";

/// Build-tree root for launching an uninstalled binary.
pub const BUILDDIR_ENV: &str = "LUMINA_TEST_BUILDDIR";

/// When set, never spawn the binary; always go through bus activation.
pub const NO_AUTOSTART_ENV: &str = "LUMINA_TEST_NO_AUTOSTART";

const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Smoke-test fixture: starts (or activates) the application and locates it
/// in the accessibility tree.
pub struct Harness {
    bus: AppBus,
    app_name: String,
    startup_timeout: Duration,
}

impl Harness {
    pub fn new() -> Self {
        Self::for_app(APP_ID)
    }

    /// Fixture for an arbitrary application id. The accessible application
    /// node is expected to carry the id as its name.
    pub fn for_app(app_id: &str) -> Self {
        Self {
            bus: AppBus::new(app_id),
            app_name: app_id.to_string(),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
        }
    }

    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    pub fn bus(&self) -> &AppBus {
        &self.bus
    }

    /// Start the application and return its accessible node.
    ///
    /// With [`BUILDDIR_ENV`] set (and [`NO_AUTOSTART_ENV`] unset) the binary
    /// is spawned from the build tree, fire-and-forget; otherwise the app is
    /// activated over the session bus. Either way readiness is observed
    /// through the accessibility tree, bounded by the startup timeout.
    pub async fn start(&self) -> HarnessResult<Node> {
        let builddir = std::env::var(BUILDDIR_ENV).ok().filter(|v| !v.is_empty());
        match builddir {
            Some(builddir) if std::env::var_os(NO_AUTOSTART_ENV).is_none() => {
                self.spawn_from_build_tree(PathBuf::from(builddir))?;
            }
            _ => self.bus.activate().await?,
        }

        let session = self.bus.connection().await?;
        let a11y_bus = a11y::connect_a11y_bus(session).await?;
        let root = Node::registry_root(a11y_bus);

        let app = poll_until(self.startup_timeout, &self.app_name, || {
            let root = root.clone();
            let name = self.app_name.clone();
            async move { app_among_children(&root, &name).await }
        })
        .await?;

        // Hand input focus to the first toplevel; a window that refuses focus
        // is not fatal for a smoke run.
        if let Ok(toplevels) = app.children().await {
            if let Some(frame) = toplevels.first() {
                let _ = frame.grab_focus().await;
            }
        }

        Ok(app)
    }

    /// Find a widget by accessible name anywhere under `app`, bounded by
    /// `timeout`.
    pub async fn find_widget(
        &self,
        app: &Node,
        name: &str,
        timeout: Duration,
    ) -> HarnessResult<Node> {
        poll_until(timeout, name, || {
            let app = app.clone();
            let name = name.to_string();
            async move { a11y::find_descendant_named(&app, &name).await }
        })
        .await
    }

    /// Ask the application to quit. Safe to call whether or not `start`
    /// succeeded; the bus client connects independently.
    pub async fn fini(&self) -> HarnessResult<()> {
        self.bus.quit().await
    }

    fn spawn_from_build_tree(&self, builddir: PathBuf) -> std::io::Result<()> {
        // Matches the build layout: <builddir>/../src/lumina, run from the
        // tree root. The child is deliberately not awaited or reaped here.
        let tree_root = builddir.join("..");
        let binary = tree_root.join("src").join("lumina");
        tracing::info!("Spawning {}", binary.display());
        Command::new(binary).current_dir(tree_root).spawn()?;
        Ok(())
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Applications are direct children of the registry root; match on name.
async fn app_among_children(root: &Node, name: &str) -> HarnessResult<Option<Node>> {
    for child in root.children().await? {
        if matches!(child.name().await, Ok(n) if n == name) {
            return Ok(Some(child));
        }
    }
    Ok(None)
}
