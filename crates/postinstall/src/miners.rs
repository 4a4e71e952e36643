//! Tracker miner service registration.
//!
//! The indexer discovers miners through `.service` symlinks under the data
//! root; the hook points them at the D-Bus service files installed alongside
//! the application.

use crate::error::HookResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Bus names of the miners the application depends on.
pub const MINER_SERVICES: [&str; 2] = [
    "org.freedesktop.Tracker3.Miner.Files",
    "org.freedesktop.Tracker3.Miner.Extract",
];

/// Create `<datadir>/tracker/miners/<id>.service` symlinks pointing into
/// `services_dir`, one per entry in [`MINER_SERVICES`].
///
/// A link that already exists is left alone and counts as success, so the
/// hook can be re-run. Every other filesystem failure propagates. Returns the
/// link paths that now exist.
pub async fn register_miner_links(
    datadir: &Path,
    services_dir: &Path,
) -> HookResult<Vec<PathBuf>> {
    let miners_dir = datadir.join("tracker").join("miners");
    let mut links = Vec::with_capacity(MINER_SERVICES.len());

    for service in MINER_SERVICES {
        let file_name = format!("{service}.service");
        let source = services_dir.join(&file_name);
        let link = miners_dir.join(&file_name);

        match fs::symlink(&source, &link).await {
            Ok(()) => {
                tracing::info!("Registered miner link {}", link.display());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("Miner link {} already present", link.display());
            }
            Err(e) => return Err(e.into()),
        }
        links.push(link);
    }

    Ok(links)
}
