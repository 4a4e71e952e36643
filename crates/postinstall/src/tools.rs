//! Advisory external tool invocations.
//!
//! Cache refresh, schema compilation and desktop-entry validation are
//! best-effort housekeeping: a failure must never block the install, so exit
//! statuses are logged and discarded.

use crate::error::HookResult;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;

async fn run_advisory(program: &str, args: &[&str]) {
    match Command::new(program).args(args).status().await {
        Ok(status) if !status.success() => {
            tracing::warn!("{} exited with {}", program, status);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Failed to run {}: {}", program, e);
        }
    }
}

/// Rebuild the icon-theme cache for `icon_dir`.
pub async fn refresh_icon_cache(icon_dir: &Path) {
    tracing::info!("Updating icon cache in {}", icon_dir.display());
    run_advisory(
        "gtk-update-icon-cache",
        &["-f", "-t", &icon_dir.display().to_string()],
    )
    .await;
}

/// Compile the settings schemas in `schema_dir`.
pub async fn compile_schemas(schema_dir: &Path) {
    tracing::info!("Compiling settings schemas in {}", schema_dir.display());
    run_advisory("glib-compile-schemas", &[&schema_dir.display().to_string()]).await;
}

/// Run the desktop-entry validator over every `.desktop` file in
/// `applications_dir`. Purely diagnostic; a missing directory is a no-op.
pub async fn validate_desktop_files(applications_dir: &Path) -> HookResult<()> {
    if !applications_dir.is_dir() {
        return Ok(());
    }

    let mut entries = fs::read_dir(applications_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|ext| ext == "desktop") != Some(true) {
            continue;
        }
        tracing::info!("Validating {}", path.display());
        run_advisory("desktop-file-validate", &[&path.display().to_string()]).await;
    }

    Ok(())
}
