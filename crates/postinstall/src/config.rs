use crate::icons::IconPattern;
use std::path::{Path, PathBuf};

/// Environment override set by packaging tools when installing into a staged
/// root instead of the live system.
pub const DESTDIR_ENV: &str = "DESTDIR";

/// Configuration for one post-install run.
///
/// The upstream build system grew a family of near-identical hook scripts;
/// this collapses them into one workflow with independently toggleable steps.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Resolved install data root (`DESTDIR` already applied).
    pub datadir: PathBuf,
    /// Directory holding the installed D-Bus `.service` files. Enables miner
    /// symlink registration when present.
    pub dbus_services_dir: Option<PathBuf>,
    /// True when installing into a packaging root. Suppresses every step with
    /// side effects outside the payload itself.
    pub staged: bool,
    /// Whether icon relocation still runs under a staged install. Packaging
    /// setups disagree on this, so it is a switch; relocating is the default
    /// because the step rewrites the payload itself.
    pub relocate_when_staged: bool,
    pub relocate_icons: bool,
    pub refresh_icon_cache: bool,
    pub compile_schemas: bool,
    pub validate_desktop_files: bool,
    pub icon_pattern: IconPattern,
}

impl HookConfig {
    /// Configuration with every step enabled for a non-staged install.
    pub fn new<P: Into<PathBuf>>(datadir: P) -> Self {
        Self {
            datadir: datadir.into(),
            dbus_services_dir: None,
            staged: false,
            relocate_when_staged: true,
            relocate_icons: true,
            refresh_icon_cache: true,
            compile_schemas: true,
            validate_desktop_files: true,
            icon_pattern: IconPattern::default(),
        }
    }

    /// The icon theme root the hook operates on.
    pub fn icon_dir(&self) -> PathBuf {
        self.datadir.join("icons").join("hicolor")
    }

    /// The settings schema directory.
    pub fn schema_dir(&self) -> PathBuf {
        self.datadir.join("glib-2.0").join("schemas")
    }

    /// The desktop-entry directory.
    pub fn applications_dir(&self) -> PathBuf {
        self.datadir.join("applications")
    }
}

/// Resolve the effective datadir for a possibly staged install.
///
/// With a non-empty `destdir` the datadir is re-rooted under it, the same way
/// packaging tools join `DESTDIR` with an absolute install path.
pub fn resolve_datadir(destdir: Option<&str>, datadir: &Path) -> PathBuf {
    match destdir {
        Some(root) if !root.is_empty() => {
            let relative = datadir.strip_prefix("/").unwrap_or(datadir);
            Path::new(root).join(relative)
        }
        _ => datadir.to_path_buf(),
    }
}
