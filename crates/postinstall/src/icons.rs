//! Icon relocation - strips the build-time name mangling from installed icons.
//!
//! The build system flattens icon paths into file names like
//! `hicolor_apps_48x48_org.lumina.Photos.png`. After install the files sit in
//! their final theme directories and the prefix has to go again.

use crate::error::{HookError, HookResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-name prefix produced by the build system for relocated icons.
pub const MANGLED_PREFIX: &str = "hicolor_";

/// Naming pattern for mangled icon files.
///
/// Matches `hicolor_<context>_<variant>_<base>` and captures `<base>`. The
/// accepted contexts and variants differ between install layouts, so both
/// halves are configurable.
#[derive(Debug, Clone)]
pub struct IconPattern {
    regex: Regex,
}

impl IconPattern {
    /// Build a pattern from regex alternatives for the context and variant
    /// segments, e.g. contexts `["apps"]` and variants `[r"\d+x\d+", "symbolic"]`.
    pub fn new(contexts: &[&str], variants: &[&str]) -> HookResult<Self> {
        let pattern = format!(
            "^hicolor_(?:{})_(?:{})_(.*)$",
            contexts.join("|"),
            variants.join("|")
        );
        let regex = Regex::new(&pattern).map_err(|e| HookError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    /// The canonical (unmangled) name for `file_name`, or `None` when the
    /// name does not follow the convention.
    pub fn canonical_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for IconPattern {
    fn default() -> Self {
        // Infallible: the alternatives below are valid regex fragments.
        Self::new(&["apps"], &[r"\d+x\d+", "symbolic", "scalable"])
            .unwrap_or_else(|_| unreachable!("default icon pattern is valid"))
    }
}

/// Walk `icon_dir` recursively and rename every mangled icon file to its
/// canonical name in the same directory.
///
/// A file that carries the mangled prefix but does not match the full pattern
/// aborts the hook: the input set is produced by a controlled build step, so
/// a stray name means the build is broken and silence would hide it. Returns
/// the `(old, new)` path pairs in the order they were renamed. A missing
/// `icon_dir` is a no-op.
pub async fn relocate_icons(
    icon_dir: &Path,
    pattern: &IconPattern,
) -> HookResult<Vec<(PathBuf, PathBuf)>> {
    let mut renamed = Vec::new();
    if !icon_dir.is_dir() {
        return Ok(renamed);
    }

    let mut pending = vec![icon_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
                continue;
            }

            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if !file_name.starts_with(MANGLED_PREFIX) {
                continue;
            }

            let base = pattern
                .canonical_name(&file_name)
                .ok_or_else(|| HookError::UnexpectedIconName(path.clone()))?
                .to_string();
            let target = dir.join(&base);

            tracing::debug!("Renaming icon: {} -> {}", path.display(), base);
            fs::rename(&path, &target).await?;
            renamed.push((path, target));
        }
    }

    Ok(renamed)
}
