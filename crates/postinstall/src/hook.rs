//! Step orchestration for one post-install run.

use crate::config::HookConfig;
use crate::error::HookResult;
use crate::{icons, miners, tools};
use std::path::PathBuf;

/// One unit of post-install work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    RelocateIcons,
    RefreshIconCache,
    CompileSchemas,
    ValidateDesktopFiles,
    RegisterMinerLinks,
}

/// What a hook run actually did, for logging and for tests.
#[derive(Debug, Default)]
pub struct HookReport {
    /// `(old, new)` path pairs of relocated icon files.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Miner service links that exist after the run.
    pub miner_links: Vec<PathBuf>,
    /// Steps that executed, in order.
    pub steps: Vec<Step>,
}

/// Run the enabled steps in order.
///
/// Icon relocation rewrites the install payload itself, so it may also run
/// under a staged install (see [`HookConfig::relocate_when_staged`]). All
/// remaining steps touch the live system and only run for real installs.
pub async fn run(config: &HookConfig) -> HookResult<HookReport> {
    let mut report = HookReport::default();

    if config.relocate_icons && (!config.staged || config.relocate_when_staged) {
        report.renamed = icons::relocate_icons(&config.icon_dir(), &config.icon_pattern).await?;
        report.steps.push(Step::RelocateIcons);
        tracing::info!("Relocated {} icon file(s)", report.renamed.len());
    }

    if config.staged {
        tracing::info!("Staged install, skipping system housekeeping");
        return Ok(report);
    }

    if config.refresh_icon_cache {
        tools::refresh_icon_cache(&config.icon_dir()).await;
        report.steps.push(Step::RefreshIconCache);
    }

    if config.compile_schemas {
        tools::compile_schemas(&config.schema_dir()).await;
        report.steps.push(Step::CompileSchemas);
    }

    if config.validate_desktop_files {
        tools::validate_desktop_files(&config.applications_dir()).await?;
        report.steps.push(Step::ValidateDesktopFiles);
    }

    if let Some(services_dir) = &config.dbus_services_dir {
        report.miner_links = miners::register_miner_links(&config.datadir, services_dir).await?;
        report.steps.push(Step::RegisterMinerLinks);
    }

    Ok(report)
}
