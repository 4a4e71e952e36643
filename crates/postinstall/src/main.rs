use clap::Parser;
use lumina_postinstall::config::{resolve_datadir, DESTDIR_ENV};
use lumina_postinstall::{run, HookConfig};
use std::path::PathBuf;

/// Post-install housekeeping for the Lumina photo application.
#[derive(Parser, Debug)]
#[command(name = "lumina-postinstall")]
struct Cli {
    /// Install data root (e.g. /usr/share).
    datadir: PathBuf,

    /// Directory containing the installed D-Bus .service files. When given,
    /// tracker miner symlinks are registered against it.
    dbus_services_dir: Option<PathBuf>,

    /// Leave mangled icon file names untouched.
    #[arg(long)]
    skip_icon_relocation: bool,

    /// Do not refresh the icon-theme cache.
    #[arg(long)]
    skip_icon_cache: bool,

    /// Do not compile settings schemas.
    #[arg(long)]
    skip_schemas: bool,

    /// Do not validate installed desktop entries.
    #[arg(long)]
    skip_desktop_validation: bool,

    /// Skip icon relocation under a staged (DESTDIR) install as well.
    #[arg(long)]
    skip_relocation_when_staged: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let destdir = std::env::var(DESTDIR_ENV).ok();
    let staged = destdir.as_deref().is_some_and(|root| !root.is_empty());

    let mut config = HookConfig::new(resolve_datadir(destdir.as_deref(), &cli.datadir));
    config.dbus_services_dir = cli.dbus_services_dir;
    config.staged = staged;
    config.relocate_icons = !cli.skip_icon_relocation;
    config.refresh_icon_cache = !cli.skip_icon_cache;
    config.compile_schemas = !cli.skip_schemas;
    config.validate_desktop_files = !cli.skip_desktop_validation;
    config.relocate_when_staged = !cli.skip_relocation_when_staged;

    let report = run(&config).await?;
    tracing::info!(
        "Post-install complete: {} step(s), {} icon(s) relocated",
        report.steps.len(),
        report.renamed.len()
    );

    Ok(())
}
