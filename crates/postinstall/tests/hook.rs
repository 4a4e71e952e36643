use lumina_postinstall::{miners, run, HookConfig, HookError, Step};
use std::path::{Path, PathBuf};
use tokio::fs;

async fn setup_datadir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let datadir = dir.path().join("share");
    fs::create_dir_all(datadir.join("icons/hicolor/48x48/apps"))
        .await
        .unwrap();
    fs::create_dir_all(datadir.join("icons/hicolor/symbolic/apps"))
        .await
        .unwrap();
    (dir, datadir)
}

// Staged config so tests never shell out to the real system tools.
fn staged_config(datadir: &Path) -> HookConfig {
    let mut config = HookConfig::new(datadir);
    config.staged = true;
    config
}

#[tokio::test]
async fn relocation_strips_mangled_names() {
    let (_dir, datadir) = setup_datadir().await;
    let icon_dir = datadir.join("icons/hicolor/48x48/apps");
    fs::write(icon_dir.join("hicolor_apps_48x48_photos.png"), b"png")
        .await
        .unwrap();

    let report = run(&staged_config(&datadir)).await.unwrap();

    assert_eq!(report.renamed.len(), 1);
    assert!(icon_dir.join("photos.png").is_file());
    assert!(!icon_dir.join("hicolor_apps_48x48_photos.png").exists());
}

#[tokio::test]
async fn relocation_covers_nested_directories() {
    let (_dir, datadir) = setup_datadir().await;
    fs::write(
        datadir.join("icons/hicolor/48x48/apps/hicolor_apps_48x48_photos.png"),
        b"png",
    )
    .await
    .unwrap();
    fs::write(
        datadir.join("icons/hicolor/symbolic/apps/hicolor_apps_symbolic_photos-symbolic.svg"),
        b"svg",
    )
    .await
    .unwrap();

    let report = run(&staged_config(&datadir)).await.unwrap();

    assert_eq!(report.renamed.len(), 2);
    assert!(datadir.join("icons/hicolor/48x48/apps/photos.png").is_file());
    assert!(datadir
        .join("icons/hicolor/symbolic/apps/photos-symbolic.svg")
        .is_file());
}

#[tokio::test]
async fn second_run_is_a_noop() {
    let (_dir, datadir) = setup_datadir().await;
    let icon_dir = datadir.join("icons/hicolor/48x48/apps");
    fs::write(icon_dir.join("hicolor_apps_48x48_photos.png"), b"png")
        .await
        .unwrap();

    let config = staged_config(&datadir);
    let first = run(&config).await.unwrap();
    let second = run(&config).await.unwrap();

    assert_eq!(first.renamed.len(), 1);
    assert!(second.renamed.is_empty());
    assert!(icon_dir.join("photos.png").is_file());
}

#[tokio::test]
async fn unmangled_files_are_left_alone() {
    let (_dir, datadir) = setup_datadir().await;
    let icon_dir = datadir.join("icons/hicolor/48x48/apps");
    fs::write(icon_dir.join("photos.png"), b"png").await.unwrap();

    let report = run(&staged_config(&datadir)).await.unwrap();

    assert!(report.renamed.is_empty());
    assert!(icon_dir.join("photos.png").is_file());
}

#[tokio::test]
async fn stray_mangled_name_aborts() {
    let (_dir, datadir) = setup_datadir().await;
    let icon_dir = datadir.join("icons/hicolor/48x48/apps");
    fs::write(icon_dir.join("hicolor_garbage.png"), b"png")
        .await
        .unwrap();

    let result = run(&staged_config(&datadir)).await;

    assert!(matches!(result, Err(HookError::UnexpectedIconName(_))));
}

#[tokio::test]
async fn staged_install_skips_system_steps() {
    let (_dir, datadir) = setup_datadir().await;
    fs::create_dir_all(datadir.join("glib-2.0/schemas"))
        .await
        .unwrap();
    fs::create_dir_all(datadir.join("applications")).await.unwrap();

    let mut config = staged_config(&datadir);
    config.dbus_services_dir = Some(datadir.join("dbus-1/services"));
    let report = run(&config).await.unwrap();

    assert_eq!(report.steps, vec![Step::RelocateIcons]);
    assert!(report.miner_links.is_empty());
}

#[tokio::test]
async fn staged_install_can_skip_relocation_too() {
    let (_dir, datadir) = setup_datadir().await;
    let icon_dir = datadir.join("icons/hicolor/48x48/apps");
    fs::write(icon_dir.join("hicolor_apps_48x48_photos.png"), b"png")
        .await
        .unwrap();

    let mut config = staged_config(&datadir);
    config.relocate_when_staged = false;
    let report = run(&config).await.unwrap();

    assert!(report.steps.is_empty());
    assert!(icon_dir.join("hicolor_apps_48x48_photos.png").is_file());
}

#[tokio::test]
async fn missing_icon_dir_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let datadir = dir.path().join("share");
    fs::create_dir_all(&datadir).await.unwrap();

    let report = run(&staged_config(&datadir)).await.unwrap();

    assert!(report.renamed.is_empty());
}

#[tokio::test]
async fn miner_links_are_created_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let datadir = dir.path().join("share");
    let services_dir = datadir.join("dbus-1/services");
    fs::create_dir_all(datadir.join("tracker/miners")).await.unwrap();
    fs::create_dir_all(&services_dir).await.unwrap();
    for service in miners::MINER_SERVICES {
        fs::write(services_dir.join(format!("{service}.service")), b"[D-BUS Service]")
            .await
            .unwrap();
    }

    let first = miners::register_miner_links(&datadir, &services_dir)
        .await
        .unwrap();
    let second = miners::register_miner_links(&datadir, &services_dir)
        .await
        .unwrap();

    assert_eq!(first.len(), miners::MINER_SERVICES.len());
    assert_eq!(first, second);
    for link in &first {
        let target = fs::read_link(link).await.unwrap();
        assert!(target.starts_with(&services_dir));
        assert!(fs::metadata(link).await.unwrap().is_file());
    }
}

#[tokio::test]
async fn miner_links_fail_without_miners_dir() {
    let dir = tempfile::tempdir().unwrap();
    let datadir = dir.path().join("share");
    let services_dir = datadir.join("dbus-1/services");
    fs::create_dir_all(&services_dir).await.unwrap();

    let result = miners::register_miner_links(&datadir, &services_dir).await;

    assert!(matches!(result, Err(HookError::Io(_))));
}
