//! End-to-end smoke runs against a live desktop session.
//!
//! These need a session bus, an AT-SPI registry and the application (either
//! installed for bus activation or pointed at via LUMINA_TEST_BUILDDIR), so
//! they are ignored by default:
//!
//!     cargo test -p lumina-uitest -- --ignored

use lumina_uitest::{Harness, HarnessResult, Node};
use std::time::Duration;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

const NAV_BUTTONS: [&str; 3] = ["Albums", "Photos", "Favorites"];

async fn click_navigation_buttons(harness: &Harness, app: &Node) -> HarnessResult<()> {
    for label in NAV_BUTTONS {
        let button = harness.find_widget(app, label, LOOKUP_TIMEOUT).await?;
        button.click().await?;
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires a session bus, an AT-SPI registry and the application"]
async fn navigates_between_main_views() {
    let harness = Harness::new();

    let run = async {
        let app = harness.start().await?;
        click_navigation_buttons(&harness, &app).await
    }
    .await;

    // Teardown runs regardless of how the drive went.
    let quit = harness.fini().await;

    run.unwrap();
    quit.unwrap();
}

#[tokio::test]
#[ignore = "requires a session bus, an AT-SPI registry and the application"]
async fn waits_for_layout_before_clicking() {
    let harness = Harness::new();

    let run = async {
        let app = harness.start().await?;

        // Give layout a chance to settle before the first click so the
        // button is actually on screen.
        let first = harness
            .find_widget(&app, NAV_BUTTONS[0], LOOKUP_TIMEOUT)
            .await?;
        lumina_uitest::poll_until(LOOKUP_TIMEOUT, "settled button extents", || {
            let first = first.clone();
            async move {
                Ok(if first.has_settled_extents().await {
                    Some(())
                } else {
                    None
                })
            }
        })
        .await?;

        click_navigation_buttons(&harness, &app).await
    }
    .await;

    let quit = harness.fini().await;

    run.unwrap();
    quit.unwrap();
}
