//! UI smoke-test fixture for the Lumina photo application.
//!
//! Drives the installed (or freshly built) application through the session
//! bus and the AT-SPI accessibility bus: [`Harness::start`] launches or
//! activates the app and returns its accessible root, [`a11y`] walks the
//! accessible tree and clicks widgets, [`Harness::fini`] asks the app to quit.

pub mod a11y;
pub mod bus;
pub mod error;
pub mod harness;
pub mod wait;

pub use a11y::{find_descendant_named, text_is, Node};
pub use bus::AppBus;
pub use error::{HarnessError, HarnessResult};
pub use harness::Harness;
pub use wait::poll_until;
