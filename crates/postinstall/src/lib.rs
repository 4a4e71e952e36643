//! Post-install housekeeping for the Lumina photo application.
//!
//! After files have been staged into an install prefix, the hook renames
//! build-mangled icon files back to their canonical names, refreshes the icon
//! cache, compiles settings schemas, validates desktop entries and registers
//! the tracker miner service symlinks. Which steps run is controlled by
//! [`HookConfig`]; staged installs (`DESTDIR` set) skip every step that
//! touches the live system.

pub mod config;
pub mod error;
pub mod hook;
pub mod icons;
pub mod miners;
pub mod tools;

pub use config::HookConfig;
pub use error::{HookError, HookResult};
pub use hook::{run, HookReport, Step};
pub use icons::IconPattern;
