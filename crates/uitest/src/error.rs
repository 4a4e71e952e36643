use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Bus error: {0}")]
    Bus(#[from] zbus::Error),

    #[error("Value error: {0}")]
    Value(#[from] zbus::zvariant::Error),

    #[error("Failed to spawn application: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Action rejected by {0}")]
    ActionRejected(String),

    #[error("Timed out after {0:?} waiting for {1}")]
    Timeout(Duration, String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
