//! Worker group configuration

use crate::error::{CommError, CommResult};

/// Environment variable holding the default worker count
pub const WORKERS_ENV: &str = "BANDLABEL_WORKERS";

/// Size of a worker group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    /// Number of ranks, fixed for the lifetime of the world
    pub size: usize,
}

impl WorldConfig {
    /// Configuration with an explicit worker count
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Read the worker count from `BANDLABEL_WORKERS`
    ///
    /// Falls back to the machine's available parallelism when the variable
    /// is unset or not a positive integer.
    pub fn from_env() -> Self {
        match std::env::var(WORKERS_ENV) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => Self { size },
                _ => {
                    tracing::warn!(
                        "ignoring {}={:?}: expected a positive integer",
                        WORKERS_ENV,
                        value
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Reject a group without ranks
    pub fn validate(&self) -> CommResult<()> {
        if self.size == 0 {
            return Err(CommError::InvalidWorldSize { size: self.size });
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        let size = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { size }
    }
}
