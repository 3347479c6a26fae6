//! Governance timing parameters.
//!
//! The two windows every proposal must sit through. They are policy values
//! the engine is parameterized by, not structural constants, and are
//! themselves governable via a `ParameterChange` proposal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid governance configuration, rejected before any engine is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("objection window must be nonzero")]
    ZeroObjectionWindow,

    #[error("execution delay must be nonzero")]
    ZeroExecutionDelay,
}

/// Timing configuration for the proposal timelock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum time a proposal must remain visible before it can be queued.
    pub objection_window_secs: u64,

    /// Minimum additional time a queued proposal must wait before it can
    /// take effect.
    pub execution_delay_secs: u64,
}

impl GovernanceParams {
    /// Two weeks — the intended live-network objection window.
    pub const DEFAULT_OBJECTION_WINDOW_SECS: u64 = 2 * 7 * 24 * 3600;

    /// 48 hours — the intended live-network execution delay.
    pub const DEFAULT_EXECUTION_DELAY_SECS: u64 = 2 * 24 * 3600;

    pub fn new(objection_window_secs: u64, execution_delay_secs: u64) -> Self {
        Self {
            objection_window_secs,
            execution_delay_secs,
        }
    }

    /// Reject degenerate windows. A zero window would collapse the
    /// timelock into immediate execution.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.objection_window_secs == 0 {
            return Err(ParamsError::ZeroObjectionWindow);
        }
        if self.execution_delay_secs == 0 {
            return Err(ParamsError::ZeroExecutionDelay);
        }
        Ok(())
    }
}

/// Default is the live-network configuration.
impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            objection_window_secs: Self::DEFAULT_OBJECTION_WINDOW_SECS,
            execution_delay_secs: Self::DEFAULT_EXECUTION_DELAY_SECS,
        }
    }
}
