//! Governable timelock parameters.
//!
//! The timelock windows are themselves subject to the timelock: a
//! `ParameterChange` proposal must sit through the current windows before
//! the new value applies.

use serde::{Deserialize, Serialize};
use weave_types::GovernanceParams;

/// Enum of the parameters a `ParameterChange` proposal can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernableParam {
    ObjectionWindowSecs,
    ExecutionDelaySecs,
}

impl GovernableParam {
    /// Human-readable name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ObjectionWindowSecs => "objection_window_secs",
            Self::ExecutionDelaySecs => "execution_delay_secs",
        }
    }

    /// Current value in a parameter set.
    pub fn current(&self, params: &GovernanceParams) -> u64 {
        match self {
            Self::ObjectionWindowSecs => params.objection_window_secs,
            Self::ExecutionDelaySecs => params.execution_delay_secs,
        }
    }

    /// Apply a new value to a parameter set.
    pub fn apply(&self, params: &mut GovernanceParams, value: u64) {
        match self {
            Self::ObjectionWindowSecs => params.objection_window_secs = value,
            Self::ExecutionDelaySecs => params.execution_delay_secs = value,
        }
    }
}
