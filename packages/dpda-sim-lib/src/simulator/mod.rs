use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::automaton::{Letter, State, configuration::Configuration};

pub mod engine;

/// Why a run ended without accepting. Rejection is a normal computation
/// outcome, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The machine got stuck with input left to read.
    InputNotConsumed,
    /// The machine got stuck on empty input in a non-accept state.
    NoValidTransition,
    /// The step bound ran out, the only guard against epsilon cycles.
    MaxStepsExceeded,
}

impl Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::InputNotConsumed => write!(f, "Input not fully consumed"),
            RejectionReason::NoValidTransition => write!(f, "No valid transition"),
            RejectionReason::MaxStepsExceeded => write!(f, "Maximum steps exceeded"),
        }
    }
}

/// The outcome of running a DPDA on one input word.
///
/// `trace` is the exact configuration-by-configuration history of the run,
/// starting with the initial configuration, and is empty when trace recording
/// is disabled in the simulator config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputationResult<Q: State, S: Letter> {
    pub accepted: bool,
    pub final_state: Q,
    pub trace: Vec<Configuration<Q, S>>,
    pub steps_taken: u64,
    pub rejection_reason: Option<RejectionReason>,
}

impl<Q: State, S: Letter> ComputationResult<Q, S> {
    pub fn accept(final_state: Q, trace: Vec<Configuration<Q, S>>, steps_taken: u64) -> Self {
        ComputationResult {
            accepted: true,
            final_state,
            trace,
            steps_taken,
            rejection_reason: None,
        }
    }

    pub fn reject(
        final_state: Q,
        trace: Vec<Configuration<Q, S>>,
        steps_taken: u64,
        reason: RejectionReason,
    ) -> Self {
        ComputationResult {
            accepted: false,
            final_state,
            trace,
            steps_taken,
            rejection_reason: Some(reason),
        }
    }

    /// The configuration the run halted on, if a trace was recorded.
    pub fn final_configuration(&self) -> Option<&Configuration<Q, S>> {
        self.trace.last()
    }
}

impl<Q: State, S: Letter> Display for ComputationResult<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.accepted { "ACCEPTED" } else { "REJECTED" };
        write!(
            f,
            "{} in {} steps, final state: {:?}",
            status, self.steps_taken, self.final_state
        )
    }
}

/// The serialization mirror of [ComputationResult], with the rejection reason
/// flattened to its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableComputationResult<Q: State, S: Letter> {
    pub accepted: bool,
    pub final_state: Q,
    pub steps_taken: u64,
    pub rejection_reason: Option<String>,
    pub trace: Vec<Configuration<Q, S>>,
}

impl<Q: State, S: Letter> From<ComputationResult<Q, S>> for SerializableComputationResult<Q, S> {
    fn from(result: ComputationResult<Q, S>) -> Self {
        SerializableComputationResult {
            accepted: result.accepted,
            final_state: result.final_state,
            steps_taken: result.steps_taken,
            rejection_reason: result.rejection_reason.map(|r| r.to_string()),
            trace: result.trace,
        }
    }
}
