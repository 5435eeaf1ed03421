use std::fmt::Display;

use crate::{
    automaton::{Letter, State, dpda::Dpda},
    utils::debug_or_epsilon,
};

mod determinism;

/// One structural determinism defect found in a definition.
///
/// The `(a)`-`(d)` tags match the four properties a transition set must
/// satisfy for the automaton to behave as a true DPDA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeterminismViolation<Q: State, S: Letter> {
    /// (a) Two transitions share the exact same lookup key.
    DuplicateKey {
        from: Q,
        input_symbol: Option<S>,
        stack_top: Option<S>,
        first_target: Q,
        second_target: Q,
    },
    /// (b) A `(state, stack top)` context owns both epsilon and non-epsilon
    /// transitions.
    EpsilonMix { from: Q, stack_top: Option<S> },
    /// (c) Two epsilon transitions from one state require the same stack top.
    EpsilonOverlap { from: Q, stack_top: S },
    /// (c) An epsilon transition with no stack requirement coexists with
    /// other epsilon transitions from the same state.
    EpsilonShadow { from: Q },
    /// (d) A transition leaves from a state that is not in the state set.
    UnknownFromState(Q),
    /// (d) A transition targets a state that is not in the state set.
    UnknownToState(Q),
    /// (d) A transition reads a symbol outside the input alphabet.
    UnknownInputSymbol(S),
    /// (d) A transition requires a stack symbol outside the stack alphabet.
    UnknownStackSymbol(S),
    /// (d) A transition pushes a symbol outside the stack alphabet.
    UnknownPushSymbol(S),
}

impl<Q: State, S: Letter> Display for DeterminismViolation<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeterminismViolation::DuplicateKey {
                from,
                input_symbol,
                stack_top,
                first_target,
                second_target,
            } => write!(
                f,
                "Property (a) violation: multiple transitions for ({:?}, {}, {}); found transitions to states {:?} and {:?}",
                from,
                debug_or_epsilon(input_symbol),
                debug_or_epsilon(stack_top),
                first_target,
                second_target
            ),
            DeterminismViolation::EpsilonMix { from, stack_top } => write!(
                f,
                "Property (b) violation: both epsilon and non-epsilon transitions from state {:?} with stack top {}",
                from,
                debug_or_epsilon(stack_top)
            ),
            DeterminismViolation::EpsilonOverlap { from, stack_top } => write!(
                f,
                "Property (c) violation: multiple epsilon transitions from state {:?} with the same stack top {:?}",
                from, stack_top
            ),
            DeterminismViolation::EpsilonShadow { from } => write!(
                f,
                "Property (c) violation: an epsilon transition from state {:?} with no stack requirement shadows the other epsilon transitions from that state",
                from
            ),
            DeterminismViolation::UnknownFromState(state) => write!(
                f,
                "Property (d) violation: transition from unknown state {:?}",
                state
            ),
            DeterminismViolation::UnknownToState(state) => write!(
                f,
                "Property (d) violation: transition to unknown state {:?}",
                state
            ),
            DeterminismViolation::UnknownInputSymbol(symbol) => write!(
                f,
                "Property (d) violation: transition reads input symbol {:?} that is not in the input alphabet",
                symbol
            ),
            DeterminismViolation::UnknownStackSymbol(symbol) => write!(
                f,
                "Property (d) violation: transition requires stack symbol {:?} that is not in the stack alphabet",
                symbol
            ),
            DeterminismViolation::UnknownPushSymbol(symbol) => write!(
                f,
                "Property (d) violation: transition pushes symbol {:?} that is not in the stack alphabet",
                symbol
            ),
        }
    }
}

/// The outcome of validating a definition. An invalid DPDA is data, not an
/// error: the report simply carries every violation that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport<Q: State, S: Letter> {
    violations: Vec<DeterminismViolation<Q, S>>,
}

impl<Q: State, S: Letter> ValidationReport<Q, S> {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[DeterminismViolation<Q, S>] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Statically checks the four determinism properties of a definition.
///
/// All four properties are always checked; a violation of one never
/// short-circuits the others, so the report lists everything at once.
pub fn validate<Q: State, S: Letter>(dpda: &Dpda<Q, S>) -> ValidationReport<Q, S> {
    let mut violations = Vec::new();

    determinism::check_referential_integrity(dpda, &mut violations);
    determinism::check_key_uniqueness(dpda, &mut violations);
    determinism::check_epsilon_mixing(dpda, &mut violations);
    determinism::check_epsilon_stack_overlap(dpda, &mut violations);

    tracing::debug!(
        violations = violations.len(),
        "validated {} transitions",
        dpda.transitions().len()
    );

    ValidationReport { violations }
}
