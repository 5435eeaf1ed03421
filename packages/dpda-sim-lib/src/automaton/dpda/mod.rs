use std::fmt::Display;

use hashbrown::HashSet;

use crate::{
    automaton::{
        Language, Letter, State,
        configuration::Configuration,
        transition::{Transition, TransitionTable},
    },
    config::SimulatorConfig,
    simulator::engine::DpdaSimulator,
};

pub mod builder;

/// The errors that make a definition unusable before any computation can run.
///
/// These are construction-time failures: the engine never sees a definition
/// that violates them. Determinism problems are not covered here; those are
/// diagnosed by the validator and are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The initial state is not a member of the state set.
    InitialStateUnknown(String),
    /// An accept state is not a member of the state set.
    AcceptStateUnknown(String),
    /// The initial stack symbol is not in the stack alphabet.
    InitialStackSymbolUnknown(String),
    MissingStates,
    MissingInitialState,
    MissingStackAlphabet,
    MissingInitialStackSymbol,
}

impl Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionError::InitialStateUnknown(state) => {
                write!(f, "initial state {} not in states", state)
            }
            DefinitionError::AcceptStateUnknown(state) => {
                write!(f, "accept state {} not in states", state)
            }
            DefinitionError::InitialStackSymbolUnknown(symbol) => {
                write!(f, "initial stack symbol {} not in stack alphabet", symbol)
            }
            DefinitionError::MissingStates => write!(f, "states not set"),
            DefinitionError::MissingInitialState => write!(f, "initial state not set"),
            DefinitionError::MissingStackAlphabet => write!(f, "stack alphabet not set"),
            DefinitionError::MissingInitialStackSymbol => {
                write!(f, "initial stack symbol not set")
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

/// The formal definition of a deterministic pushdown automaton.
///
/// Built once and immutable thereafter. Construction checks the membership
/// invariants (initial state, accept states, initial stack symbol) and fails
/// fast with a [DefinitionError]; everything beyond that, in particular the
/// determinism properties, is left to [crate::validation::validate].
#[derive(Debug, Clone)]
pub struct Dpda<Q: State, S: Letter> {
    states: HashSet<Q>,
    input_alphabet: HashSet<S>,
    stack_alphabet: HashSet<S>,
    initial_state: Q,
    initial_stack_symbol: S,
    accept_states: HashSet<Q>,
    transitions: Vec<Transition<Q, S>>,
    table: TransitionTable<Q, S>,
}

impl<Q: State, S: Letter> Dpda<Q, S> {
    pub fn new(
        states: HashSet<Q>,
        input_alphabet: HashSet<S>,
        stack_alphabet: HashSet<S>,
        initial_state: Q,
        initial_stack_symbol: S,
        accept_states: HashSet<Q>,
        transitions: Vec<Transition<Q, S>>,
    ) -> Result<Self, DefinitionError> {
        if !states.contains(&initial_state) {
            return Err(DefinitionError::InitialStateUnknown(format!(
                "{:?}",
                initial_state
            )));
        }

        for state in &accept_states {
            if !states.contains(state) {
                return Err(DefinitionError::AcceptStateUnknown(format!("{:?}", state)));
            }
        }

        if !stack_alphabet.contains(&initial_stack_symbol) {
            return Err(DefinitionError::InitialStackSymbolUnknown(format!(
                "{:?}",
                initial_stack_symbol
            )));
        }

        let table = TransitionTable::new(transitions.clone());

        Ok(Dpda {
            states,
            input_alphabet,
            stack_alphabet,
            initial_state,
            initial_stack_symbol,
            accept_states,
            transitions,
            table,
        })
    }

    pub fn states(&self) -> &HashSet<Q> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &HashSet<S> {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &HashSet<S> {
        &self.stack_alphabet
    }

    pub fn initial_state(&self) -> &Q {
        &self.initial_state
    }

    pub fn initial_stack_symbol(&self) -> &S {
        &self.initial_stack_symbol
    }

    pub fn accept_states(&self) -> &HashSet<Q> {
        &self.accept_states
    }

    pub fn transitions(&self) -> &[Transition<Q, S>] {
        &self.transitions
    }

    pub fn table(&self) -> &TransitionTable<Q, S> {
        &self.table
    }

    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accept_states.contains(state)
    }

    /// The unique rule applicable to `(state, input_symbol, stack_top)`, per
    /// the table's probe order.
    pub fn transition_for(
        &self,
        state: &Q,
        input_symbol: Option<&S>,
        stack_top: Option<&S>,
    ) -> Option<&Transition<Q, S>> {
        self.table.lookup(state, input_symbol, stack_top)
    }

    /// The configuration a run starts from: initial state, the full input,
    /// and a stack holding just the initial stack symbol.
    pub fn initial_configuration(&self, input: &[S]) -> Configuration<Q, S> {
        Configuration::new(
            self.initial_state.clone(),
            input.to_vec(),
            vec![self.initial_stack_symbol.clone()],
        )
    }
}

impl<Q: State, S: Letter> Display for Dpda<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DPDA(states={}, alphabet={}, transitions={})",
            self.states.len(),
            self.input_alphabet.len(),
            self.transitions.len()
        )
    }
}

impl<Q: State, S: Letter> Language for Dpda<Q, S> {
    type Letter = S;

    fn accepts(&self, input: &[S]) -> bool {
        let config = SimulatorConfig::default().with_record_trace(false);
        DpdaSimulator::new(self, config).run(input).accepted
    }
}
