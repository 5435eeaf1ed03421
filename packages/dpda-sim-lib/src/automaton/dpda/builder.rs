use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::automaton::{
    Letter, State,
    dpda::{DefinitionError, Dpda},
    transition::Transition,
};

/// Incremental construction of a [Dpda].
///
/// The builder accepts partial data in any order and only checks the
/// construction-time invariants when [DpdaBuilder::build] is called, so a
/// session layer can grow a definition piece by piece. Building does not
/// consume the builder; the produced [Dpda] is an independent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpdaBuilder<Q: State, S: Letter> {
    pub states: HashSet<Q>,
    pub input_alphabet: HashSet<S>,
    pub stack_alphabet: HashSet<S>,
    pub initial_state: Option<Q>,
    pub initial_stack_symbol: Option<S>,
    pub accept_states: HashSet<Q>,
    pub transitions: Vec<Transition<Q, S>>,
}

impl<Q: State, S: Letter> DpdaBuilder<Q, S> {
    pub fn new() -> Self {
        DpdaBuilder {
            states: HashSet::new(),
            input_alphabet: HashSet::new(),
            stack_alphabet: HashSet::new(),
            initial_state: None,
            initial_stack_symbol: None,
            accept_states: HashSet::new(),
            transitions: Vec::new(),
        }
    }

    pub fn with_states(mut self, states: impl IntoIterator<Item = Q>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    pub fn with_input_alphabet(mut self, alphabet: impl IntoIterator<Item = S>) -> Self {
        self.input_alphabet = alphabet.into_iter().collect();
        self
    }

    pub fn with_stack_alphabet(mut self, alphabet: impl IntoIterator<Item = S>) -> Self {
        self.stack_alphabet = alphabet.into_iter().collect();
        self
    }

    pub fn with_initial_state(mut self, state: Q) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_initial_stack_symbol(mut self, symbol: S) -> Self {
        self.initial_stack_symbol = Some(symbol);
        self
    }

    pub fn with_accept_states(mut self, states: impl IntoIterator<Item = Q>) -> Self {
        self.accept_states = states.into_iter().collect();
        self
    }

    pub fn with_transition(mut self, transition: Transition<Q, S>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn add_transition(&mut self, transition: Transition<Q, S>) {
        self.transitions.push(transition);
    }

    /// Removes the transition at `index`, returning it, or [None] if the
    /// index is out of range.
    pub fn remove_transition(&mut self, index: usize) -> Option<Transition<Q, S>> {
        if index < self.transitions.len() {
            Some(self.transitions.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.input_alphabet.clear();
        self.stack_alphabet.clear();
        self.initial_state = None;
        self.initial_stack_symbol = None;
        self.accept_states.clear();
        self.transitions.clear();
    }

    pub fn build(&self) -> Result<Dpda<Q, S>, DefinitionError> {
        if self.states.is_empty() {
            return Err(DefinitionError::MissingStates);
        }
        if self.stack_alphabet.is_empty() {
            return Err(DefinitionError::MissingStackAlphabet);
        }

        let initial_state = self
            .initial_state
            .clone()
            .ok_or(DefinitionError::MissingInitialState)?;
        let initial_stack_symbol = self
            .initial_stack_symbol
            .clone()
            .ok_or(DefinitionError::MissingInitialStackSymbol)?;

        Dpda::new(
            self.states.clone(),
            self.input_alphabet.clone(),
            self.stack_alphabet.clone(),
            initial_state,
            initial_stack_symbol,
            self.accept_states.clone(),
            self.transitions.clone(),
        )
    }
}

impl<Q: State, S: Letter> Default for DpdaBuilder<Q, S> {
    fn default() -> Self {
        DpdaBuilder::new()
    }
}
