use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::automaton::{Letter, State};

/// A single rule of the transition relation.
///
/// `input_symbol = None` makes this an epsilon transition: the rule fires
/// without consuming input. `stack_top = None` means the rule matches
/// regardless of the stack and pops nothing, which is different from popping a
/// symbol off an otherwise empty stack. `push` is ordered, its first element
/// becomes the new stack top; an empty `push` with a concrete `stack_top` is a
/// pure pop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition<Q: State, S: Letter> {
    pub from_state: Q,
    pub input_symbol: Option<S>,
    pub stack_top: Option<S>,
    pub to_state: Q,
    pub push: Vec<S>,
}

impl<Q: State, S: Letter> Transition<Q, S> {
    pub fn new(
        from_state: Q,
        input_symbol: Option<S>,
        stack_top: Option<S>,
        to_state: Q,
        push: Vec<S>,
    ) -> Self {
        Transition {
            from_state,
            input_symbol,
            stack_top,
            to_state,
            push,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.input_symbol.is_none()
    }

    pub fn is_pop_only(&self) -> bool {
        self.stack_top.is_some() && self.push.is_empty()
    }

    /// The lookup key this rule is filed under.
    pub fn key(&self) -> TransitionKey<Q, S> {
        (
            self.from_state.clone(),
            self.input_symbol.clone(),
            self.stack_top.clone(),
        )
    }
}

pub type TransitionKey<Q, S> = (Q, Option<S>, Option<S>);

/// An indexed collection of transition rules.
///
/// The table answers "which rule, if any, applies to (state, next input
/// symbol, stack top)?" using a fixed most-specific-first probe order. It does
/// not enforce key exclusivity; it stores whatever it is given and later
/// insertions overwrite earlier ones in the index. Diagnosing conflicting
/// rules is the determinism validator's job.
#[derive(Debug, Clone)]
pub struct TransitionTable<Q: State, S: Letter> {
    index: HashMap<TransitionKey<Q, S>, usize>,
    transitions: Vec<Transition<Q, S>>,
}

impl<Q: State, S: Letter> TransitionTable<Q, S> {
    pub fn new(transitions: Vec<Transition<Q, S>>) -> Self {
        let mut index = HashMap::with_capacity(transitions.len());

        for (i, transition) in transitions.iter().enumerate() {
            index.insert(transition.key(), i);
        }

        TransitionTable { index, transitions }
    }

    /// Returns the unique rule applicable to the given configuration key, or
    /// [None] if nothing matches.
    ///
    /// Probe order:
    /// 1. exact `(state, input_symbol, stack_top)`
    /// 2. `(state, input_symbol, None)`, a rule that ignores the stack
    /// 3. `(state, None, stack_top)`, an epsilon-on-input rule gated on this
    ///    stack symbol (only when an input symbol is present)
    /// 4. `(state, None, None)`, a fully epsilon rule (only when an input
    ///    symbol is present)
    pub fn lookup(
        &self,
        state: &Q,
        input_symbol: Option<&S>,
        stack_top: Option<&S>,
    ) -> Option<&Transition<Q, S>> {
        let exact = (state.clone(), input_symbol.cloned(), stack_top.cloned());
        if let Some(transition) = self.probe(&exact) {
            return Some(transition);
        }

        let any_stack = (state.clone(), input_symbol.cloned(), None);
        if let Some(transition) = self.probe(&any_stack) {
            return Some(transition);
        }

        if input_symbol.is_some() {
            let epsilon_input = (state.clone(), None, stack_top.cloned());
            if let Some(transition) = self.probe(&epsilon_input) {
                return Some(transition);
            }

            let epsilon_both = (state.clone(), None, None);
            if let Some(transition) = self.probe(&epsilon_both) {
                return Some(transition);
            }
        }

        None
    }

    fn probe(&self, key: &TransitionKey<Q, S>) -> Option<&Transition<Q, S>> {
        self.index.get(key).map(|&i| &self.transitions[i])
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition<Q, S>> {
        self.transitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_kinds() {
        let read = Transition::new("q0", Some('a'), Some('Z'), "q1", vec!['X', 'Z']);
        assert!(!read.is_epsilon());
        assert!(!read.is_pop_only());

        let pop = Transition::new("q0", None, Some('X'), "q0", vec![]);
        assert!(pop.is_epsilon());
        assert!(pop.is_pop_only());

        let noop = Transition::<&str, char>::new("q0", None, None, "q1", vec![]);
        assert!(!noop.is_pop_only());
    }
}
