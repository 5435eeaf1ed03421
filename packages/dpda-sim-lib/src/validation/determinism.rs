use hashbrown::{HashMap, HashSet, hash_map::Entry};
use itertools::Itertools;

use crate::{
    automaton::{Letter, State, dpda::Dpda, transition::TransitionKey},
    validation::DeterminismViolation,
};

/// Property (a): at most one transition per `(state, input, stack top)` key.
pub(crate) fn check_key_uniqueness<Q: State, S: Letter>(
    dpda: &Dpda<Q, S>,
    violations: &mut Vec<DeterminismViolation<Q, S>>,
) {
    let mut seen: HashMap<TransitionKey<Q, S>, &Q> = HashMap::new();

    for transition in dpda.transitions() {
        match seen.entry(transition.key()) {
            Entry::Occupied(entry) => violations.push(DeterminismViolation::DuplicateKey {
                from: transition.from_state.clone(),
                input_symbol: transition.input_symbol.clone(),
                stack_top: transition.stack_top.clone(),
                first_target: (*entry.get()).clone(),
                second_target: transition.to_state.clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(&transition.to_state);
            }
        }
    }
}

/// Property (b): for each `(state, stack top)` context, transitions are all
/// epsilon-on-input or all non-epsilon, never a mix. Otherwise the automaton
/// would face an ambiguous choice whenever that stack symbol is on top and
/// input remains.
pub(crate) fn check_epsilon_mixing<Q: State, S: Letter>(
    dpda: &Dpda<Q, S>,
    violations: &mut Vec<DeterminismViolation<Q, S>>,
) {
    let groups = dpda
        .transitions()
        .iter()
        .map(|t| ((t.from_state.clone(), t.stack_top.clone()), t.is_epsilon()))
        .into_group_map();

    for ((from, stack_top), epsilon_flags) in groups
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
    {
        let has_epsilon = epsilon_flags.iter().any(|&e| e);
        let has_non_epsilon = epsilon_flags.iter().any(|&e| !e);

        if has_epsilon && has_non_epsilon {
            violations.push(DeterminismViolation::EpsilonMix { from, stack_top });
        }
    }
}

/// Property (c): the epsilon transitions of a state must have pairwise
/// distinct stack requirements, and a requirement-free epsilon rule admits no
/// siblings at all since it shadows every stack symbol.
pub(crate) fn check_epsilon_stack_overlap<Q: State, S: Letter>(
    dpda: &Dpda<Q, S>,
    violations: &mut Vec<DeterminismViolation<Q, S>>,
) {
    let groups = dpda
        .transitions()
        .iter()
        .filter(|t| t.is_epsilon())
        .map(|t| (t.from_state.clone(), t.stack_top.clone()))
        .into_group_map();

    for (from, stack_tops) in groups
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
    {
        if stack_tops.len() > 1 && stack_tops.iter().any(Option::is_none) {
            violations.push(DeterminismViolation::EpsilonShadow { from: from.clone() });
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for stack_top in stack_tops.into_iter().flatten() {
            if !seen.insert(stack_top.clone()) && reported.insert(stack_top.clone()) {
                violations.push(DeterminismViolation::EpsilonOverlap {
                    from: from.clone(),
                    stack_top,
                });
            }
        }
    }
}

/// Property (d): every state and symbol a transition mentions is a member of
/// the corresponding set of the definition.
pub(crate) fn check_referential_integrity<Q: State, S: Letter>(
    dpda: &Dpda<Q, S>,
    violations: &mut Vec<DeterminismViolation<Q, S>>,
) {
    for transition in dpda.transitions() {
        if !dpda.states().contains(&transition.from_state) {
            violations.push(DeterminismViolation::UnknownFromState(
                transition.from_state.clone(),
            ));
        }

        if !dpda.states().contains(&transition.to_state) {
            violations.push(DeterminismViolation::UnknownToState(
                transition.to_state.clone(),
            ));
        }

        if let Some(symbol) = &transition.input_symbol
            && !dpda.input_alphabet().contains(symbol)
        {
            violations.push(DeterminismViolation::UnknownInputSymbol(symbol.clone()));
        }

        if let Some(symbol) = &transition.stack_top
            && !dpda.stack_alphabet().contains(symbol)
        {
            violations.push(DeterminismViolation::UnknownStackSymbol(symbol.clone()));
        }

        for symbol in &transition.push {
            if !dpda.stack_alphabet().contains(symbol) {
                violations.push(DeterminismViolation::UnknownPushSymbol(symbol.clone()));
            }
        }
    }
}
