use dpda_sim_lib::{
    automaton::{
        dpda::{Dpda, builder::DpdaBuilder},
        transition::Transition,
    },
    validation::{self, DeterminismViolation},
};

fn t(
    from: &'static str,
    input: Option<char>,
    stack_top: Option<char>,
    to: &'static str,
    push: &[char],
) -> Transition<&'static str, char> {
    Transition::new(from, input, stack_top, to, push.to_vec())
}

fn base_builder() -> DpdaBuilder<&'static str, char> {
    DpdaBuilder::new()
        .with_states(["q0", "q1", "q2"])
        .with_input_alphabet(['0', '1'])
        .with_stack_alphabet(['Z', 'X'])
        .with_initial_state("q0")
        .with_initial_stack_symbol('Z')
        .with_accept_states(["q2"])
}

fn zeros_then_ones() -> Dpda<&'static str, char> {
    base_builder()
        .with_transition(t("q0", Some('0'), Some('Z'), "q0", &['X', 'Z']))
        .with_transition(t("q0", Some('0'), Some('X'), "q0", &['X', 'X']))
        .with_transition(t("q0", Some('1'), Some('X'), "q1", &[]))
        .with_transition(t("q1", Some('1'), Some('X'), "q1", &[]))
        .with_transition(t("q1", None, Some('Z'), "q2", &['Z']))
        .build()
        .unwrap()
}

#[test]
fn test_valid_dpda_passes() {
    let report = validation::validate(&zeros_then_ones());

    assert!(report.is_valid());
    assert!(report.violations().is_empty());
    assert!(report.messages().is_empty());
}

#[test]
fn test_property_a_duplicate_key() {
    let dpda = base_builder()
        .with_transition(t("q0", Some('0'), Some('Z'), "q1", &[]))
        .with_transition(t("q0", Some('0'), Some('Z'), "q2", &['X', 'Z']))
        .build()
        .unwrap();

    let report = validation::validate(&dpda);
    assert!(!report.is_valid());

    let duplicate = report
        .violations()
        .iter()
        .find(|v| matches!(v, DeterminismViolation::DuplicateKey { .. }))
        .unwrap();

    match duplicate {
        DeterminismViolation::DuplicateKey {
            from,
            first_target,
            second_target,
            ..
        } => {
            assert_eq!(*from, "q0");
            assert_eq!(*first_target, "q1");
            assert_eq!(*second_target, "q2");
        }
        _ => unreachable!(),
    }

    assert!(
        report
            .messages()
            .iter()
            .any(|m| m.contains("Property (a)"))
    );
}

#[test]
fn test_property_b_epsilon_mix() {
    let dpda = base_builder()
        .with_transition(t("q0", Some('0'), Some('Z'), "q1", &[]))
        .with_transition(t("q0", None, Some('Z'), "q2", &['Z']))
        .build()
        .unwrap();

    let report = validation::validate(&dpda);

    assert_eq!(report.violations().len(), 1);
    assert!(matches!(
        &report.violations()[0],
        DeterminismViolation::EpsilonMix {
            from: "q0",
            stack_top: Some('Z')
        }
    ));
    assert!(report.messages()[0].contains("Property (b)"));
}

#[test]
fn test_property_c_epsilon_overlap() {
    let dpda = base_builder()
        .with_transition(t("q0", None, Some('Z'), "q1", &[]))
        .with_transition(t("q0", None, Some('Z'), "q2", &['Z']))
        .build()
        .unwrap();

    let report = validation::validate(&dpda);
    assert!(!report.is_valid());

    // Sharing (state, epsilon, stack top) exactly also duplicates the lookup
    // key, so both (a) and (c) fire.
    assert!(
        report
            .violations()
            .iter()
            .any(|v| matches!(v, DeterminismViolation::DuplicateKey { .. }))
    );
    assert!(report.violations().iter().any(|v| matches!(
        v,
        DeterminismViolation::EpsilonOverlap {
            from: "q0",
            stack_top: 'Z'
        }
    )));
}

#[test]
fn test_property_c_epsilon_shadow() {
    let dpda = base_builder()
        .with_transition(t("q0", None, Some('Z'), "q1", &[]))
        .with_transition(t("q0", None, None, "q2", &[]))
        .build()
        .unwrap();

    let report = validation::validate(&dpda);

    assert_eq!(report.violations().len(), 1);
    assert!(matches!(
        &report.violations()[0],
        DeterminismViolation::EpsilonShadow { from: "q0" }
    ));
    assert!(report.messages()[0].contains("Property (c)"));
}

#[test]
fn test_property_d_referential_integrity() {
    let dpda = base_builder()
        .with_transition(t("q7", Some('0'), Some('Z'), "q8", &[]))
        .with_transition(t("q0", Some('9'), Some('W'), "q1", &['V', 'Z']))
        .build()
        .unwrap();

    let report = validation::validate(&dpda);

    let violations = report.violations();
    assert!(violations.contains(&DeterminismViolation::UnknownFromState("q7")));
    assert!(violations.contains(&DeterminismViolation::UnknownToState("q8")));
    assert!(violations.contains(&DeterminismViolation::UnknownInputSymbol('9')));
    assert!(violations.contains(&DeterminismViolation::UnknownStackSymbol('W')));
    assert!(violations.contains(&DeterminismViolation::UnknownPushSymbol('V')));
    assert_eq!(violations.len(), 5);

    assert!(report.messages().iter().all(|m| m.contains("Property (d)")));
}

#[test]
fn test_all_properties_are_collected() {
    // One violation of each property; none of them masks the others.
    let dpda = base_builder()
        .with_transition(t("q0", Some('0'), Some('Z'), "q1", &[]))
        .with_transition(t("q0", Some('0'), Some('Z'), "q2", &[])) // (a)
        .with_transition(t("q1", Some('1'), Some('X'), "q1", &[]))
        .with_transition(t("q1", None, Some('X'), "q2", &[])) // (b)
        .with_transition(t("q2", None, Some('Z'), "q0", &[]))
        .with_transition(t("q2", None, None, "q1", &[])) // (c)
        .with_transition(t("q9", Some('0'), Some('Z'), "q0", &[])) // (d)
        .build()
        .unwrap();

    let report = validation::validate(&dpda);
    let violations = report.violations();

    assert!(
        violations
            .iter()
            .any(|v| matches!(v, DeterminismViolation::DuplicateKey { .. }))
    );
    assert!(
        violations
            .iter()
            .any(|v| matches!(v, DeterminismViolation::EpsilonMix { .. }))
    );
    assert!(
        violations
            .iter()
            .any(|v| matches!(v, DeterminismViolation::EpsilonShadow { .. }))
    );
    assert!(
        violations
            .iter()
            .any(|v| matches!(v, DeterminismViolation::UnknownFromState(_)))
    );

    // Referential integrity is checked first, mirroring the validator's
    // fixed property order.
    assert!(matches!(
        violations[0],
        DeterminismViolation::UnknownFromState(_)
    ));
}
