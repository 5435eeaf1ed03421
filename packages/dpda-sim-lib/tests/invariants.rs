use dpda_sim_lib::{
    automaton::{
        dpda::{Dpda, builder::DpdaBuilder},
        transition::Transition,
    },
    config::SimulatorConfig,
    simulator::engine::DpdaSimulator,
};
use rand::{RngExt, SeedableRng, rngs::StdRng};

fn t(
    from: &'static str,
    input: Option<char>,
    stack_top: Option<char>,
    to: &'static str,
    push: &[char],
) -> Transition<&'static str, char> {
    Transition::new(from, input, stack_top, to, push.to_vec())
}

/// Accepts exactly { 0^n 1^n | n >= 1 }.
fn zeros_then_ones() -> Dpda<&'static str, char> {
    DpdaBuilder::new()
        .with_states(["q0", "q1", "q2"])
        .with_input_alphabet(['0', '1'])
        .with_stack_alphabet(['Z', 'X'])
        .with_initial_state("q0")
        .with_initial_stack_symbol('Z')
        .with_accept_states(["q2"])
        .with_transition(t("q0", Some('0'), Some('Z'), "q0", &['X', 'Z']))
        .with_transition(t("q0", Some('0'), Some('X'), "q0", &['X', 'X']))
        .with_transition(t("q0", Some('1'), Some('X'), "q1", &[]))
        .with_transition(t("q1", Some('1'), Some('X'), "q1", &[]))
        .with_transition(t("q1", None, Some('Z'), "q2", &['Z']))
        .build()
        .unwrap()
}

fn in_language(input: &[char]) -> bool {
    let zeros = input.iter().take_while(|&&c| c == '0').count();
    let ones = input.len() - zeros;

    zeros >= 1 && zeros == ones && input[zeros..].iter().all(|&c| c == '1')
}

#[test]
fn test_randomized_runs_uphold_the_invariants() {
    let dpda = zeros_then_ones();
    let config = SimulatorConfig::default().with_max_steps(100);
    let simulator = DpdaSimulator::new(&dpda, config);

    let mut r = StdRng::seed_from_u64(1);

    for _ in 0..200 {
        let len = r.random_range(0..20);
        let input: Vec<char> = (0..len)
            .map(|_| if r.random_bool(0.5) { '0' } else { '1' })
            .collect();

        let result = simulator.run(&input);

        // The engine agrees with the language the automaton was built for.
        assert_eq!(result.accepted, in_language(&input), "input {:?}", input);

        // Determinism: an identical run is indistinguishable.
        let again = simulator.run(&input);
        assert_eq!(result.accepted, again.accepted);
        assert_eq!(result.final_state, again.final_state);
        assert_eq!(result.steps_taken, again.steps_taken);
        assert_eq!(result.trace, again.trace);

        // Termination and trace shape.
        assert!(result.steps_taken <= 100);
        assert_eq!(result.trace.len() as u64, result.steps_taken + 1);
        assert_eq!(result.trace[0], dpda.initial_configuration(&input));

        for window in result.trace.windows(2) {
            let (before, after) = (&window[0], &window[1]);

            // The trace is exactly the step relation, nothing omitted.
            assert_eq!(simulator.step(before).as_ref(), Some(after));

            // Input shrinks by at most one symbol per step, never grows.
            assert!(after.remaining_input.len() <= before.remaining_input.len());
            assert!(before.remaining_input.len() - after.remaining_input.len() <= 1);

            // Stack arithmetic: old size minus pop plus push.
            let transition = dpda
                .transition_for(&before.state, before.next_input_symbol(), before.stack_top())
                .unwrap();
            let popped = usize::from(transition.stack_top.is_some());
            assert_eq!(
                after.stack.len(),
                before.stack.len() - popped + transition.push.len()
            );
        }
    }
}

#[test]
fn test_rejected_runs_still_terminate_within_the_bound() {
    let dpda = DpdaBuilder::new()
        .with_states(["q0"])
        .with_input_alphabet(['0'])
        .with_stack_alphabet(['Z'])
        .with_initial_state("q0")
        .with_initial_stack_symbol('Z')
        .with_accept_states([])
        .with_transition(t("q0", None, Some('Z'), "q0", &['Z']))
        .build()
        .unwrap();

    let mut r = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let max_steps = r.random_range(1..500);
        let config = SimulatorConfig::default().with_max_steps(max_steps);

        let result = DpdaSimulator::new(&dpda, config).run(&[]);

        assert!(!result.accepted);
        assert_eq!(result.steps_taken, max_steps);
        assert!(result.trace.len() as u64 <= max_steps + 1);
    }
}
