use crate::{
    automaton::{Letter, State, configuration::Configuration, dpda::Dpda},
    config::SimulatorConfig,
    logger::Logger,
    simulator::{ComputationResult, RejectionReason},
};

/// Executes the DPDA step relation to decide acceptance of an input word.
///
/// The simulator borrows an immutable definition and holds no run state of
/// its own; every [DpdaSimulator::run] builds a fresh configuration chain, so
/// one simulator may serve any number of runs and concurrent callers only
/// need their own definitions.
///
/// The simulator does not re-validate determinism. With a definition that
/// never passed [crate::validation::validate], lookups still yield at most
/// one rule each thanks to the table's probe order, so runs stay well-defined
/// but may not reflect the automaton the caller intended.
pub struct DpdaSimulator<'a, Q: State, S: Letter> {
    dpda: &'a Dpda<Q, S>,
    config: SimulatorConfig,
    logger: Option<&'a Logger>,
}

impl<'a, Q: State, S: Letter> DpdaSimulator<'a, Q, S> {
    pub fn new(dpda: &'a Dpda<Q, S>, config: SimulatorConfig) -> Self {
        DpdaSimulator {
            dpda,
            config,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: &'a Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Executes a single step, or returns [None] when no rule applies. The
    /// caller decides what a stuck configuration means.
    pub fn step(&self, config: &Configuration<Q, S>) -> Option<Configuration<Q, S>> {
        let transition = self.dpda.transition_for(
            &config.state,
            config.next_input_symbol(),
            config.stack_top(),
        )?;

        let remaining_input = if transition.is_epsilon() {
            config.remaining_input.clone()
        } else {
            // A non-epsilon rule only matched because an input symbol was
            // present, so the slice below is never out of bounds.
            config.remaining_input[1..].to_vec()
        };

        // A concrete stack requirement only ever comes back from an exact
        // probe, so it equals the current top; `None` leaves the stack alone.
        let rest = match &transition.stack_top {
            Some(expected) if config.stack_top() == Some(expected) => &config.stack[1..],
            _ => &config.stack[..],
        };

        let mut stack = transition.push.clone();
        stack.extend_from_slice(rest);

        Some(Configuration::new(
            transition.to_state.clone(),
            remaining_input,
            stack,
        ))
    }

    /// Runs the automaton on `input` until it accepts, gets stuck, or the
    /// step bound runs out.
    ///
    /// Acceptance is greedy: a configuration with empty remaining input in an
    /// accept state wins immediately, even if a further transition exists.
    pub fn run(&self, input: &[S]) -> ComputationResult<Q, S> {
        let max_steps = self.config.effective_max_steps();
        let record_trace = self.config.record_trace;

        let mut config = self.dpda.initial_configuration(input);
        let mut trace = Vec::new();
        if record_trace {
            trace.push(config.clone());
        }
        if let Some(logger) = self.logger {
            logger.debug(&format!("start: {:?}", config));
        }

        let mut steps = 0u64;

        while steps < max_steps {
            if !config.has_input() && self.dpda.is_accepting(&config.state) {
                tracing::debug!(steps, state = ?config.state, "accepted");
                return ComputationResult::accept(config.state, trace, steps);
            }

            let Some(next) = self.step(&config) else {
                let reason = if config.has_input() {
                    RejectionReason::InputNotConsumed
                } else {
                    RejectionReason::NoValidTransition
                };
                tracing::debug!(steps, state = ?config.state, %reason, "rejected");
                return ComputationResult::reject(config.state, trace, steps, reason);
            };

            if record_trace {
                trace.push(next.clone());
            }
            if let Some(logger) = self.logger {
                logger.debug(&format!("step {}: {:?}", steps + 1, next));
            }

            config = next;
            steps += 1;
        }

        tracing::debug!(steps, state = ?config.state, "step bound exceeded");
        ComputationResult::reject(
            config.state,
            trace,
            steps,
            RejectionReason::MaxStepsExceeded,
        )
    }
}
