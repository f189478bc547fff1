//! Property-based tests for the session state machine
//!
//! Invariants:
//! 1. Every accepted transition lands in a valid state with valid effects
//! 2. `Terminated` is absorbing
//! 3. N non-exit turns append exactly 2N turns, alternating user/assistant
//! 4. Exit detection ignores ASCII case and surrounding whitespace

use super::*;
use crate::conversation::{Role, Turn};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Operator text that is never an exit keyword
fn arb_chat_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.!?,]{0,60}".prop_filter("not an exit keyword", |s| !is_exit_command(s))
}

/// An exit keyword with random casing and padding
fn arb_exit_text() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("quit"), Just("exit"), Just("q")],
        proptest::collection::vec(any::<bool>(), 4),
        "[ \t]{0,3}",
        "[ \t]{0,3}",
    )
        .prop_map(|(word, upper, pre, post)| {
            let cased: String = word
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("{pre}{cased}{post}")
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_chat_text().prop_map(|text| Event::OperatorLine { text }),
        1 => arb_exit_text().prop_map(|text| Event::OperatorLine { text }),
        1 => Just(Event::InputClosed),
        4 => arb_chat_text().prop_map(|text| Event::Reply { turn: Turn::assistant(text) }),
    ]
}

// ============================================================================
// Invariant checkers
// ============================================================================

fn effects_are_valid(effects: &[Effect], state: &SessionState) -> bool {
    match state {
        SessionState::Terminated { .. } => effects == [Effect::PrintFarewell],
        SessionState::Running {
            phase: TurnPhase::AwaitingReply,
        } => {
            matches!(
                effects,
                [Effect::AppendTurn { turn }, Effect::RequestReply] if turn.role == Role::User
            )
        }
        SessionState::Running {
            phase: TurnPhase::AwaitingInput,
        } => {
            matches!(
                effects,
                [Effect::PrintReply { text }, Effect::AppendTurn { turn }]
                    if turn.role == Role::Assistant && *text == turn.text
            )
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = SessionState::default();

        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
                prop_assert!(
                    effects_are_valid(&result.effects, &state),
                    "Invalid effects for state {:?}: {:?}",
                    state,
                    result.effects
                );
            }
        }
    }

    #[test]
    fn prop_terminated_is_absorbing(
        reason in prop_oneof![Just(TerminationReason::Quit), Just(TerminationReason::InputClosed)],
        event in arb_event(),
    ) {
        let state = SessionState::Terminated { reason };
        prop_assert_eq!(transition(&state, event).unwrap_err(), TransitionError::Terminated);
    }

    #[test]
    fn prop_n_turns_append_2n_alternating(inputs in proptest::collection::vec(arb_chat_text(), 0..25)) {
        let mut state = SessionState::default();
        let mut log: Vec<Turn> = Vec::new();

        for (i, text) in inputs.iter().enumerate() {
            let reply = Turn::assistant(format!("reply {i}"));
            for event in [Event::operator_line(text), Event::Reply { turn: reply }] {
                let result = transition(&state, event).unwrap();
                state = result.new_state;
                for effect in result.effects {
                    if let Effect::AppendTurn { turn } = effect {
                        log.push(turn);
                    }
                }
            }
        }

        prop_assert!(state.awaiting_input());
        prop_assert_eq!(log.len(), 2 * inputs.len());
        for (i, turn) in log.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            prop_assert_eq!(turn.role, expected);
        }
    }

    #[test]
    fn prop_exit_keyword_any_casing(text in arb_exit_text()) {
        prop_assert!(is_exit_command(&text));
        let result = transition(&SessionState::default(), Event::operator_line(&text)).unwrap();
        prop_assert_eq!(
            result.new_state,
            SessionState::Terminated { reason: TerminationReason::Quit }
        );
    }
}
