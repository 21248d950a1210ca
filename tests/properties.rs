//! Property tests for the countdown state machine

use proptest::prelude::*;

use reality_switch::platform::ManualTicker;
use reality_switch::{SessionState, TimerConfig};

fn session(initial: u32, penalty: u32) -> (SessionState, ManualTicker) {
    let ticker = ManualTicker::new();
    let config = TimerConfig::new(initial as i64, penalty as i64).unwrap();
    (SessionState::new(config, Box::new(ticker.clone())), ticker)
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Stop,
    Reset,
    Penalty,
    Advance(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Stop),
        Just(Op::Reset),
        Just(Op::Penalty),
        (0u8..30).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn countdown_never_goes_below_zero(initial in 1u32..200, t in 0u64..400) {
        let (mut s, ticker) = session(initial, 60);
        s.start();
        ticker.advance(&mut s, t);

        let expected = (initial as u64).saturating_sub(t) as u32;
        prop_assert_eq!(s.time_left_secs(), expected);
        prop_assert_eq!(s.is_timer_running(), expected > 0);
    }

    #[test]
    fn penalty_is_saturating(time_left in 1u32..10_000, penalty in 1u32..10_000) {
        let (mut s, ticker) = session(time_left, penalty);
        let deducted = s.apply_penalty();
        prop_assert_eq!(s.time_left_secs(), time_left.saturating_sub(penalty));
        prop_assert_eq!(deducted, time_left - s.time_left_secs());
        prop_assert!(!s.is_timer_running());
        prop_assert_eq!(ticker.active_tasks(), 0);
    }

    #[test]
    fn at_most_one_tick_task(ops in proptest::collection::vec(op(), 0..60)) {
        let (mut s, ticker) = session(100, 7);
        for op in ops {
            let before = s.time_left_secs();
            let was_running = s.is_timer_running();
            match op {
                Op::Start => {
                    let started = s.start();
                    prop_assert_eq!(started, !was_running);
                }
                Op::Stop => s.stop(),
                Op::Reset => {
                    s.reset();
                    prop_assert_eq!(s.time_left_secs(), 100);
                    prop_assert!(s.cut_wires().is_empty());
                }
                Op::Penalty => {
                    s.apply_penalty();
                    prop_assert_eq!(s.time_left_secs(), before.saturating_sub(7));
                    prop_assert_eq!(s.is_timer_running(), was_running);
                }
                Op::Advance(secs) => {
                    ticker.advance(&mut s, secs as u64);
                    if was_running {
                        // One decrement per second, never double rate
                        let expected = before.saturating_sub(secs as u32);
                        prop_assert_eq!(s.time_left_secs(), expected);
                    } else {
                        prop_assert_eq!(s.time_left_secs(), before);
                    }
                }
            }
            prop_assert!(ticker.active_tasks() <= 1);
            prop_assert_eq!(ticker.active_tasks() == 1, s.is_timer_running());
        }
    }

    #[test]
    fn reset_always_returns_to_initial(
        initial in 1u32..5000,
        wires in proptest::collection::vec("[a-z]{1,6}", 0..5),
        run in 0u64..100,
        penalties in 0usize..5,
    ) {
        let (mut s, ticker) = session(initial, 60);
        s.start();
        ticker.advance(&mut s, run);
        for _ in 0..penalties {
            s.apply_penalty();
        }
        for wire in &wires {
            s.cut_wire(wire);
        }

        s.reset();
        prop_assert_eq!(s.time_left_secs(), initial);
        prop_assert!(!s.is_timer_running());
        prop_assert!(s.cut_wires().is_empty());
        prop_assert_eq!(ticker.active_tasks(), 0);
    }
}
