use std::time::Duration as StdDuration;

use duskr::error::ExecutionError;
use duskr::sink::TemperatureSink;
use duskr::transition::Ramp;
use proptest::prelude::*;

struct RecordingSink {
    invocations: Vec<String>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            invocations: Vec::new(),
        }
    }
}

impl TemperatureSink for RecordingSink {
    fn apply(&mut self, value: &str) -> Result<(), ExecutionError> {
        self.invocations.push(value.to_string());
        Ok(())
    }
}

fn instant(current: i32, target: i32, duration: u32) -> Ramp {
    Ramp::new(current, target, duration).with_step_delay(StdDuration::ZERO)
}

#[test]
fn test_instant_change_is_one_absolute_invocation() {
    let mut sink = RecordingSink::new();
    let reached = instant(6500, 3000, 0).run(&mut sink).unwrap();

    assert_eq!(sink.invocations, vec!["3000"]);
    assert_eq!(reached, 3000);
}

#[test]
fn test_sunrise_ramp_from_night_values() {
    // (6500 - 3000) / 10 = 350, dividing evenly
    let mut sink = RecordingSink::new();
    let reached = instant(3000, 6500, 10).run(&mut sink).unwrap();

    assert_eq!(sink.invocations, vec!["+350"; 10]);
    assert_eq!(reached, 6500);
}

#[test]
fn test_uneven_delta_leaves_residual() {
    // delta 355 over 10 steps lands 5 short of the target
    let mut sink = RecordingSink::new();
    let reached = instant(6145, 6500, 10).run(&mut sink).unwrap();

    assert_eq!(sink.invocations, vec!["+35"; 10]);
    assert_eq!(reached, 6495);
}

proptest! {
    /// The emitted step always equals truncating integer division of the
    /// delta, and exactly `duration` invocations go out.
    #[test]
    fn prop_step_count_and_value(
        current in -20_000i32..20_000,
        target in -20_000i32..20_000,
        duration in 1u32..120,
    ) {
        let ramp = instant(current, target, duration);
        let expected_step = (target - current) / duration as i32;
        prop_assert_eq!(ramp.step(), expected_step);

        let mut sink = RecordingSink::new();
        let reached = ramp.run(&mut sink).unwrap();

        prop_assert_eq!(sink.invocations.len(), duration as usize);
        let delta = format!("{expected_step:+}");
        prop_assert!(sink.invocations.iter().all(|v| v == &delta));
        prop_assert_eq!(reached, current + expected_step * duration as i32);
    }

    /// Zero duration always produces exactly one absolute invocation,
    /// never a delta.
    #[test]
    fn prop_zero_duration_is_absolute(
        current in -20_000i32..20_000,
        target in -20_000i32..20_000,
    ) {
        let mut sink = RecordingSink::new();
        let reached = instant(current, target, 0).run(&mut sink).unwrap();

        prop_assert_eq!(sink.invocations.len(), 1);
        prop_assert_eq!(&sink.invocations[0], &target.to_string());
        prop_assert!(!sink.invocations[0].starts_with('+'));
        prop_assert_eq!(reached, target);
    }

    /// The residual after a ramp is always below the step magnitude; the
    /// engine never overshoots and never corrects.
    #[test]
    fn prop_residual_is_bounded_by_step(
        current in -20_000i32..20_000,
        target in -20_000i32..20_000,
        duration in 1u32..120,
    ) {
        let ramp = instant(current, target, duration);
        let residual = target - ramp.reached();

        // Residual carries the sign of the delta and stays within one
        // duration's worth of truncation loss.
        prop_assert!(residual.abs() < duration as i32);
        if target >= current {
            prop_assert!(residual >= 0);
        } else {
            prop_assert!(residual <= 0);
        }
    }
}
