//! Integration tests for the step accounting pipeline.

use step_sensor_agent::lifecycle::{FeedController, FeedError};
use step_sensor_agent::sampler::{CapabilityGate, SensorInventory, SensorSample};
use step_sensor_agent::Engine;

#[test]
fn test_monotone_counter_sequence_yields_total_delta() {
    let sequences: &[&[u64]] = &[
        &[0, 0, 0],
        &[100, 107, 250],
        &[4200, 4200, 4321],
        &[1, 2, 3],
    ];

    for seq in sequences {
        let mut engine = Engine::new();
        let mut last = engine.display();
        for &v in *seq {
            last = engine.handle(SensorSample::CumulativeSteps(v));
        }
        let expected = seq[seq.len() - 1] - seq[0];
        assert_eq!(last.session_steps, expected, "sequence {seq:?}");
    }
}

#[test]
fn test_first_reading_anchors_then_deltas_follow() {
    let mut engine = Engine::new();
    let state = engine.handle(SensorSample::CumulativeSteps(100));
    assert_eq!(state.session_steps, 0);
    let state = engine.handle(SensorSample::CumulativeSteps(107));
    assert_eq!(state.session_steps, 7);
}

#[test]
fn test_reset_makes_baseline_capture_restart() {
    let mut engine = Engine::new();
    engine.handle(SensorSample::CumulativeSteps(100));
    engine.handle(SensorSample::CumulativeSteps(180));

    engine.reset_baseline();
    let state = engine.handle(SensorSample::CumulativeSteps(500));
    assert_eq!(state.session_steps, 0);

    // And again, from an even higher reading.
    engine.reset_baseline();
    let state = engine.handle(SensorSample::CumulativeSteps(10_000));
    assert_eq!(state.session_steps, 0);
}

#[test]
fn test_pulse_count_is_exact_under_interleaving() {
    let mut engine = Engine::new();
    let mut pulses = 0u64;
    let mut last = engine.display();

    for i in 0..300u64 {
        last = match i % 5 {
            0 | 3 => {
                pulses += 1;
                engine.handle(SensorSample::StepDetected)
            }
            1 => engine.handle(SensorSample::CumulativeSteps(1000 + i)),
            2 => engine.handle(SensorSample::acceleration(0.1, 0.2, 9.8)),
            _ => engine.handle(SensorSample::CumulativeSteps(1000 + i)),
        };
        // Monotone: never decreases.
        assert!(last.detection_pulses <= pulses);
    }

    assert_eq!(last.detection_pulses, pulses);
}

#[test]
fn test_acceleration_formatting() {
    let mut engine = Engine::new();
    let state = engine.handle(SensorSample::acceleration(1.006, -2.3, 0.0));
    assert_eq!(
        state.formatted_acceleration.as_deref(),
        Some("1.01,-2.30,0.00")
    );
    assert_eq!(state.accel_line().as_deref(), Some("Acc:1.01,-2.30,0.00"));
}

#[test]
fn test_acceleration_only_feed_leaves_counts_untouched() {
    let mut engine = Engine::new();
    for i in 0..100 {
        let state = engine.handle(SensorSample::acceleration(i as f64 * 0.01, -1.0, 9.81));
        assert_eq!(state.session_steps, 0);
        assert_eq!(state.detection_pulses, 0);
    }
}

#[test]
fn test_fresh_engine_reports_zeroed_state() {
    let engine = Engine::new();
    let state = engine.display();
    assert_eq!(state.session_steps, 0);
    assert_eq!(state.detection_pulses, 0);
    assert_eq!(state.formatted_acceleration, None);
}

#[test]
fn test_presentation_lines_match_original_ui() {
    let mut engine = Engine::new();
    engine.handle(SensorSample::CumulativeSteps(4200));
    engine.handle(SensorSample::CumulativeSteps(4212));
    engine.handle(SensorSample::StepDetected);
    let state = engine.handle(SensorSample::acceleration(0.32, -0.08, 11.42));

    assert_eq!(state.count_line(), "Cnt: 12");
    assert_eq!(state.detect_line(), "Det: 1");
    assert_eq!(state.accel_line().as_deref(), Some("Acc:0.32,-0.08,11.42"));
}

#[test]
fn test_controller_gate_and_restart_semantics() {
    // Missing detector: the gate blocks the feed outright.
    let mut partial = SensorInventory::complete();
    partial.step_detector = false;
    assert!(!partial.is_supported());
    let mut controller = FeedController::new(partial);
    assert!(matches!(controller.start_feed(), Err(FeedError::Unsupported)));
    assert_eq!(controller.deliver(SensorSample::StepDetected), None);

    // Full inventory: pause/resume re-anchors the baseline, pulses persist.
    let mut controller = FeedController::new(SensorInventory::complete());
    controller.start_feed().unwrap();
    controller.deliver(SensorSample::StepDetected);
    controller.deliver(SensorSample::CumulativeSteps(4200));
    let state = controller
        .deliver(SensorSample::CumulativeSteps(4207))
        .unwrap();
    assert_eq!(state.session_steps, 7);
    assert_eq!(state.detection_pulses, 1);

    controller.stop_feed();
    // Samples arriving while stopped are suppressed.
    assert_eq!(controller.deliver(SensorSample::CumulativeSteps(4300)), None);

    controller.start_feed().unwrap();
    let state = controller
        .deliver(SensorSample::CumulativeSteps(4300))
        .unwrap();
    assert_eq!(state.session_steps, 0);
    assert_eq!(state.detection_pulses, 1);
}
