//! Demonstration of the Step Sensor Agent pipeline.
//!
//! This example shows how to:
//! 1. Check the capability gate
//! 2. Create and start a simulated sample source
//! 3. Drive the feed controller with incoming samples
//! 4. Render the derived display state
//!
//! Run with: cargo run --example feed_demo

use std::time::Duration;

use step_sensor_agent::{
    lifecycle::FeedController,
    sampler::{CapabilityGate, SamplerConfig, SensorInventory, SimulatedSampler},
    stats::FeedLog,
    UNSUPPORTED_NOTICE,
};

fn main() {
    println!("Step Sensor Agent - Feed Demo");
    println!("=============================");
    println!();

    // Check the capability gate before anything else
    let inventory = SensorInventory::complete();
    print!("Checking sensor capabilities... ");
    if inventory.is_supported() {
        println!("OK ✓");
    } else {
        println!("FAILED ✗");
        println!("{UNSUPPORTED_NOTICE}");
        return;
    }
    println!();

    // Create components: a brisk simulated walk with a large boot offset so
    // the baseline capture is visible in the output.
    let config = SamplerConfig {
        cadence_hz: 2.5,
        boot_step_offset: 12_345,
        ..SamplerConfig::default()
    };
    let mut sampler = SimulatedSampler::new(config);
    let mut controller = FeedController::new(inventory);
    let feed_log = FeedLog::new();

    if let Err(e) = controller.start_feed() {
        eprintln!("Error starting feed: {e}");
        return;
    }
    if let Some(id) = controller.activation_id() {
        println!("Activation ID: {id}");
    }
    feed_log.record_feed_start();

    if let Err(e) = sampler.start() {
        eprintln!("Error starting sampler: {e}");
        return;
    }

    println!("Walking for 10 seconds...");
    println!();

    let start = std::time::Instant::now();
    let receiver = sampler.receiver().clone();
    let mut last_render = std::time::Instant::now();

    while start.elapsed() < Duration::from_secs(10) {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(sample) => {
                feed_log.record_sample(&sample);

                if let Some(state) = controller.deliver(sample) {
                    if last_render.elapsed() >= Duration::from_millis(500) {
                        let accel = state.accel_line().unwrap_or_else(|| "Acc:-".to_string());
                        println!(
                            "  {} | {} | {}",
                            state.count_line(),
                            state.detect_line(),
                            accel
                        );
                        last_render = std::time::Instant::now();
                    }
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }

    // Stop the feed
    println!();
    println!("Stopping feed...");
    sampler.stop();
    controller.stop_feed();

    let final_state = controller.display();
    println!();
    println!("Final state:");
    println!("  {}", final_state.count_line());
    println!("  {}", final_state.detect_line());
    if let Some(accel) = final_state.accel_line() {
        println!("  {accel}");
    }

    println!();
    println!("{}", feed_log.summary());
    println!();
    println!("Demo complete!");
}
