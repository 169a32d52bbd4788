//! Step Sensor Agent CLI
//!
//! Runs the simulated sensor feed through the step accounting engine and
//! renders the three display fields the way the original pedometer UI did.

use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use step_sensor_agent::{
    config::{ChannelConfig, Config},
    lifecycle::FeedController,
    sampler::{CapabilityGate, SamplerConfig, SimulatedSampler},
    stats::create_shared_log_with_persistence,
    UNSUPPORTED_NOTICE, VERSION,
};

#[derive(Parser)]
#[command(name = "step-sensor")]
#[command(version = VERSION)]
#[command(about = "Step accounting over a simulated motion-sensor feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the sensor feed and render step accounting in the foreground
    Start {
        /// Sensor channels the feed emits (counter, detector, accelerometer, or all).
        /// Disabling a channel simulates a device missing that sensor.
        #[arg(long, default_value = "all")]
        channels: String,

        /// Walking cadence in steps per second
        #[arg(long, default_value = "1.8")]
        cadence: f64,

        /// Initial cumulative counter value (simulates steps from before launch)
        #[arg(long, default_value = "4200")]
        boot_offset: u64,

        /// Stop automatically after this many seconds
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Pause the sensor feed
    Pause,

    /// Resume the sensor feed
    Resume,

    /// Show current agent status
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            channels,
            cadence,
            boot_offset,
            duration,
        } => {
            cmd_start(&channels, cadence, boot_offset, duration);
        }
        Commands::Pause => {
            cmd_pause();
        }
        Commands::Resume => {
            cmd_resume();
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_start(channels: &str, cadence: f64, boot_offset: u64, duration: Option<u64>) {
    println!("Step Sensor Agent v{VERSION}");
    println!();

    // Probe capabilities before anything else; without the full sensor set
    // the derived values are meaningless, so show the fixed notice and stop.
    let channel_config = ChannelConfig::from_csv(channels);
    let inventory = channel_config.inventory();
    if !inventory.is_supported() {
        eprintln!("{UNSUPPORTED_NOTICE}");
        std::process::exit(1);
    }

    // Load or create configuration
    let mut config = Config::load().unwrap_or_default();
    config.channels = channel_config;
    config.cadence_hz = cadence;
    config.boot_step_offset = boot_offset;
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    println!("Starting feed...");
    println!("  Cadence: {cadence} steps/s");
    println!("  Boot counter offset: {boot_offset}");
    println!("  Report interval: {}s", config.report_interval.as_secs());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up the run statistics log
    let feed_log = create_shared_log_with_persistence(config.data_path.join("feed_stats.json"));

    // Create the sample source
    let sampler_config = SamplerConfig {
        emit_counter: config.channels.counter,
        emit_detector: config.channels.detector,
        emit_accelerometer: config.channels.accelerometer,
        cadence_hz: config.cadence_hz,
        boot_step_offset: config.boot_step_offset,
        ..SamplerConfig::default()
    };
    let mut sampler = SimulatedSampler::new(sampler_config);

    // The controller owns the engine; the gate is re-queried on every start.
    let mut controller = FeedController::new(inventory);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc_handler(r);

    // Support pause/resume from another process by polling the config file.
    let mut paused = config.paused;
    let mut last_config_check = std::time::Instant::now();

    if paused {
        println!("Feed is currently paused.");
        println!("Run `step-sensor resume` to start the feed.");
        println!();
    } else {
        start_feed(&mut controller, &mut sampler, &feed_log);
    }

    let receiver = sampler.receiver().clone();
    let started_at = std::time::Instant::now();
    let mut last_report = std::time::Instant::now();
    let mut latest = controller.display();
    let mut dirty = false;

    // Main loop: the single consumer that owns the engine.
    while running.load(Ordering::SeqCst) {
        if let Some(secs) = duration {
            if started_at.elapsed() >= Duration::from_secs(secs) {
                break;
            }
        }

        // Periodically reload config so `step-sensor pause/resume` can
        // control a running agent.
        if last_config_check.elapsed() >= Duration::from_secs(1) {
            if let Ok(cfg) = Config::load() {
                if cfg.paused != paused {
                    paused = cfg.paused;

                    if paused {
                        println!();
                        println!("Pausing feed...");
                        sampler.stop();
                        controller.stop_feed();

                        // Drain any queued samples; they belong to the ended
                        // activation period and must not leak into the next.
                        while receiver.try_recv().is_ok() {}
                    } else {
                        println!();
                        println!("Resuming feed...");
                        // Restarting re-anchors the step baseline.
                        start_feed(&mut controller, &mut sampler, &feed_log);
                    }
                }
            }
            last_config_check = std::time::Instant::now();
        }

        if paused {
            thread::sleep(Duration::from_millis(100));
            continue;
        }

        // Process samples with timeout
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(sample) => {
                feed_log.record_sample(&sample);

                if let Some(state) = controller.deliver(sample) {
                    latest = state;
                    dirty = true;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Sampler disconnected unexpectedly");
                break;
            }
        }

        // Render the three display fields at the report interval.
        if dirty && last_report.elapsed() >= config.report_interval {
            render_display(&latest);
            last_report = std::time::Instant::now();
            dirty = false;
        }
    }

    // Stop the feed
    println!();
    println!("Stopping feed...");
    sampler.stop();
    controller.stop_feed();

    // Final display and statistics
    render_display(&controller.display());
    println!();

    if let Err(e) = feed_log.save() {
        eprintln!("Warning: Could not save feed stats: {e}");
    }
    println!("{}", feed_log.summary());
}

/// Start an activation period: gate query, baseline re-anchor, feed start.
fn start_feed(
    controller: &mut FeedController<step_sensor_agent::SensorInventory>,
    sampler: &mut SimulatedSampler,
    feed_log: &step_sensor_agent::SharedFeedLog,
) {
    if let Err(e) = controller.start_feed() {
        eprintln!("{UNSUPPORTED_NOTICE}");
        eprintln!("({e})");
        std::process::exit(1);
    }
    if let Some(id) = controller.activation_id() {
        println!("Activation ID: {id}");
    }
    feed_log.record_feed_start();

    if let Err(e) = sampler.start() {
        eprintln!("Error starting sampler: {e}");
        std::process::exit(1);
    }
}

/// Render the three display fields on one line.
fn render_display(state: &step_sensor_agent::DisplayState) {
    let accel = state
        .accel_line()
        .unwrap_or_else(|| "Acc:-".to_string());
    println!("{} | {} | {}", state.count_line(), state.detect_line(), accel);
}

fn cmd_pause() {
    let mut config = Config::load().unwrap_or_default();
    config.paused = true;
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
    println!("Feed paused. Use 'step-sensor resume' to continue.");
}

fn cmd_resume() {
    let mut config = Config::load().unwrap_or_default();
    config.paused = false;
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
    println!("Feed resumed.");
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Step Sensor Agent Status");
    println!("========================");
    println!();

    // Capability check for the configured channels
    let supported = config.channels.inventory().is_supported();
    println!(
        "Step accounting capability: {}",
        if supported {
            "Supported ✓"
        } else {
            "Not Supported ✗"
        }
    );
    println!();

    // Show config
    println!("Configuration:");
    println!(
        "  Counter channel: {}",
        if config.channels.counter {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "  Detector channel: {}",
        if config.channels.detector {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "  Accelerometer channel: {}",
        if config.channels.accelerometer {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("  Cadence: {} steps/s", config.cadence_hz);
    println!("  Paused: {}", config.paused);
    println!();

    // Load and show feed stats if available
    let stats_path = config.data_path.join("feed_stats.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(counter) = stats.get("counter_samples") {
                    println!("  Counter samples: {counter}");
                }
                if let Some(detector) = stats.get("detector_samples") {
                    println!("  Detector pulses: {detector}");
                }
                if let Some(accel) = stats.get("accel_samples") {
                    println!("  Accelerometer samples: {accel}");
                }
                if let Some(starts) = stats.get("feed_starts") {
                    println!("  Feed activations: {starts}");
                }
            }
        }
    } else {
        println!("No previous run data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}
