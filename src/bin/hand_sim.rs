//! Desktop simulation of the hand cycle.
//!
//! Runs the sequencer against a scripted rig: a background thread plays the
//! limit switch (firing a few hundred milliseconds into each homing run),
//! while the presence and range sensors follow a timeline in which a person
//! walks up, reaches in, and takes the item twice.
//!
//! Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --features sim --bin hand_sim
//! ```

use std::thread;
use std::time::Duration;

use anyhow::Result;

use helping_hand::hal::{MockPresence, MockRange, MockStepper, SharedLimitSwitch, SystemClock};
use helping_hand::{Config, Clock, DeviceConfig, HandConfig, HandSequencer};

/// How long the simulated carriage takes to reach the switch.
const HOMING_TRAVEL_MS: u64 = 300;

/// Control loop cadence.
const LOOP_PERIOD_MS: u64 = 10;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default()
        .with_device(DeviceConfig::default().with_name("sim-rig"))
        .with_hand(
            // Short phases so a full run fits in a few seconds.
            HandConfig::default()
                .with_reach_timeout_ms(1_500)
                .with_hand_up_delay_ms(500),
        );

    let limit = SharedLimitSwitch::new();
    let trigger = limit.trigger_handle();

    // The "switch side" of the rig: whenever the sequencer arms the latch,
    // wait out the homing travel and fire the edge.
    thread::spawn(move || loop {
        if trigger.is_armed() {
            thread::sleep(Duration::from_millis(HOMING_TRAVEL_MS));
            trigger.fire();
        }
        thread::sleep(Duration::from_millis(20));
    });

    let mut presence = MockPresence::new();
    presence.set_level(true);

    let mut range = MockRange::new();
    // First visitor: walks up, hand closes in past the 25cm threshold.
    range.queue_samples(&[80.0, 55.0, 40.0, 31.0, 24.0]);
    // Second visitor: sensor drops out once, then they reach in.
    range.queue_no_echo();
    range.queue_samples(&[60.0, 30.0, 12.0]);
    range.set_fallback(Some(90.0));

    let mut seq = HandSequencer::new(MockStepper::new(), limit, presence, range, config);

    let clock = SystemClock::new();
    println!("hand_sim: running until two give-cycles complete");

    while seq.cycles_completed() < 2 {
        if let Some(transition) = seq.step(clock.now_ms()).expect("mock stepper is infallible") {
            let snapshot = seq.state_snapshot(clock.now_ms());
            println!(
                "t={:>6}ms {:<10} -> {:<12} pos={:<5} range={:?}",
                clock.now_ms(),
                transition.as_str(),
                snapshot.state.as_str(),
                snapshot.position,
                snapshot.last_distance_cm,
            );
        }
        thread::sleep(Duration::from_millis(LOOP_PERIOD_MS));
    }

    println!(
        "hand_sim: done after {} cycles in {}ms",
        seq.cycles_completed(),
        clock.now_ms(),
    );
    Ok(())
}
