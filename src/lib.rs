//! # helping-hand
//!
//! A presence-activated stepper "hand" actuator controller: the hand homes
//! against a limit switch, extends when a PIR sensor sees someone, raises
//! when an ultrasonic sensor sees them reach in, and re-homes after a dwell
//! (or a timeout, if nobody reaches in).
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the stepper driver, limit switch,
//!   presence sensor, and range sensor
//! - **One-shot homing latch**: the limit "interrupt" is a self-disarming
//!   latch serviced between stepper polls, so an in-flight homing move is
//!   interruptible without a preemptible motion primitive
//! - **Per-phase motion profiles**: slow for homing and the approach, fast
//!   for the raise after detection
//! - **Timeout recovery**: the reach-wait phase is bounded; the machine
//!   always returns to homing on its own
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `state` - Machine states and transition labels
//! - `config` - Motion profiles, positions, and phase timing
//! - `sequencer` - The state machine that ties everything together
//! - `hal` - Concrete implementations (mock for testing, system for `std`)
//!
//! ## Example
//!
//! ```rust
//! use helping_hand::{Config, HandSequencer, MachineState, Transition};
//! use helping_hand::hal::{MockLimitSwitch, MockPresence, MockRange, MockStepper};
//!
//! let mut seq = HandSequencer::new(
//!     MockStepper::new(),
//!     MockLimitSwitch::new().with_trip_after(1),
//!     MockPresence::new(),
//!     MockRange::new(),
//!     Config::default(),
//! );
//!
//! // Homing: the limit switch fires and the axis is zeroed.
//! seq.step(0).unwrap();
//! assert_eq!(seq.machine_state(), MachineState::Ready);
//!
//! // Someone walks up; the hand extends.
//! seq.presence_mut().set_level(true);
//! assert_eq!(seq.step(100).unwrap(), Some(Transition::Extended));
//!
//! // They reach in below the threshold; the hand raises.
//! seq.range_mut().queue_sample(18.0);
//! assert_eq!(seq.step(200).unwrap(), Some(Transition::Raised));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Configuration: motion profiles, positions, and phase timing.
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// The motion sequencer state machine.
pub mod sequencer;
/// Machine states and transition labels.
pub mod state;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{Config, DeviceConfig, HandConfig, MotionProfile};
pub use sequencer::{HandSequencer, HandState};
pub use state::{MachineState, Transition};
pub use traits::{
    pulse_to_cm, Clock, LimitSwitch, PresenceSensor, RangeSensor, StepperDriver, TriggerEdge,
    SOUND_SPEED_CM_PER_US,
};
