//! Trait definitions for the hardware abstraction boundary.
//!
//! This module defines the seams that let the hand sequencer:
//! - Run against different stepper drivers (real hardware, desktop mock)
//! - Consume sensor inputs without knowing how they are wired
//! - Stay testable with explicit, controllable time
//!
//! # Submodules
//!
//! - `hardware`: Stepper driver, limit switch, presence sensor, range
//!   sensor, and clock traits
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`StepperDriver`]: AccelStepper-style position/speed/acceleration control
//! - [`LimitSwitch`]: self-disarming one-shot homing latch
//! - [`PresenceSensor`]: polled binary presence input (PIR)
//! - [`RangeSensor`]: bounded-time ultrasonic distance measurement
//! - [`Clock`]: monotonic millisecond time source for runners

pub mod hardware;

pub use hardware::*;
