//! Hardware abstraction traits for the stepper axis and its sensors.
//!
//! This module defines the hardware interfaces that allow helping-hand to
//! work across different platforms (real stepper rigs, desktop mocks).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`StepperDriver`] | Position/speed/acceleration stepper control |
//! | [`LimitSwitch`] | One-shot home-position latch |
//! | [`PresenceSensor`] | Polled binary presence input (PIR) |
//! | [`RangeSensor`] | Bounded-time ultrasonic distance measurement |
//! | [`Clock`] | Monotonic time source for control-loop runners |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For a wall-clock time source and an interrupt-safe
//! limit latch on `std` platforms, use [`crate::hal::system`].
//!
//! # Example
//!
//! ```rust
//! use helping_hand::traits::StepperDriver;
//! use helping_hand::hal::MockStepper;
//! use helping_hand::config::MotionProfile;
//!
//! let mut stepper = MockStepper::new();
//! stepper.apply_profile(&MotionProfile::new(100.0, 200.0));
//! stepper.move_to(200);
//! while stepper.run().unwrap() {}
//! assert_eq!(stepper.current_position(), 200);
//! ```

use crate::config::MotionProfile;

/// Centimeters of sound travel per microsecond at room temperature.
pub const SOUND_SPEED_CM_PER_US: f32 = 0.034;

/// Convert an ultrasonic echo round-trip duration to a one-way distance.
///
/// The pulse travels to the target and back, so the round-trip time is
/// halved before applying the speed of sound.
///
/// # Examples
///
/// ```
/// use helping_hand::traits::pulse_to_cm;
///
/// // ~1470us round trip is roughly 25cm away
/// let cm = pulse_to_cm(1470);
/// assert!((cm - 24.99).abs() < 0.01);
/// ```
#[inline]
pub fn pulse_to_cm(duration_us: u32) -> f32 {
    duration_us as f32 * SOUND_SPEED_CM_PER_US / 2.0
}

/// Signal transition that fires a [`LimitSwitch`].
///
/// # Default
///
/// Defaults to [`Falling`](Self::Falling), the active edge of a
/// normally-open switch wired to a pulled-up input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TriggerEdge {
    /// Low-to-high transition.
    Rising,
    /// High-to-low transition.
    #[default]
    Falling,
}

impl TriggerEdge {
    /// Returns the edge as a lowercase string, for log lines.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TriggerEdge::Rising => "rising",
            TriggerEdge::Falling => "falling",
        }
    }
}

/// Stepper driver trait - abstracts position-mode stepper motor control.
///
/// Implement this trait for your stepper driver hardware. The surface
/// mirrors the AccelStepper family of drivers: an absolute target position,
/// a speed/acceleration envelope, and a per-tick [`run`](Self::run) that
/// emits at most one step when one is due.
///
/// # Implementation Notes
///
/// - Positions are absolute step counts; negative targets drive toward the
///   home switch
/// - [`run`](Self::run) must be cheap enough to call in a tight loop; the
///   sequencer polls it between limit-latch checks, which is what makes an
///   in-flight move interruptible
/// - [`stop`](Self::stop) retargets to the shortest stop the current
///   envelope allows; it does not have to halt instantaneously
///
/// # Example Implementation
///
/// ```rust,ignore
/// use helping_hand::traits::StepperDriver;
///
/// struct MyStepper { /* step/dir pins, envelope state */ }
///
/// impl StepperDriver for MyStepper {
///     type Error = ();
///
///     fn set_max_speed(&mut self, steps_per_sec: f32) { /* ... */ }
///     fn set_acceleration(&mut self, steps_per_sec2: f32) { /* ... */ }
///     fn move_to(&mut self, target: i64) { /* ... */ }
///
///     fn run(&mut self) -> Result<bool, ()> {
///         // pulse the step pin if a step is due
///         Ok(/* still moving */ false)
///     }
///
///     fn stop(&mut self) { /* retarget for quickest stop */ }
///     fn set_current_position(&mut self, position: i64) { /* ... */ }
///     fn current_position(&self) -> i64 { 0 }
///     fn target_position(&self) -> i64 { 0 }
/// }
/// ```
pub trait StepperDriver {
    /// Error type for stepping operations.
    type Error;

    /// Set the maximum permitted speed in steps/second.
    fn set_max_speed(&mut self, steps_per_sec: f32);

    /// Set the acceleration/deceleration rate in steps/second².
    fn set_acceleration(&mut self, steps_per_sec2: f32);

    /// Set the absolute target position in steps.
    ///
    /// Does not move the motor; call [`run`](Self::run) until it returns
    /// `false` to execute the move.
    fn move_to(&mut self, target: i64);

    /// Poll the driver, emitting at most one step if one is due.
    ///
    /// Returns `true` while the motor still has distance to go.
    fn run(&mut self) -> Result<bool, Self::Error>;

    /// Retarget so the motor stops as quickly as the envelope allows.
    fn stop(&mut self);

    /// Overwrite the driver's idea of where the motor currently is.
    ///
    /// Used to establish logical zero the instant the home switch fires.
    fn set_current_position(&mut self, position: i64);

    /// Current motor position in steps, as counted by the driver.
    fn current_position(&self) -> i64;

    /// The most recently set target position.
    fn target_position(&self) -> i64;

    /// Convenience method to apply a full motion profile.
    ///
    /// Sets max speed and acceleration from the profile pair.
    fn apply_profile(&mut self, profile: &MotionProfile) {
        self.set_max_speed(profile.max_speed);
        self.set_acceleration(profile.acceleration);
    }
}

/// Home-position limit switch, modeled as a one-shot latch.
///
/// The original-hardware shape of this input is an edge-triggered interrupt
/// whose handler detaches itself as its first action. On platforms without
/// preemptible motion primitives the same contract is expressed as a latch
/// the control loop polls between stepper ticks:
///
/// - While armed, the active edge latches a trigger **and disarms the
///   switch in the same instant**, so a bouncing contact fires at most once
///   per arm cycle
/// - [`take_triggered`](Self::take_triggered) consumes the latch; it
///   returns `true` at most once per arm cycle
/// - Re-arming requires an explicit [`arm`](Self::arm) call
///
/// Implementations backing a real interrupt line must make the
/// trigger/disarm pair atomic with respect to the control loop (see
/// `hal::system::SharedLimitSwitch` for an `AtomicBool`-based version).
pub trait LimitSwitch {
    /// Arm the latch on the given signal edge.
    ///
    /// Clears any stale trigger from a previous cycle.
    fn arm(&mut self, edge: TriggerEdge);

    /// Disarm the latch; subsequent edges are ignored.
    fn disarm(&mut self);

    /// Returns `true` if the latch is currently armed.
    fn is_armed(&self) -> bool;

    /// Consume and return the latched trigger.
    ///
    /// Returns `true` at most once per arm cycle.
    fn take_triggered(&mut self) -> bool;
}

/// Polled binary presence input (PIR).
///
/// A level input read once per `Ready` iteration. No debounce is applied
/// at this seam; implementations that need filtering should do it
/// internally.
pub trait PresenceSensor {
    /// Returns `true` while the sensor asserts presence.
    fn is_detected(&mut self) -> bool;
}

/// Ultrasonic range sensor with a bounded measurement cycle.
///
/// One call performs one trigger-pulse/echo cycle and converts the
/// round-trip time to centimeters (see [`pulse_to_cm`]).
///
/// # Implementation Notes
///
/// - The echo wait must be bounded; a stalled echo returns `None` rather
///   than blocking the control loop
/// - `None` means "no echo", which callers treat as no object in range
pub trait RangeSensor {
    /// Perform one measurement cycle.
    ///
    /// Returns the measured distance in centimeters, or `None` if no echo
    /// arrived within the sensor's time bound.
    fn measure_cm(&mut self) -> Option<f32>;
}

/// Monotonic time source trait for `no_std` compatibility.
///
/// Provides milliseconds since an arbitrary epoch for control-loop
/// runners. The sequencer itself takes `now_ms` as a parameter, so this
/// trait only appears at the outer loop.
///
/// # Example
///
/// ```rust
/// use helping_hand::traits::Clock;
/// use helping_hand::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Conversion Tests
    // =========================================================================

    #[test]
    fn pulse_to_cm_known_values() {
        // 1000us round trip -> 17cm one way
        assert!((pulse_to_cm(1000) - 17.0).abs() < 0.001);
        // ~25cm threshold distance
        assert!((pulse_to_cm(1470) - 24.99).abs() < 0.01);
    }

    #[test]
    fn pulse_to_cm_zero() {
        assert_eq!(pulse_to_cm(0), 0.0);
    }

    // =========================================================================
    // TriggerEdge Tests
    // =========================================================================

    #[test]
    fn trigger_edge_default_is_falling() {
        assert_eq!(TriggerEdge::default(), TriggerEdge::Falling);
    }

    #[test]
    fn trigger_edge_as_str() {
        assert_eq!(TriggerEdge::Rising.as_str(), "rising");
        assert_eq!(TriggerEdge::Falling.as_str(), "falling");
    }

    // =========================================================================
    // StepperDriver Default Methods Tests
    // =========================================================================

    struct TestStepper {
        max_speed: f32,
        acceleration: f32,
    }

    impl StepperDriver for TestStepper {
        type Error = ();

        fn set_max_speed(&mut self, steps_per_sec: f32) {
            self.max_speed = steps_per_sec;
        }

        fn set_acceleration(&mut self, steps_per_sec2: f32) {
            self.acceleration = steps_per_sec2;
        }

        fn move_to(&mut self, _target: i64) {}

        fn run(&mut self) -> Result<bool, ()> {
            Ok(false)
        }

        fn stop(&mut self) {}

        fn set_current_position(&mut self, _position: i64) {}

        fn current_position(&self) -> i64 {
            0
        }

        fn target_position(&self) -> i64 {
            0
        }
    }

    #[test]
    fn stepper_apply_profile_default_impl() {
        let mut stepper = TestStepper {
            max_speed: 0.0,
            acceleration: 0.0,
        };

        let profile = MotionProfile::new(2500.0, 1000.0);
        stepper.apply_profile(&profile);

        assert_eq!(stepper.max_speed, 2500.0);
        assert_eq!(stepper.acceleration, 1000.0);
    }
}
