//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every hardware trait, enabling
//! development and testing on desktop without a physical rig.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockStepper`] | [`StepperDriver`] | Journals calls, steps per poll |
//! | [`MockLimitSwitch`] | [`LimitSwitch`] | Manual or scheduled one-shot trips |
//! | [`MockPresence`] | [`PresenceSensor`] | Scripted level sequence |
//! | [`MockRange`] | [`RangeSensor`] | Scripted sample queue |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use helping_hand::{Config, HandSequencer, MachineState};
//! use helping_hand::hal::{MockLimitSwitch, MockPresence, MockRange, MockStepper};
//!
//! let mut seq = HandSequencer::new(
//!     MockStepper::new(),
//!     MockLimitSwitch::new().with_trip_after(3),
//!     MockPresence::new(),
//!     MockRange::new(),
//!     Config::default(),
//! );
//!
//! // The switch fires on the third latch poll, mid-homing.
//! seq.step(0).unwrap();
//! assert_eq!(seq.machine_state(), MachineState::Ready);
//! ```
//!
//! [`StepperDriver`]: crate::traits::StepperDriver
//! [`LimitSwitch`]: crate::traits::LimitSwitch
//! [`PresenceSensor`]: crate::traits::PresenceSensor
//! [`RangeSensor`]: crate::traits::RangeSensor
//! [`Clock`]: crate::traits::Clock

use crate::traits::{Clock, LimitSwitch, PresenceSensor, RangeSensor, StepperDriver, TriggerEdge};

extern crate alloc;
use alloc::vec::Vec;

// ============================================================================
// Stepper Mock
// ============================================================================

/// A stepper driver call, as journaled by [`MockStepper`].
///
/// `run` polls are not journaled; they would swamp the record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepperCall {
    /// `set_max_speed` with the given steps/second.
    SetMaxSpeed(f32),
    /// `set_acceleration` with the given steps/second².
    SetAcceleration(f32),
    /// `move_to` with the given absolute target.
    MoveTo(i64),
    /// `stop`.
    Stop,
    /// `set_current_position` with the given position.
    SetCurrentPosition(i64),
}

/// Mock stepper driver for testing.
///
/// Journals every commanding call (see [`StepperCall`]) so tests can
/// assert call ordering, and advances `steps_per_run` steps toward the
/// target on each `run()` poll so mid-move behavior is observable.
///
/// Stopping is instantaneous: `stop()` retargets to the current position.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::MockStepper;
/// use helping_hand::traits::StepperDriver;
///
/// let mut stepper = MockStepper::new();
/// stepper.move_to(3);
/// assert!(stepper.run().unwrap());
/// assert_eq!(stepper.position, 1);
///
/// while stepper.run().unwrap() {}
/// assert_eq!(stepper.position, 3);
/// ```
#[derive(Debug)]
pub struct MockStepper {
    /// Current position in steps.
    pub position: i64,
    /// Current target position.
    pub target: i64,
    /// Last `set_max_speed` value.
    pub max_speed: f32,
    /// Last `set_acceleration` value.
    pub acceleration: f32,
    /// Steps advanced per `run()` poll.
    pub steps_per_run: i64,
    /// Journal of commanding calls, in order.
    pub calls: Vec<StepperCall>,
}

impl Default for MockStepper {
    fn default() -> Self {
        Self {
            position: 0,
            target: 0,
            max_speed: 0.0,
            acceleration: 0.0,
            steps_per_run: 1,
            calls: Vec::new(),
        }
    }
}

impl MockStepper {
    /// Creates a new mock stepper at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock stepper advancing `steps` per `run()` poll.
    pub fn with_steps_per_run(mut self, steps: i64) -> Self {
        self.steps_per_run = steps.max(1);
        self
    }

    /// Journal entries for `move_to` calls only.
    pub fn move_targets(&self) -> Vec<i64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StepperCall::MoveTo(target) => Some(*target),
                _ => None,
            })
            .collect()
    }
}

impl StepperDriver for MockStepper {
    type Error = ();

    fn set_max_speed(&mut self, steps_per_sec: f32) {
        self.max_speed = steps_per_sec;
        self.calls.push(StepperCall::SetMaxSpeed(steps_per_sec));
    }

    fn set_acceleration(&mut self, steps_per_sec2: f32) {
        self.acceleration = steps_per_sec2;
        self.calls.push(StepperCall::SetAcceleration(steps_per_sec2));
    }

    fn move_to(&mut self, target: i64) {
        self.target = target;
        self.calls.push(StepperCall::MoveTo(target));
    }

    fn run(&mut self) -> Result<bool, ()> {
        if self.position == self.target {
            return Ok(false);
        }
        let remaining = self.target - self.position;
        let step = remaining.signum() * remaining.abs().min(self.steps_per_run);
        self.position += step;
        Ok(self.position != self.target)
    }

    fn stop(&mut self) {
        self.target = self.position;
        self.calls.push(StepperCall::Stop);
    }

    fn set_current_position(&mut self, position: i64) {
        self.position = position;
        self.target = position;
        self.calls.push(StepperCall::SetCurrentPosition(position));
    }

    fn current_position(&self) -> i64 {
        self.position
    }

    fn target_position(&self) -> i64 {
        self.target
    }
}

// ============================================================================
// Limit Switch Mock
// ============================================================================

/// Mock limit switch latch for testing.
///
/// Fires either manually via [`trip`](Self::trip) or on a scheduled latch
/// poll via [`with_trip_after`](Self::with_trip_after), which is how tests
/// make the switch fire in the middle of a polled move.
///
/// Honors the one-shot contract: a trip while disarmed is ignored, and a
/// trip clears the armed flag in the same instant it latches.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::MockLimitSwitch;
/// use helping_hand::traits::{LimitSwitch, TriggerEdge};
///
/// let mut limit = MockLimitSwitch::new();
/// limit.arm(TriggerEdge::Falling);
///
/// limit.trip();
/// assert!(!limit.is_armed()); // disarmed the instant it fired
/// assert!(limit.take_triggered()); // latched once
/// assert!(!limit.take_triggered()); // consumed
///
/// limit.trip(); // ignored while disarmed
/// assert!(!limit.take_triggered());
/// ```
#[derive(Debug, Default)]
pub struct MockLimitSwitch {
    /// Whether the latch is armed.
    pub armed: bool,
    /// Pending latched trigger.
    pub triggered: bool,
    /// Edge requested by the last `arm` call.
    pub edge: Option<TriggerEdge>,
    /// Number of `arm` calls.
    pub arm_count: usize,
    /// Number of trips that actually latched.
    pub trip_count: usize,
    /// Fire automatically on the n-th `take_triggered` poll while armed.
    pub trip_after: Option<usize>,
}

impl MockLimitSwitch {
    /// Creates a new, unarmed mock switch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an automatic trip on the n-th latch poll (1-based).
    pub fn with_trip_after(mut self, polls: usize) -> Self {
        self.trip_after = Some(polls);
        self
    }

    /// Fire the switch edge. Ignored unless armed.
    pub fn trip(&mut self) {
        if self.armed {
            self.armed = false;
            self.triggered = true;
            self.trip_count += 1;
        }
    }
}

impl LimitSwitch for MockLimitSwitch {
    fn arm(&mut self, edge: TriggerEdge) {
        self.armed = true;
        self.triggered = false;
        self.edge = Some(edge);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn take_triggered(&mut self) -> bool {
        if self.armed {
            if let Some(polls) = self.trip_after {
                let polls = polls.saturating_sub(1);
                if polls == 0 {
                    self.trip_after = None;
                    self.trip();
                } else {
                    self.trip_after = Some(polls);
                }
            }
        }
        let was = self.triggered;
        self.triggered = false;
        was
    }
}

// ============================================================================
// Presence Mock
// ============================================================================

/// Mock presence sensor for testing.
///
/// Returns queued levels first (FIFO), then falls back to the sticky
/// [`level`](Self::level) field.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::MockPresence;
/// use helping_hand::traits::PresenceSensor;
///
/// let mut pir = MockPresence::new();
/// pir.queue_levels(&[false, true]);
///
/// assert!(!pir.is_detected());
/// assert!(pir.is_detected());
/// assert!(!pir.is_detected()); // queue empty, sticky level is false
/// ```
#[derive(Debug, Default)]
pub struct MockPresence {
    /// Level returned once the queue is empty.
    pub level: bool,
    /// Number of polls taken.
    pub poll_count: usize,
    queued: Vec<bool>,
}

impl MockPresence {
    /// Creates a new mock presence sensor reading no presence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sticky level returned when no queued readings remain.
    pub fn set_level(&mut self, level: bool) {
        self.level = level;
    }

    /// Queue a single reading.
    pub fn queue_level(&mut self, level: bool) {
        self.queued.push(level);
    }

    /// Queue multiple readings, returned in the given order.
    pub fn queue_levels(&mut self, levels: &[bool]) {
        self.queued.extend_from_slice(levels);
    }
}

impl PresenceSensor for MockPresence {
    fn is_detected(&mut self) -> bool {
        self.poll_count += 1;
        if self.queued.is_empty() {
            self.level
        } else {
            self.queued.remove(0)
        }
    }
}

// ============================================================================
// Range Mock
// ============================================================================

/// Mock range sensor for testing.
///
/// Returns queued samples first (FIFO), then falls back to the sticky
/// [`fallback`](Self::fallback) value. `None` models an echo timeout.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::MockRange;
/// use helping_hand::traits::RangeSensor;
///
/// let mut sonar = MockRange::new();
/// sonar.queue_samples(&[40.0, 18.0]);
/// sonar.queue_no_echo();
///
/// assert_eq!(sonar.measure_cm(), Some(40.0));
/// assert_eq!(sonar.measure_cm(), Some(18.0));
/// assert_eq!(sonar.measure_cm(), None); // stuck echo
/// ```
#[derive(Debug, Default)]
pub struct MockRange {
    /// Sample returned once the queue is empty.
    pub fallback: Option<f32>,
    /// Number of measurement cycles performed.
    pub measure_count: usize,
    queued: Vec<Option<f32>>,
}

impl MockRange {
    /// Creates a new mock range sensor that reads no echo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sticky sample returned when no queued samples remain.
    pub fn set_fallback(&mut self, cm: Option<f32>) {
        self.fallback = cm;
    }

    /// Queue a single distance sample.
    pub fn queue_sample(&mut self, cm: f32) {
        self.queued.push(Some(cm));
    }

    /// Queue multiple distance samples, returned in the given order.
    pub fn queue_samples(&mut self, samples: &[f32]) {
        self.queued.extend(samples.iter().map(|cm| Some(*cm)));
    }

    /// Queue an echo timeout.
    pub fn queue_no_echo(&mut self) {
        self.queued.push(None);
    }
}

impl RangeSensor for MockRange {
    fn measure_cm(&mut self) -> Option<f32> {
        self.measure_count += 1;
        if self.queued.is_empty() {
            self.fallback
        } else {
            self.queued.remove(0)
        }
    }
}

// ============================================================================
// Clock Mock
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::MockClock;
/// use helping_hand::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockStepper Tests
    // =========================================================================

    #[test]
    fn mock_stepper_default() {
        let stepper = MockStepper::new();
        assert_eq!(stepper.position, 0);
        assert_eq!(stepper.target, 0);
        assert_eq!(stepper.steps_per_run, 1);
        assert!(stepper.calls.is_empty());
    }

    #[test]
    fn mock_stepper_runs_to_target() {
        let mut stepper = MockStepper::new();
        stepper.move_to(-3);

        assert!(stepper.run().unwrap());
        assert_eq!(stepper.position, -1);
        assert!(stepper.run().unwrap());
        assert!(!stepper.run().unwrap());
        assert_eq!(stepper.position, -3);

        // Parked at target: run is a no-op.
        assert!(!stepper.run().unwrap());
        assert_eq!(stepper.position, -3);
    }

    #[test]
    fn mock_stepper_steps_per_run() {
        let mut stepper = MockStepper::new().with_steps_per_run(100);
        stepper.move_to(250);

        assert!(stepper.run().unwrap());
        assert_eq!(stepper.position, 100);
        assert!(stepper.run().unwrap());
        assert_eq!(stepper.position, 200);
        assert!(!stepper.run().unwrap());
        assert_eq!(stepper.position, 250); // clamped to target
    }

    #[test]
    fn mock_stepper_stop_retargets() {
        let mut stepper = MockStepper::new();
        stepper.move_to(10);
        stepper.run().unwrap();
        stepper.stop();

        assert_eq!(stepper.target, 1);
        assert!(!stepper.run().unwrap());
    }

    #[test]
    fn mock_stepper_set_current_position_retargets() {
        let mut stepper = MockStepper::new();
        stepper.move_to(-50);
        stepper.run().unwrap();
        stepper.set_current_position(0);

        assert_eq!(stepper.position, 0);
        assert_eq!(stepper.target, 0);
        assert!(!stepper.run().unwrap());
    }

    #[test]
    fn mock_stepper_journals_calls() {
        let mut stepper = MockStepper::new();
        stepper.set_max_speed(100.0);
        stepper.set_acceleration(200.0);
        stepper.move_to(-2000);
        stepper.stop();
        stepper.set_current_position(0);

        assert_eq!(
            stepper.calls,
            [
                StepperCall::SetMaxSpeed(100.0),
                StepperCall::SetAcceleration(200.0),
                StepperCall::MoveTo(-2000),
                StepperCall::Stop,
                StepperCall::SetCurrentPosition(0),
            ]
        );
        assert_eq!(stepper.move_targets(), [-2000]);
    }

    // =========================================================================
    // MockLimitSwitch Tests
    // =========================================================================

    #[test]
    fn mock_limit_default_unarmed() {
        let mut limit = MockLimitSwitch::new();
        assert!(!limit.is_armed());
        assert!(!limit.take_triggered());
    }

    #[test]
    fn mock_limit_trip_requires_arm() {
        let mut limit = MockLimitSwitch::new();
        limit.trip();
        assert!(!limit.take_triggered());
        assert_eq!(limit.trip_count, 0);

        limit.arm(TriggerEdge::Falling);
        limit.trip();
        assert!(limit.take_triggered());
        assert_eq!(limit.trip_count, 1);
    }

    #[test]
    fn mock_limit_trip_disarms_itself() {
        let mut limit = MockLimitSwitch::new();
        limit.arm(TriggerEdge::Falling);
        limit.trip();
        assert!(!limit.is_armed());

        // Bounce: a second edge while the latch is pending is ignored.
        limit.trip();
        assert!(limit.take_triggered());
        assert!(!limit.take_triggered());
        assert_eq!(limit.trip_count, 1);
    }

    #[test]
    fn mock_limit_arm_clears_stale_trigger() {
        let mut limit = MockLimitSwitch::new();
        limit.arm(TriggerEdge::Falling);
        limit.trip();

        // Re-arm without consuming: the stale latch must not survive.
        limit.arm(TriggerEdge::Falling);
        assert!(!limit.take_triggered());
        assert_eq!(limit.arm_count, 2);
    }

    #[test]
    fn mock_limit_trip_after_counts_polls() {
        let mut limit = MockLimitSwitch::new().with_trip_after(3);
        limit.arm(TriggerEdge::Falling);

        assert!(!limit.take_triggered());
        assert!(!limit.take_triggered());
        assert!(limit.take_triggered());
        assert!(!limit.is_armed());
        assert!(!limit.take_triggered());
    }

    #[test]
    fn mock_limit_trip_after_waits_for_arm() {
        let mut limit = MockLimitSwitch::new().with_trip_after(1);
        // Not armed: scheduled trip does not count down.
        assert!(!limit.take_triggered());

        limit.arm(TriggerEdge::Falling);
        assert!(limit.take_triggered());
    }

    #[test]
    fn mock_limit_records_edge() {
        let mut limit = MockLimitSwitch::new();
        limit.arm(TriggerEdge::Rising);
        assert_eq!(limit.edge, Some(TriggerEdge::Rising));
    }

    // =========================================================================
    // MockPresence Tests
    // =========================================================================

    #[test]
    fn mock_presence_default() {
        let mut pir = MockPresence::new();
        assert!(!pir.is_detected());
        assert_eq!(pir.poll_count, 1);
    }

    #[test]
    fn mock_presence_queue_fifo() {
        let mut pir = MockPresence::new();
        pir.queue_level(true);
        pir.queue_level(false);

        assert!(pir.is_detected());
        assert!(!pir.is_detected());
    }

    #[test]
    fn mock_presence_sticky_level() {
        let mut pir = MockPresence::new();
        pir.set_level(true);
        assert!(pir.is_detected());
        assert!(pir.is_detected());
    }

    // =========================================================================
    // MockRange Tests
    // =========================================================================

    #[test]
    fn mock_range_default_no_echo() {
        let mut sonar = MockRange::new();
        assert_eq!(sonar.measure_cm(), None);
        assert_eq!(sonar.measure_count, 1);
    }

    #[test]
    fn mock_range_queue_fifo() {
        let mut sonar = MockRange::new();
        sonar.queue_samples(&[40.0, 35.0]);
        sonar.queue_no_echo();

        assert_eq!(sonar.measure_cm(), Some(40.0));
        assert_eq!(sonar.measure_cm(), Some(35.0));
        assert_eq!(sonar.measure_cm(), None);
    }

    #[test]
    fn mock_range_fallback() {
        let mut sonar = MockRange::new();
        sonar.set_fallback(Some(100.0));
        assert_eq!(sonar.measure_cm(), Some(100.0));
        assert_eq!(sonar.measure_cm(), Some(100.0));
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);

        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);

        clock.advance(500);
        assert_eq!(clock.now_ms(), 1500);
    }
}
