//! The motion sequencer that runs the hand cycle.
//!
//! This module provides [`HandSequencer`], the finite-state machine that
//! coordinates the stepper axis with the limit switch, the presence sensor,
//! and the range sensor.
//!
//! # Overview
//!
//! The sequencer cycles through four states:
//!
//! - `Init`: home against the limit switch and zero the axis
//! - `Ready`: wait for the presence sensor, then extend the hand
//! - `HandReached`: measure range until a hand reaches in, or time out
//! - `HandUp`: dwell with the hand raised, then restart the cycle
//!
//! There is no terminal state; the machine runs unattended and recovers
//! from every anomaly it can detect by re-homing.
//!
//! # Example
//!
//! ```rust
//! use helping_hand::{Config, HandSequencer, MachineState};
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
//! // Homing: the switch fires during the move, zeroing the axis.
//! assert_eq!(seq.machine_state(), MachineState::Init);
//! seq.step(0).unwrap();
//! assert_eq!(seq.machine_state(), MachineState::Ready);
//! assert_eq!(seq.stepper().position, 0);
//! ```
//!
//! # Interrupt Model
//!
//! The limit switch is a one-shot latch serviced between stepper polls, so
//! an in-flight homing move is interruptible at every step boundary. The
//! latch disarms itself the instant it fires and stays disarmed until the
//! sequencer re-arms it on the way back into `Init`.

use log::{debug, info, warn};

use crate::config::Config;
use crate::state::{MachineState, Transition};
use crate::traits::{LimitSwitch, PresenceSensor, RangeSensor, StepperDriver};

/// How a polled move ended.
enum MoveOutcome {
    /// The stepper reached its target.
    Completed,
    /// The limit latch fired mid-move; the axis was stopped and zeroed.
    LimitHit,
}

/// The motion sequencer.
///
/// Owns the four hardware handles and the one piece of persistent control
/// state (the active [`MachineState`]). Drive it by calling
/// [`step`](Self::step) from a control loop with a monotonic millisecond
/// timestamp.
///
/// # Type Parameters
///
/// - `S`: stepper driver ([`StepperDriver`])
/// - `L`: limit switch latch ([`LimitSwitch`])
/// - `P`: presence sensor ([`PresenceSensor`])
/// - `R`: range sensor ([`RangeSensor`])
///
/// # Thread Safety
///
/// The sequencer itself is single-threaded; the only cross-context input
/// is the limit latch, whose implementations are responsible for making
/// the trigger/disarm pair atomic (see `hal::system::SharedLimitSwitch`).
pub struct HandSequencer<S, L, P, R>
where
    S: StepperDriver,
    L: LimitSwitch,
    P: PresenceSensor,
    R: RangeSensor,
{
    stepper: S,
    limit: L,
    presence: P,
    range: R,
    config: Config,
    state: MachineState,
    /// Loop time recorded on entry to `HandReached` and `HandUp`.
    phase_started_ms: u64,
    last_distance_cm: Option<f32>,
    cycles_completed: u32,
    homing_overrun_logged: bool,
}

impl<S, L, P, R> HandSequencer<S, L, P, R>
where
    S: StepperDriver,
    L: LimitSwitch,
    P: PresenceSensor,
    R: RangeSensor,
{
    /// Create a sequencer and arm the limit latch for the first homing run.
    ///
    /// The machine starts in [`MachineState::Init`]; the state is set here,
    /// before the first iteration, so no unset value is ever observable.
    pub fn new(stepper: S, mut limit: L, presence: P, range: R, config: Config) -> Self {
        limit.arm(config.hand.limit_edge);
        Self {
            stepper,
            limit,
            presence,
            range,
            config,
            state: MachineState::Init,
            phase_started_ms: 0,
            last_distance_cm: None,
            cycles_completed: 0,
            homing_overrun_logged: false,
        }
    }

    /// Run one control-loop iteration.
    ///
    /// `now_ms` is the loop clock in milliseconds; it must be monotonic.
    /// Moves commanded by an iteration are run to completion inside the
    /// call, with the limit latch serviced between stepper polls.
    ///
    /// Returns the transition taken this iteration, or `None` if the
    /// machine stayed in its current state.
    pub fn step(&mut self, now_ms: u64) -> Result<Option<Transition>, S::Error> {
        match self.state {
            MachineState::Init => self.step_init(),
            MachineState::Ready => self.step_ready(now_ms),
            MachineState::HandReached => self.step_hand_reached(now_ms),
            MachineState::HandUp => self.step_hand_up(now_ms),
        }
    }

    /// `Init`: drive into the limit switch under the slow profile.
    ///
    /// The homing target sits past the physical range, so the latch firing
    /// is the normal exit. If the move runs out anyway (miswired or stuck
    /// switch), the machine stays in `Init` and re-commands the same move
    /// each iteration until the latch fires.
    fn step_init(&mut self) -> Result<Option<Transition>, S::Error> {
        self.stepper.apply_profile(&self.config.hand.slow);
        self.stepper.move_to(self.config.hand.homing_target);

        match self.run_to_target()? {
            MoveOutcome::LimitHit => Ok(Some(Transition::Homed)),
            MoveOutcome::Completed => {
                if !self.homing_overrun_logged {
                    warn!(
                        "[{}] homing overran {} steps without a limit hit; waiting for switch",
                        self.config.device.name,
                        self.config.hand.homing_target.unsigned_abs(),
                    );
                    self.homing_overrun_logged = true;
                }
                Ok(None)
            }
        }
    }

    /// `Ready`: poll the presence sensor; on assertion, extend the hand.
    ///
    /// The approach move inherits whatever profile is currently configured
    /// (slow, from homing).
    fn step_ready(&mut self, now_ms: u64) -> Result<Option<Transition>, S::Error> {
        if !self.presence.is_detected() {
            return Ok(None);
        }

        self.stepper.move_to(self.config.hand.reached_position);
        match self.run_to_target()? {
            // Switch still armed and fired mid-approach: re-zeroed, stay Ready.
            MoveOutcome::LimitHit => Ok(Some(Transition::Homed)),
            MoveOutcome::Completed => {
                self.phase_started_ms = now_ms;
                info!(
                    "[{}] presence detected, hand extended to {}: ready -> hand_reached (phase start {}ms)",
                    self.config.device.name,
                    self.stepper.current_position(),
                    now_ms,
                );
                self.state = MachineState::HandReached;
                Ok(Some(Transition::Extended))
            }
        }
    }

    /// `HandReached`: one range measurement, then the two exit checks.
    ///
    /// The timeout is evaluated first; when it hits, the proximity check is
    /// skipped for that iteration and the machine re-homes without raising.
    fn step_hand_reached(&mut self, now_ms: u64) -> Result<Option<Transition>, S::Error> {
        let distance = self.range.measure_cm();
        self.last_distance_cm = distance;
        debug!(
            "[{}] range sample: {:?}cm",
            self.config.device.name, distance
        );

        let elapsed = now_ms.saturating_sub(self.phase_started_ms);
        if elapsed > self.config.hand.reach_timeout_ms {
            warn!(
                "[{}] reach wait timed out: now={}ms phase_start={}ms, hand_reached -> init",
                self.config.device.name, now_ms, self.phase_started_ms,
            );
            self.rearm_and_rehome();
            return Ok(Some(Transition::TimedOut));
        }

        if let Some(cm) = distance {
            if cm <= self.config.hand.reach_threshold_cm {
                self.stepper.apply_profile(&self.config.hand.fast);
                self.stepper.move_to(self.config.hand.up_position);
                if let MoveOutcome::LimitHit = self.run_to_target()? {
                    return Ok(Some(Transition::Homed));
                }
                self.phase_started_ms = now_ms;
                info!(
                    "[{}] hand reached at {:.1}cm, raised to {}: hand_reached -> hand_up",
                    self.config.device.name,
                    cm,
                    self.stepper.current_position(),
                );
                self.state = MachineState::HandUp;
                return Ok(Some(Transition::Raised));
            }
        }

        Ok(None)
    }

    /// `HandUp`: dwell with no sensor evaluation, then restart the cycle.
    fn step_hand_up(&mut self, now_ms: u64) -> Result<Option<Transition>, S::Error> {
        let elapsed = now_ms.saturating_sub(self.phase_started_ms);
        if elapsed < self.config.hand.hand_up_delay_ms {
            return Ok(None);
        }

        self.cycles_completed = self.cycles_completed.wrapping_add(1);
        info!(
            "[{}] dwell elapsed, cycle {} complete: hand_up -> init",
            self.config.device.name, self.cycles_completed,
        );
        self.rearm_and_rehome();
        Ok(Some(Transition::Restarted))
    }

    /// Run the pending move to completion, servicing the limit latch
    /// between stepper polls.
    fn run_to_target(&mut self) -> Result<MoveOutcome, S::Error> {
        loop {
            if self.service_limit() {
                return Ok(MoveOutcome::LimitHit);
            }
            if !self.stepper.run()? {
                return Ok(MoveOutcome::Completed);
            }
        }
    }

    /// Consume a latched limit trigger, if any.
    ///
    /// Performs the callback body of the original interrupt handler:
    /// disarm, stop the axis, zero the position, enter `Ready`. The latch
    /// has already disarmed itself, so a bouncing contact cannot re-enter.
    fn service_limit(&mut self) -> bool {
        if !self.limit.take_triggered() {
            return false;
        }

        self.limit.disarm();
        self.stepper.stop();
        self.stepper.set_current_position(0);
        self.homing_overrun_logged = false;
        self.state = MachineState::Ready;
        info!(
            "[{}] limit switch hit, position zeroed: init -> ready",
            self.config.device.name,
        );
        true
    }

    /// Re-arm the limit latch and return to `Init` for the next homing run.
    fn rearm_and_rehome(&mut self) {
        self.limit.arm(self.config.hand.limit_edge);
        self.homing_overrun_logged = false;
        self.state = MachineState::Init;
    }

    /// Get a diagnostic state snapshot.
    pub fn state_snapshot(&self, now_ms: u64) -> HandState {
        HandState {
            state: self.state,
            position: self.stepper.current_position(),
            last_distance_cm: self.last_distance_cm,
            phase_elapsed_ms: now_ms.saturating_sub(self.phase_started_ms),
            limit_armed: self.limit.is_armed(),
            cycles_completed: self.cycles_completed,
        }
    }

    /// Get the active machine state.
    pub fn machine_state(&self) -> MachineState {
        self.state
    }

    /// Get the number of completed give-cycles.
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Get the most recent range sample taken in `HandReached`.
    pub fn last_distance_cm(&self) -> Option<f32> {
        self.last_distance_cm
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the stepper driver.
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Get a mutable reference to the stepper driver.
    pub fn stepper_mut(&mut self) -> &mut S {
        &mut self.stepper
    }

    /// Get a reference to the limit switch.
    pub fn limit(&self) -> &L {
        &self.limit
    }

    /// Get a mutable reference to the limit switch.
    pub fn limit_mut(&mut self) -> &mut L {
        &mut self.limit
    }

    /// Get a mutable reference to the presence sensor.
    pub fn presence_mut(&mut self) -> &mut P {
        &mut self.presence
    }

    /// Get a mutable reference to the range sensor.
    pub fn range_mut(&mut self) -> &mut R {
        &mut self.range
    }
}

/// Diagnostic state snapshot.
///
/// A point-in-time view of the machine for log output, the simulator
/// display, or tests. Implements `serde::Serialize` when the `serde`
/// feature is enabled.
///
/// # Example
///
/// ```rust
/// use helping_hand::{Config, HandSequencer, MachineState};
/// use helping_hand::hal::{MockLimitSwitch, MockPresence, MockRange, MockStepper};
///
/// let seq = HandSequencer::new(
///     MockStepper::new(),
///     MockLimitSwitch::new(),
///     MockPresence::new(),
///     MockRange::new(),
///     Config::default(),
/// );
///
/// let snapshot = seq.state_snapshot(0);
/// assert_eq!(snapshot.state, MachineState::Init);
/// assert!(snapshot.limit_armed);
/// assert_eq!(snapshot.cycles_completed, 0);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandState {
    /// Active machine state.
    pub state: MachineState,
    /// Axis position in steps from home.
    pub position: i64,
    /// Most recent range sample, if one has been taken.
    pub last_distance_cm: Option<f32>,
    /// Milliseconds since the current phase started.
    pub phase_elapsed_ms: u64,
    /// Whether the limit latch is armed.
    pub limit_armed: bool,
    /// Completed give-cycles since startup.
    pub cycles_completed: u32,
}
