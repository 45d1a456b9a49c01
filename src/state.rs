//! Machine states and transition labels for the hand sequencer.
//!
//! The whole controller is one four-state machine; exactly one
//! [`MachineState`] is active at any instant and it is the only piece of
//! control state that persists across loop iterations.

/// State of the hand cycle.
///
/// # Default
///
/// Defaults to [`Init`](Self::Init) so a sequencer never observes an
/// unset state: homing is always the first thing that happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MachineState {
    /// Homing toward the limit switch to establish logical zero.
    #[default]
    Init,
    /// Parked at home, polling the presence sensor.
    Ready,
    /// Extended, measuring range and waiting for a hand within threshold.
    HandReached,
    /// Raised, dwelling before the cycle restarts.
    HandUp,
}

impl MachineState {
    /// Returns the state name as a lowercase string.
    ///
    /// Used for log lines and state snapshots.
    ///
    /// # Examples
    ///
    /// ```
    /// use helping_hand::MachineState;
    ///
    /// assert_eq!(MachineState::Init.as_str(), "init");
    /// assert_eq!(MachineState::HandReached.as_str(), "hand_reached");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MachineState::Init => "init",
            MachineState::Ready => "ready",
            MachineState::HandReached => "hand_reached",
            MachineState::HandUp => "hand_up",
        }
    }
}

/// Transition taken by a single sequencer iteration.
///
/// Returned by [`HandSequencer::step`] so runners can trace the cycle
/// without inspecting internals. Each variant corresponds to one edge of
/// the state diagram.
///
/// [`HandSequencer::step`]: crate::HandSequencer::step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Transition {
    /// Limit switch fired during homing; position zeroed. `Init -> Ready`.
    Homed,
    /// Presence detected; hand extended. `Ready -> HandReached`.
    Extended,
    /// Wait phase expired without a close approach. `HandReached -> Init`.
    TimedOut,
    /// Object within threshold; hand raised. `HandReached -> HandUp`.
    Raised,
    /// Dwell elapsed; cycle restarting. `HandUp -> Init`.
    Restarted,
}

impl Transition {
    /// Returns the transition name as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transition::Homed => "homed",
            Transition::Extended => "extended",
            Transition::TimedOut => "timed_out",
            Transition::Raised => "raised",
            Transition::Restarted => "restarted",
        }
    }
}
