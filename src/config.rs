//! Configuration for the hand mechanism.
//!
//! All of the machine's tunable numbers live here as plain structs with
//! `Default` values taken from the reference mechanism, plus builder-style
//! setters. Uses `heapless::String` for the device label so the
//! configuration stays `no_std`-clean.
//!
//! # Example
//!
//! ```rust
//! use helping_hand::config::{Config, HandConfig, MotionProfile};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default().with_hand(
//!     HandConfig::default()
//!         .with_reach_threshold_cm(20.0)
//!         .with_fast(MotionProfile::new(3000.0, 1200.0)),
//! );
//! ```

use heapless::String as HString;

use crate::traits::TriggerEdge;

/// Maximum length for the device name label
pub const MAX_NAME_LEN: usize = 64;

/// Type alias for the device name string
pub type NameString = HString<MAX_NAME_LEN>;

/// Create a NameString from a &str, truncating if too long
pub fn name_string(s: &str) -> NameString {
    let mut hs = NameString::new();
    let take = s.len().min(MAX_NAME_LEN);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Motion Profile
// ============================================================================

/// A named (max speed, acceleration) pair applied before a move.
///
/// Profiles are immutable configuration; the sequencer applies
/// [`HandConfig::slow`] for homing and the approach move, and
/// [`HandConfig::fast`] for the raise after detection.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionProfile {
    /// Maximum speed in steps/second.
    pub max_speed: f32,
    /// Acceleration in steps/second².
    pub acceleration: f32,
}

impl MotionProfile {
    /// Create a profile from a speed/acceleration pair.
    pub const fn new(max_speed: f32, acceleration: f32) -> Self {
        Self {
            max_speed,
            acceleration,
        }
    }
}

// ============================================================================
// Hand Config
// ============================================================================

/// Mechanism geometry, motion profiles, and phase timing.
///
/// Defaults match the reference mechanism: a ~200-step reach, a 680-step
/// raise, and a homing overtravel well past the physical range so the limit
/// switch always interrupts the move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandConfig {
    /// Extended position presented to the user, in steps from home.
    pub reached_position: i64,
    /// Fully raised position, in steps from home.
    pub up_position: i64,
    /// Homing target: a large negative offset that drives the hand into
    /// the limit switch.
    pub homing_target: i64,
    /// Profile for homing and the approach move.
    pub slow: MotionProfile,
    /// Profile for the raise after detection.
    pub fast: MotionProfile,
    /// Distance at or below which a hand counts as reaching in, in cm.
    pub reach_threshold_cm: f32,
    /// How long to wait for a close approach before re-homing, in ms.
    pub reach_timeout_ms: u64,
    /// Dwell after the raise before the cycle restarts, in ms.
    pub hand_up_delay_ms: u64,
    /// Active edge of the limit switch input.
    pub limit_edge: TriggerEdge,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            reached_position: 200,
            up_position: 680,
            homing_target: -2000,
            slow: MotionProfile::new(100.0, 200.0),
            fast: MotionProfile::new(2500.0, 1000.0),
            reach_threshold_cm: 25.0,
            reach_timeout_ms: 10_000,
            hand_up_delay_ms: 2_000,
            limit_edge: TriggerEdge::Falling,
        }
    }
}

impl HandConfig {
    /// Set the extended position.
    pub fn with_reached_position(mut self, steps: i64) -> Self {
        self.reached_position = steps;
        self
    }

    /// Set the raised position.
    pub fn with_up_position(mut self, steps: i64) -> Self {
        self.up_position = steps;
        self
    }

    /// Set the homing target offset.
    pub fn with_homing_target(mut self, steps: i64) -> Self {
        self.homing_target = steps;
        self
    }

    /// Set the slow (homing/approach) profile.
    pub fn with_slow(mut self, profile: MotionProfile) -> Self {
        self.slow = profile;
        self
    }

    /// Set the fast (raise) profile.
    pub fn with_fast(mut self, profile: MotionProfile) -> Self {
        self.fast = profile;
        self
    }

    /// Set the reach detection threshold.
    pub fn with_reach_threshold_cm(mut self, cm: f32) -> Self {
        self.reach_threshold_cm = cm;
        self
    }

    /// Set the reach wait timeout.
    pub fn with_reach_timeout_ms(mut self, ms: u64) -> Self {
        self.reach_timeout_ms = ms;
        self
    }

    /// Set the post-raise dwell.
    pub fn with_hand_up_delay_ms(mut self, ms: u64) -> Self {
        self.hand_up_delay_ms = ms;
        self
    }

    /// Set the limit switch active edge.
    pub fn with_limit_edge(mut self, edge: TriggerEdge) -> Self {
        self.limit_edge = edge;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification, used to label diagnostic output.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name.
    pub name: NameString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: name_string("helping-hand"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name_string(name);
        self
    }
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Device identification
    pub device: DeviceConfig,
    /// Mechanism geometry and timing
    pub hand: HandConfig,
}

impl Config {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set hand configuration
    pub fn with_hand(mut self, hand: HandConfig) -> Self {
        self.hand = hand;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Name String Tests
    // =========================================================================

    #[test]
    fn name_string_normal() {
        let s = name_string("giver-01");
        assert_eq!(s.as_str(), "giver-01");
    }

    #[test]
    fn name_string_truncates() {
        let long = "x".repeat(100);
        let s = name_string(&long);
        assert_eq!(s.len(), MAX_NAME_LEN);
    }

    #[test]
    fn name_string_empty() {
        let s = name_string("");
        assert!(s.is_empty());
    }

    // =========================================================================
    // MotionProfile Tests
    // =========================================================================

    #[test]
    fn motion_profile_new() {
        let p = MotionProfile::new(100.0, 200.0);
        assert_eq!(p.max_speed, 100.0);
        assert_eq!(p.acceleration, 200.0);
    }

    // =========================================================================
    // HandConfig Tests
    // =========================================================================

    #[test]
    fn hand_config_defaults() {
        let c = HandConfig::default();
        assert_eq!(c.reached_position, 200);
        assert_eq!(c.up_position, 680);
        assert_eq!(c.homing_target, -2000);
        assert_eq!(c.slow, MotionProfile::new(100.0, 200.0));
        assert_eq!(c.fast, MotionProfile::new(2500.0, 1000.0));
        assert_eq!(c.reach_threshold_cm, 25.0);
        assert_eq!(c.reach_timeout_ms, 10_000);
        assert_eq!(c.hand_up_delay_ms, 2_000);
        assert_eq!(c.limit_edge, TriggerEdge::Falling);
    }

    #[test]
    fn hand_config_builders() {
        let c = HandConfig::default()
            .with_reached_position(150)
            .with_up_position(500)
            .with_homing_target(-1500)
            .with_slow(MotionProfile::new(80.0, 160.0))
            .with_fast(MotionProfile::new(3000.0, 1500.0))
            .with_reach_threshold_cm(30.0)
            .with_reach_timeout_ms(5_000)
            .with_hand_up_delay_ms(1_000)
            .with_limit_edge(TriggerEdge::Rising);

        assert_eq!(c.reached_position, 150);
        assert_eq!(c.up_position, 500);
        assert_eq!(c.homing_target, -1500);
        assert_eq!(c.slow.max_speed, 80.0);
        assert_eq!(c.fast.acceleration, 1500.0);
        assert_eq!(c.reach_threshold_cm, 30.0);
        assert_eq!(c.reach_timeout_ms, 5_000);
        assert_eq!(c.hand_up_delay_ms, 1_000);
        assert_eq!(c.limit_edge, TriggerEdge::Rising);
    }

    // =========================================================================
    // Device / Aggregate Config Tests
    // =========================================================================

    #[test]
    fn device_config_default_name() {
        let d = DeviceConfig::default();
        assert_eq!(d.name.as_str(), "helping-hand");
    }

    #[test]
    fn config_builders() {
        let config = Config::default()
            .with_device(DeviceConfig::default().with_name("bench-rig"))
            .with_hand(HandConfig::default().with_reach_timeout_ms(3_000));

        assert_eq!(config.device.name.as_str(), "bench-rig");
        assert_eq!(config.hand.reach_timeout_ms, 3_000);
    }
}
