//! `std` implementations: wall-clock time and an interrupt-safe limit latch.
//!
//! These are the pieces a real rig wires in around the mocks-free core:
//! a monotonic [`SystemClock`] for the control loop, and a
//! [`SharedLimitSwitch`] whose [`LimitTrigger`] handle can be fired from an
//! interrupt service routine or another thread while the loop is mid-move.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::traits::{Clock, LimitSwitch, TriggerEdge};

/// Monotonic wall clock.
///
/// Milliseconds since the clock was created, backed by `std::time::Instant`.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::SystemClock;
/// use helping_hand::traits::Clock;
///
/// let clock = SystemClock::new();
/// let start = clock.now_ms();
/// // ... do work ...
/// assert!(clock.now_ms() >= start);
/// ```
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[derive(Debug, Default)]
struct LatchInner {
    armed: AtomicBool,
    triggered: AtomicBool,
}

/// Interrupt-safe limit switch latch.
///
/// The control loop owns the `SharedLimitSwitch`; the wiring that services
/// the physical input (an ISR, a GPIO event thread) owns a cloned
/// [`LimitTrigger`]. Firing the trigger swaps the armed flag off and the
/// trigger flag on in two atomic operations, so the one-shot contract
/// holds even when the edge lands in the middle of a stepper poll loop.
///
/// # Example
///
/// ```rust
/// use helping_hand::hal::SharedLimitSwitch;
/// use helping_hand::traits::{LimitSwitch, TriggerEdge};
///
/// let mut limit = SharedLimitSwitch::new();
/// let trigger = limit.trigger_handle();
///
/// limit.arm(TriggerEdge::Falling);
///
/// // From an ISR or another thread:
/// trigger.fire();
///
/// assert!(!limit.is_armed());
/// assert!(limit.take_triggered());
/// assert!(!limit.take_triggered());
/// ```
#[derive(Debug, Default)]
pub struct SharedLimitSwitch {
    inner: Arc<LatchInner>,
    edge: TriggerEdge,
}

impl SharedLimitSwitch {
    /// Creates a new, unarmed latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a trigger handle for the interrupt side.
    ///
    /// The handle is `Clone + Send`; fire it from wherever the physical
    /// edge is observed.
    pub fn trigger_handle(&self) -> LimitTrigger {
        LimitTrigger {
            inner: Arc::clone(&self.inner),
        }
    }

    /// The edge requested by the most recent `arm` call.
    pub fn edge(&self) -> TriggerEdge {
        self.edge
    }
}

impl LimitSwitch for SharedLimitSwitch {
    fn arm(&mut self, edge: TriggerEdge) {
        self.edge = edge;
        self.inner.triggered.store(false, Ordering::Release);
        self.inner.armed.store(true, Ordering::Release);
    }

    fn disarm(&mut self) {
        self.inner.armed.store(false, Ordering::Release);
    }

    fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::Acquire)
    }

    fn take_triggered(&mut self) -> bool {
        self.inner.triggered.swap(false, Ordering::AcqRel)
    }
}

/// Fire-side handle for a [`SharedLimitSwitch`].
///
/// Cheap to clone; safe to call from an ISR or another thread.
#[derive(Debug, Clone)]
pub struct LimitTrigger {
    inner: Arc<LatchInner>,
}

impl LimitTrigger {
    /// Fire the switch edge.
    ///
    /// Latches the trigger and disarms the switch. Ignored unless the
    /// switch is armed, so repeated edges (contact bounce) latch at most
    /// once per arm cycle.
    pub fn fire(&self) {
        if self.inner.armed.swap(false, Ordering::AcqRel) {
            self.inner.triggered.store(true, Ordering::Release);
        }
    }

    /// Returns `true` while the switch is armed.
    ///
    /// Lets the fire side skip servicing the input between arm cycles.
    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::Acquire)
    }
}
