//! Time management for the scheduler
//!
//! The scheduler runs once per host frame. Frames are counted as discrete
//! ticks, and each tick carries the elapsed game time since the previous one.
//! This module keeps both counters so events can be stamped with a tick and
//! timers can decay by real elapsed time.

use serde::{Deserialize, Serialize};

/// Counts scheduler ticks and the game time they covered
///
/// # Example
/// ```
/// use science_manager_core::FlightClock;
///
/// let mut clock = FlightClock::new();
/// assert_eq!(clock.current_tick(), 0);
///
/// clock.advance(0.5);
/// assert_eq!(clock.current_tick(), 1);
/// assert_eq!(clock.elapsed(), 0.5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightClock {
    /// Ticks completed since the clock was created
    current_tick: usize,
    /// Game time covered by those ticks
    elapsed: f64,
}

impl FlightClock {
    /// Create a clock at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete one tick that covered `delta` units of game time
    ///
    /// Negative or non-finite deltas count as an empty tick: the tick number
    /// still advances but no time passes.
    ///
    /// # Example
    /// ```
    /// use science_manager_core::FlightClock;
    ///
    /// let mut clock = FlightClock::new();
    /// clock.advance(-3.0);
    /// assert_eq!(clock.current_tick(), 1);
    /// assert_eq!(clock.elapsed(), 0.0);
    /// ```
    pub fn advance(&mut self, delta: f64) {
        self.current_tick += 1;
        self.elapsed += sanitize_delta(delta);
    }

    /// Get the current tick (ticks completed so far)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the total game time covered so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Clamp a frame delta to something a timer can safely subtract
pub fn sanitize_delta(delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}
