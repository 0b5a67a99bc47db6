//! The world clock.
//!
//! Every frame of wall time the clock advances game time by
//! `(1000 / frame_ms) * time_scale` units (one unit is one game-second) and
//! fires whatever came due. Fractions of a unit carry over to the next frame.
//! A frame that overruns is followed immediately by the next one; missed
//! frames are not replayed.

use std::thread;
use std::time::{Duration, Instant};

use wayfarer_foundation::{Error, Result};

/// Something that game time can be advanced on.
pub trait Advance {
    /// Advances by `increment` units and returns the number of events fired.
    fn advance(&mut self, increment: u64) -> usize;
}

/// Clock configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockConfig {
    /// Wall time per frame.
    pub frame: Duration,
    /// Multiplier applied to the per-frame increment.
    pub time_scale: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(50),
            time_scale: 1.0,
        }
    }
}

impl ClockConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that runs `scale` times faster than real time.
    #[must_use]
    pub fn accelerated(scale: f64) -> Self {
        Self::default().with_time_scale(scale)
    }

    /// Sets the frame duration.
    #[must_use]
    pub const fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Sets the time scale.
    #[must_use]
    pub const fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Checks that the frame is non-zero and the scale positive and finite.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the bad value.
    pub fn validate(&self) -> Result<()> {
        if self.frame.is_zero() {
            return Err(Error::config("frame duration must be greater than zero"));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(Error::config(format!(
                "time scale must be a positive number, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }

    /// Game-time units per frame, before carrying fractions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn increment(&self) -> f64 {
        let frame_ms = self.frame.as_nanos() as f64 / 1_000_000.0;
        (1000.0 / frame_ms) * self.time_scale
    }
}

/// Fixed-period tick driver.
#[derive(Clone, Debug)]
pub struct WorldClock {
    config: ClockConfig,
    carry: f64,
    frames: u64,
    elapsed: u64,
}

impl WorldClock {
    /// Creates a clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ClockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            carry: 0.0,
            frames: 0,
            elapsed: 0,
        })
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Frames ticked so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Game time advanced so far.
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Whole units for the next frame, keeping the fraction for later.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn next_increment(&mut self) -> u64 {
        self.carry += self.config.increment();
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as u64
    }

    /// Runs one frame's worth of game time. Returns the number of events fired.
    pub fn tick(&mut self, target: &mut impl Advance) -> usize {
        let increment = self.next_increment();
        self.frames += 1;
        self.elapsed = self.elapsed.saturating_add(increment);
        target.advance(increment)
    }

    /// Wall time left in a frame that began at `started`, or `None` if the
    /// frame has overrun.
    #[must_use]
    pub fn remaining(&self, started: Instant) -> Option<Duration> {
        self.config
            .frame
            .checked_sub(started.elapsed())
            .filter(|left| !left.is_zero())
    }

    /// Ticks, then sleeps out the rest of the frame.
    pub fn run_frame(&mut self, target: &mut impl Advance) -> usize {
        let started = Instant::now();
        let fired = self.tick(target);
        if let Some(left) = self.remaining(started) {
            thread::sleep(left);
        }
        fired
    }
}
