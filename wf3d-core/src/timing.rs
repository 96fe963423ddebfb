/// Fixed-timestep tick scheduling
use std::num::NonZeroU32;

use log::{trace, warn};

use crate::config::EngineConfig;

/// Timestamp the scheduler starts from, far enough in the past that the
/// first frame always hits the backlog clamp.
pub const INITIAL_TIMESTAMP: i64 = -0x0FFF_FFFF;

/// One batched simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Ticks elapsed since the previous step, already clamped.
    pub ticks: NonZeroU32,
    /// Running total of ticks including this batch.
    pub tick_number: u32,
}

/// Accumulates host timestamps into whole ticks of fixed duration.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    last_tick_timestamp: i64,
    tick_number: u32,
    tick_duration: u32,
    max_ticks_per_frame: u32,
}

impl TickScheduler {
    /// Scheduler for `target_fps`, so one tick lasts `ceil(1000 / target_fps)`.
    pub fn new(target_fps: u32, max_ticks_per_frame: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            last_tick_timestamp: INITIAL_TIMESTAMP,
            tick_number: 0,
            tick_duration: 1000u32.div_ceil(target_fps).max(1),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.target_fps, config.max_ticks_per_frame)
    }

    pub fn tick_duration(&self) -> u32 {
        self.tick_duration
    }

    pub fn tick_number(&self) -> u32 {
        self.tick_number
    }

    pub fn last_tick_timestamp(&self) -> i64 {
        self.last_tick_timestamp
    }

    /// Account for time up to `timestamp`.
    ///
    /// Returns `None` when no whole tick has elapsed, including when the
    /// timestamp went backwards. Leftover time below one tick is carried to
    /// the next call unless the backlog was clamped, in which case it is
    /// dropped.
    pub fn advance(&mut self, timestamp: i32) -> Option<Tick> {
        let timestamp = i64::from(timestamp);
        let delta = timestamp - self.last_tick_timestamp;
        if delta <= 0 {
            return None;
        }

        let duration = i64::from(self.tick_duration);
        let elapsed = delta / duration;
        let max = i64::from(self.max_ticks_per_frame);

        let ticks = if elapsed > max {
            if self.tick_number > 0 {
                warn!("dropping {} ticks of backlog", elapsed - max);
            }
            self.last_tick_timestamp = timestamp;
            self.max_ticks_per_frame
        } else {
            self.last_tick_timestamp += elapsed * duration;
            // elapsed <= max_ticks_per_frame here
            elapsed as u32
        };

        let ticks = NonZeroU32::new(ticks)?;
        self.tick_number = self.tick_number.wrapping_add(ticks.get());
        trace!(
            "advanced {} ticks to #{} at {}",
            ticks,
            self.tick_number,
            timestamp
        );

        Some(Tick {
            ticks,
            tick_number: self.tick_number,
        })
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
