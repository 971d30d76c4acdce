//! Frame timing and periodic timers
//!
//! The host calls `FrameClock::advance` with its own timestamp each frame.
//! The simulation steps by the capped delta while the countdown and
//! difficulty timers follow the full elapsed host time.

use crate::consts::MAX_FRAME_DT;

/// Time covered by one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStep {
    /// Host time since the previous frame, never negative
    pub elapsed_ms: f64,
    /// Simulation step in seconds, at most `MAX_FRAME_DT`
    pub dt: f32,
}

/// Converts host timestamps (ms) into per-frame steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step since the previous call
    ///
    /// The first frame after a reset advances nothing and timestamps that go
    /// backwards yield zero. Only `dt` is capped after a long stall.
    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        let elapsed_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        FrameStep {
            elapsed_ms,
            dt: ((elapsed_ms / 1000.0) as f32).min(MAX_FRAME_DT),
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Fires every `period_ms` of accumulated time
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTimer {
    period_ms: f64,
    elapsed_ms: f64,
}

impl PeriodicTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Accumulate `dt_ms` and return how many periods elapsed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.period_ms <= 0.0 || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}
