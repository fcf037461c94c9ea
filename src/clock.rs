/// Game time, counted in fixed ticks rather than measured from the wall clock. A slow frame still
/// advances time by exactly one tick.
#[derive(Copy, Clone, Debug)]
pub struct ClockState {
    ticks: u64,
    tick_rate: u32,
}

impl ClockState {
    /// Create a clock at time zero that ticks `tick_rate` times per game second.
    pub fn new(tick_rate: u32) -> Self {
        Self {
            ticks: 0,
            tick_rate: tick_rate.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed game time in seconds.
    pub fn seconds(&self) -> f32 {
        (self.ticks as f64 / self.tick_rate as f64) as f32
    }
}

/// Slack allowed on each interval, so a frame that lands a hair early still ticks.
const TICK_TOLERANCE: f64 = 0.0005;

/// Decides when a tick is due, given the current wall clock time. Like a repeating timer it fires
/// at most once per poll and never tries to catch up on ticks it missed.
#[derive(Copy, Clone, Debug)]
pub struct FixedTicker {
    interval: f64,
    last_tick: Option<f64>,
}

impl FixedTicker {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true if a tick is due at time `now` (in seconds). Ticks stay on a fixed schedule
    /// while polls keep up; after falling a whole interval behind the schedule restarts at `now`.
    pub fn poll(&mut self, now: f64) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return true;
        };

        if now - last < self.interval - TICK_TOLERANCE {
            return false;
        }

        let scheduled = last + self.interval;
        self.last_tick = Some(if now - scheduled >= self.interval { now } else { scheduled });
        true
    }
}
