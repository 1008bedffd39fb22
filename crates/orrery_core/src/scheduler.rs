//! Frame scheduling
//!
//! Throttles the simulation to a fixed tick rate regardless of display
//! refresh, and derives the per-tick bookkeeping the rest of the loop
//! consumes: a capped delta time, the periodic LOD cadence and the
//! half-rate shake cadence. Time is injected, never read from a global
//! clock, so tests drive it directly.

/// Target simulation rate in ticks per second
pub const TARGET_TICK_RATE: f64 = 60.0;
/// Upper bound on reported delta time in seconds
pub const MAX_DT: f32 = 0.25;
/// Ticks between LOD re-evaluations
pub const LOD_PERIOD: u64 = 60;

/// Everything the per-tick update needs to know about this tick
#[derive(Clone, Copy, Debug)]
pub struct Tick {
    /// Seconds since the previous tick, capped at [`MAX_DT`]; zero on the
    /// first tick
    pub dt: f32,
    /// Monotonic tick counter
    pub index: u64,
    /// LOD should be re-evaluated on this tick
    pub run_lod: bool,
    /// Cockpit shake applies on this tick (every other tick)
    pub shake_tick: bool,
}

/// Fixed-rate tick gate
pub struct FrameScheduler {
    interval_ms: f64,
    last_tick_ms: Option<f64>,
    tick_count: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            interval_ms: 1000.0 / TARGET_TICK_RATE,
            last_tick_ms: None,
            tick_count: 0,
        }
    }

    /// Builder: override the tick rate
    pub fn with_tick_rate(mut self, ticks_per_second: f64) -> Self {
        if ticks_per_second > 0.0 {
            self.interval_ms = 1000.0 / ticks_per_second;
        }
        self
    }

    /// Decide whether a tick is due at `now_ms`
    ///
    /// At most one tick fires per call; a long stall never produces a burst
    /// of catch-up ticks, it produces one tick with a capped `dt`.
    pub fn poll(&mut self, now_ms: f64) -> Option<Tick> {
        let dt = match self.last_tick_ms {
            Some(last) => {
                if now_ms - last < self.interval_ms {
                    return None;
                }
                (((now_ms - last) / 1000.0) as f32).min(MAX_DT)
            }
            None => 0.0,
        };

        self.last_tick_ms = Some(now_ms);
        let index = self.tick_count;
        self.tick_count += 1;

        Some(Tick {
            dt,
            index,
            run_lod: index % LOD_PERIOD == 0,
            shake_tick: index % 2 == 0,
        })
    }

    /// Ticks issued so far
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_ticks_with_zero_dt() {
        let mut scheduler = FrameScheduler::new();
        let tick = scheduler.poll(1000.0).unwrap();
        assert_eq!(tick.dt, 0.0);
        assert_eq!(tick.index, 0);
        assert!(tick.run_lod);
        assert!(tick.shake_tick);
    }

    #[test]
    fn test_polls_inside_interval_are_skipped() {
        let mut scheduler = FrameScheduler::new();
        scheduler.poll(0.0).unwrap();
        assert!(scheduler.poll(5.0).is_none());
        assert!(scheduler.poll(16.0).is_none());
        assert!(scheduler.poll(16.7).is_some());
        assert_eq!(scheduler.tick_count(), 2);
    }

    #[test]
    fn test_dt_reflects_elapsed_time() {
        let mut scheduler = FrameScheduler::new();
        scheduler.poll(0.0).unwrap();
        let tick = scheduler.poll(33.4).unwrap();
        assert!((tick.dt - 0.0334).abs() < 1e-6);
    }

    #[test]
    fn test_dt_capped_after_stall() {
        let mut scheduler = FrameScheduler::new();
        scheduler.poll(0.0).unwrap();
        // Five-second stall: one tick, dt clamped, no burst
        let tick = scheduler.poll(5000.0).unwrap();
        assert_eq!(tick.dt, MAX_DT);
        assert!(scheduler.poll(5001.0).is_none());
    }

    #[test]
    fn test_lod_cadence() {
        let mut scheduler = FrameScheduler::new();
        let mut lod_ticks = Vec::new();
        let mut now = 0.0;
        for _ in 0..130 {
            if let Some(tick) = scheduler.poll(now) {
                if tick.run_lod {
                    lod_ticks.push(tick.index);
                }
            }
            now += 17.0;
        }
        assert_eq!(lod_ticks, vec![0, 60, 120]);
    }

    #[test]
    fn test_shake_alternates() {
        let mut scheduler = FrameScheduler::new();
        let mut pattern = Vec::new();
        let mut now = 0.0;
        for _ in 0..4 {
            if let Some(tick) = scheduler.poll(now) {
                pattern.push(tick.shake_tick);
            }
            now += 17.0;
        }
        assert_eq!(pattern, vec![true, false, true, false]);
    }
}
