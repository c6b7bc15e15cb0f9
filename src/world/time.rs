use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct GameTick(pub u64);

#[derive(Debug, Clone)]
pub struct GameClock {
    tick_length: Duration,
    tick: GameTick,
}

impl GameClock {
    pub fn new(tick_length: Duration) -> Self {
        let tick_length = if tick_length.is_zero() {
            Duration::from_millis(1)
        } else {
            tick_length
        };
        Self {
            tick_length,
            tick: GameTick(0),
        }
    }

    pub fn now(&self) -> GameTick {
        self.tick
    }

    pub fn advance(&mut self, ticks: u64) -> GameTick {
        self.tick.0 = self.tick.0.saturating_add(ticks);
        self.tick
    }

    pub fn advance_duration(&mut self, duration: Duration) -> GameTick {
        let ticks = self.ticks_from_duration_round_up(duration);
        self.advance(ticks)
    }

    pub fn ticks_from_duration_round_up(&self, duration: Duration) -> u64 {
        if duration.is_zero() {
            return 0;
        }
        let tick_nanos = self.tick_length.as_nanos().max(1);
        let duration_nanos = duration.as_nanos();
        let ticks = (duration_nanos + tick_nanos - 1) / tick_nanos;
        ticks.min(u64::MAX as u128) as u64
    }

    pub fn duration_for_ticks(&self, ticks: u64) -> Duration {
        let nanos = self
            .tick_length
            .as_nanos()
            .saturating_mul(ticks as u128)
            .min(u64::MAX as u128) as u64;
        Duration::from_nanos(nanos)
    }
}

/// A point in game time before which something is not allowed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    ready_at: GameTick,
}

impl Cooldown {
    pub fn ready_at(&self) -> GameTick {
        self.ready_at
    }

    pub fn is_ready(&self, clock: &GameClock) -> bool {
        clock.now() >= self.ready_at
    }

    pub fn remaining_ticks(&self, clock: &GameClock) -> u64 {
        self.ready_at.0.saturating_sub(clock.now().0)
    }

    pub fn remaining_duration(&self, clock: &GameClock) -> Duration {
        clock.duration_for_ticks(self.remaining_ticks(clock))
    }

    /// Moves the ready point to `now + duration`. A ready point already further
    /// in the future is kept.
    pub fn extend_from_now(&mut self, clock: &GameClock, duration: Duration) {
        let ticks = clock.ticks_from_duration_round_up(duration);
        let candidate = GameTick(clock.now().0.saturating_add(ticks));
        if candidate > self.ready_at {
            self.ready_at = candidate;
        }
    }
}
