use std::{thread::sleep, time::{Duration, Instant}};

/// Paces the main loop at a fixed number of ticks per second.
pub struct Clock {
    period: Duration,
    next: Instant,
}

impl Clock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Clock { period, next: Instant::now() + period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleeps until the end of the current frame. A frame that overran
    /// restarts the schedule from now instead of trying to catch up.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.next > now {
            sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}
