use std::time::Duration;

/// Identifies one armed timer; a restart hands out a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub generation: u64,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
struct RepeatingTimer {
    handle: TimerHandle,
    elapsed: Duration,
}

impl RepeatingTimer {
    fn advance(&mut self, dt: Duration) -> u32 {
        let interval = self.handle.interval;
        if interval.is_zero() {
            return 0;
        }
        let elapsed = self.elapsed.saturating_add(dt).as_nanos();
        let period = interval.as_nanos();
        let rem = elapsed % period;
        // rem < interval, so it always fits back into a Duration.
        self.elapsed = Duration::new((rem / 1_000_000_000) as u64, (rem % 1_000_000_000) as u32);
        u32::try_from(elapsed / period).unwrap_or(u32::MAX)
    }
}

/// Holds at most one repeating timer. Arming a new one always cancels the
/// old one first, so a slot never runs two intervals at once.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    active: Option<RepeatingTimer>,
    next_generation: u64,
}

impl TimerSlot {
    pub fn start(&mut self, interval: Duration) -> TimerHandle {
        self.cancel();
        self.next_generation += 1;
        let handle = TimerHandle {
            generation: self.next_generation,
            interval,
        };
        self.active = Some(RepeatingTimer {
            handle,
            elapsed: Duration::ZERO,
        });
        handle
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.active.take().map(|t| t.handle)
    }

    /// Cancel-then-recreate; `None` when nothing was armed.
    pub fn restart(&mut self, interval: Duration) -> Option<TimerHandle> {
        self.cancel()?;
        Some(self.start(interval))
    }

    pub fn active(&self) -> Option<TimerHandle> {
        self.active.as_ref().map(|t| t.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.active() == Some(handle)
    }

    /// Time left until the next fire.
    pub fn remaining(&self) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|t| t.handle.interval.saturating_sub(t.elapsed))
    }

    /// Number of ticks that became due during `dt`.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.active.as_mut().map_or(0, |t| t.advance(dt))
    }
}
