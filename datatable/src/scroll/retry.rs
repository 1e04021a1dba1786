use std::time::Duration;

/// Back-off schedule for initial measurement.
///
/// Delays are offsets from mount; [`next_wait`](Self::next_wait) yields the
/// gap between consecutive attempts.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    offsets: Vec<Duration>,
    attempt: usize,
}

impl RetrySchedule {
    pub fn new(mut offsets: Vec<Duration>) -> Self {
        offsets.sort();
        Self { offsets, attempt: 0 }
    }

    /// Time to wait before the next attempt, or `None` when exhausted.
    pub fn next_wait(&mut self) -> Option<Duration> {
        let offset = *self.offsets.get(self.attempt)?;
        let previous = match self.attempt {
            0 => Duration::ZERO,
            n => self.offsets[n - 1],
        };
        self.attempt += 1;
        Some(offset - previous)
    }

    /// Attempts handed out so far.
    pub fn attempts(&self) -> usize {
        self.attempt
    }
}
