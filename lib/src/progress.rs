//! Progress reporting for long-running operations.

use log::info;

/// A progress report. We don't type the topic and just use a string instead.
pub struct Progress {
    pub topic: &'static str,
    pub current: usize,
    interval: usize,
}

impl Progress {
    /// `interval` is how many steps lie between two log lines.
    pub fn new(topic: &'static str, interval: usize) -> Self {
        Self {
            topic,
            current: 0,
            interval: interval.max(1),
        }
    }

    /// Advances by one step and logs every `interval` steps.
    pub fn tick(&mut self) {
        self.current += 1;
        if self.current % self.interval == 0 {
            info!("Processed {} {}...", self.current, self.topic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks() {
        let mut progress = Progress::new("games", 2);
        progress.tick();
        progress.tick();
        progress.tick();
        assert_eq!(progress.current, 3);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut progress = Progress::new("games", 0);
        progress.tick();
        assert_eq!(progress.interval, 1);
    }
}
