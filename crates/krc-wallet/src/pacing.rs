//! Pacing between batch iterations.
//!
//! A `Pacer` runs after an iteration finishes and before the next one
//! starts. Iterations never overlap, whatever the strategy.

use std::time::Duration;

pub trait Pacer {
    /// Called between iterations; `completed` is the 1-based number of the
    /// iteration that just finished.
    fn pause(&self, completed: u32);
}

/// Sleep for a fixed duration between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn pause(&self, _completed: u32) {
        std::thread::sleep(self.0);
    }
}

/// Start the next iteration immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self, _completed: u32) {}
}

impl<P: Pacer + ?Sized> Pacer for &P {
    fn pause(&self, completed: u32) {
        (**self).pause(completed)
    }
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    fn pause(&self, completed: u32) {
        (**self).pause(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn fixed_delay_sleeps() {
        let start = Instant::now();
        FixedDelay(Duration::from_millis(20)).pause(1);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
