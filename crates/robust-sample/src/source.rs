//! Sources of elapsed-time observations

use std::time::Duration;

/// A stream of measured durations, one per benchmark iteration
///
/// The engine has no clock of its own; the benchmark harness times each
/// iteration and hands the elapsed time over through this trait. Any
/// iterator of `Duration`s is a time source.
pub trait TimeSource {
    /// Elapsed time of the next iteration, or `None` once exhausted
    fn next_elapsed(&mut self) -> Option<Duration>;
}

impl<I> TimeSource for I
where
    I: Iterator<Item = Duration>,
{
    fn next_elapsed(&mut self) -> Option<Duration> {
        self.next()
    }
}
