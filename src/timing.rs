use std::time::{Duration, Instant};

use tracing::info;

/// Scoped wall-clock measurement around a piece of work.
///
/// The elapsed time is logged once, either by [`Timed::finish`] or when the guard is dropped.
pub struct Timed {
    label: &'static str,
    started: Instant,
    reported: bool,
}

impl Timed {
    pub fn start(label: &'static str) -> Self {
        Self { label, started: Instant::now(), reported: false }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(mut self) -> Duration {
        let elapsed = self.elapsed();
        self.report(elapsed);

        elapsed
    }

    fn report(&mut self, elapsed: Duration) {
        if !self.reported {
            info!(task = self.label, elapsed_secs = elapsed.as_secs_f64(), "Finished");
            self.reported = true;
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.report(elapsed);
    }
}

/// Run `f` and return its result together with how long it took.
pub fn timed<R>(label: &'static str, f: impl FnOnce() -> R) -> (R, Duration) {
    let timer = Timed::start(label);
    let result = f();

    (result, timer.finish())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{timed, Timed};

    #[test]
    fn test_timed_returns_result() {
        let (value, elapsed) = timed("sum", || (1..=10).sum::<u32>());

        assert_eq!(value, 55);
        assert!(elapsed < Duration::from_secs(60));
    }

    #[test]
    fn test_elapsed_grows() {
        let timer = Timed::start("sleep");
        std::thread::sleep(Duration::from_millis(5));

        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
