//! Repeated timing of a whole search.
//!
//! [`Benchmark`] calls a solve routine a fixed number of times, silencing
//! log output inside each call, and reports the running mean and standard
//! deviation every few runs.

use std::time::{Duration, Instant};
use tracing::info;

/// Timing harness configuration.
///
/// # Examples
///
/// ```
/// use u_evolve::benchmark::Benchmark;
///
/// let report = Benchmark::default().with_runs(5).run(|| {
///     let _ = (0..1000).sum::<u64>();
/// });
/// assert_eq!(report.timings.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Benchmark {
    /// Number of calls to time.
    pub runs: usize,
    /// Log the running statistics after this many calls. `0` disables
    /// progress reports.
    pub report_every: usize,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            runs: 100,
            report_every: 10,
        }
    }
}

impl Benchmark {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_report_every(mut self, every: usize) -> Self {
        self.report_every = every;
        self
    }

    /// Times `solve` `runs` times.
    pub fn run(&self, mut solve: impl FnMut()) -> BenchmarkReport {
        let mut timings = Vec::with_capacity(self.runs);
        for run in 1..=self.runs {
            let started = Instant::now();
            tracing::subscriber::with_default(tracing::subscriber::NoSubscriber::default(), || {
                solve()
            });
            timings.push(started.elapsed());

            if self.report_every > 0 && run % self.report_every == 0 {
                let (mean, std_dev) = mean_and_std_dev(&timings);
                info!(
                    run,
                    mean_secs = mean.as_secs_f64(),
                    std_dev_secs = std_dev.as_secs_f64(),
                    "benchmark progress"
                );
            }
        }

        let (mean, std_dev) = mean_and_std_dev(&timings);
        BenchmarkReport {
            timings,
            mean,
            std_dev,
        }
    }
}

/// Per-call timings and their summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    pub timings: Vec<Duration>,
    pub mean: Duration,
    /// Sample standard deviation; zero with fewer than two timings.
    pub std_dev: Duration,
}

fn mean_and_std_dev(timings: &[Duration]) -> (Duration, Duration) {
    if timings.is_empty() {
        return (Duration::ZERO, Duration::ZERO);
    }
    let n = timings.len() as f64;
    let secs: Vec<f64> = timings.iter().map(Duration::as_secs_f64).collect();
    let mean = secs.iter().sum::<f64>() / n;
    let std_dev = if timings.len() < 2 {
        0.0
    } else {
        let var = secs.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    };
    (Duration::from_secs_f64(mean), Duration::from_secs_f64(std_dev))
}
