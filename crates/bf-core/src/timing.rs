//! Lightweight timing for flow calculations.
//!
//! Off by default. Enable with [`enable_timing`] or by setting `BF_TIMING`
//! in the environment; summaries are emitted through `tracing` at info level.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os("BF_TIMING").is_some()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed seconds, or `None` when disabled.
    pub fn stop(self) -> Option<f64> {
        self.enabled.then(|| self.start.elapsed().as_secs_f64())
    }

    /// Stop the timer and add the measurement to `acc`.
    pub fn stop_into(self, acc: &AccumulatingTimer) {
        if let Some(elapsed) = self.stop() {
            acc.record(elapsed);
        }
    }

    /// Stop the timer and log the result if enabled.
    pub fn stop_and_log(self) {
        let label = self.label;
        if let Some(elapsed) = self.stop() {
            tracing::info!(target: "bf::timing", "{label}: {:.3}ms", elapsed * 1000.0);
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Per-stage timers of the flow pipeline.
pub mod flow_timing {
    use super::AccumulatingTimer;

    /// Segment tree construction, one record per source.
    pub static PATH_BUILD: AccumulatingTimer = AccumulatingTimer::new();
    /// Friction reduction of a built tree.
    pub static FRICTION_RESOLVE: AccumulatingTimer = AccumulatingTimer::new();
    /// Walking a tree to distribute flow.
    pub static FLOW_APPLY: AccumulatingTimer = AccumulatingTimer::new();
    /// Opposite-direction merge over the final map.
    pub static MERGE: AccumulatingTimer = AccumulatingTimer::new();

    fn all() -> [(&'static str, &'static AccumulatingTimer); 4] {
        [
            ("path build", &PATH_BUILD),
            ("friction resolve", &FRICTION_RESOLVE),
            ("flow apply", &FLOW_APPLY),
            ("merge", &MERGE),
        ]
    }

    pub fn reset_all() {
        for (_, timer) in all() {
            timer.reset();
        }
    }

    /// Log one line per stage that recorded anything.
    pub fn log_summary() {
        if !super::is_enabled() {
            return;
        }
        for (label, timer) in all() {
            let count = timer.count();
            if count > 0 {
                tracing::info!(
                    target: "bf::timing",
                    "{label}: {count} calls, {:.3}ms total, {:.4}ms avg",
                    timer.total_seconds() * 1000.0,
                    timer.average_seconds() * 1000.0
                );
            }
        }
    }
}

/// Statistics for one flow calculation request.
#[derive(Debug, Default, Clone)]
pub struct PerfStats {
    pub load_time_s: f64,
    pub translate_time_s: f64,
    pub solve_time_s: f64,
    pub sources: usize,
    pub failed_sources: usize,
}

impl PerfStats {
    /// Log a summary of the statistics, then the per-stage breakdown.
    pub fn log_summary(&self) {
        if !is_enabled() {
            return;
        }
        tracing::info!(
            target: "bf::timing",
            sources = self.sources,
            failed = self.failed_sources,
            "load {:.3}ms, translate {:.3}ms, solve {:.3}ms",
            self.load_time_s * 1000.0,
            self.translate_time_s * 1000.0,
            self.solve_time_s * 1000.0
        );
        flow_timing::log_summary();
    }
}
