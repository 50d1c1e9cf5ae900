//! Lightweight performance timing utilities.
//!
//! Timers only report when enabled, either programmatically or through the
//! `OT_TIMING` environment variable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("OT_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed wall time in seconds, regardless of the enabled flag.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Wall-clock breakdown of one simulation run.
#[derive(Debug, Default, Clone)]
pub struct RunTiming {
    pub load_time_s: f64,
    pub integrate_time_s: f64,
    pub save_time_s: f64,
    pub steps: usize,
}

impl RunTiming {
    pub fn total_time_s(&self) -> f64 {
        self.load_time_s + self.integrate_time_s + self.save_time_s
    }

    /// Format a summary block, or None when timing is disabled.
    pub fn summary(&self) -> Option<String> {
        if !is_enabled() {
            return None;
        }
        let mut out = String::from("Timing summary:\n");
        out.push_str(&format!("  Load:      {:.3}s\n", self.load_time_s));
        out.push_str(&format!("  Integrate: {:.3}s\n", self.integrate_time_s));
        if self.steps > 0 {
            out.push_str(&format!(
                "    Avg step:  {:.3}us\n",
                1e6 * self.integrate_time_s / self.steps as f64
            ));
        }
        if self.save_time_s > 0.0 {
            out.push_str(&format!("  Save:      {:.3}s\n", self.save_time_s));
        }
        out.push_str(&format!("  Total:     {:.3}s", self.total_time_s()));
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_respects_enable_flag() {
        let timing = RunTiming {
            load_time_s: 0.1,
            integrate_time_s: 0.2,
            save_time_s: 0.0,
            steps: 10,
        };
        enable_timing();
        let text = timing.summary().unwrap();
        assert!(text.contains("Integrate"));
        assert!(!text.contains("Save"));
    }

    #[test]
    fn timer_measures_nonnegative() {
        let t = Timer::start("x");
        assert_eq!(t.label(), "x");
        assert!(t.elapsed_s() >= 0.0);
    }
}
