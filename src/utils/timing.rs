//! Timing utilities for diagnostic log lines

use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time from its creation
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time as "< 1ms", "456ms" or "1.23s"
    pub fn elapsed_formatted(&self) -> String {
        format_duration(self.elapsed())
    }
}

/// Format a duration for humans
///
/// - Durations >= 1 second: "1.23s"
/// - Durations >= 1 millisecond: "456ms"
/// - Durations < 1 millisecond: "< 1ms"
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis == 0 {
        "< 1ms".to_string()
    } else if millis >= 1000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{}ms", millis)
    }
}

/// Durations of the two phases of a summarise run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTiming {
    pub selection: Duration,
    pub aggregation: Duration,
}

impl RunTiming {
    pub fn total(&self) -> Duration {
        self.selection + self.aggregation
    }

    /// One-line summary for the log
    pub fn summary(&self) -> String {
        format!(
            "selection {}, aggregation {}, total {}",
            format_duration(self.selection),
            format_duration(self.aggregation),
            format_duration(self.total())
        )
    }
}
