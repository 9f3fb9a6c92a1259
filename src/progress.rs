use std::io::{self, Write};
use std::time::Instant;

use crate::orchestrator::EventSink;

/// Stderr event sink for the CLI: every line is stamped with elapsed time
/// since the run started.
pub struct ConsoleProgress {
    enabled: bool,
    t0: Instant,
}

impl ConsoleProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            t0: Instant::now(),
        }
    }

    fn stamp(&self) -> String {
        fmt_elapsed(self.t0.elapsed().as_secs_f64())
    }
}

impl EventSink for ConsoleProgress {
    fn log(&self, msg: &str) {
        if !self.enabled {
            return;
        }
        let ts = self.stamp();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "[{ts}] {msg}");
    }

    fn progress(&self, completed: usize, total: usize) {
        if !self.enabled {
            return;
        }
        let total = total.max(1);
        let completed = completed.min(total);
        let pct = (completed as f64 / total as f64) * 100.0;
        let ts = self.stamp();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "[{ts}] files {completed}/{total} ({pct:5.1}%)");
    }
}

fn fmt_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0) as u64;
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
