use crate::domain::model::Lap;
use std::time::{Duration, Instant};

const UNITS: [(&str, u128); 5] = [
    ("d", 86_400_000),
    ("h", 3_600_000),
    ("m", 60_000),
    ("s", 1_000),
    ("ms", 1),
];

/// Formats an elapsed time as its non-zero components, largest unit first,
/// e.g. `1h 2m 3s 4ms`. Sub-millisecond remainders are dropped.
pub fn format_elapsed(duration: Duration) -> String {
    let mut remaining = duration.as_millis();
    if remaining == 0 {
        return "0ms".to_string();
    }

    let mut parts = Vec::with_capacity(UNITS.len());
    for (suffix, unit_millis) in UNITS {
        let count = remaining / unit_millis;
        remaining %= unit_millis;
        if count > 0 {
            parts.push(format!("{}{}", count, suffix));
        }
    }
    parts.join(" ")
}

pub fn format_millis(millis: u64) -> String {
    format_elapsed(Duration::from_millis(millis))
}

/// `HH:MM:SS`; hours keep growing past 24.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
    last_lap: Instant,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_lap: now,
            laps: Vec::new(),
        }
    }

    pub fn lap(&mut self, name: impl Into<String>) -> &Lap {
        let now = Instant::now();
        let lap = Lap {
            name: name.into(),
            split: now.duration_since(self.last_lap),
            total: now.duration_since(self.started),
        };
        tracing::debug!(lap = %lap.name, split = ?lap.split, "stopwatch lap");
        self.last_lap = now;
        self.laps.push(lap);
        &self.laps[self.laps.len() - 1]
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn reset(&mut self) {
        *self = Self::start();
    }

    pub fn summary(&self) -> String {
        self.laps
            .iter()
            .map(|lap| {
                format!(
                    "{}: {} (total {})",
                    lap.name,
                    format_elapsed(lap.split),
                    format_elapsed(lap.total)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}
