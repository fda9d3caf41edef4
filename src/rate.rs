//! Conversion of cumulative counters into per-second rates
//!
//! The management API reports message counters as totals since broker
//! start. A counter only becomes meaningful as a rate over the interval
//! between two polls, which requires carrying the previous reading across
//! cycles. One [`RateProcessor`] owns that state for one logical counter;
//! [`CounterRates`] holds the per-agent set of them, keyed by name.

use std::collections::HashMap;
use std::time::Instant;

/// Stateful converter from a monotonically increasing counter to a
/// per-second rate.
///
/// The first reading only establishes the baseline and yields `0.0`.
/// Every later reading yields `delta / elapsed seconds`. A counter that
/// decreased (broker restart) is treated as having started over, so the
/// new reading counts as the whole increase. The result is never
/// negative, `NaN` or infinite.
#[derive(Debug, Default)]
pub struct RateProcessor {
    baseline: Option<(f64, Instant)>,
}

impl RateProcessor {
    pub fn new() -> Self {
        Self { baseline: None }
    }

    /// Feed the current cumulative reading, taken now.
    pub fn process(&mut self, raw: f64) -> f64 {
        self.process_at(raw, Instant::now())
    }

    /// Deterministic form of [`process`](Self::process) with an explicit
    /// reading time. The orchestrator stamps all counters of one cycle
    /// with a single instant.
    pub fn process_at(&mut self, raw: f64, now: Instant) -> f64 {
        let rate = match self.baseline {
            None => 0.0,
            Some((last_value, last_instant)) => {
                let mut delta = raw - last_value;
                if delta < 0.0 {
                    // counter reset: the new reading is the whole increase
                    delta = raw;
                }

                // saturates at zero for instants that are not after the
                // baseline, so a clock anomaly yields 0 instead of a
                // division fault
                let elapsed = now.saturating_duration_since(last_instant).as_secs_f64();
                if elapsed <= 0.0 { 0.0 } else { delta / elapsed }
            }
        };

        self.baseline = Some((raw, now));
        rate
    }
}

/// Per-agent registry of rate-tracked counters.
///
/// Processors are created lazily per logical counter name and never share
/// state, even when their readings coincide.
#[derive(Debug, Default)]
pub struct CounterRates {
    counters: HashMap<String, RateProcessor>,
}

impl CounterRates {
    pub fn new() -> Self {
        Self {
            counters: HashMap::new(),
        }
    }

    /// Feed the current reading for `counter`, taken now.
    pub fn process(&mut self, counter: &str, raw: f64) -> f64 {
        self.process_at(counter, raw, Instant::now())
    }

    /// Deterministic form with an explicit reading time.
    pub fn process_at(&mut self, counter: &str, raw: f64, now: Instant) -> f64 {
        self.counters
            .entry(counter.to_string())
            .or_default()
            .process_at(raw, now)
    }
}
