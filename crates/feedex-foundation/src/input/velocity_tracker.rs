//! Velocity tracking for fling classification.
//!
//! Fits a recency-weighted line through the samples of the last
//! [`HORIZON_MS`] and reports its slope.

const HISTORY_SIZE: usize = 20;

/// Only samples this close to the newest one contribute.
const HORIZON_MS: u64 = 100;

/// A window longer than this with less than [`REST_DISTANCE`] of travel
/// means the pointer has come to rest.
const ASSUME_STOPPED_MS: u64 = 40;
const REST_DISTANCE: f32 = 2.0;

/// Weight multiplier per step back in history.
const RECENCY_DECAY: f32 = 0.95;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    value: f32,
}

/// One-axis velocity estimator over absolute positions.
///
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(time_ms, x);
/// let velocity = tracker.calculate_velocity(); // px/sec
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    history: [Option<Sample>; HISTORY_SIZE],
    /// Slot of the newest sample.
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            history: [None; HISTORY_SIZE],
            head: HISTORY_SIZE - 1,
        }
    }

    pub fn add_data_point(&mut self, time_ms: u64, value: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.history[self.head] = Some(Sample { time_ms, value });
    }

    /// Stored samples, newest first, stopping at the first empty slot.
    fn newest_first(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..HISTORY_SIZE).map_while(move |back| {
            self.history[(self.head + HISTORY_SIZE - back) % HISTORY_SIZE]
        })
    }

    /// Velocity in units per second; 0.0 with fewer than two recent samples
    /// or when the pointer has come to rest.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.newest_first().next() else {
            return 0.0;
        };

        let mut fit = WeightedFit::default();
        let mut oldest = newest;
        let mut weight = 1.0;
        for sample in self.newest_first() {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS {
                break;
            }
            fit.add(-(age as f32), sample.value, weight);
            weight *= RECENCY_DECAY;
            oldest = sample;
        }

        if fit.count < 2 {
            return 0.0;
        }
        let span = newest.time_ms - oldest.time_ms;
        if span > ASSUME_STOPPED_MS && (newest.value - oldest.value).abs() < REST_DISTANCE {
            return 0.0;
        }
        fit.slope().unwrap_or(0.0) * 1000.0
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Running sums for a weighted least-squares line `value = a + b * t`.
#[derive(Default)]
struct WeightedFit {
    count: usize,
    w: f32,
    wt: f32,
    wv: f32,
    wtt: f32,
    wtv: f32,
}

impl WeightedFit {
    fn add(&mut self, t: f32, value: f32, weight: f32) {
        self.count += 1;
        self.w += weight;
        self.wt += weight * t;
        self.wv += weight * value;
        self.wtt += weight * t * t;
        self.wtv += weight * t * value;
    }

    /// `b`, or `None` when every sample shares one timestamp.
    fn slope(&self) -> Option<f32> {
        let denominator = self.w * self.wtt - self.wt * self.wt;
        if denominator.abs() < f32::EPSILON {
            return None;
        }
        Some((self.w * self.wtv - self.wt * self.wv) / denominator)
    }
}
