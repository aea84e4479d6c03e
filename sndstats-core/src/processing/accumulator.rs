use crate::models::error::StatsError;
use crate::models::summary::StatsSummary;

/// Single-pass accumulator of count, sum, sum of squares and extrema.
///
/// Moments are derived on demand. Asking for a moment without enough
/// observations is an error, never a sentinel value.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsAccumulator {
    count: u64,
    sum: f64,
    sum_of_squares: f64,
    min: f64,
    max: f64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_of_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record one observation.
    pub fn accumulate(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        self.sum_of_squares += x * x;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Record every sample of a block.
    pub fn accumulate_slice(&mut self, samples: &[f32]) {
        for &s in samples {
            self.accumulate(s as f64);
        }
    }

    /// Fold another accumulator's observations into this one.
    pub fn merge(&mut self, other: &StatsAccumulator) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_of_squares += other.sum_of_squares;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Result<f64, StatsError> {
        self.require(1)?;
        Ok(self.sum / self.count as f64)
    }

    /// Sample (Bessel-corrected) variance.
    pub fn variance(&self) -> Result<f64, StatsError> {
        self.require(2)?;
        // The sum-of-squares form leaves a rounding residue on constants.
        if self.min == self.max {
            return Ok(0.0);
        }
        let n = self.count as f64;
        Ok(((self.sum_of_squares - self.sum * self.sum / n) / (n - 1.0)).max(0.0))
    }

    /// Sample (Bessel-corrected) standard deviation.
    pub fn std(&self) -> Result<f64, StatsError> {
        Ok(self.variance()?.sqrt())
    }

    pub fn min(&self) -> Result<f64, StatsError> {
        self.require(1)?;
        Ok(self.min)
    }

    pub fn max(&self) -> Result<f64, StatsError> {
        self.require(1)?;
        Ok(self.max)
    }

    /// All moments at once. Needs at least two observations.
    pub fn summary(&self) -> Result<StatsSummary, StatsError> {
        let std = self.std()?;
        Ok(StatsSummary {
            count: self.count,
            mean: self.mean()?,
            min: self.min,
            max: self.max,
            std,
            variance: std * std,
            inverse_std: 1.0 / std,
        })
    }

    fn require(&self, needed: u64) -> Result<(), StatsError> {
        if self.count < needed {
            return Err(StatsError::insufficient(needed, self.count));
        }
        Ok(())
    }
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<f32> for StatsAccumulator {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for s in iter {
            self.accumulate(s as f64);
        }
    }
}
