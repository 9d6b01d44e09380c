//! Summary statistics over latency series
//!
//! Percentiles use linear interpolation between closest ranks, so the median
//! of an even-length series is the mean of the two middle samples.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};


/// Whisker reach in multiples of the interquartile range
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Mean, minimum, maximum and median of a latency series (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl LatencyStats {
    /// Compute statistics; fails on an empty or non-finite series
    pub fn from_latencies(latencies: &[f64]) -> Result<Self> {
        let sorted = sorted_finite(latencies)?;
        let count = sorted.len() as f64;

        Ok(Self {
            avg: sorted.iter().sum::<f64>() / count,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: percentile_sorted(&sorted, 50.0),
        })
    }
}

/// Five-number summary plus outliers, as drawn in a box-and-whisker chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest sample within `q1 - 1.5 * IQR`, never above `q1`
    pub whisker_low: f64,
    /// Largest sample within `q3 + 1.5 * IQR`, never below `q3`
    pub whisker_high: f64,
    /// Samples beyond the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    pub fn from_latencies(latencies: &[f64]) -> Result<Self> {
        let sorted = sorted_finite(latencies)?;

        let q1 = percentile_sorted(&sorted, 25.0);
        let median = percentile_sorted(&sorted, 50.0);
        let q3 = percentile_sorted(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        // A whisker never retracts inside the box.
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .map_or(q1, |v| v.min(q1));
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .map_or(q3, |v| v.max(q3));

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Lowest value drawn (whisker or outlier)
    pub fn lowest(&self) -> f64 {
        self.outliers
            .first()
            .copied()
            .map_or(self.whisker_low, |o| o.min(self.whisker_low))
    }

    /// Highest value drawn (whisker or outlier)
    pub fn highest(&self) -> f64 {
        self.outliers
            .last()
            .copied()
            .map_or(self.whisker_high, |o| o.max(self.whisker_high))
    }
}

/// Percentile `p` (0..=100) of an unsorted series
pub fn percentile(values: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(AppError::statistics(format!("Percentile {} out of range", p)));
    }
    let sorted = sorted_finite(values)?;
    Ok(percentile_sorted(&sorted, p))
}

/// Arithmetic mean of a series of averages, 0.0 when empty
pub fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn sorted_finite(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(AppError::statistics("Cannot summarize an empty latency series"));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(AppError::statistics(format!("Non-finite latency value: {}", bad)));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
