//! Descriptive statistics over a sample of values.
//!
//! The layout engine uses these to decide convergence: the per-epoch shift
//! magnitudes of all areas are summarized and evolution completes when the
//! mode is zero (most areas stopped moving) and the variance is small (the
//! remaining movement is not dispersed).

use indexmap::IndexMap;

/// Summary statistics of a sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleStats {
    /// Number of values in the sample.
    pub count: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value of the sorted sample; even-count samples take the
    /// upper of the two middle values rather than their midpoint.
    pub median: f64,
    /// The most frequent value; ties break on the first-seen value.
    pub mode: f64,
    /// Population variance, `E[x²] − mean²`.
    pub variance: f64,
    /// Square root of the variance.
    pub stddev: f64,
}

impl SampleStats {
    /// Computes the statistics of `values`.
    ///
    /// An empty sample yields all-zero statistics with `count == 0`.
    pub fn from_values(values: &[f64]) -> SampleStats {
        let mut stats = SampleStats {
            count: values.len(),
            ..SampleStats::default()
        };
        if values.is_empty() {
            return stats;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        stats.min = sorted[0];
        stats.max = sorted[sorted.len() - 1];
        stats.median = sorted[sorted.len() / 2];

        let n = values.len() as f64;
        stats.mean = values.iter().sum::<f64>() / n;
        stats.variance = values.iter().map(|v| v * v).sum::<f64>() / n - stats.mean * stats.mean;
        stats.stddev = stats.variance.max(0.0).sqrt();

        // Group by exact bit pattern; insertion order decides ties.
        let mut frequency: IndexMap<u64, usize> = IndexMap::new();
        for v in values {
            *frequency.entry(v.to_bits()).or_insert(0) += 1;
        }
        let mut mode_bits = 0u64;
        let mut mode_count = 0usize;
        for (bits, count) in &frequency {
            if *count > mode_count {
                mode_bits = *bits;
                mode_count = *count;
            }
        }
        stats.mode = f64::from_bits(mode_bits);

        stats
    }
}
