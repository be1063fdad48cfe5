/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and
/// dispersion for a dataset of `f64` values.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The population variance of the dataset (divides by `n`).
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
    /// The sample variance of the dataset (divides by `n - 1`).
    ///
    /// Zero for a single-value dataset.
    pub sample_variance: f64,
    /// The sample standard deviation of the dataset.
    ///
    /// Zero for a single-value dataset.
    pub sample_std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty or contains a non-finite value
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfcast_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.variance, 2.0);
    /// assert_eq!(stats.sample_variance, 2.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let count = values.len();
        let n = count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let variance = sum_sq / n;
        let sample_variance = if count > 1 { sum_sq / (n - 1.0) } else { 0.0 };

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
            sample_variance,
            sample_std_dev: sample_variance.sqrt(),
        })
    }
}
