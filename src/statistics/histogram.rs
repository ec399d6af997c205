/*
    Equi-depth histograms built from a sample of a column's values.

    The sorted sample is cut into (at most) max_buckets groups of roughly the same
    size. Every cut is pushed forward to the end of the run of equal values it lands
    in, since a bucket stores the number of rows equal to its upper bound and a value
    split over two buckets would be counted in both. Cuts that a previous bucket has
    already overtaken are simply dropped, which is why a histogram can end up with
    fewer buckets than requested (never more than there are distinct values).

    Counts are measured on the sample and scaled to the table by num_rows/#samples.
*/

use std::cmp::Ordering;

use itertools::Itertools;
use thiserror::Error;

use crate::types::TupleValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBucket {
    pub upper_bound: TupleValue,
    /// Estimated number of rows equal to `upper_bound`.
    pub num_eq: u64,
    /// Estimated number of rows strictly between the previous bucket's upper bound
    /// and `upper_bound`.
    pub num_range: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    buckets: Vec<HistogramBucket>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistogramError {
    #[error("{num_rows} rows is less than the number of samples ({num_samples})")]
    TooFewRows { num_rows: u64, num_samples: usize },
    #[error("sample {index} is NULL")]
    NullSample { index: usize },
    #[error("samples {left} and {right} are not comparable")]
    IncomparableSamples { left: TupleValue, right: TupleValue },
}

impl Histogram {
    pub fn buckets(&self) -> &[HistogramBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Rows represented by the histogram (NULLs are never part of it).
    pub fn total_rows(&self) -> u64 {
        self.buckets.iter().map(|b| b.num_eq + b.num_range).sum()
    }

    /// Rows equal to `value` if it is one of the bucket boundaries.
    pub fn eq_rows(&self, value: &TupleValue) -> Option<u64> {
        self.buckets.iter()
            .find(|b| b.upper_bound == *value)
            .map(|b| b.num_eq)
    }

    /// Estimated number of rows strictly less than `value`. Rows inside the bucket
    /// the value falls into are assumed to be spread evenly over its range.
    pub fn estimate_less_than_rows(&self, value: &TupleValue) -> f64 {
        let mut rows = 0.0;
        for bucket in &self.buckets {
            match bucket.upper_bound.partial_cmp(value) {
                Some(Ordering::Less) => rows += (bucket.num_eq + bucket.num_range) as f64,
                Some(Ordering::Equal) => return rows + bucket.num_range as f64,
                Some(Ordering::Greater) => return rows + bucket.num_range as f64 / 2.0,
                None => return rows,
            }
        }
        rows
    }
}

/// Builds an equi-depth histogram with at most `max_buckets` buckets from `samples`,
/// which were drawn from a table with `num_rows` rows. NULL samples (`None`) are
/// rejected; callers track the NULL count separately.
pub fn equi_depth_histogram(samples: &[Option<TupleValue>], num_rows: u64, max_buckets: usize) -> Result<Histogram, HistogramError> {
    let num_samples = samples.len();
    if num_rows < num_samples as u64 {
        return Err(HistogramError::TooFewRows { num_rows, num_samples });
    }
    let mut values = Vec::with_capacity(num_samples);
    for (index, sample) in samples.iter().enumerate() {
        match sample {
            Some(value) => values.push(value),
            None => return Err(HistogramError::NullSample { index }),
        }
    }
    histogram_from_values(values, num_rows, max_buckets)
}

/// Same as `equi_depth_histogram` for samples already known to be non-NULL. Sorts
/// `values` in place.
pub(crate) fn histogram_from_values(mut sorted: Vec<&TupleValue>, num_rows: u64, max_buckets: usize) -> Result<Histogram, HistogramError> {
    let num_samples = sorted.len();
    if num_rows < num_samples as u64 {
        return Err(HistogramError::TooFewRows { num_rows, num_samples });
    }
    if max_buckets == 0 || sorted.is_empty() {
        return Ok(Histogram::default());
    }
    if let Some(other) = sorted.iter().find(|v| !v.value_type().is_comparable_to(&sorted[0].value_type())) {
        return Err(HistogramError::IncomparableSamples { left: sorted[0].clone(), right: (*other).clone() });
    }
    // All samples are mutually comparable at this point.
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let num_buckets = max_buckets.min(num_samples);
    let base_size = num_samples / num_buckets;
    let remainder = num_samples % num_buckets;

    let mut buckets = Vec::with_capacity(num_buckets);
    let mut start = 0;
    let mut ideal_end = 0;
    for i in 0..num_buckets {
        // The trailing `remainder` groups get one extra sample.
        ideal_end += base_size + usize::from(i >= num_buckets - remainder);
        if ideal_end <= start {
            // Swallowed by the previous bucket's run extension.
            continue;
        }
        let upper_bound = sorted[ideal_end - 1];
        let end = ideal_end + sorted[ideal_end..].iter()
            .take_while(|v| **v == upper_bound)
            .count();
        let eq_count = sorted[start..end].iter().rev()
            .take_while(|v| **v == upper_bound)
            .count();
        let less_count = end - start - eq_count;
        buckets.push(HistogramBucket {
            upper_bound: upper_bound.clone(),
            num_eq: scale_sample_count(eq_count, num_rows, num_samples),
            num_range: scale_sample_count(less_count, num_rows, num_samples),
        });
        start = end;
    }

    log::debug!(
        "built histogram from {} samples ({} distinct) for {} rows: {} of {} requested buckets",
        num_samples,
        sorted.iter().dedup().count(),
        num_rows,
        buckets.len(),
        max_buckets
    );
    Ok(Histogram { buckets })
}

// count * num_rows / num_samples rounded to the nearest integer, ties away from zero
pub(crate) fn scale_sample_count(count: usize, num_rows: u64, num_samples: usize) -> u64 {
    let numerator = count as u128 * num_rows as u128;
    let denominator = num_samples as u128;
    ((2 * numerator + denominator) / (2 * denominator)) as u64
}
