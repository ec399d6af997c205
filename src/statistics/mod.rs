
pub mod column_statistic;
pub mod column_statistics_map;
pub mod histogram;

/*
    Statistics used by the optimizer's cost model to estimate cardinalities.

    Every relation that is being optimized gets a ColumnStatisticsMap which holds one
    ColumnStatistic per combination of columns statistics have been derived for. Single
    columns additionally carry an equi-depth histogram built from a sample of the
    column's values so range predicates can be estimated. Multi-column entries only
    carry distinct/null counts (the combination's histogram would be a multi-dimensional
    one which we don't do).

    Samples are gathered elsewhere (the executor hands us a slice of nullable values
    plus the table's row count), everything here is plain in-memory computation owned
    by a single planning context.

    Distinct counts are estimated from the sample with the GEE estimator
    (Charikar et al., "Towards Estimation Error Guarantees for Distinct Values", PODS 2000):
    values seen exactly once in the sample are scaled up by sqrt(N/n), values seen more
    often are assumed to be fully represented already.
 */

use itertools::Itertools;

use crate::{config::StatisticsConfig, types::TupleValue, util::column_set::ColumnSet};

use self::{column_statistic::ColumnStatistic, column_statistics_map::ColumnStatisticsMap, histogram::{histogram_from_values, scale_sample_count, HistogramError}};

/// Derives the statistic of a single column from a sample of its values and stores it
/// in `stats` (reusing the existing entry for that column if there is one).
///
/// On a histogram error the counts are still filled in, only the histogram stays unset.
pub fn derive_column_statistic<'a>(
    stats: &'a mut ColumnStatisticsMap,
    column: usize,
    samples: &[Option<TupleValue>],
    num_rows: u64,
    config: &StatisticsConfig,
) -> Result<&'a ColumnStatistic, HistogramError> {
    let num_samples = samples.len();
    if num_rows < num_samples as u64 {
        return Err(HistogramError::TooFewRows { num_rows, num_samples });
    }

    let non_null: Vec<&TupleValue> = samples.iter().flatten().collect();
    let null_samples = num_samples - non_null.len();
    let (null_rows, non_null_rows) = if num_samples == 0 {
        (0, 0)
    } else {
        (scale_sample_count(null_samples, num_rows, num_samples), scale_sample_count(non_null.len(), num_rows, num_samples))
    };

    let cols: ColumnSet = std::iter::once(column).collect();
    let (stat, added) = stats.add(&cols);
    if !added {
        log::debug!("re-deriving statistic for {}", cols);
    }
    stat.null_count = null_rows as f64;
    stat.distinct_count = estimate_distinct_count(&non_null, non_null_rows);
    stat.avg_size = if non_null.is_empty() {
        0.0
    } else {
        non_null.iter().map(|v| v.byte_size()).sum::<usize>() as f64 / non_null.len() as f64
    };
    stat.histogram = None;

    if config.histograms_enabled {
        stat.histogram = Some(histogram_from_values(non_null, non_null_rows, config.histogram_max_buckets)?);
    }
    Ok(stat)
}

fn estimate_distinct_count(non_null: &[&TupleValue], non_null_rows: u64) -> f64 {
    if non_null.is_empty() {
        return 0.0;
    }
    let counts = non_null.iter().counts();
    let distinct = counts.len() as f64;
    let singletons = counts.values().filter(|&&c| c == 1).count() as f64;
    let scale = (non_null_rows as f64 / non_null.len() as f64).sqrt();
    let estimate = scale * singletons + (distinct - singletons);
    estimate.max(distinct).min(non_null_rows as f64)
}
