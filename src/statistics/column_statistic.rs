use crate::util::column_set::ColumnSet;

use super::histogram::Histogram;

/// Statistics for one combination of columns of a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistic {
    cols: ColumnSet,
    pub distinct_count: f64,
    pub null_count: f64,
    /// Average size in bytes of the non-NULL values.
    pub avg_size: f64,
    pub histogram: Option<Histogram>,
}

impl ColumnStatistic {
    pub(super) fn new(cols: ColumnSet) -> Self {
        Self {
            cols,
            distinct_count: 0.0,
            null_count: 0.0,
            avg_size: 0.0,
            histogram: None,
        }
    }

    pub fn cols(&self) -> &ColumnSet {
        &self.cols
    }
}
