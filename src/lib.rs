//! Cardinality estimation statistics for the OxidSQL optimizer: per column set
//! statistics of a relation and equi-depth histograms built from column samples.

pub mod config;
pub mod statistics;
pub mod types;
pub mod util;

pub use config::StatisticsConfig;
pub use statistics::{
    column_statistic::ColumnStatistic,
    column_statistics_map::ColumnStatisticsMap,
    derive_column_statistic,
    histogram::{equi_depth_histogram, Histogram, HistogramBucket, HistogramError},
};
pub use types::{TupleValue, TupleValueType};
pub use util::column_set::ColumnSet;
