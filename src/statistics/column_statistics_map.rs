use std::collections::HashMap;
use std::fmt::Display;

use crate::util::column_set::ColumnSet;

use super::column_statistic::ColumnStatistic;

/*
    Statistics of one relation keyed by the exact set of columns they describe. Lookups
    only ever match the identical set: statistics on (a, b) say nothing about (a) or
    (a, b, c).

    Entries are kept in a Vec in insertion order, a hash map points from column set to
    the position in that Vec. Removal compacts the Vec and rebuilds the map, which is
    fine since removal has to look at every entry anyway.
 */
#[derive(Debug, Default)]
pub struct ColumnStatisticsMap {
    stats: Vec<ColumnStatistic>,
    index: HashMap<ColumnSet, usize, ahash::RandomState>,
}

impl ColumnStatisticsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statistic for `cols`, creating a zeroed one at the end of the map if
    /// there is none yet. The bool is true if the entry was created by this call.
    pub fn add(&mut self, cols: &ColumnSet) -> (&mut ColumnStatistic, bool) {
        if let Some(&pos) = self.index.get(cols) {
            return (&mut self.stats[pos], false);
        }
        log::trace!("adding column statistic for {}", cols);
        let pos = self.stats.len();
        self.index.insert(cols.clone(), pos);
        self.stats.push(ColumnStatistic::new(cols.clone()));
        (&mut self.stats[pos], true)
    }

    pub fn count(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Panics if `pos >= self.count()`.
    pub fn get(&self, pos: usize) -> &ColumnStatistic {
        assert!(pos < self.stats.len(), "column statistic {} out of range (count {})", pos, self.stats.len());
        &self.stats[pos]
    }

    pub fn lookup(&self, cols: &ColumnSet) -> Option<&ColumnStatistic> {
        self.index.get(cols).map(|&pos| &self.stats[pos])
    }

    /// Removes every statistic whose column set shares at least one column with `cols`.
    pub fn remove_intersecting(&mut self, cols: &ColumnSet) {
        let before = self.stats.len();
        self.stats.retain(|stat| !stat.cols().intersects(cols));
        if self.stats.len() == before {
            return;
        }
        log::debug!("removed {} column statistics intersecting {}", before - self.stats.len(), cols);
        self.index.clear();
        for (pos, stat) in self.stats.iter().enumerate() {
            self.index.insert(stat.cols().clone(), pos);
        }
    }

    pub fn clear(&mut self) {
        self.stats.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnStatistic> {
        self.stats.iter()
    }
}

impl<'a> IntoIterator for &'a ColumnStatisticsMap {
    type Item = &'a ColumnStatistic;
    type IntoIter = std::slice::Iter<'a, ColumnStatistic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for ColumnStatisticsMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stat) in self.stats.iter().enumerate() {
            if i != 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", stat.cols())?;
        }
        Ok(())
    }
}
