use std::fmt::Display;
use std::hash::{Hash, Hasher};

use bitvec::vec::BitVec;

/// A set of column ordinals, compared by content.
///
/// The bits are kept trimmed (no trailing zeros) after every mutation so two
/// sets holding the same ordinals always have identical storage, no matter
/// in which order or with which intermediate members they were built.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    bits: BitVec<usize>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    pub fn insert(&mut self, column: usize) {
        if column >= self.bits.len() {
            self.bits.resize(column + 1, false);
        }
        self.bits.set(column, true);
    }

    pub fn remove(&mut self, column: usize) {
        if column < self.bits.len() {
            self.bits.set(column, false);
            self.trim();
        }
    }

    pub fn contains(&self, column: usize) -> bool {
        self.bits.get(column).map(|b| *b).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn intersects(&self, other: &ColumnSet) -> bool {
        let (small, large) = if self.bits.len() <= other.bits.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.bits.iter_ones().any(|column| large.bits[column])
    }

    pub fn union(&self, other: &ColumnSet) -> ColumnSet {
        let (mut result, small) = if self.bits.len() >= other.bits.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        for column in small.bits.iter_ones() {
            result.bits.set(column, true);
        }
        result
    }

    /// Ordinals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    fn trim(&mut self) {
        match self.bits.last_one() {
            Some(last) => self.bits.truncate(last + 1),
            None => self.bits.clear(),
        }
    }
}

impl PartialEq for ColumnSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for ColumnSet {}

impl Hash for ColumnSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for column in self.bits.iter_ones() {
            column.hash(state);
        }
        self.bits.len().hash(state);
    }
}

impl FromIterator<usize> for ColumnSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = ColumnSet::new();
        for column in iter {
            set.insert(column);
        }
        set
    }
}

impl Display for ColumnSet {
    // (1), (1,2), (2-4), (1,3-5), ()
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_range(f: &mut std::fmt::Formatter<'_>, start: usize, end: usize, first: bool) -> std::fmt::Result {
            if !first {
                write!(f, ",")?;
            }
            match end - start {
                0 => write!(f, "{}", start),
                1 => write!(f, "{},{}", start, end),
                _ => write!(f, "{}-{}", start, end),
            }
        }

        write!(f, "(")?;
        let mut range: Option<(usize, usize)> = None;
        let mut first = true;
        for column in self.iter() {
            range = match range {
                Some((start, end)) if end + 1 == column => Some((start, column)),
                Some((start, end)) => {
                    write_range(f, start, end, first)?;
                    first = false;
                    Some((column, column))
                }
                None => Some((column, column)),
            };
        }
        if let Some((start, end)) = range {
            write_range(f, start, end, first)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn set(columns: &[usize]) -> ColumnSet {
        columns.iter().copied().collect()
    }

    fn hash_of(set: &ColumnSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_construction_order() {
        let mut a = set(&[9, 1]);
        a.remove(9);
        let b = set(&[1]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(set(&[3, 1, 2]), set(&[1, 2, 3]));
        assert_ne!(set(&[1]), set(&[1, 2]));
    }

    #[test]
    fn removing_everything_gives_empty_set() {
        let mut a = set(&[4]);
        a.remove(4);
        a.remove(100);
        assert!(a.is_empty());
        assert_eq!(a, ColumnSet::new());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn contains_and_len() {
        let a = set(&[0, 5, 64, 65]);
        assert!(a.contains(0));
        assert!(a.contains(64));
        assert!(!a.contains(1));
        assert!(!a.contains(1000));
        assert_eq!(a.len(), 4);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![0, 5, 64, 65]);
    }

    #[test]
    fn intersects() {
        assert!(set(&[1, 2]).intersects(&set(&[2, 3])));
        assert!(set(&[100]).intersects(&set(&[1, 100])));
        assert!(!set(&[1, 2]).intersects(&set(&[3, 4])));
        assert!(!set(&[1]).intersects(&ColumnSet::new()));
        assert!(!ColumnSet::new().intersects(&ColumnSet::new()));
    }

    #[test]
    fn union() {
        assert_eq!(set(&[1, 70]).union(&set(&[2])), set(&[1, 2, 70]));
        assert_eq!(set(&[2]).union(&set(&[1, 70])), set(&[1, 2, 70]));
        assert_eq!(ColumnSet::new().union(&ColumnSet::new()), ColumnSet::new());
    }

    #[test]
    fn display() {
        assert_eq!(ColumnSet::new().to_string(), "()");
        assert_eq!(set(&[1]).to_string(), "(1)");
        assert_eq!(set(&[1, 2]).to_string(), "(1,2)");
        assert_eq!(set(&[2, 3, 4]).to_string(), "(2-4)");
        assert_eq!(set(&[1, 3, 4, 5]).to_string(), "(1,3-5)");
        assert_eq!(set(&[5, 7]).to_string(), "(5,7)");
        assert_eq!(set(&[0, 1, 2, 8, 9]).to_string(), "(0-2,8,9)");
    }
}
