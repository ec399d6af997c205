use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Storage type of a value; VarChar carries the length in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleValueType {
    BigInt,
    Int,
    SmallInt,
    VarChar(u16),
}

impl TupleValueType {
    /// Size in bytes for fixed width types, None for VarChar.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            TupleValueType::BigInt => Some(8),
            TupleValueType::Int => Some(4),
            TupleValueType::SmallInt => Some(2),
            TupleValueType::VarChar(_) => None,
        }
    }

    /// Integers compare with integers of any width, strings only with strings.
    pub fn is_comparable_to(&self, other: &TupleValueType) -> bool {
        matches!(self, TupleValueType::VarChar(_)) == matches!(other, TupleValueType::VarChar(_))
    }
}

/// A single non-NULL SQL value. NULL is represented as `None` wherever a
/// value is nullable, i.e. samples are `Option<TupleValue>`.
#[derive(Debug, Clone)]
pub enum TupleValue {
    BigInt(i64),
    Int(i32),
    SmallInt(i16),
    String(String),
}

impl TupleValue {
    pub fn value_type(&self) -> TupleValueType {
        match self {
            TupleValue::BigInt(_) => TupleValueType::BigInt,
            TupleValue::Int(_) => TupleValueType::Int,
            TupleValue::SmallInt(_) => TupleValueType::SmallInt,
            // Strings longer than u16::MAX bytes don't fit a VARCHAR column anyway
            TupleValue::String(s) => TupleValueType::VarChar(s.len().min(u16::MAX as usize) as u16),
        }
    }

    /// Number of bytes the value occupies when stored.
    pub fn byte_size(&self) -> usize {
        match self {
            TupleValue::String(s) => s.len(),
            other => other.value_type().fixed_size().unwrap_or(0),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            TupleValue::BigInt(v) => Some(*v),
            TupleValue::Int(v) => Some(*v as i64),
            TupleValue::SmallInt(v) => Some(*v as i64),
            TupleValue::String(_) => None,
        }
    }
}

impl PartialEq for TupleValue {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for TupleValue {}

// Has to agree with the cross-width equality above
impl Hash for TupleValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TupleValue::String(s) => s.hash(state),
            other => other.as_i64().hash(state),
        }
    }
}

impl PartialOrd for TupleValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Numeric types compare across widths (bigint with smallint etc.)
        match (self, other) {
            (TupleValue::String(a), TupleValue::String(b)) => a.partial_cmp(b),
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None
            }
        }
    }
}

impl Display for TupleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TupleValue::BigInt(i) => write!(f, "{}", i),
            TupleValue::Int(i) => write!(f, "{}", i),
            TupleValue::SmallInt(i) => write!(f, "{}", i),
            TupleValue::String(s) => write!(f, "\"{}\"", s.escape_debug()),
        }
    }
}
