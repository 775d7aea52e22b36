use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;

/// A sorted, de-duplicated set of `i64` values.
///
/// Used both for multi-valued fact attributes and for the operand sets of
/// inclusion/exclusion conditions. Every constructor sorts, so all set
/// operations can rely on ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<i64>", into = "Vec<i64>")
)]
pub struct Ints64(Vec<i64>);

impl Ints64 {
    /// Build a set from arbitrary values.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self::from(values.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Binary-search membership test.
    #[must_use]
    pub fn exists(&self, value: i64) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    /// Whether the two sets share at least one value.
    ///
    /// Rejects non-overlapping ranges up front, then walks the shorter set
    /// and binary-searches the remainder of the longer one, never moving the
    /// search window backwards.
    #[must_use]
    pub fn intersects(&self, other: &Ints64) -> bool {
        let (short, long) = if self.len() <= other.len() {
            (self.as_slice(), other.as_slice())
        } else {
            (other.as_slice(), self.as_slice())
        };

        let (Some(&short_min), Some(&short_max)) = (short.first(), short.last()) else {
            return false;
        };
        let (Some(&long_min), Some(&long_max)) = (long.first(), long.last()) else {
            return false;
        };
        if short_min > long_max || long_min > short_max {
            return false;
        }

        let mut offset = 0;
        for &value in short {
            let pos = offset + long[offset..].partition_point(|&x| x < value);
            match long.get(pos) {
                Some(&found) if found == value => return true,
                Some(_) => offset = pos,
                None => return false,
            }
        }
        false
    }

    /// Order-independent identity of this set under the given sign.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn checksum(&self, sign: u8) -> u64 {
        let mut hash = Checksum::with_capacity(sign, self.len());
        hash.extend(self.iter().map(|v| v as u64));
        hash.sum64()
    }
}

impl From<Vec<i64>> for Ints64 {
    fn from(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self(values)
    }
}

impl From<&[i64]> for Ints64 {
    fn from(values: &[i64]) -> Self {
        Self::from(values.to_vec())
    }
}

impl<const N: usize> From<[i64; N]> for Ints64 {
    fn from(values: [i64; N]) -> Self {
        Self::from(values.to_vec())
    }
}

impl From<Ints64> for Vec<i64> {
    fn from(set: Ints64) -> Self {
        set.0
    }
}

impl FromIterator<i64> for Ints64 {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl AsRef<[i64]> for Ints64 {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

impl fmt::Display for Ints64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
