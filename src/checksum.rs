//! Content-derived identities for conditions and rules.
//!
//! An identity is a CRC-64 over a one-byte sign followed by a sorted list of
//! 64-bit factors. Sorting makes the result independent of the order in which
//! factors were added, so two structurally equal values hash identically no
//! matter how they were built. The sign keeps constructs with equal operands
//! (e.g. an inclusion and an exclusion over the same set) apart.

use crc::{Crc, CRC_64_XZ};

/// CRC-64 with the reflected ECMA-182 polynomial, pre-inverted and
/// post-inverted. Bit-compatible with the classic `crc64.ECMA` table, so
/// identities stay stable across implementations.
pub(crate) const CRC_64: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// Sign bytes of every identity-carrying construct.
pub(crate) mod sign {
    pub(crate) const EQUAL: u8 = b'=';
    pub(crate) const GREATER: u8 = b'>';
    pub(crate) const LESS: u8 = b'<';
    pub(crate) const GREATER_OR_EQUAL: u8 = b'G';
    pub(crate) const LESS_OR_EQUAL: u8 = b'L';
    pub(crate) const BETWEEN: u8 = b'R';
    pub(crate) const ONE_OF: u8 = b'+';
    pub(crate) const NONE_OF: u8 = b'-';
    pub(crate) const NOT: u8 = b'!';
    pub(crate) const CHECK: u8 = b'F';
    pub(crate) const ALL: u8 = b'A';
    pub(crate) const ANY: u8 = b'O';
}

/// Accumulates factors and produces an order-independent CRC-64 sum.
///
/// ```
/// use qfy::Checksum;
///
/// let mut a = Checksum::new(b'+');
/// a.add(3).add(1).add(2);
/// let mut b = Checksum::new(b'+');
/// b.extend([1, 2, 3]);
/// assert_eq!(a.sum64(), b.sum64());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Checksum {
    sign: u8,
    factors: Vec<u64>,
}

impl Checksum {
    #[must_use]
    pub fn new(sign: u8) -> Self {
        Self::with_capacity(sign, 0)
    }

    #[must_use]
    pub fn with_capacity(sign: u8, capacity: usize) -> Self {
        Self {
            sign,
            factors: Vec::with_capacity(capacity),
        }
    }

    /// Add a single factor.
    pub fn add(&mut self, factor: u64) -> &mut Self {
        self.factors.push(factor);
        self
    }

    /// Add every factor of an iterator.
    pub fn extend(&mut self, factors: impl IntoIterator<Item = u64>) -> &mut Self {
        self.factors.extend(factors);
        self
    }

    /// Sort the factors and stream the sign byte plus each factor's
    /// little-endian bytes through the CRC.
    #[must_use]
    pub fn sum64(mut self) -> u64 {
        self.factors.sort_unstable();

        let mut digest = CRC_64.digest();
        digest.update(&[self.sign]);
        for factor in &self.factors {
            digest.update(&factor.to_le_bytes());
        }
        digest.finalize()
    }
}

/// One-shot form of [`Checksum`].
#[must_use]
pub fn checksum(sign: u8, factors: impl IntoIterator<Item = u64>) -> u64 {
    let mut hash = Checksum::new(sign);
    hash.extend(factors);
    hash.sum64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_factors() {
        assert_eq!(checksum(b'+', [12, 43, 76, 87]), 16_697_346_874_648_777_555);
    }

    #[test]
    fn shuffled_factors() {
        assert_eq!(checksum(b'+', [87, 12, 76, 43]), 16_697_346_874_648_777_555);
    }

    #[test]
    fn sign_changes_sum() {
        assert_eq!(checksum(b'-', [87, 12, 76, 43]), 11_938_658_858_315_989_027);
    }

    #[test]
    fn blank() {
        assert_eq!(checksum(b'+', []), 6_093_685_733_581_172_889);
        assert_eq!(Checksum::with_capacity(b'+', 8).sum64(), 6_093_685_733_581_172_889);
    }

    #[test]
    fn builder_matches_one_shot() {
        let mut hash = Checksum::new(b'A');
        hash.add(9).add(4).extend([7, 1]);
        assert_eq!(hash.sum64(), checksum(b'A', [1, 4, 7, 9]));
    }

    #[test]
    fn duplicate_factors_are_kept() {
        assert_ne!(checksum(b'A', [5, 5]), checksum(b'A', [5]));
    }

    #[test]
    fn signs_are_distinct() {
        let signs = [
            sign::EQUAL,
            sign::GREATER,
            sign::LESS,
            sign::GREATER_OR_EQUAL,
            sign::LESS_OR_EQUAL,
            sign::BETWEEN,
            sign::ONE_OF,
            sign::NONE_OF,
            sign::NOT,
            sign::CHECK,
            sign::ALL,
            sign::ANY,
        ];
        let mut sums: Vec<u64> = signs.iter().map(|&s| checksum(s, [1, 2, 3])).collect();
        sums.sort_unstable();
        sums.dedup();
        assert_eq!(sums.len(), signs.len());
    }
}
