//! Per-cell candidate sets as digit bitmasks.

use serde::{Deserialize, Serialize};

/// Set of digits still considered possible for one cell.
///
/// Bit `d - 1` is set when digit `d` is a candidate. The `u32` backing
/// covers every supported board side (up to 25). There is deliberately no
/// insert operation: population replaces a cell wholesale and the solve
/// lifecycle only ever removes candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateSet(u32);

impl CandidateSet {
    /// Largest digit a set can hold.
    pub const MAX_DIGIT: u8 = 25;

    /// The full set `{1..=size}` of a blank cell.
    pub fn full(size: usize) -> Self {
        debug_assert!(size >= 1 && size <= Self::MAX_DIGIT as usize);
        CandidateSet((1u32 << size) - 1)
    }

    /// The set `{value}` of a placed digit.
    pub fn singleton(value: u8) -> Self {
        debug_assert!(value >= 1 && value <= Self::MAX_DIGIT);
        CandidateSet(1 << (value - 1))
    }

    pub fn contains(&self, value: u8) -> bool {
        (1..=Self::MAX_DIGIT).contains(&value) && self.0 & (1 << (value - 1)) != 0
    }

    /// Remove `value`, returning whether the set changed.
    pub fn remove(&mut self, value: u8) -> bool {
        if !self.contains(value) {
            return false;
        }
        self.0 &= !(1 << (value - 1));
        true
    }

    /// Number of candidates remaining.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when exactly one candidate remains (the cell is resolved).
    pub fn is_singleton(&self) -> bool {
        self.0.count_ones() == 1
    }

    /// The single remaining digit of a resolved cell.
    pub fn sole_value(&self) -> Option<u8> {
        if self.is_singleton() {
            Some(self.0.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    /// Iterate the candidates in ascending digit order.
    pub fn iter(&self) -> impl Iterator<Item = u8> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let digit = bits.trailing_zeros() as u8 + 1;
                bits &= bits - 1;
                Some(digit)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set() {
        let set = CandidateSet::full(9);
        assert_eq!(set.len(), 9);
        assert!(!set.is_singleton());
        assert!((1..=9).all(|d| set.contains(d)));
        assert!(!set.contains(10));
        assert_eq!(set.sole_value(), None);
    }

    #[test]
    fn test_singleton() {
        let set = CandidateSet::singleton(7);
        assert_eq!(set.len(), 1);
        assert!(set.is_singleton());
        assert!(set.contains(7));
        assert!(!set.contains(6));
        assert_eq!(set.sole_value(), Some(7));
    }

    #[test]
    fn test_remove() {
        let mut set = CandidateSet::full(9);
        assert!(set.remove(4));
        assert!(!set.remove(4));
        assert!(!set.contains(4));
        assert_eq!(set.len(), 8);
        // Out-of-band digits are never present, so removal is a no-op.
        assert!(!set.remove(10));
        assert!(!set.remove(0));
    }

    #[test]
    fn test_remove_down_to_singleton() {
        let mut set = CandidateSet::full(4);
        for d in [1, 2, 4] {
            assert!(set.remove(d));
        }
        assert!(set.is_singleton());
        assert_eq!(set.sole_value(), Some(3));
    }

    #[test]
    fn test_iter_ascending() {
        let mut set = CandidateSet::full(9);
        set.remove(2);
        set.remove(5);
        set.remove(9);
        let digits: Vec<u8> = set.iter().collect();
        assert_eq!(digits, vec![1, 3, 4, 6, 7, 8]);
    }
}
