use serde::{Deserialize, Serialize};

use crate::types::types::Seed;

/// Closed range of generator states `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: Seed,
    pub hi: Seed,
}

impl Interval {
    pub fn new(lo: Seed, hi: Seed) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: Seed) -> bool {
        return self.lo <= value && value <= self.hi;
    }

    pub fn is_empty(&self) -> bool {
        return self.hi < self.lo;
    }

    /// Number of integers inside, saturating at `u64::MAX`.
    pub fn width(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        return (self.hi - self.lo).saturating_add(1);
    }

    /*
        Splits into at most `parts` disjoint, adjacent pieces covering the same values.
        The first `width % parts` pieces get one extra value.
        Fewer pieces come back when the interval is narrower than `parts`.
    */
    pub fn split(&self, parts: usize) -> Vec<Interval> {
        if self.is_empty() {
            return Vec::new();
        }

        let width = self.width();
        let parts = (parts.max(1) as u64).min(width);
        let base = width / parts;
        let remainder = width % parts;

        let mut pieces: Vec<Interval> = Vec::with_capacity(parts as usize);
        let mut lo = self.lo;

        for i in 0..parts {
            let size = base + if i < remainder { 1 } else { 0 };
            let hi = lo + (size - 1);
            pieces.push(Interval::new(lo, hi));
            lo = hi.wrapping_add(1);
        }

        return pieces;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_covers_interval_without_overlap() {
        let interval = Interval::new(10, 109);
        let pieces = interval.split(3);

        assert_eq!(
            pieces,
            vec![
                Interval::new(10, 43),
                Interval::new(44, 76),
                Interval::new(77, 109),
            ]
        );
        assert_eq!(pieces.iter().map(|p| p.width()).sum::<u64>(), interval.width());
    }

    #[test]
    fn split_never_yields_empty_pieces() {
        let pieces = Interval::new(5, 6).split(8);
        assert_eq!(pieces, vec![Interval::new(5, 5), Interval::new(6, 6)]);
        assert!(Interval::new(7, 6).split(4).is_empty());
    }

    #[test]
    fn contains_is_inclusive() {
        let interval = Interval::new(3, 5);
        assert!(interval.contains(3));
        assert!(interval.contains(5));
        assert!(!interval.contains(6));
        assert_eq!(interval.width(), 3);
    }
}
