//! Fixed-width binning.
//!
//! Bins start at zero and step by the bin width. The bin count is
//! `ceil(max / width) + 1`, which always leaves one empty headroom bin to the
//! right of the largest value and guarantees at least one bin for empty input.

use crate::error::{Error, Result};

/// Upper bound on the number of bins a single pass may allocate.
pub const MAX_BIN_COUNT: usize = 100_000;

/// One histogram bucket: `[lower, upper)` and the number of values in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    /// Position of this bin, starting at 0.
    pub index: usize,
    /// Inclusive lower bound.
    pub lower: u64,
    /// Exclusive upper bound (inclusive for the last bin).
    pub upper: u64,
    /// Number of values that fell into this bin.
    pub count: usize,
}

impl Bin {
    /// Whether `value` belongs to this bin, given whether it is the last one.
    #[must_use]
    pub fn contains(&self, value: i64, is_last: bool) -> bool {
        let Ok(value) = u64::try_from(value) else {
            return false;
        };
        value >= self.lower && (value < self.upper || (is_last && value == self.upper))
    }
}

/// Bins derived from one set of values and one bin width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSet {
    bin_width: u64,
    max_value: u64,
    bins: Vec<Bin>,
    value_count: usize,
}

impl BinSet {
    /// Bin `values` into buckets of `bin_width`.
    ///
    /// Negative values fall outside the `[0, width * count]` domain and are
    /// not counted; they do still count towards [`BinSet::value_count`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::BinRange`] if `bin_width` is zero, the layout would
    /// need more than [`MAX_BIN_COUNT`] bins, or the domain overflows `u64`.
    pub fn compute(values: &[i64], bin_width: u64) -> Result<Self> {
        if bin_width == 0 {
            return Err(Error::BinRange("bin width must be positive".to_string()));
        }

        let max_value = values.iter().copied().max().unwrap_or(0).max(0).unsigned_abs();
        let bin_count = max_value.div_ceil(bin_width) + 1;
        if bin_count > MAX_BIN_COUNT as u64 {
            return Err(Error::BinRange(format!(
                "{bin_count} bins exceed the limit of {MAX_BIN_COUNT}"
            )));
        }
        let bin_count = bin_count as usize;

        // Only the top edge can overflow; every other bound is below it.
        if bin_width.checked_mul(bin_count as u64).is_none() {
            return Err(Error::BinRange(format!("domain {bin_width} x {bin_count} overflows")));
        }

        let mut bins: Vec<Bin> = (0..bin_count)
            .map(|index| Bin {
                index,
                lower: bin_width * index as u64,
                upper: bin_width * (index as u64 + 1),
                count: 0,
            })
            .collect();

        let last = bin_count - 1;
        for &value in values {
            let Ok(unsigned) = u64::try_from(value) else {
                continue;
            };
            let slot = usize::try_from(unsigned / bin_width).map_or(last, |slot| slot.min(last));
            let bin = &mut bins[slot];
            if bin.contains(value, slot == last) {
                bin.count += 1;
            }
        }

        Ok(Self { bin_width, max_value, bins, value_count: values.len() })
    }

    /// The bin width.
    #[must_use]
    pub fn bin_width(&self) -> u64 {
        self.bin_width
    }

    /// Largest value, clamped at zero (zero for empty input).
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    /// Number of bins (always at least 1).
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// The bins in ascending order.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of values handed to [`BinSet::compute`].
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Number of values that landed in some bin.
    #[must_use]
    pub fn binned_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Largest single bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// `(0, width * count)`, the x domain.
    #[must_use]
    pub fn domain(&self) -> (u64, u64) {
        (0, self.bin_width * self.bin_count() as u64)
    }

    /// Tick values inside the domain: every multiple of the bin width from
    /// zero through the domain maximum (`bin_count + 1` values).
    #[must_use]
    pub fn tick_values(&self) -> Vec<u64> {
        (0..=self.bin_count() as u64).map(|i| self.bin_width * i).collect()
    }

    /// Length of the full threshold candidate sequence, `bin_count + bin_width`.
    #[must_use]
    pub fn threshold_candidate_count(&self) -> u64 {
        (self.bin_count() as u64).saturating_add(self.bin_width)
    }

    /// Every threshold candidate `bin_width * i` for
    /// `i in 0..bin_count + bin_width`, produced lazily.
    ///
    /// Candidates past the domain maximum fall outside the plotted range.
    /// The sequence stops early only if a candidate would overflow `u64`.
    pub fn threshold_candidates(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.threshold_candidate_count()).map_while(move |i| self.bin_width.checked_mul(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(set: &BinSet) -> Vec<usize> {
        set.bins().iter().map(|bin| bin.count).collect()
    }

    #[test]
    fn test_basic_binning() {
        let set = BinSet::compute(&[1, 5, 12, 15, 23], 10).unwrap();
        assert_eq!(set.bin_count(), 4);
        assert_eq!(counts(&set), vec![2, 2, 1, 0]);
        assert_eq!(set.max_count(), 2);
        assert_eq!(set.domain(), (0, 40));
    }

    #[test]
    fn test_empty_values_single_bin() {
        let set = BinSet::compute(&[], 5).unwrap();
        assert_eq!(set.bin_count(), 1);
        assert_eq!(counts(&set), vec![0]);
        assert_eq!(set.max_value(), 0);
        assert_eq!(set.bins()[0].lower, 0);
        assert_eq!(set.bins()[0].upper, 5);
    }

    #[test]
    fn test_exact_multiple_gets_headroom_bin() {
        let set = BinSet::compute(&[10, 20, 40], 10).unwrap();
        assert_eq!(set.bin_count(), 5);
        assert_eq!(counts(&set), vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_negative_values_excluded() {
        let set = BinSet::compute(&[-5, -1, 3], 2).unwrap();
        assert_eq!(set.bin_count(), 3);
        assert_eq!(set.value_count(), 3);
        assert_eq!(set.binned_count(), 1);
    }

    #[test]
    fn test_all_negative_behaves_like_empty() {
        let set = BinSet::compute(&[-10, -20], 4).unwrap();
        assert_eq!(set.bin_count(), 1);
        assert_eq!(set.binned_count(), 0);
    }

    #[test]
    fn test_bounds_are_contiguous() {
        let set = BinSet::compute(&[0, 7, 33], 3).unwrap();
        for pair in set.bins().windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
        let last = set.bins().last().unwrap();
        assert_eq!(last.upper, set.domain().1);
    }

    #[test]
    fn test_counts_agree_with_bin_membership() {
        let values = [0, 3, 4, 9, 10, 11, 12, -1];
        let set = BinSet::compute(&values, 4).unwrap();
        let last = set.bin_count() - 1;
        for bin in set.bins() {
            let members = values.iter().filter(|&&v| bin.contains(v, bin.index == last)).count();
            assert_eq!(bin.count, members, "bin {}", bin.index);
        }
    }

    #[test]
    fn test_bin_contains() {
        let bin = Bin { index: 0, lower: 10, upper: 20, count: 0 };
        assert!(bin.contains(10, false));
        assert!(!bin.contains(20, false));
        assert!(bin.contains(20, true));
        assert!(!bin.contains(-1, true));
    }

    #[test]
    fn test_tick_values() {
        let set = BinSet::compute(&[23], 10).unwrap();
        assert_eq!(set.tick_values(), vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_threshold_candidates_over_allocate() {
        let set = BinSet::compute(&[23], 10).unwrap();
        assert_eq!(set.threshold_candidate_count(), 14);
        let candidates: Vec<u64> = set.threshold_candidates().collect();
        assert_eq!(candidates.len(), 14);
        assert_eq!(candidates[0], 0);
        assert_eq!(candidates[13], 130);
    }

    #[test]
    fn test_huge_bin_width_is_lazy() {
        let set = BinSet::compute(&[1], u64::MAX / 4).unwrap();
        assert_eq!(set.bin_count(), 2);
        assert_eq!(set.threshold_candidates().take(3).count(), 3);
        // Overflow ends the sequence instead of wrapping.
        assert!(set.threshold_candidates().count() < 10);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(BinSet::compute(&[1], 0), Err(Error::BinRange(_))));
    }

    #[test]
    fn test_too_many_bins_rejected() {
        let err = BinSet::compute(&[i64::MAX], 1).unwrap_err();
        assert!(matches!(err, Error::BinRange(_)));
    }

    #[test]
    fn test_domain_overflow_rejected() {
        let err = BinSet::compute(&[1], u64::MAX).unwrap_err();
        assert!(matches!(err, Error::BinRange(_)));
    }
}
