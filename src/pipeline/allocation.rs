//! Per-stratum allocation of a held-out share
//!
//! Splits an integer total across strata so that each stratum keeps its
//! proportion as closely as integer rounding allows (largest remainder
//! method). All arithmetic is exact integer arithmetic.

/// A split ratio expressed as an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRatio {
    pub numerator: usize,
    pub denominator: usize,
}

impl SplitRatio {
    pub const fn new(numerator: usize, denominator: usize) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Share of the full dataset held out from training (20%).
pub const HOLDOUT_RATIO: SplitRatio = SplitRatio::new(1, 5);

/// Share of the held-out rows that go to test, the rest to validation (50%).
pub const TEST_RATIO: SplitRatio = SplitRatio::new(1, 2);

/// Number of rows held out from `total`, rounded up.
///
/// Rounding up keeps the held-out side non-empty for any non-empty input.
pub fn holdout_size(total: usize, ratio: SplitRatio) -> usize {
    (total * ratio.numerator).div_ceil(ratio.denominator)
}

/// Split each stratum's rows between kept and held-out sides.
///
/// Each stratum first gets the floor of `count * ratio`; the leftover rows
/// needed to reach [`holdout_size`] of the total go to the largest
/// fractional remainders. Ties go to the larger stratum, then to the
/// earlier one, so the result depends only on `counts`.
///
/// The returned allocation sums to `holdout_size(sum(counts), ratio)` and
/// every entry is the floor or the ceiling of its stratum's own share.
pub fn allocate_holdout(counts: &[usize], ratio: SplitRatio) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    let holdout = holdout_size(total, ratio);

    let mut allocation: Vec<usize> = counts
        .iter()
        .map(|&c| c * ratio.numerator / ratio.denominator)
        .collect();
    let assigned: usize = allocation.iter().sum();
    let leftover = holdout.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = counts[a] * ratio.numerator % ratio.denominator;
        let rem_b = counts[b] * ratio.numerator % ratio.denominator;
        rem_b
            .cmp(&rem_a)
            .then(counts[b].cmp(&counts[a]))
            .then(a.cmp(&b))
    });

    for &i in order.iter().take(leftover) {
        allocation[i] += 1;
    }

    allocation
}
