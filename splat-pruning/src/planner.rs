/// Retention planning over a ranked splat sequence.
use crate::error::{PruneError, Result};
use crate::gaussian::Gaussian;
use crate::ranking::RankedGaussians;
use serde::Serialize;
use std::fmt;

/// Share of lowest-visibility splats to drop, guaranteed to be in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PrunePercentage(u8);

impl PrunePercentage {
    pub fn new(percentage: u32) -> Result<Self> {
        match u8::try_from(percentage) {
            Ok(p) if p <= 100 => Ok(Self(p)),
            _ => Err(PruneError::InvalidPercentage(percentage)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for PrunePercentage {
    type Error = PruneError;

    fn try_from(percentage: u32) -> Result<Self> {
        Self::new(percentage)
    }
}

impl fmt::Display for PrunePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which part of a ranked sequence of `total` splats survives one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunePlan {
    pub percentage: PrunePercentage,
    pub total: usize,
    pub num_to_remove: usize,
    pub num_to_keep: usize,
}

impl PrunePlan {
    /// `num_to_remove = floor(total * percentage / 100)`, computed per
    /// hundred so it cannot overflow.
    pub fn new(total: usize, percentage: PrunePercentage) -> Self {
        let p = percentage.get() as usize;
        let num_to_remove = (total / 100) * p + (total % 100) * p / 100;
        Self {
            percentage,
            total,
            num_to_remove,
            num_to_keep: total - num_to_remove,
        }
    }

    /// The highest-visibility tail, still in ascending visibility order.
    /// A sequence shorter than the planned removal yields nothing.
    pub fn kept<'a>(&self, ranked: &'a RankedGaussians) -> &'a [Gaussian] {
        ranked.get(self.num_to_remove..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::splat_with_opacity;

    fn pct(p: u32) -> PrunePercentage {
        PrunePercentage::new(p).unwrap()
    }

    fn logit(visibility: f32) -> f32 {
        (visibility / (1.0 - visibility)).ln()
    }

    #[test]
    fn rejects_percentages_above_100() {
        assert!(PrunePercentage::new(100).is_ok());
        assert!(matches!(
            PrunePercentage::new(101),
            Err(PruneError::InvalidPercentage(101))
        ));
        assert!(matches!(
            PrunePercentage::try_from(300),
            Err(PruneError::InvalidPercentage(300))
        ));
    }

    #[test]
    fn removal_count_truncates() {
        let plan = PrunePlan::new(3, pct(50));
        assert_eq!(plan.num_to_remove, 1);
        assert_eq!(plan.num_to_keep, 2);

        assert_eq!(PrunePlan::new(9, pct(10)).num_to_remove, 0);
        assert_eq!(PrunePlan::new(250, pct(30)).num_to_remove, 75);
    }

    #[test]
    fn keep_count_matches_formula_for_all_levels() {
        for total in [0usize, 1, 2, 3, 7, 10, 99, 100, 101, 1234] {
            for p in 0..=100u32 {
                let plan = PrunePlan::new(total, pct(p));
                assert_eq!(plan.num_to_remove, total * p as usize / 100);
                assert_eq!(plan.num_to_keep, total - plan.num_to_remove);
                assert!(plan.num_to_keep <= total);
            }
        }
    }

    #[test]
    fn no_overflow_for_huge_counts() {
        let plan = PrunePlan::new(usize::MAX, pct(50));
        assert_eq!(plan.num_to_remove + plan.num_to_keep, usize::MAX);
    }

    #[test]
    fn edge_levels() {
        assert_eq!(PrunePlan::new(17, pct(0)).num_to_keep, 17);
        assert_eq!(PrunePlan::new(17, pct(100)).num_to_keep, 0);
        let empty = PrunePlan::new(0, pct(40));
        assert_eq!((empty.num_to_remove, empty.num_to_keep), (0, 0));
    }

    #[test]
    fn twenty_percent_of_ten_drops_two_least_visible() {
        let visibilities = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        let ranked = RankedGaussians::rank(
            visibilities
                .iter()
                .map(|&v| splat_with_opacity(logit(v)))
                .collect(),
        );

        let plan = PrunePlan::new(ranked.len(), pct(20));
        let kept = plan.kept(&ranked);
        assert_eq!(kept.len(), 8);
        assert!((kept[0].visibility() - 0.3).abs() < 1e-6);
        assert!(kept.iter().all(|g| g.visibility() > 0.25));
    }

    #[test]
    fn plan_for_a_longer_sequence_keeps_nothing() {
        let splats = (0..3).map(|i| splat_with_opacity(i as f32)).collect();
        let ranked = RankedGaussians::rank(splats);
        let plan = PrunePlan::new(10, pct(50));
        assert!(plan.kept(&ranked).is_empty());

        let shorter = PrunePlan::new(2, pct(50));
        assert_eq!(shorter.kept(&ranked).len(), 2);
    }

    #[test]
    fn higher_levels_keep_a_tail_of_lower_levels() {
        let splats = (0..37)
            .map(|i| splat_with_opacity((i as f32 * 7.3) % 11.0 - 5.0))
            .collect();
        let ranked = RankedGaussians::rank(splats);
        let levels = [0, 10, 20, 30, 40, 50, 100];
        for pair in levels.windows(2) {
            let low = PrunePlan::new(ranked.len(), pct(pair[0])).kept(&ranked);
            let high = PrunePlan::new(ranked.len(), pct(pair[1])).kept(&ranked);
            assert!(high.len() <= low.len());
            assert_eq!(high, &low[low.len() - high.len()..]);
        }
    }
}
