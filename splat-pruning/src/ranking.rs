/// Ordering of splats by effective visibility.
use crate::gaussian::Gaussian;
use std::ops::Deref;

/// Splats sorted by ascending visibility. Only `rank` builds one, so the
/// ordering holds for the whole lifetime of the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedGaussians(Vec<Gaussian>);

impl RankedGaussians {
    /// Stable sort, so equal visibilities keep their input order and the
    /// output bytes are reproducible. NaN visibilities sort after 1.0.
    pub fn rank(mut gaussians: Vec<Gaussian>) -> Self {
        gaussians.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
        Self(gaussians)
    }

    pub fn as_slice(&self) -> &[Gaussian] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Gaussian> {
        self.0
    }
}

// NaN can come out of the sigmoid with either sign bit.
fn sort_key(gaussian: &Gaussian) -> f32 {
    let visibility = gaussian.visibility();
    if visibility.is_nan() {
        f32::INFINITY
    } else {
        visibility
    }
}

impl Deref for RankedGaussians {
    type Target = [Gaussian];

    fn deref(&self) -> &[Gaussian] {
        &self.0
    }
}
