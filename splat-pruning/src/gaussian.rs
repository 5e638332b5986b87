/// Gaussian splat record and its opacity-derived visibility.
use constants::schema::SH_REST_COUNT;

/// Higher-order spherical-harmonics colour terms, always exactly 45 values.
pub type ShRest = [f32; SH_REST_COUNT];

/// Logistic activation turning a stored opacity logit into blending opacity.
/// Saturates to 0.0 or 1.0 for extreme logits instead of overflowing.
pub fn sigmoid(logit: f32) -> f32 {
    1.0 / (1.0 + (-logit).exp())
}

/// One splat as read from the scene. Immutable once built; the effective
/// visibility is derived from the opacity logit at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    position: [f32; 3],
    normal: [f32; 3],
    f_dc: [f32; 3],
    f_rest: ShRest,
    opacity: f32,
    scale: [f32; 3],
    rotation: [f32; 4],
    visibility: f32,
}

impl Gaussian {
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        f_dc: [f32; 3],
        f_rest: ShRest,
        opacity: f32,
        scale: [f32; 3],
        rotation: [f32; 4],
    ) -> Self {
        Self {
            position,
            normal,
            f_dc,
            f_rest,
            opacity,
            scale,
            rotation,
            visibility: sigmoid(opacity),
        }
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn normal(&self) -> [f32; 3] {
        self.normal
    }

    pub fn f_dc(&self) -> [f32; 3] {
        self.f_dc
    }

    pub fn f_rest(&self) -> &ShRest {
        &self.f_rest
    }

    /// Raw stored logit. This is what gets written back, never the activated value.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale
    }

    pub fn rotation(&self) -> [f32; 4] {
        self.rotation
    }

    pub fn visibility(&self) -> f32 {
        self.visibility
    }
}

#[cfg(test)]
pub(crate) fn splat_with_opacity(opacity: f32) -> Gaussian {
    Gaussian::new(
        [opacity, 0.0, 0.0],
        [0.0; 3],
        [0.0; 3],
        [0.0; SH_REST_COUNT],
        opacity,
        [0.0; 3],
        [1.0, 0.0, 0.0, 0.0],
    )
}
