/// Multiplier applied to the capacity whenever a buffer has to grow.
///
/// Growing an empty buffer for a single element uses the factor itself as
/// the new capacity, so a factor of `4.0` makes the first append allocate
/// four slots. Every growth path yields at least the capacity it needs,
/// even for factors at or below `1.0`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GrowthFactor(f32);

impl GrowthFactor {

    pub const DOUBLING: Self = Self(2.0);

    /// Negative and non-finite factors are clamped to zero.
    #[inline(always)]
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self(0.0)
        }
    }

    #[inline(always)]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline(always)]
    fn scale(self, n: usize) -> usize {
        // single precision product, float to int casts saturate
        (n as f32 * self.0) as usize
    }

    /// Capacity for a full buffer that needs one more slot at an end.
    #[inline(always)]
    pub fn for_append(self, capacity: usize) -> usize {
        let scaled =
            if capacity == 0 {
                self.0 as usize
            }
            else {
                self.scale(capacity)
            };
        scaled.max(capacity.saturating_add(1))
    }

    /// Capacity for a full buffer that needs one more slot at a position.
    #[inline(always)]
    pub fn for_insert(self, capacity: usize) -> usize {
        self.scale(capacity).max(capacity.saturating_add(1))
    }

    /// Capacity for a buffer that must hold `required` elements after a
    /// bulk insert.
    #[inline(always)]
    pub fn for_bulk(self, required: usize) -> usize {
        self.scale(required).max(required)
    }
}

impl Default for GrowthFactor {

    fn default() -> Self {
        Self::DOUBLING
    }
}

impl From<f32> for GrowthFactor {

    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Construction time configuration of a [`SequenceBuffer`](crate::SequenceBuffer).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Settings {
    pub growth_factor: GrowthFactor,
    pub initial_capacity: usize,
}

impl Settings {

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_growth_factor(mut self, factor: impl Into<GrowthFactor>) -> Self {
        self.growth_factor = factor.into();
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_growth_uses_the_factor_as_capacity() {
        assert_eq!(GrowthFactor::new(2.0).for_append(0), 2);
        assert_eq!(GrowthFactor::new(5.0).for_append(0), 5);
        assert_eq!(GrowthFactor::new(1.5).for_append(0), 1);
    }

    #[test]
    fn append_growth_is_geometric() {
        let g = GrowthFactor::DOUBLING;
        assert_eq!(g.for_append(3), 6);
        assert_eq!(g.for_append(8), 16);
        assert_eq!(GrowthFactor::new(1.5).for_append(4), 6);
    }

    #[test]
    fn small_factors_still_make_room() {
        for factor in [0.0, 0.5, 1.0, 1.1, -3.0, f32::NAN, f32::INFINITY] {
            let g = GrowthFactor::new(factor);
            assert!(g.for_append(0) >= 1);
            assert!(g.for_append(7) >= 8);
            assert!(g.for_insert(7) >= 8);
            assert!(g.for_bulk(9) >= 9);
        }
    }

    #[test]
    fn insert_growth_matches_the_max_rule() {
        let g = GrowthFactor::DOUBLING;
        assert_eq!(g.for_insert(3), 6);
        assert_eq!(g.for_insert(0), 1);
        assert_eq!(GrowthFactor::new(1.2).for_insert(2), 3);
    }

    #[test]
    fn bulk_growth_scales_the_requirement() {
        assert_eq!(GrowthFactor::DOUBLING.for_bulk(5), 10);
        assert_eq!(GrowthFactor::new(0.5).for_bulk(5), 5);
    }

    #[test]
    fn fractional_factors_scale_in_single_precision() {
        let g = GrowthFactor::new(1.9);
        assert_eq!(g.for_insert(10), 19);
        assert_eq!(g.for_append(10), 19);
        assert_eq!(g.for_bulk(10), 19);
    }

    #[test]
    fn settings_builder() {
        let settings = Settings::new()
            .with_growth_factor(3.0)
            .with_initial_capacity(8);
        assert_eq!(settings.growth_factor.get(), 3.0);
        assert_eq!(settings.initial_capacity, 8);
        assert_eq!(Settings::default().growth_factor, GrowthFactor::DOUBLING);
    }
}
