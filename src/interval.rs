//! Interval arithmetic for ray parameters and canonical shape bounds.
//!
//! Every primitive lives inside the unit slab `[-0.5, 0.5]` on each axis, so
//! root filtering in the geometry kernel is mostly "is this coordinate in
//! [`Interval::UNIT_SLAB`]" and "is this `t` in [`Interval::FORWARD`]".

/// Closed interval [min, max] for range checking.
///
/// Comparisons involving NaN are always false, so a NaN coordinate or
/// parameter is never contained in or surrounded by any interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Extent of every canonical primitive along each object-space axis.
    pub const UNIT_SLAB: Interval = Interval { min: -0.5, max: 0.5 };

    /// Parameters strictly in front of a ray origin (use with [`Interval::surrounds`]).
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
