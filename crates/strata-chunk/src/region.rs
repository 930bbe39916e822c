/// Half-open box of grid samples, `min <= p < max` per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRegion {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl GridRegion {
    #[inline]
    pub const fn new(min: [i32; 3], max: [i32; 3]) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn full(size: usize) -> Self {
        let s = size as i32;
        Self::new([0, 0, 0], [s, s, s])
    }

    /// Samples within Chebyshev distance `half_extent` of `centre`, inclusive.
    #[inline]
    pub fn cube(centre: [i32; 3], half_extent: i32) -> Self {
        let h = half_extent.max(0);
        Self::new(
            [centre[0] - h, centre[1] - h, centre[2] - h],
            [centre[0] + h + 1, centre[1] + h + 1, centre[2] + h + 1],
        )
    }

    #[inline]
    pub fn from_origin_extent(origin: [i32; 3], extent: [i32; 3]) -> Self {
        Self::new(
            origin,
            [
                origin[0] + extent[0],
                origin[1] + extent[1],
                origin[2] + extent[2],
            ],
        )
    }

    pub fn clamp_to(self, size: usize) -> Self {
        let s = size as i32;
        let mut out = self;
        for a in 0..3 {
            out.min[a] = self.min[a].clamp(0, s);
            out.max[a] = self.max[a].clamp(out.min[a], s);
        }
        out
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|a| self.max[a] <= self.min[a])
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min[0]
            && x < self.max[0]
            && y >= self.min[1]
            && y < self.max[1]
            && z >= self.min[2]
            && z < self.max[2]
    }

    /// True when the two regions share at least one sample.
    pub fn overlaps(&self, other: &GridRegion) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (0..3).all(|a| self.min[a] < other.max[a] && other.min[a] < self.max[a])
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (0..3)
            .map(|a| (self.max[a] - self.min[a]) as usize)
            .product()
    }
}
