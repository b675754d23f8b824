use glam::Vec3;

/// Axis-aligned bounding box of loaded geometry. Used to frame the
/// fallback camera when an asset embeds no camera of its own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: grows to fit the first point added.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut bounds = Self::EMPTY;
        for point in points {
            bounds.grow(point);
        }
        bounds
    }

    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True until at least one point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the bounding sphere around `center`.
    pub fn radius(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.size().length() * 0.5
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grows_to_first_point() {
        let mut bounds = Aabb::EMPTY;
        assert!(bounds.is_empty());
        bounds.grow(Vec3::new(1.0, -2.0, 3.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_from_points() {
        let bounds = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 1.0, -2.0),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn test_center() {
        let bounds = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_union() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(-2.0, 2.0, 0.5), Vec3::new(0.5, 3.0, 2.0));
        let union = a.union(&b);
        assert_eq!(union.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_radius_unit_cube() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Half the main diagonal: sqrt(3) / 2
        assert!((bounds.radius() - 0.866).abs() < 0.001);
    }

    #[test]
    fn test_radius_empty_is_zero() {
        assert_eq!(Aabb::EMPTY.radius(), 0.0);
    }
}
