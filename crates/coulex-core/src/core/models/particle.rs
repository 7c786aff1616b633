use nalgebra::Point3;

/// A charged point particle.
///
/// Bond adjacency is not stored on the particle itself; it lives in the
/// [`ParticleSystem`](super::system::ParticleSystem) so that a particle is a small,
/// `Copy`-able record that can be shared freely across worker threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// The 3D coordinates of the particle.
    pub position: Point3<f64>,
    /// The scalar charge in elementary charge units.
    pub charge: f64,
}

impl Particle {
    pub fn new(position: Point3<f64>, charge: f64) -> Self {
        Self { position, charge }
    }

    /// Euclidean distance to another particle.
    ///
    /// Evaluated as nested `hypot` calls so that no intermediate squared term can
    /// overflow or underflow for extreme coordinate differences.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let d = other.position - self.position;
        d.x.hypot(d.y.hypot(d.z))
    }

    /// Returns `true` when both the position and the charge are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.charge.is_finite() && self.position.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn distance_to_matches_euclidean_norm() {
        let a = Particle::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = Particle::new(Point3::new(1.0, 2.0, 2.0), -1.0);
        assert!((a.distance_to(&b) - 3.0).abs() < TOLERANCE);
        assert!((b.distance_to(&a) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn distance_to_does_not_overflow_for_huge_coordinates() {
        let a = Particle::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = Particle::new(Point3::new(3.0e200, 4.0e200, 0.0), 1.0);
        let dist = a.distance_to(&b);
        assert!(dist.is_finite());
        assert!((dist / 5.0e200 - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn distance_to_does_not_underflow_for_tiny_coordinates() {
        let a = Particle::new(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = Particle::new(Point3::new(3.0e-200, 4.0e-200, 0.0), 1.0);
        let dist = a.distance_to(&b);
        assert!(dist > 0.0);
        assert!((dist / 5.0e-200 - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn is_finite_detects_nan_and_infinite_fields() {
        assert!(Particle::new(Point3::new(1.0, 2.0, 3.0), 0.5).is_finite());
        assert!(!Particle::new(Point3::new(f64::NAN, 0.0, 0.0), 0.5).is_finite());
        assert!(!Particle::new(Point3::origin(), f64::INFINITY).is_finite());
    }
}
