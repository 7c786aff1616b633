/// Raw Coulomb term `q1 * q2 / dist`, without any unit conversion.
///
/// The caller is responsible for rejecting a zero distance.
#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64) -> f64 {
    q1 * q2 / dist
}
