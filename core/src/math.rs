//! Math type aliases and helper functions.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// Build a [`Vec3`] from up to three floats; missing components are zero.
pub fn vec3_from_slice(values: &[f32]) -> Vec3 {
    let mut v = Vec3::zeros();
    for (dst, src) in v.iter_mut().zip(values) {
        *dst = *src;
    }
    v
}

/// Convert a [`Vec3`] to a `[x, y, z]` array.
pub fn vec3_to_array(v: &Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

/// Componentwise equality within an absolute tolerance, evaluated in f64.
pub fn approx_eq_slice(a: &[f32], b: &[f32], epsilon: f64) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&x, &y)| (f64::from(x) - f64::from(y)).abs() < epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_from_slice_zero_fills() {
        assert_eq!(vec3_from_slice(&[1.0, 2.0]), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(vec3_from_slice(&[1.0, 2.0, 3.0, 4.0]), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_approx_eq_slice() {
        assert!(approx_eq_slice(&[0.0, 1.0], &[1e-9, 1.0], 1e-8));
        assert!(!approx_eq_slice(&[0.0, 1.0], &[1e-7, 1.0], 1e-8));
        assert!(!approx_eq_slice(&[0.0], &[0.0, 0.0], 1e-8));
    }

    #[test]
    fn test_cross_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
    }
}
