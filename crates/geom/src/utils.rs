//! Various vector tools that are mostly useful for the mesh generator.

use crate::{vector, Angle, Rotation, Vector};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Returns the vector perpendicular to `v`, rotated 90° counter-clockwise.
#[inline]
pub fn tangent(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Returns the unit vector perpendicular to `v`, rotated 90° counter-clockwise.
///
/// The result is NaN when `v` has length zero. Callers must guarantee
/// `v != 0`; the input sampler's minimum-distance filter takes care of that
/// for consecutive stroke points.
#[inline]
pub fn normalized_tangent(v: Vector) -> Vector {
    tangent(v).normalize()
}

/// Signed angle of the turn from `prev_dir` to `dir`.
///
/// The magnitude is the unsigned angle between the two directions (0..π),
/// the sign is the sign of the negated z component of their cross product:
/// positive for clockwise turns, negative for counter-clockwise turns,
/// assuming y points up.
///
/// ```
/// use scribble_geom::vector;
/// use scribble_geom::utils::signed_turn_angle;
///
/// let right = signed_turn_angle(vector(1.0, 0.0), vector(0.0, -1.0));
/// assert!((right.to_degrees() - 90.0).abs() < 1e-4);
/// ```
#[inline]
pub fn signed_turn_angle(prev_dir: Vector, dir: Vector) -> Angle {
    Angle::radians(-prev_dir.cross(dir).atan2(prev_dir.dot(dir)))
}

/// Rotates `v` by `turn`, in the rotational sense measured by
/// [`signed_turn_angle`]: a positive `turn` rotates clockwise (y up).
///
/// Rotating the normal of an entering segment by the full signed turn angle
/// yields the normal of the exiting segment, which is what makes corner
/// rounding a single loop instead of a pair of mirrored branches.
#[inline]
pub fn rotate_toward_turn(v: Vector, turn: Angle) -> Vector {
    Rotation::new(-turn).transform_vector(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_almost_eq(a: Vector, b: Vector) {
        if (a - b).square_length() > 1e-9 {
            panic!("assert almost equal: {:?} != {:?}", a, b);
        }
    }

    #[test]
    fn perpendicular() {
        assert_almost_eq(tangent(vector(2.0, 0.0)), vector(0.0, 2.0));
        assert_almost_eq(normalized_tangent(vector(3.0, 0.0)), vector(0.0, 1.0));
        assert_almost_eq(normalized_tangent(vector(0.0, -2.0)), vector(1.0, 0.0));
    }

    #[test]
    fn turn_angle_signs() {
        // Clockwise turns are positive, counter-clockwise turns negative.
        let cw = signed_turn_angle(vector(1.0, 0.0), vector(0.0, -1.0));
        assert!((cw.to_degrees() - 90.0).abs() < 1e-4);

        let ccw = signed_turn_angle(vector(1.0, 0.0), vector(0.0, 1.0));
        assert!((ccw.to_degrees() + 90.0).abs() < 1e-4);

        let straight = signed_turn_angle(vector(1.0, 0.0), vector(2.0, 0.0));
        assert!(straight.radians.abs() < 1e-6);
    }

    #[test]
    fn rotation_follows_turn() {
        // Rotating the entering normal by the signed turn angle must yield
        // the exiting normal.
        let prev_dir = vector(1.0, 0.0);
        for &dir in &[
            vector(0.0, -1.0),
            vector(0.0, 1.0),
            vector(1.0, 1.0),
            vector(-1.0, 0.5),
        ] {
            let turn = signed_turn_angle(prev_dir, dir);
            let rotated = rotate_toward_turn(normalized_tangent(prev_dir), turn);
            assert_almost_eq(rotated, normalized_tangent(dir));
        }
    }
}
