//! Polyline simplification with the Ramer–Douglas–Peucker algorithm.
//!
//! Reduces a dense point sequence to the subset that stays within
//! `epsilon` of the original shape. Not part of the live meshing pipeline;
//! kept for offline refinement of finished strokes.
//!
//! The recursion of the textbook formulation is replaced with an explicit
//! stack of index ranges, so arbitrarily long strokes cannot exhaust the
//! call stack.

use crate::geom::Point;
use crate::stroke::StrokePoint;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Indices of the points that survive simplification, in ascending order.
///
/// The first and last point always survive. `epsilon <= 0` keeps every
/// point.
pub fn simplify_indices(points: &[Point], epsilon: f32) -> Vec<usize> {
    if points.len() < 3 || epsilon <= 0.0 {
        return (0..points.len()).collect();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut ranges = vec![(0, points.len() - 1)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        // Find the point farthest from the chord.
        let mut index_of_max = start;
        let mut max_distance = 0.0;
        for i in start + 1..end {
            let distance = perpendicular_distance(points[i], points[start], points[end]);
            if distance >= max_distance {
                index_of_max = i;
                max_distance = distance;
            }
        }

        if max_distance > epsilon {
            keep[index_of_max] = true;
            ranges.push((start, index_of_max));
            ranges.push((index_of_max, end));
        }
    }

    (0..points.len()).filter(|&i| keep[i]).collect()
}

/// Simplifies a stroke's point list, keeping timestamps attached to the
/// surviving points.
pub fn simplify(points: &[StrokePoint], epsilon: f32) -> Vec<StrokePoint> {
    let positions: Vec<Point> = points.iter().map(|p| p.position).collect();

    simplify_indices(&positions, epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Distance from `p` to the line through `a` and `b`.
///
/// Falls back to the distance to `a` when the chord is degenerate.
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f32 {
    let chord = b - a;
    let length = chord.length();
    if length < 1e-6 {
        return (p - a).length();
    }

    (chord.cross(p - a)).abs() / length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let points = [
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(2.0, 0.0),
            point(3.0, 0.0),
            point(4.0, 0.0),
        ];
        assert_eq!(simplify_indices(&points, 0.01), vec![0, 4]);
    }

    #[test]
    fn spikes_survive() {
        let points = [
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(2.0, 1.0),
            point(3.0, 0.0),
            point(4.0, 0.0),
        ];
        let kept = simplify_indices(&points, 0.1);
        assert!(kept.contains(&2));
        assert_eq!(kept.first(), Some(&0));
        assert_eq!(kept.last(), Some(&4));
    }

    #[test]
    fn vertical_chords_are_handled() {
        // A slope-form distance would divide by zero here.
        let points = [
            point(0.0, 0.0),
            point(0.5, 1.0),
            point(0.0, 2.0),
            point(0.0, 4.0),
        ];
        let kept = simplify_indices(&points, 0.1);
        assert!(kept.contains(&1));
    }

    #[test]
    fn zero_epsilon_keeps_everything() {
        let points = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)];
        assert_eq!(simplify_indices(&points, 0.0), vec![0, 1, 2]);
    }

    #[test]
    fn timestamps_follow_their_points() {
        let points = [
            StrokePoint::new(point(0.0, 0.0), 0.0),
            StrokePoint::new(point(1.0, 0.5), 0.1),
            StrokePoint::new(point(2.0, 1.0), 0.2),
            StrokePoint::new(point(3.0, 0.0), 0.3),
        ];
        // The second point lies on the chord of the spike at (2, 1) and is
        // dropped; everything else survives with its timestamp.
        let simplified = simplify(&points, 0.05);

        assert_eq!(simplified.len(), 3);
        assert_eq!(simplified[0].time, 0.0);
        assert_eq!(simplified[1].time, 0.2);
        assert_eq!(simplified[2].time, 0.3);
    }
}
