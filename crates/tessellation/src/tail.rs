//! Finds the tapered tail of a stroke.
//!
//! A stroke that ends fast gets a tail: walking backward from the free
//! end, the tail starts where the pen's deceleration last reversed against
//! its direction of travel. The tessellator shrinks the ribbon's
//! half-width linearly over the tail's time span to fake a pen lift.

use crate::debugger::RibbonObserver;
use crate::stroke::StrokePoint;

/// Half-open index range `[start, len)` of a stroke's tapered tail, with
/// the time span it covers.
///
/// `start == len` (and a zero duration) means the stroke has no tail.
/// Recomputed on every build pass, never persisted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TailRange {
    pub start: usize,
    pub duration: f32,
}

impl TailRange {
    /// The empty tail of a stroke with `len` points.
    #[inline]
    pub fn none(len: usize) -> Self {
        TailRange {
            start: len,
            duration: 0.0,
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start
    }
}

/// Computes the tail of a point sequence.
///
/// Only strokes of more than two points can have a tail, and only when the
/// final segment's speed exceeds `velocity_threshold`. The backward walk
/// stops at the first index whose measured acceleration points against the
/// previous segment's velocity (the pen started decelerating there), or at
/// index 1. Tails spanning fewer than two interior points from the end are
/// discarded as too short to render a visible taper.
///
/// Segment velocities divide by the time deltas between samples; duplicate
/// timestamps are a precondition violation this walk does not guard.
pub fn compute_tail(
    points: &[StrokePoint],
    velocity_threshold: f32,
    observer: &mut dyn RibbonObserver,
) -> TailRange {
    let n = points.len();
    if n <= 2 {
        return TailRange::none(n);
    }

    let last = points[n - 1];
    let second_last = points[n - 2];
    let last_velocity = (last.position - second_last.position) / (last.time - second_last.time);
    if last_velocity.length() <= velocity_threshold {
        return TailRange::none(n);
    }

    let mut tail = TailRange::none(n);
    let mut current_velocity = last_velocity;
    observer.velocity(n - 1, current_velocity);

    for i in (1..=n - 2).rev() {
        let dt = points[i].time - points[i - 1].time;
        let previous_velocity = (points[i].position - points[i - 1].position) / dt;
        let acceleration = (current_velocity - previous_velocity) / dt;

        observer.velocity(i - 1, previous_velocity);
        observer.acceleration(i - 1, acceleration);

        // NaN alignment (zero acceleration) compares false and keeps walking.
        let alignment = acceleration.normalize().dot(previous_velocity.normalize());
        log::debug!(
            "tail walk i={} dt={} |prev_v|={} alignment={}",
            i,
            dt,
            previous_velocity.length(),
            alignment
        );

        if alignment < 0.0 || i == 1 {
            tail = TailRange {
                start: i,
                duration: last.time - points[i].time,
            };
            break;
        }

        current_velocity = previous_velocity;
    }

    if tail.start > n - 3 {
        // Too short to render a visible taper.
        return TailRange::none(n);
    }

    log::debug!("tail starts at {} spanning {}s", tail.start, tail.duration);

    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    fn sample(x: f32, time: f32) -> StrokePoint {
        StrokePoint::new(point(x, 0.0), time)
    }

    #[test]
    fn too_few_points() {
        let points = [sample(0.0, 0.0), sample(1.0, 0.1)];
        let tail = compute_tail(&points, 0.0, &mut ());
        assert_eq!(tail, TailRange::none(2));
    }

    #[test]
    fn slow_ending_has_no_tail() {
        // 1 unit/s on the final segment, below the 1.5 threshold.
        let points = [
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            sample(2.0, 0.2),
            sample(2.1, 0.3),
        ];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail, TailRange::none(4));
    }

    #[test]
    fn accelerating_stroke_tapers_from_the_start() {
        // Speeds up the whole way: the walk never finds a reversal and
        // stops at index 1.
        let points = [
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            sample(2.5, 0.2),
            sample(4.5, 0.3),
            sample(7.0, 0.4),
            sample(10.0, 0.5),
        ];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail.start, 1);
        assert!((tail.duration - 0.4).abs() < 1e-6);
    }

    #[test]
    fn walk_stops_where_deceleration_reversed() {
        // Slow, then a burst to the end: between index 2 and 3 the
        // velocity jumps, so walking backward from the end the measured
        // acceleration opposes the slow previous velocity at index 3.
        let points = [
            sample(0.0, 0.0),
            sample(0.4, 0.1),
            sample(0.8, 0.2),
            sample(1.0, 0.3),
            sample(2.0, 0.4),
            sample(3.5, 0.5),
            sample(5.5, 0.6),
        ];
        // Walking back: v(6)=20, v(5)=15, v(4)=10, v(3)=2, v(2)=4.
        // At i=3: acc = (10 - 2)/0.1 > 0 aligned; keep walking.
        // At i=2: acc = (2 - 4)/0.1 < 0 against travel; stop.
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail.start, 2);
        assert!((tail.duration - 0.4).abs() < 1e-6);
    }

    #[test]
    fn short_tail_is_discarded() {
        // Walking back: v(4)=18, v(3)=2, v(2)=10. At i=3 the acceleration
        // is aligned with travel, at i=2 it points against it, so the tail
        // starts at 2 == n-3: just long enough to keep.
        let points = [
            sample(0.0, 0.0),
            sample(2.0, 0.1),
            sample(3.0, 0.2),
            sample(3.2, 0.3),
            sample(5.0, 0.4),
        ];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail.start, 2);
        assert!((tail.duration - 0.2).abs() < 1e-6);

        // v(4)=5, v(3)=20: the walk stops immediately at i=3 > n-3, which
        // spans fewer than two interior points: dropped.
        let points = [
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            sample(2.0, 0.2),
            sample(4.0, 0.3),
            sample(4.5, 0.4),
        ];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail, TailRange::none(5));
    }

    #[test]
    fn walk_reaching_the_start_taper_from_index_one() {
        // v(3)=18, v(2)=2, v(1)=10: no reversal until the walk bottoms
        // out at index 1, which for n=4 is exactly n-3: kept.
        let points = [
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            sample(1.2, 0.2),
            sample(3.0, 0.3),
        ];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail.start, 1);
    }

    #[test]
    fn three_point_strokes_never_taper() {
        // The only possible stopping index (1) exceeds n-3 = 0.
        let points = [sample(0.0, 0.0), sample(1.0, 0.1), sample(3.0, 0.2)];
        let tail = compute_tail(&points, 1.5, &mut ());
        assert_eq!(tail, TailRange::none(3));
    }

    #[test]
    fn observer_sees_the_walk() {
        use crate::debugger::DebugTrace;

        let points = [
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            sample(2.5, 0.2),
            sample(4.5, 0.3),
            sample(7.0, 0.4),
        ];
        let mut trace = DebugTrace::new();
        let tail = compute_tail(&points, 1.5, &mut trace);
        assert_eq!(tail.start, 1);
        assert!(!trace.velocities().is_empty());
        assert!(!trace.accelerations().is_empty());
    }
}
