//! Accumulates pointer samples into a stroke.
//!
//! The recorder implements the filtering contract the rest of the pipeline
//! assumes: the first sample is always committed, and a later sample is
//! appended only when it is farther than the configured minimum distance
//! from the last committed point; otherwise it *replaces* the last point,
//! so the stroke's free end keeps tracking the pointer while the user
//! hovers in place.

use crate::geom::Point;
use crate::{Stroke, StrokePoint};
use alloc::vec::Vec;

/// Sampling parameters for stroke recording.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SamplingOptions {
    /// How many samples per second the host loop should feed the recorder.
    ///
    /// The recorder itself is clock-less; this value is exposed through
    /// [`sample_interval`](SamplingOptions::sample_interval) for the loop
    /// driving it.
    ///
    /// Default value: `SamplingOptions::DEFAULT_SAMPLE_RATE`.
    pub sample_rate: f32,

    /// Minimum distance between two committed points.
    ///
    /// Default value: `SamplingOptions::DEFAULT_MIN_DISTANCE`.
    pub min_distance: f32,
}

impl SamplingOptions {
    pub const DEFAULT_SAMPLE_RATE: f32 = 60.0;
    pub const DEFAULT_MIN_DISTANCE: f32 = 0.1;

    pub const DEFAULT: Self = SamplingOptions {
        sample_rate: Self::DEFAULT_SAMPLE_RATE,
        min_distance: Self::DEFAULT_MIN_DISTANCE,
    };

    #[inline]
    pub const fn with_sample_rate(mut self, rate: f32) -> Self {
        self.sample_rate = rate;
        self
    }

    #[inline]
    pub const fn with_min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }

    /// Seconds between two samples at the configured rate.
    #[inline]
    pub fn sample_interval(&self) -> f32 {
        1.0 / self.sample_rate
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Records pointer samples into an ordered, distance-filtered point list.
///
/// One recorder is bound to one stroke being drawn; [`finish`] consumes the
/// accumulated points, [`clear`] restarts in place.
///
/// [`finish`]: StrokeRecorder::finish
/// [`clear`]: StrokeRecorder::clear
#[derive(Clone, Debug, Default)]
pub struct StrokeRecorder {
    options: SamplingOptions,
    points: Vec<StrokePoint>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::with_options(SamplingOptions::DEFAULT)
    }

    pub fn with_options(options: SamplingOptions) -> Self {
        StrokeRecorder {
            options,
            points: Vec::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &SamplingOptions {
        &self.options
    }

    /// Feeds one pointer sample taken `time` seconds into the stroke.
    ///
    /// Returns true when the sample was appended as a new point, false when
    /// it overwrote the last point.
    pub fn record(&mut self, position: Point, time: f32) -> bool {
        let last = match self.points.last_mut() {
            Some(last) => last,
            None => {
                self.points.push(StrokePoint::new(position, time));
                return true;
            }
        };

        if (position - last.position).length() > self.options.min_distance {
            self.points.push(StrokePoint::new(position, time));
            true
        } else {
            *last = StrokePoint::new(position, time);
            false
        }
    }

    #[inline]
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Discards the accumulated points, keeping the options.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Consumes the recorder and produces the immutable stroke.
    pub fn finish(self) -> Stroke {
        Stroke::from_points(self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    #[test]
    fn first_sample_always_committed() {
        let mut recorder = StrokeRecorder::new();
        assert!(recorder.record(point(5.0, -3.0), 0.0));
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn close_samples_overwrite_the_last_point() {
        let mut recorder = StrokeRecorder::with_options(
            SamplingOptions::DEFAULT.with_min_distance(0.5),
        );
        recorder.record(point(0.0, 0.0), 0.0);
        assert!(!recorder.record(point(0.3, 0.0), 0.1));
        assert_eq!(recorder.len(), 1);
        // The replacement keeps the freshest position and timestamp.
        assert_eq!(recorder.points()[0], StrokePoint::new(point(0.3, 0.0), 0.1));

        assert!(recorder.record(point(1.0, 0.0), 0.2));
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn finish_produces_the_recorded_stroke() {
        let mut recorder = StrokeRecorder::new();
        recorder.record(point(0.0, 0.0), 0.0);
        recorder.record(point(1.0, 0.0), 0.1);
        recorder.record(point(2.0, 0.0), 0.2);
        let stroke = recorder.finish();

        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.duration(), 0.2);
        assert_eq!(
            stroke.positions().last(),
            Some(point(2.0, 0.0)),
        );
    }

    #[test]
    fn sample_interval_matches_rate() {
        let options = SamplingOptions::DEFAULT.with_sample_rate(120.0);
        assert_eq!(options.sample_interval(), 1.0 / 120.0);
    }
}
