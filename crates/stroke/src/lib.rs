#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Data structures to record and store time-stamped freehand strokes.
//!
//! This crate is reexported in [scribble](https://docs.rs/scribble/).
//!
//! A stroke is an ordered sequence of [`StrokePoint`]s in drawing order,
//! each carrying the seconds elapsed since the stroke started. The sequence
//! is produced by a [`StrokeRecorder`](recorder/struct.StrokeRecorder.html),
//! which applies the input-side contract the mesh generator relies on:
//! consecutive committed points are at least a minimum distance apart, and
//! a sample closer than that replaces the last point instead of appending.
//!
//! # Examples
//!
//! ```
//! use scribble_stroke::recorder::StrokeRecorder;
//! use scribble_stroke::geom::point;
//!
//! let mut recorder = StrokeRecorder::new();
//! recorder.record(point(0.0, 0.0), 0.0);
//! recorder.record(point(1.0, 0.0), 0.016);
//! recorder.record(point(1.02, 0.0), 0.033); // too close: replaces the last point
//! let stroke = recorder.finish();
//!
//! assert_eq!(stroke.len(), 2);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use scribble_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod recorder;

use crate::geom::Point;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A single input sample: a position and the seconds elapsed since the
/// stroke started.
///
/// Timestamps are expected to be strictly increasing along a stroke; the
/// sampler upstream guarantees it and nothing downstream re-validates it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokePoint {
    pub position: Point,
    pub time: f32,
}

impl StrokePoint {
    #[inline]
    pub fn new(position: Point, time: f32) -> Self {
        StrokePoint { position, time }
    }
}

/// An immutable, ordered sequence of stroke points.
///
/// Insertion order is drawing order. Once built the sequence never changes;
/// the mesh generator fully recomputes its output from it on every pass.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Stroke {
    points: Box<[StrokePoint]>,
}

impl Stroke {
    /// Builds a stroke from an already-filtered point sequence.
    pub fn from_points(points: Vec<StrokePoint>) -> Self {
        Stroke {
            points: points.into_boxed_slice(),
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

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<StrokePoint> {
        self.points.iter()
    }

    /// Positions only, in drawing order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// Time span covered by the stroke, zero for fewer than two points.
    pub fn duration(&self) -> f32 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }
}

impl fmt::Debug for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.points.iter()).finish()
    }
}

impl From<Vec<StrokePoint>> for Stroke {
    fn from(points: Vec<StrokePoint>) -> Self {
        Stroke::from_points(points)
    }
}

impl<'l> IntoIterator for &'l Stroke {
    type Item = &'l StrokePoint;
    type IntoIter = core::slice::Iter<'l, StrokePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
