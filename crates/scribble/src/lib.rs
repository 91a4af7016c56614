//! Freehand pointer strokes turned into renderable ribbon meshes.
//!
//! A stroke arrives as an ordered, time-stamped point sequence (recorded
//! with [`stroke::recorder::StrokeRecorder`]), and leaves as three parallel
//! buffers (vertex positions, triangle indices, per-vertex colors) ready
//! for a mesh renderer and, optionally, collision. The interesting work
//! happens in [`tessellation`]: straight joints become bridged quads,
//! sharp corners become triangle fans, and fast stroke endings taper like
//! a lifting pen. The [`algorithms`] crate adds an occupancy-grid boundary
//! tracer and an offline polyline simplifier on top.
//!
//! # Example
//!
//! ```
//! use scribble::tessellation::{RibbonOptions, RibbonTessellator};
//! use scribble::tessellation::geometry_builder::{simple_builder, MeshBuffers};
//! use scribble::stroke::recorder::StrokeRecorder;
//! use scribble::geom::{point, Point3};
//!
//! // Record a stroke the way an input loop would.
//! let mut recorder = StrokeRecorder::new();
//! recorder.record(point(0.0, 0.0), 0.0);
//! recorder.record(point(1.0, 0.2), 0.016);
//! recorder.record(point(2.0, 0.0), 0.033);
//! let stroke = recorder.finish();
//!
//! // Tessellate it into vertex/index/color buffers.
//! let mut buffers: MeshBuffers<Point3, u32> = MeshBuffers::new();
//! let mut tessellator = RibbonTessellator::new();
//! tessellator
//!     .tessellate_stroke(&stroke, &RibbonOptions::default(), &mut simple_builder(&mut buffers))
//!     .unwrap();
//!
//! assert!(!buffers.indices.is_empty());
//! ```

pub use scribble_algorithms as algorithms;
pub use scribble_tessellation as tessellation;

pub use crate::tessellation::geometry_builder;
pub use crate::tessellation::stroke;

pub use crate::stroke::geom;
