#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![no_std]

//! Triangulated ribbon meshes for freehand strokes.
//!
//! This crate is reexported in [scribble](https://docs.rs/scribble/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [RibbonTessellator](struct.RibbonTessellator.html) - Generates a
//!   capsule-jointed triangle strip along a time-stamped point sequence,
//!   rounding sharp corners with triangle fans and tapering the trailing
//!   end of fast strokes.
//! * [`RibbonGeometryBuilder`](geometry_builder/trait.RibbonGeometryBuilder.html) -
//!   (See the documentation of the [geometry_builder module](geometry_builder/index.html))
//!   the interface through which the tessellator outputs vertices and
//!   triangles, usually into arbitrary vertex and index buffers.
//!
//! The tessellator produces geometry in the form of three parallel buffers
//! (vertex positions, triangle indices, per-vertex colors) which are
//! expected to be rendered with the equivalent of OpenGL's `glDrawElements`
//! with mode `GL_TRIANGLES`.
//!
//! Each pass fully recomputes the mesh for the current point list; callers
//! re-tessellate whenever the stroke gains a point and once more when it
//! ends. A pass over fewer than two points is an explicit no-op.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use scribble_stroke as stroke;

pub use crate::stroke::geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod debugger;
mod error;
pub mod geometry_builder;
mod ribbon;
mod tail;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::ribbon::*;

#[doc(inline)]
pub use crate::tail::{compute_tail, TailRange};

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, GeometryBuilder, GeometryBuilderError, MeshBuffers, RibbonGeometryBuilder,
    RibbonVertexConstructor,
};

use crate::geom::Angle;

/// Whether a vertex sits on the positive or negative side of the spine.
///
/// The positive side is the one the perpendicular of the drawing direction
/// points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Side {
    Positive,
    Negative,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Positive => Side::Negative,
            Side::Negative => Side::Positive,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Side::Positive
    }

    pub fn is_negative(self) -> bool {
        self == Side::Negative
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Side::Positive => 1.0,
            Side::Negative => -1.0,
        }
    }
}

/// A 32 bits-per-pixel RGBA color, the per-vertex color format of the
/// output mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
    pub const GREEN: Rgba8 = Rgba8::new(0, 255, 0, 255);
    pub const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Rgba8::BLACK
    }
}

/// Parameters for the ribbon tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RibbonOptions {
    /// Half of the ribbon's width: each joint extrudes two vertices at
    /// `position ± half_width · normal`.
    ///
    /// Must be greater than zero.
    /// Default value: `RibbonOptions::DEFAULT_HALF_WIDTH`.
    pub half_width: f32,

    /// Interior points whose absolute signed turn angle exceeds this
    /// threshold get a rounded corner fan instead of a straight joint.
    ///
    /// Default value: `RibbonOptions::DEFAULT_CORNER_ANGLE_THRESHOLD` (45°).
    pub corner_angle_threshold: Angle,

    /// Number of subdivisions of a full revolution used to round corners;
    /// a corner fan spends one wedge triangle per `360° / subdivisions`
    /// step of its turn angle.
    ///
    /// Must be greater than or equal to 1.
    /// Default value: `RibbonOptions::DEFAULT_CORNER_SUBDIVISIONS`.
    pub corner_subdivisions: u32,

    /// Final-segment speed (units per second) above which the stroke's
    /// trailing end is tapered.
    ///
    /// Default value: `RibbonOptions::DEFAULT_TAIL_VELOCITY_THRESHOLD`.
    pub tail_velocity_threshold: f32,

    /// Color assigned to every vertex of the build.
    ///
    /// Default value: `Rgba8::BLACK`.
    pub color: Rgba8,
}

impl RibbonOptions {
    pub const DEFAULT_HALF_WIDTH: f32 = 0.2;
    pub const DEFAULT_CORNER_ANGLE_THRESHOLD: Angle = Angle {
        radians: core::f32::consts::FRAC_PI_4,
    };
    pub const DEFAULT_CORNER_SUBDIVISIONS: u32 = 64;
    pub const DEFAULT_TAIL_VELOCITY_THRESHOLD: f32 = 1.5;

    pub const DEFAULT: Self = RibbonOptions {
        half_width: Self::DEFAULT_HALF_WIDTH,
        corner_angle_threshold: Self::DEFAULT_CORNER_ANGLE_THRESHOLD,
        corner_subdivisions: Self::DEFAULT_CORNER_SUBDIVISIONS,
        tail_velocity_threshold: Self::DEFAULT_TAIL_VELOCITY_THRESHOLD,
        color: Rgba8::BLACK,
    };

    #[inline]
    pub fn with_half_width(mut self, half_width: f32) -> Self {
        assert!(half_width > 0.0);
        self.half_width = half_width;
        self
    }

    #[inline]
    pub const fn with_corner_angle_threshold(mut self, threshold: Angle) -> Self {
        self.corner_angle_threshold = threshold;
        self
    }

    #[inline]
    pub fn with_corner_subdivisions(mut self, subdivisions: u32) -> Self {
        assert!(subdivisions >= 1);
        self.corner_subdivisions = subdivisions;
        self
    }

    #[inline]
    pub const fn with_tail_velocity_threshold(mut self, threshold: f32) -> Self {
        self.tail_velocity_threshold = threshold;
        self
    }

    #[inline]
    pub const fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    pub fn from_usize(v: usize) -> Self {
        VertexId(v as Index)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v as Index)
    }
}
impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}
impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}

#[test]
fn default_options() {
    let options = RibbonOptions::default();

    assert_eq!(options.half_width, 0.2);
    assert_eq!(options.corner_subdivisions, 64);
    assert_eq!(options.tail_velocity_threshold, 1.5);
    assert!((options.corner_angle_threshold.to_degrees() - 45.0).abs() < 1e-4);
    assert_eq!(options.color, Rgba8::BLACK);
}

#[test]
#[should_panic]
fn invalid_corner_subdivisions() {
    let _ = RibbonOptions::default().with_corner_subdivisions(0);
}
