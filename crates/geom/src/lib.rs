#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Simple 2D geometric primitives for freehand stroke meshing, on top of euclid.
//!
//! This crate is reexported in [scribble](https://docs.rs/scribble/).
//!
//! # Overview
//!
//! Everything downstream of the input sampler works with the f32 euclid
//! types aliased here. The [utils](utils/index.html) module carries the
//! small set of vector helpers the mesh generator is built on: the
//! perpendicular of a direction, the signed turn angle between two
//! directions, and a rotation helper expressed in that angle's sign
//! convention.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod utils;

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Point3D<f32>`.
///
/// Mesh consumers usually want 3D positions; the tessellator extrudes its
/// 2D output to a fixed z through this type.
pub type Point3 = euclid::default::Point3D<f32>;

/// Alias for `euclid::default::Size2D<f32>`.
pub type Size = euclid::default::Size2D<f32>;

/// Alias for `euclid::default::Box2D<f32>`.
pub type Box2D = euclid::default::Box2D<f32>;

/// Alias for `euclid::default::Transform2D<f32>`.
pub type Transform = euclid::default::Transform2D<f32>;

/// Alias for `euclid::default::Rotation2D<f32>`.
pub type Rotation = euclid::default::Rotation2D<f32>;

/// An angle in radians (f32).
pub type Angle = euclid::Angle<f32>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Point3::new(x, y, z)`.
#[inline]
pub fn point3(x: f32, y: f32, z: f32) -> Point3 {
    Point3::new(x, y, z)
}

/// Shorthand for `Size::new(w, h)`.
#[inline]
pub fn size(w: f32, h: f32) -> Size {
    Size::new(w, h)
}
