//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! In order to flexibly and efficiently build geometry of various flavors,
//! this module contains a number of builder interfaces centered around the
//! idea of building vertex and index buffers without the tessellator having
//! to know about the final vertex and index types.
//!
//! See:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html)
//! * [`RibbonGeometryBuilder`](trait.RibbonGeometryBuilder.html)
//!
//! The traits above are what the tessellator interfaces with. It is very
//! common to push vertices and indices into a set of vectors, so to
//! facilitate this pattern this module also provides:
//!
//! * The struct [`MeshBuffers`](struct.MeshBuffers.html): the vertex,
//!   index and per-vertex color buffers of one mesh (generic over the
//!   vertex and index types).
//! * The struct [`BuffersBuilder`](struct.BuffersBuilder.html) which writes
//!   into a [`MeshBuffers`](struct.MeshBuffers.html) and implements the
//!   geometry builder traits. It takes care of filling the buffers while
//!   producing vertices is delegated to a vertex constructor.
//! * The trait [`RibbonVertexConstructor`](trait.RibbonVertexConstructor.html)
//!   in order to generate any vertex type from the tessellator's
//!   [`RibbonVertex`](../struct.RibbonVertex.html) view. The provided
//!   [`Positions`](struct.Positions.html) constructor keeps the plain 2D
//!   position, [`Extruded`](struct.Extruded.html) lifts it to a 3D position
//!   at a fixed z, which is what mesh renderers usually consume.
//!
//! While this module is designed to facilitate the generation of vertex
//! and index buffers, nothing prevents a `GeometryBuilder` implementation
//! from writing into a completely different format.

pub use crate::error::GeometryBuilderError;
use crate::geom::{point3, Point, Point3};
use crate::{Index, Rgba8, RibbonVertex, VertexId};

use alloc::vec::Vec;
use core::convert::From;
use core::ops::Add;

/// An interface separating the tessellator from the actual vertex
/// assembly.
///
/// Depending on what a geometry builder interfaces with, it also has to
/// implement [`RibbonGeometryBuilder`](trait.RibbonGeometryBuilder.html),
/// which contains the hook to generate vertices.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Insert a triangle made of vertices that were added after the last
    /// call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// abort_geometry is called instead of end_geometry if an error
    /// occurred while producing the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was
    /// generated since the last time begin_geometry was called, and to
    /// remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A geometry builder to interface with the
/// [`RibbonTessellator`](../struct.RibbonTessellator.html).
///
/// Types implementing this trait must also implement the
/// [`GeometryBuilder`](trait.GeometryBuilder.html) trait.
pub trait RibbonGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex, providing its position, color and normal.
    /// Returns a vertex id that is only valid between begin_geometry and
    /// end_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_ribbon_vertex(&mut self, vertex: RibbonVertex)
        -> Result<VertexId, GeometryBuilderError>;
}

/// Structure that holds the vertex, index and color data of one mesh.
///
/// The three buffers are parallel: `colors[i]` is the color of
/// `vertices[i]`, and `indices` holds consistently wound triangles as index
/// triples. Usually written into through temporary `BuffersBuilder`
/// objects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MeshBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
    pub colors: Vec<Rgba8>,
}

impl<OutputVertex, OutputIndex> MeshBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        MeshBuffers::with_capacity(512, 1024)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        MeshBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
            colors: Vec::with_capacity(num_vertices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without
    /// reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.colors.clear();
    }
}

/// A temporary view on a `MeshBuffers` object which facilitates the
/// population of vertex, index and color data.
///
/// `BuffersBuilder`s record the vertex and index offsets from when they are
/// created so that on error the geometry added since then can be discarded
/// without touching what was built beforehand. Algorithms are built to
/// generate vertex positions without knowledge of the output layout; the
/// `RibbonVertexConstructor` does the translation from the tessellator's
/// [`RibbonVertex`](../struct.RibbonVertex.html) to the `OutputVertex`.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut MeshBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut MeshBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_constructor: ctor,
        }
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a MeshBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A trait specifying how to create vertex values.
pub trait RibbonVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: RibbonVertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the 2D position.
pub struct Positions;

impl RibbonVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: RibbonVertex) -> Point {
        vertex.position()
    }
}

/// A vertex constructor that extrudes the 2D position to a fixed z.
pub struct Extruded(pub f32);

impl RibbonVertexConstructor<Point3> for Extruded {
    fn new_vertex(&mut self, vertex: RibbonVertex) -> Point3 {
        let p = vertex.position();
        point3(p.x, p.y, self.0)
    }
}

impl<F, OutputVertex> RibbonVertexConstructor<OutputVertex> for F
where
    F: Fn(RibbonVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: RibbonVertex) -> OutputVertex {
        self(vertex)
    }
}

/// A `BuffersBuilder` that outputs 3D positions at z = 0 with u32 indices.
pub type SimpleBuffersBuilder<'l> = BuffersBuilder<'l, Point3, u32, Extruded>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder(buffers: &mut MeshBuffers<Point3, u32>) -> SimpleBuffersBuilder {
    BuffersBuilder::new(buffers, Extruded(0.0))
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push(a.into());
        self.buffers.indices.push(b.into());
        self.buffers.indices.push(c.into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.colors.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> RibbonGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: RibbonVertexConstructor<OutputVertex>,
{
    fn add_ribbon_vertex(&mut self, v: RibbonVertex) -> Result<VertexId, GeometryBuilderError> {
        let color = v.color();
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(v));
        self.buffers.colors.push(color);
        let len = self.buffers.vertices.len();
        if len > OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        Ok(VertexId((len - 1) as Index))
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
#[derive(Default)]
pub struct NoOutput {
    next_vertex: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { next_vertex: 0 }
    }
}

impl GeometryBuilder for NoOutput {
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
    }
}

impl RibbonGeometryBuilder for NoOutput {
    fn add_ribbon_vertex(&mut self, _: RibbonVertex) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up to
/// `u32::MAX` because the tessellator can't internally represent more than
/// `u32::MAX` indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
// The tessellator internally uses u32 indices so we can't have more than u32::MAX.
impl MaxIndex for u64 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}
