use crate::debugger::RibbonObserver;
use crate::geom::utils::{rotate_toward_turn, signed_turn_angle, tangent};
use crate::geom::{Angle, Point, Vector};
use crate::stroke::{Stroke, StrokePoint};
use crate::tail::{compute_tail, TailRange};
use crate::{
    Rgba8, RibbonGeometryBuilder, RibbonOptions, Side, TessellationError, TessellationResult,
    VertexId,
};

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Tapered tail half-widths bottom out at this fraction of the configured
/// half-width, so the free end stays a sliver instead of a point.
const TAIL_WIDTH_FLOOR: f32 = 0.005;

/// A context object that can tessellate ribbon meshes for freehand strokes.
///
/// ## Overview
///
/// The tessellation algorithm simply generates a strip of triangles along
/// the stroke's polyline: every point contributes a pair of vertices
/// extruded along the local normal, consecutive pairs are bridged with
/// quads, and interior points whose turn exceeds the corner threshold are
/// rounded with a triangle fan around a hub vertex at the point itself.
/// This method is fast and simple, but if the stroke overlaps itself the
/// triangles overlap in the intersecting region, which may not be the
/// desired behavior. This needs to be kept in mind when
/// rendering semi-transparent strokes.
///
/// Strokes that end faster than the tail velocity threshold get a tapering
/// tail: the half-width shrinks linearly over the trailing time span found
/// by [`compute_tail`](fn.compute_tail.html), faking a pen lift.
///
/// The tessellator takes an ordered slice of time-stamped points as input
/// and produces its output through a
/// [`RibbonGeometryBuilder`](geometry_builder/trait.RibbonGeometryBuilder.html).
/// Every pass rebuilds the mesh for the whole point list; passes over
/// fewer than two points are no-ops.
///
/// # Examples
///
/// ```
/// # use scribble_tessellation::{RibbonTessellator, RibbonOptions};
/// # use scribble_tessellation::geometry_builder::{simple_builder, MeshBuffers};
/// # use scribble_tessellation::stroke::StrokePoint;
/// # use scribble_tessellation::geom::{point, Point3};
/// # fn main() {
/// // A short stroke sampled at 60 Hz.
/// let points = [
///     StrokePoint::new(point(0.0, 0.0), 0.0),
///     StrokePoint::new(point(1.0, 0.0), 0.016),
///     StrokePoint::new(point(2.0, 0.5), 0.033),
/// ];
///
/// // Create the destination vertex, index and color buffers.
/// let mut buffers: MeshBuffers<Point3, u32> = MeshBuffers::new();
///
/// {
///     let mut vertex_builder = simple_builder(&mut buffers);
///
///     // Create the tessellator.
///     let mut tessellator = RibbonTessellator::new();
///
///     // Compute the tessellation.
///     tessellator
///         .tessellate(&points, &RibbonOptions::default(), &mut vertex_builder)
///         .unwrap();
/// }
///
/// println!("The generated vertices are: {:?}.", &buffers.vertices[..]);
/// println!("The generated indices are: {:?}.", &buffers.indices[..]);
/// # }
/// ```
#[derive(Default)]
pub struct RibbonTessellator {}

impl RibbonTessellator {
    pub fn new() -> Self {
        RibbonTessellator {}
    }

    /// Compute the tessellation of one stroke's point list.
    pub fn tessellate(
        &mut self,
        points: &[StrokePoint],
        options: &RibbonOptions,
        output: &mut dyn RibbonGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate_with_observer(points, options, &mut (), output)
    }

    /// Compute the tessellation of a [`Stroke`].
    pub fn tessellate_stroke(
        &mut self,
        stroke: &Stroke,
        options: &RibbonOptions,
        output: &mut dyn RibbonGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate(stroke.points(), options, output)
    }

    /// Like [`tessellate`](Self::tessellate), additionally reporting
    /// emitted vertices and tail measurements to `observer`.
    pub fn tessellate_with_observer(
        &mut self,
        points: &[StrokePoint],
        options: &RibbonOptions,
        observer: &mut dyn RibbonObserver,
        output: &mut dyn RibbonGeometryBuilder,
    ) -> TessellationResult {
        if points.len() < 2 {
            // Not enough information for a single joint: an explicit no-op.
            output.begin_geometry();
            output.end_geometry();
            return Ok(());
        }

        let tail = compute_tail(points, options.tail_velocity_threshold, observer);

        RibbonBuilderImpl::new(options, tail, observer, output).tessellate(points)
    }
}

/// A builder that tessellates one ribbon without any intermediate data
/// structure.
///
/// All build state lives here for the duration of one pass; nothing is
/// retained across passes.
struct RibbonBuilderImpl<'l> {
    options: RibbonOptions,
    tail: TailRange,
    /// Vertex pair (negative side, positive side) of the joint emitted
    /// last, bridged to the next pair with a quad.
    previous_pair: Option<(VertexId, VertexId)>,
    vertex: RibbonVertexData,
    observer: &'l mut dyn RibbonObserver,
    output: &'l mut dyn RibbonGeometryBuilder,
}

impl<'l> RibbonBuilderImpl<'l> {
    fn new(
        options: &RibbonOptions,
        tail: TailRange,
        observer: &'l mut dyn RibbonObserver,
        output: &'l mut dyn RibbonGeometryBuilder,
    ) -> Self {
        output.begin_geometry();

        RibbonBuilderImpl {
            options: *options,
            tail,
            previous_pair: None,
            vertex: RibbonVertexData {
                position_on_path: Point::origin(),
                normal: Vector::zero(),
                half_width: options.half_width,
                side: Side::Positive,
                color: options.color,
                time: 0.0,
            },
            observer,
            output,
        }
    }

    fn tessellate(mut self, points: &[StrokePoint]) -> TessellationResult {
        match self.emit_points(points) {
            Ok(()) => {
                self.output.end_geometry();
                Ok(())
            }
            Err(e) => {
                self.output.abort_geometry();
                Err(e)
            }
        }
    }

    fn emit_points(&mut self, points: &[StrokePoint]) -> Result<(), TessellationError> {
        let last = points.len() - 1;

        for i in 0..=last {
            let p = points[i];
            let half_width = self.local_half_width(points, i);

            if i < last {
                let dir = points[i + 1].position - p.position;

                if i > 0 {
                    let prev_dir = p.position - points[i - 1].position;
                    let turn = signed_turn_angle(prev_dir, dir);
                    if turn.radians.abs() > self.options.corner_angle_threshold.radians {
                        self.emit_corner(p, normal_of(prev_dir), turn, half_width)?;
                        continue;
                    }
                }

                self.emit_joint(p, normal_of(dir), half_width)?;
            } else {
                // The terminal joint: its bridge quad caps the stroke's
                // end edge.
                let dir = p.position - points[i - 1].position;
                self.emit_joint(p, normal_of(dir), half_width)?;
            }
        }

        Ok(())
    }

    /// Half-width at point `index`, shrunk linearly over the tail's time
    /// span when the point falls within the tail region.
    fn local_half_width(&self, points: &[StrokePoint], index: usize) -> f32 {
        if !self.tail.contains(index) {
            return self.options.half_width;
        }

        let portion = (points[index].time - points[self.tail.start].time) / self.tail.duration;
        let tapered = self.options.half_width * (1.0 - portion);

        tapered
            .max(self.options.half_width * TAIL_WIDTH_FLOOR)
            .min(self.options.half_width)
    }

    /// Emits the two offset vertices of a straight joint and bridges them
    /// to the previous joint.
    fn emit_joint(
        &mut self,
        point: StrokePoint,
        normal: Vector,
        half_width: f32,
    ) -> Result<(), TessellationError> {
        let minus = self.add_vertex(point, -normal, half_width, Side::Negative)?;
        let plus = self.add_vertex(point, normal, half_width, Side::Positive)?;

        self.bridge_to_previous(minus, plus);
        self.previous_pair = Some((minus, plus));

        Ok(())
    }

    /// Emits a rounded corner at `point`.
    ///
    /// The fan pivots on a zero-radius hub vertex at the point itself. Its
    /// rim starts at the entering pair's outer vertex, passes through one
    /// rim vertex per whole `360°/subdivisions` step of the turn, and
    /// closes on the exiting pair's outer vertex, which clips the final
    /// step to the exact remaining angle. One extra triangle covers the
    /// notch between the entering and exiting inner vertices.
    fn emit_corner(
        &mut self,
        point: StrokePoint,
        entering_normal: Vector,
        turn: Angle,
        half_width: f32,
    ) -> Result<(), TessellationError> {
        let outer_side = if turn.radians > 0.0 {
            Side::Positive
        } else {
            Side::Negative
        };
        let outer_sign = outer_side.to_f32();

        let enter_minus = self.add_vertex(point, -entering_normal, half_width, Side::Negative)?;
        let enter_plus = self.add_vertex(point, entering_normal, half_width, Side::Positive)?;
        self.bridge_to_previous(enter_minus, enter_plus);

        let hub = self.add_vertex(point, Vector::zero(), half_width, outer_side)?;

        let (enter_outer, enter_inner) = match outer_side {
            Side::Positive => (enter_plus, enter_minus),
            Side::Negative => (enter_minus, enter_plus),
        };

        let step = Angle::radians(2.0 * PI / self.options.corner_subdivisions as f32);
        let steps = (turn.radians.abs() / step.radians).ceil().max(1.0) as u32;
        let signed_step = Angle::radians(step.radians * turn.radians.signum());

        // Interior rim vertices sit at whole multiples of the step,
        // strictly inside the turn.
        let mut previous_rim = enter_outer;
        for k in 1..steps {
            let rim_normal = rotate_toward_turn(entering_normal, signed_step * k as f32);
            let rim = self.add_vertex(point, rim_normal * outer_sign, half_width, outer_side)?;
            self.add_fan_triangle(hub, previous_rim, rim, outer_side);
            previous_rim = rim;
        }

        let exiting_normal = rotate_toward_turn(entering_normal, turn);
        let exit_minus = self.add_vertex(point, -exiting_normal, half_width, Side::Negative)?;
        let exit_plus = self.add_vertex(point, exiting_normal, half_width, Side::Positive)?;

        let (exit_outer, exit_inner) = match outer_side {
            Side::Positive => (exit_plus, exit_minus),
            Side::Negative => (exit_minus, exit_plus),
        };

        // The final, clipped step closes the fan on the exiting pair.
        self.add_fan_triangle(hub, previous_rim, exit_outer, outer_side);
        self.add_fan_triangle(hub, enter_inner, exit_inner, outer_side);

        self.previous_pair = Some((exit_minus, exit_plus));

        Ok(())
    }

    /// Bridges the previous joint's vertex pair to the given one with a
    /// two-triangle quad, if a previous joint exists.
    fn bridge_to_previous(&mut self, minus: VertexId, plus: VertexId) {
        if let Some((previous_minus, previous_plus)) = self.previous_pair {
            self.output.add_triangle(previous_minus, previous_plus, plus);
            self.output.add_triangle(plus, minus, previous_minus);
        }
    }

    /// Emits `(a, b, c)` with the vertex order flipped on counter-clockwise
    /// turns, so fans on either side of the spine share the strip's
    /// winding.
    fn add_fan_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId, outer_side: Side) {
        match outer_side {
            Side::Positive => self.output.add_triangle(a, b, c),
            Side::Negative => self.output.add_triangle(a, c, b),
        }
    }

    fn add_vertex(
        &mut self,
        point: StrokePoint,
        normal: Vector,
        half_width: f32,
        side: Side,
    ) -> Result<VertexId, TessellationError> {
        self.vertex = RibbonVertexData {
            position_on_path: point.position,
            normal,
            half_width,
            side,
            color: self.options.color,
            time: point.time,
        };

        let id = self.output.add_ribbon_vertex(RibbonVertex(&self.vertex))?;
        self.observer.vertex(self.vertex.position());

        Ok(id)
    }
}

/// Unit normal of a segment direction.
///
/// A zero-length segment yields a zero normal: the joint's vertex pair
/// collapses onto the spine and the bridge quad degenerates to zero area
/// instead of poisoning the mesh with NaNs.
fn normal_of(dir: Vector) -> Vector {
    tangent(dir).try_normalize().unwrap_or_else(Vector::zero)
}

/// Per-vertex information produced by the tessellator.
pub(crate) struct RibbonVertexData {
    pub(crate) position_on_path: Point,
    pub(crate) normal: Vector,
    pub(crate) half_width: f32,
    pub(crate) side: Side,
    pub(crate) color: Rgba8,
    pub(crate) time: f32,
}

impl RibbonVertexData {
    fn position(&self) -> Point {
        self.position_on_path + self.normal * self.half_width
    }
}

/// Extra vertex information from the `RibbonTessellator`, accessible when
/// building vertices.
pub struct RibbonVertex<'l>(pub(crate) &'l RibbonVertexData);

impl<'l> RibbonVertex<'l> {
    /// The vertex position.
    #[inline]
    pub fn position(&self) -> Point {
        self.0.position()
    }

    /// Position of this vertex on the stroke's spine, unaffected by the
    /// ribbon's width.
    #[inline]
    pub fn position_on_path(&self) -> Point {
        self.0.position_on_path
    }

    /// Signed unit normal this vertex was extruded along. Zero for corner
    /// hub vertices.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.0.normal
    }

    /// Local half-width, after tail tapering.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.0.half_width
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.0.half_width * 2.0
    }

    /// Whether the vertex is on the positive or negative side of the spine.
    #[inline]
    pub fn side(&self) -> Side {
        self.0.side
    }

    /// The build's uniform vertex color.
    #[inline]
    pub fn color(&self) -> Rgba8 {
        self.0.color
    }

    /// Timestamp of the stroke point this vertex belongs to.
    #[inline]
    pub fn time(&self) -> f32 {
        self.0.time
    }
}

#[cfg(test)]
use crate::geometry_builder::*;
#[cfg(test)]
use crate::geom::{point, Point3};

#[cfg(test)]
fn sample(x: f32, y: f32, time: f32) -> StrokePoint {
    StrokePoint::new(point(x, y), time)
}

#[cfg(test)]
fn test_points(
    points: &[StrokePoint],
    options: &RibbonOptions,
    expected_counts: Option<(usize, usize)>,
) -> MeshBuffers<Point3, u32> {
    struct TestBuilder<'l> {
        builder: SimpleBuffersBuilder<'l>,
    }

    impl<'l> GeometryBuilder for TestBuilder<'l> {
        fn begin_geometry(&mut self) {
            self.builder.begin_geometry();
        }
        fn end_geometry(&mut self) {
            self.builder.end_geometry();
        }
        fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
            assert!(a != b);
            assert!(a != c);
            assert!(b != c);
            let pa = self.builder.buffers().vertices[a.0 as usize];
            let pb = self.builder.buffers().vertices[b.0 as usize];
            let pc = self.builder.buffers().vertices[c.0 as usize];
            // Every triangle must wind clockwise (y up). The threshold
            // absorbs floating point errors.
            let threshold = 0.035;
            let cross = (pb.x - pa.x) * (pc.y - pa.y) - (pb.y - pa.y) * (pc.x - pa.x);
            assert!(cross <= threshold, "ccw triangle, cross = {}", cross);
            self.builder.add_triangle(a, b, c);
        }
        fn abort_geometry(&mut self) {
            panic!();
        }
    }

    impl<'l> RibbonGeometryBuilder for TestBuilder<'l> {
        fn add_ribbon_vertex(
            &mut self,
            vertex: RibbonVertex,
        ) -> Result<VertexId, GeometryBuilderError> {
            assert!(!vertex.position().x.is_nan());
            assert!(!vertex.position().y.is_nan());
            assert!(!vertex.normal().x.is_nan());
            assert!(!vertex.normal().y.is_nan());
            assert!(vertex.half_width() > 0.0);
            self.builder.add_ribbon_vertex(vertex)
        }
    }

    let mut buffers: MeshBuffers<Point3, u32> = MeshBuffers::new();

    let mut tess = RibbonTessellator::new();
    tess.tessellate(
        points,
        options,
        &mut TestBuilder {
            builder: simple_builder(&mut buffers),
        },
    )
    .unwrap();

    assert_eq!(buffers.colors.len(), buffers.vertices.len());
    assert_eq!(buffers.indices.len() % 3, 0);

    if let Some((vertices, triangles)) = expected_counts {
        assert_eq!(buffers.vertices.len(), vertices, "unexpected vertex count");
        assert_eq!(
            buffers.indices.len(),
            triangles * 3,
            "unexpected triangle count"
        );
    }

    buffers
}

#[cfg(test)]
fn assert_point3_eq(actual: Point3, x: f32, y: f32) {
    use approx::assert_relative_eq;
    assert_relative_eq!(actual.x, x, epsilon = 1e-5);
    assert_relative_eq!(actual.y, y, epsilon = 1e-5);
    assert_relative_eq!(actual.z, 0.0, epsilon = 1e-5);
}

#[test]
fn no_output_below_two_points() {
    test_points(&[], &RibbonOptions::default(), Some((0, 0)));
    test_points(
        &[sample(1.0, 2.0, 0.0)],
        &RibbonOptions::default(),
        Some((0, 0)),
    );
}

#[test]
fn straight_stroke_counts() {
    // 2n vertices and 2(n-1) triangles for turn-free strokes.
    let options = RibbonOptions::default();
    test_points(
        &[sample(0.0, 0.0, 0.0), sample(1.0, 0.0, 0.1)],
        &options,
        Some((4, 2)),
    );
    test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(2.0, 0.0, 0.2),
        ],
        &options,
        Some((6, 4)),
    );
    test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(2.0, 0.0, 0.2),
            sample(3.0, 0.2, 0.3),
            sample(4.0, 0.2, 0.4),
            sample(5.0, 0.0, 0.5),
        ],
        &options,
        Some((12, 10)),
    );
}

#[test]
fn straight_stroke_positions() {
    let buffers = test_points(
        &[sample(0.0, 0.0, 0.0), sample(1.0, 0.0, 0.1)],
        &RibbonOptions::default(),
        Some((4, 2)),
    );

    assert_point3_eq(buffers.vertices[0], 0.0, -0.2);
    assert_point3_eq(buffers.vertices[1], 0.0, 0.2);
    assert_point3_eq(buffers.vertices[2], 1.0, -0.2);
    assert_point3_eq(buffers.vertices[3], 1.0, 0.2);
}

#[test]
fn right_angle_corner_fan() {
    // A 90° clockwise turn at four subdivisions: one 90° step, so the fan
    // is a single wedge between rotations 0° and 90° from the entering
    // normal, plus the inner closing triangle.
    let options = RibbonOptions::default().with_corner_subdivisions(4);
    let buffers = test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(1.0, -1.0, 0.2),
        ],
        &options,
        // 2 (first pair) + 2 (entering) + 1 (hub) + 2 (exiting) + 2 (last)
        // vertices; 2 + 2 + 2 bridge/fan/bridge triangles.
        Some((9, 6)),
    );

    // Entering pair at rotation 0°.
    assert_point3_eq(buffers.vertices[2], 1.0, -0.2);
    assert_point3_eq(buffers.vertices[3], 1.0, 0.2);
    // The hub sits on the point itself.
    assert_point3_eq(buffers.vertices[4], 1.0, 0.0);
    // Exiting pair at rotation 90°.
    assert_point3_eq(buffers.vertices[5], 0.8, 0.0);
    assert_point3_eq(buffers.vertices[6], 1.2, 0.0);
}

#[test]
fn left_turn_mirrors_right_turn() {
    let options = RibbonOptions::default().with_corner_subdivisions(4);
    let buffers = test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(1.0, 1.0, 0.2),
        ],
        &options,
        Some((9, 6)),
    );

    // The fan bulges on the outside of the turn: the exiting outer vertex
    // is on the right-hand (negative) side of the travel direction.
    assert_point3_eq(buffers.vertices[4], 1.0, 0.0);
    assert_point3_eq(buffers.vertices[5], 1.2, 0.0);
    assert_point3_eq(buffers.vertices[6], 0.8, 0.0);
}

#[test]
fn corner_fan_scales_with_subdivisions() {
    let corner = [
        sample(0.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.1),
        sample(1.0, -1.0, 0.2),
    ];

    // 64 subdivisions: 90° / 5.625° = 16 whole steps, 15 interior rim
    // vertices, 17 fan triangles.
    let options = RibbonOptions::default();
    test_points(&corner, &options, Some((24, 21)));

    // 8 subdivisions: two 45° steps, one interior rim vertex.
    let options = RibbonOptions::default().with_corner_subdivisions(8);
    test_points(&corner, &options, Some((10, 7)));
}

#[test]
fn clipped_final_step() {
    // A 135° turn at 8 subdivisions covers three 45° steps, the last one
    // clipped to the full angle by the exiting pair.
    let options = RibbonOptions::default().with_corner_subdivisions(8);
    test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(0.0, -1.0, 0.2),
        ],
        &options,
        // 2 + 2 + 1 + 2 (interior rims) + 2 + 2 vertices;
        // 2 + (3 + 1) + 2 triangles.
        Some((11, 8)),
    );
}

#[test]
fn winding_is_consistent_across_turns() {
    // Corners in both rotational senses; the test builder asserts every
    // triangle winds clockwise.
    let options = RibbonOptions::default().with_corner_subdivisions(6);
    test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(1.0, -1.0, 0.2),
            sample(2.0, -1.0, 0.3),
            sample(2.0, 0.0, 0.4),
            sample(3.0, 0.0, 0.5),
        ],
        &options,
        // Four corners of 6 vertices each between the end pairs; five
        // bridge quads and four 3-triangle fans.
        Some((28, 22)),
    );
}

#[test]
fn degenerate_zero_length_segment() {
    // Consecutive identical points are filtered upstream, but if they do
    // reach the tessellator the result is a zero-area quad, not a crash.
    test_points(
        &[sample(0.0, 0.0, 0.0), sample(0.0, 0.0, 0.1)],
        &RibbonOptions::default(),
        Some((4, 2)),
    );
}

#[test]
fn deterministic_rebuild() {
    let points = [
        sample(0.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.1),
        sample(1.0, -1.0, 0.2),
        sample(2.5, -1.0, 0.3),
    ];
    let options = RibbonOptions::default();

    let first = test_points(&points, &options, None);
    let second = test_points(&points, &options, None);

    assert_eq!(first, second);
}

#[test]
fn tail_taper_shrinks_half_width() {
    // Accelerating straight stroke: the tail covers [1, n) and the
    // half-width shrinks linearly in time down to the floor.
    let points = [
        sample(0.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.1),
        sample(2.5, 0.0, 0.2),
        sample(4.5, 0.0, 0.3),
        sample(7.0, 0.0, 0.4),
        sample(10.0, 0.0, 0.5),
    ];
    let buffers = test_points(&points, &RibbonOptions::default(), Some((12, 10)));

    // The positive-side vertex of each pair sits half_width above the
    // spine.
    let half_widths: std::vec::Vec<f32> =
        (0..6).map(|i| buffers.vertices[2 * i + 1].y).collect();

    // The tail starts at index 1 with the full width (its time portion is
    // zero there) and shrinks strictly from then on.
    assert!((half_widths[0] - 0.2).abs() < 1e-6);
    assert!((half_widths[1] - 0.2).abs() < 1e-6);
    for i in 2..6 {
        assert!(
            half_widths[i] < half_widths[i - 1],
            "tail half-widths must decrease: {:?}",
            half_widths
        );
    }
    // The free end bottoms out at 0.5% of the configured half-width.
    assert!((half_widths[5] - 0.001).abs() < 1e-6);
}

#[test]
fn uniform_vertex_colors() {
    let options = RibbonOptions::default().with_color(Rgba8::RED);
    let buffers = test_points(
        &[
            sample(0.0, 0.0, 0.0),
            sample(1.0, 0.0, 0.1),
            sample(2.0, 0.0, 0.2),
        ],
        &options,
        Some((6, 4)),
    );

    assert!(buffers.colors.iter().all(|&c| c == Rgba8::RED));
}

#[test]
fn observer_collects_deduplicated_vertices() {
    use crate::debugger::DebugTrace;

    let points = [
        sample(0.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.1),
        sample(1.0, -1.0, 0.2),
    ];
    let options = RibbonOptions::default().with_corner_subdivisions(4);

    let mut trace = DebugTrace::new();
    let mut tess = RibbonTessellator::new();
    let mut output = NoOutput::new();

    tess.tessellate_with_observer(&points, &options, &mut trace, &mut output)
        .unwrap();
    let first_pass = trace.positions().len();
    assert_eq!(first_pass, 9);

    // A rebuild revisits the same positions; the trace stays deduplicated.
    tess.tessellate_with_observer(&points, &options, &mut trace, &mut output)
        .unwrap();
    assert_eq!(trace.positions().len(), first_pass);
}

#[test]
fn too_many_vertices() {
    // The tessellator surfaces the builder running out of vertex ids.
    struct Builder {
        max_vertices: u32,
    }

    impl GeometryBuilder for Builder {
        fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
            assert!(a != b);
            assert!(a != c);
            assert!(b != c);
        }
        fn end_geometry(&mut self) {
            // Expected to abort the geometry.
            panic!();
        }
    }

    impl RibbonGeometryBuilder for Builder {
        fn add_ribbon_vertex(&mut self, _: RibbonVertex) -> Result<VertexId, GeometryBuilderError> {
            if self.max_vertices == 0 {
                return Err(GeometryBuilderError::TooManyVertices);
            }
            self.max_vertices -= 1;
            Ok(VertexId(self.max_vertices))
        }
    }

    let points = [
        sample(0.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.1),
        sample(2.0, 0.0, 0.2),
        sample(3.0, 0.0, 0.3),
    ];

    let mut tess = RibbonTessellator::new();
    assert_eq!(
        tess.tessellate(
            &points,
            &RibbonOptions::default(),
            &mut Builder { max_vertices: 0 },
        ),
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        )),
    );
    assert_eq!(
        tess.tessellate(
            &points,
            &RibbonOptions::default(),
            &mut Builder { max_vertices: 3 },
        ),
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        )),
    );
}
