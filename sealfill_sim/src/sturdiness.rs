// Face sturdiness analysis.
//
// Answers whether a voxel's collision shape fully covers one face of its
// cell. A covered ("sturdy") face stops the fill; anything less lets it
// through.
//
// Two checks, both pure:
// - `is_face_covering(bounds, axis)`: does the box span the full unit square
//   on the plane perpendicular to `axis`? Used on a shape's whole envelope
//   (`is_side_solid`, a coarse "could this axis be blocked at all" test) and
//   on individual face rectangles.
// - `is_face_sturdy(shape, direction)`: takes the shape's face projection and
//   tests the first rectangle for full coverage. A shape that presents nothing
//   on the face counts as sturdy, so a bottom slab seals its top as well as
//   its bottom.
//
// ## Single-rectangle approximation
//
// Only the first rectangle of a face projection is tested. A face covered
// jointly by several boxes (e.g. the back of a stair block, two half-height
// boxes) is reported as not sturdy even though the union seals it, so fills
// leak through such faces. Exact union coverage is not computed.
//
// See also: `shape.rs` for `Bounds`/`SolidShape` and the face projection,
// `seal.rs` for the predicate that combines these checks.

use crate::shape::{Bounds, SolidShape};
use crate::types::{Axis, FaceDirection};

/// Whether `bounds` spans the whole [0, 1] x [0, 1] square on the plane
/// perpendicular to `axis`.
pub fn is_face_covering(bounds: &Bounds, axis: Axis) -> bool {
    let (a, b) = axis.perpendicular();
    bounds.min_on(a) <= 0.0
        && bounds.max_on(a) >= 1.0
        && bounds.min_on(b) <= 0.0
        && bounds.max_on(b) >= 1.0
}

/// Coarse check: could the shape block anything along `axis`? False for
/// an empty shape.
pub fn is_side_solid(shape: &SolidShape, axis: Axis) -> bool {
    shape
        .bounds()
        .is_some_and(|bounds| is_face_covering(&bounds, axis))
}

/// Whether the face of `shape` pointing in `direction` is fully covered.
///
/// An empty projection is sturdy. Otherwise only the first projected
/// rectangle is tested (see module docs). Callers that need empty shapes to
/// pass must check `SolidShape::is_empty` first.
pub fn is_face_sturdy(shape: &SolidShape, direction: FaceDirection) -> bool {
    match shape.face_shape(direction).next() {
        None => true,
        Some(first) => is_face_covering(&first, direction.axis()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab_bottom() -> SolidShape {
        SolidShape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])
    }

    fn stairs_facing_south() -> SolidShape {
        SolidShape::from_boxes([
            Bounds::new([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]),
            Bounds::new([0.0, 0.5, 0.5], [1.0, 1.0, 1.0]),
        ])
    }

    #[test]
    fn empty_shape_is_never_side_solid() {
        let shape = SolidShape::empty();
        for dir in FaceDirection::ALL {
            assert!(!is_side_solid(&shape, dir.axis()), "{dir:?}");
            // No projection at all reads as sturdy; `full_seal` short-circuits
            // empty shapes before asking.
            assert!(is_face_sturdy(&shape, dir), "{dir:?}");
        }
    }

    #[test]
    fn full_cube_is_sturdy_everywhere() {
        let shape = SolidShape::full_cube();
        for dir in FaceDirection::ALL {
            assert!(is_face_sturdy(&shape, dir), "{dir:?}");
            assert!(is_side_solid(&shape, dir.axis()), "{dir:?}");
        }
    }

    #[test]
    fn unit_bounds_cover_every_axis() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert!(is_face_covering(&Bounds::UNIT, axis));
        }
    }

    #[test]
    fn covering_ignores_the_axis_itself() {
        // A thin plate perpendicular to Y covers the Y face but not X or Z.
        let plate = Bounds::new([0.0, 0.4, 0.0], [1.0, 0.6, 1.0]);
        assert!(is_face_covering(&plate, Axis::Y));
        assert!(!is_face_covering(&plate, Axis::X));
        assert!(!is_face_covering(&plate, Axis::Z));
    }

    #[test]
    fn oversized_bounds_still_cover() {
        let tall = Bounds::new([-0.5, 0.0, -0.5], [1.5, 1.5, 1.5]);
        assert!(is_face_covering(&tall, Axis::Y));
        assert!(is_face_covering(&tall, Axis::X));
    }

    #[test]
    fn slab_is_sturdy_top_and_bottom_only() {
        let slab = slab_bottom();
        assert!(is_face_sturdy(&slab, FaceDirection::Down));
        // Nothing reaches the top face, so the projection is empty.
        assert_eq!(slab.face_shape(FaceDirection::Up).count(), 0);
        assert!(is_face_sturdy(&slab, FaceDirection::Up));
        for dir in [
            FaceDirection::North,
            FaceDirection::South,
            FaceDirection::West,
            FaceDirection::East,
        ] {
            assert!(!is_face_sturdy(&slab, dir), "{dir:?}");
        }
    }

    #[test]
    fn slab_envelope_is_side_solid_on_y_only() {
        let slab = slab_bottom();
        assert!(is_side_solid(&slab, Axis::Y));
        assert!(!is_side_solid(&slab, Axis::X));
        assert!(!is_side_solid(&slab, Axis::Z));
    }

    #[test]
    fn centered_post_caps_are_not_sturdy() {
        let post = SolidShape::cuboid([0.375, 0.0, 0.375], [0.625, 1.0, 0.625]);
        assert!(!is_face_sturdy(&post, FaceDirection::Up));
        assert!(!is_face_sturdy(&post, FaceDirection::Down));
        // The sides present nothing, but the envelope never covers them.
        for dir in [FaceDirection::North, FaceDirection::West] {
            assert!(is_face_sturdy(&post, dir), "{dir:?}");
            assert!(!is_side_solid(&post, dir.axis()), "{dir:?}");
        }
    }

    #[test]
    fn top_slab_bottom_face_is_sturdy() {
        let top = SolidShape::cuboid([0.0, 0.5, 0.0], [1.0, 1.0, 1.0]);
        assert_eq!(top.face_shape(FaceDirection::Down).count(), 0);
        assert!(is_side_solid(&top, Axis::Y));
        assert!(is_face_sturdy(&top, FaceDirection::Down));
        assert!(is_face_sturdy(&top, FaceDirection::Up));
        assert!(!is_face_sturdy(&top, FaceDirection::East));
    }

    #[test]
    fn jointly_covered_face_is_not_sturdy() {
        // The south face of these stairs is sealed by two half-height boxes
        // together. Only the first is tested, so the face reads as open.
        let stairs = stairs_facing_south();
        assert!(!is_face_sturdy(&stairs, FaceDirection::South));
        // The envelope covers everything.
        assert!(is_side_solid(&stairs, Axis::Z));
    }

    #[test]
    fn stairs_bottom_is_sturdy() {
        let stairs = stairs_facing_south();
        assert!(is_face_sturdy(&stairs, FaceDirection::Down));
        // Side faces are L-shaped; the first box only reaches half height.
        assert!(!is_face_sturdy(&stairs, FaceDirection::West));
        assert!(!is_face_sturdy(&stairs, FaceDirection::North));
    }

    #[test]
    fn first_rectangle_decides_even_when_a_later_one_covers() {
        let shape = SolidShape::from_boxes([
            Bounds::new([0.0, 0.0, 0.9], [0.5, 1.0, 1.0]),
            Bounds::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        ]);
        assert!(!is_face_sturdy(&shape, FaceDirection::South));
        let reordered = SolidShape::from_boxes(shape.boxes().iter().rev().copied());
        assert!(is_face_sturdy(&reordered, FaceDirection::South));
    }
}
