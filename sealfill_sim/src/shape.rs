// Per-voxel collision geometry.
//
// A `SolidShape` is a union of axis-aligned `Bounds` boxes in the voxel's
// local unit space: [0, 1] on every axis covers the whole cell. Most shapes
// are a single box (full cube, slab, post); a few are several (stairs).
// Boxes are stored inline in a `SmallVec` so cloning a shape out of the
// world does not allocate for the common cases.
//
// `face_shape()` lazily decomposes the shape into the rectangles it presents
// on one face of the cell. Each yielded `Bounds` keeps the source box's
// footprint on the two perpendicular axes and spans the full [0, 1] along the
// face's own axis, so it can be fed straight back into `is_face_covering()`.
//
// See also: `sturdiness.rs` for the coverage tests built on these types,
// `world.rs` for the stock shapes each `VoxelType` maps to.
//
// Shapes are assumed well-formed by construction (min <= max, no NaN).
// Debug builds assert this; release builds do not check.

use crate::types::{Axis, FaceDirection};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tolerance used when deciding whether a box touches a face plane.
pub const FACE_EPSILON: f64 = 1.0e-7;

/// An axis-aligned box in a voxel's local [0, 1] space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    /// The whole unit cell.
    pub const UNIT: Bounds = Bounds {
        min: [0.0, 0.0, 0.0],
        max: [1.0, 1.0, 1.0],
    };

    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        let bounds = Self { min, max };
        debug_assert!(bounds.is_well_formed(), "malformed bounds {bounds:?}");
        bounds
    }

    /// No NaN components and `min <= max` on every axis.
    pub fn is_well_formed(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.max[i])
    }

    pub fn min_on(&self, axis: Axis) -> f64 {
        self.min[axis.index()]
    }

    pub fn max_on(&self, axis: Axis) -> f64 {
        self.max[axis.index()]
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    /// Whether this box reaches the plane of the given face.
    fn touches_face(&self, direction: FaceDirection) -> bool {
        let axis = direction.axis();
        if direction.is_positive() {
            self.max_on(axis) >= 1.0 - FACE_EPSILON
        } else {
            self.min_on(axis) <= FACE_EPSILON
        }
    }

    /// This box's footprint on the given face, extruded to the full cell
    /// depth along the face's axis.
    fn face_footprint(&self, direction: FaceDirection) -> Bounds {
        let i = direction.axis().index();
        let mut footprint = *self;
        footprint.min[i] = 0.0;
        footprint.max[i] = 1.0;
        footprint
    }
}

/// Collision geometry of one voxel: a possibly-empty union of boxes.
///
/// Serializes as a JSON array of `{ "min": [..], "max": [..] }` boxes, so
/// custom shapes can be described in data files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolidShape {
    boxes: SmallVec<[Bounds; 4]>,
}

impl SolidShape {
    /// No collision at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The whole unit cube.
    pub fn full_cube() -> Self {
        Self::cuboid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// A single box.
    pub fn cuboid(min: [f64; 3], max: [f64; 3]) -> Self {
        let mut boxes = SmallVec::new();
        boxes.push(Bounds::new(min, max));
        Self { boxes }
    }

    /// A union of boxes, kept in the given order. Zero-volume boxes are kept;
    /// they still contribute to face footprints.
    pub fn from_boxes<I: IntoIterator<Item = Bounds>>(boxes: I) -> Self {
        let boxes: SmallVec<[Bounds; 4]> = boxes.into_iter().collect();
        debug_assert!(
            boxes.iter().all(Bounds::is_well_formed),
            "malformed box in shape"
        );
        Self { boxes }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[Bounds] {
        &self.boxes
    }

    /// Envelope of every box, or `None` for an empty shape.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.boxes.split_first()?;
        Some(rest.iter().fold(*first, |acc, b| acc.union(b)))
    }

    /// Rectangles this shape presents on the face pointing in `direction`.
    ///
    /// Lazy: boxes are filtered and flattened as the iterator is advanced, in
    /// the order they were added to the shape.
    pub fn face_shape(&self, direction: FaceDirection) -> FaceShape<'_> {
        FaceShape {
            boxes: self.boxes.iter(),
            direction,
        }
    }
}

/// Iterator over the face rectangles of a `SolidShape`. See
/// [`SolidShape::face_shape`].
#[derive(Clone, Debug)]
pub struct FaceShape<'a> {
    boxes: std::slice::Iter<'a, Bounds>,
    direction: FaceDirection,
}

impl Iterator for FaceShape<'_> {
    type Item = Bounds;

    fn next(&mut self) -> Option<Bounds> {
        let direction = self.direction;
        self.boxes
            .find(|b| b.touches_face(direction))
            .map(|b| b.face_footprint(direction))
    }
}
