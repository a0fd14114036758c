//! Face discovery for the convex hull of an unordered point set.

use crate::math::{Point, Real, Vector};
use crate::utils::hashmap::{self, HashMap};
use crate::utils::{self, SortedPair};
use ordered_float::OrderedFloat;

/// The faces of a convex polyhedron, stored as loops of point indices in one flat buffer.
#[derive(Clone, Debug, Default)]
pub struct ConvexFaces {
    vertices: Vec<u32>,
    offsets: Vec<usize>,
}

impl ConvexFaces {
    /// Creates an empty set of faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set of faces from a fixed topology table.
    pub fn from_table(table: &[&[u32]]) -> Self {
        let mut result = Self::new();
        for face in table {
            result.push(face);
        }
        result
    }

    /// Removes every face while keeping the allocated buffers.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.offsets.clear();
    }

    /// Appends a face.
    pub fn push(&mut self, face: &[u32]) {
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        self.vertices.extend_from_slice(face);
        self.offsets.push(self.vertices.len());
    }

    /// The number of faces.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Is this set of faces empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th face.
    pub fn face(&self, i: usize) -> &[u32] {
        &self.vertices[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Iterates through all the faces.
    pub fn iter(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.len()).map(move |i| self.face(i))
    }
}

/// Discovers the faces of the convex hull of `points`.
///
/// The hull is wrapped one face at a time: a first supporting plane is found from the point of
/// smallest coordinates, then each face edge not shared by two faces yet is used as a hinge
/// around which the supporting plane rotates until it hits the adjacent face. Every face
/// gathers the points lying on its plane, sorted in boundary order. `scratch` is only used as
/// temporary storage.
///
/// Points strictly inside of the hull or of one of its faces are not part of any face. Returns
/// `false` if fewer than four points are given or if all the points are coplanar, in which
/// case `faces` is left empty.
pub fn convex_point_set_faces(
    points: &[Point<Real>],
    faces: &mut ConvexFaces,
    scratch: &mut Vec<u32>,
) -> bool {
    faces.clear();

    let n = points.len();
    if n < 4 {
        return false;
    }

    let scale = extent(points);
    if scale == 0.0 {
        return false;
    }

    let tolerance = scale * 1.0e-9;
    let mut face_points = Vec::new();

    let Some((anchor, normal)) = first_face_plane(points, tolerance, scratch, &mut face_points)
    else {
        return false;
    };

    if !gather_face(points, &anchor, &normal, tolerance, scratch, &mut face_points) {
        // Every point lies on this plane.
        return false;
    }

    let mut edge_faces: HashMap<SortedPair<u32>, u32> = hashmap::with_capacity(n * 3);
    let mut hinges = Vec::new();
    push_wrapped_face(faces, scratch, normal, &mut edge_faces, &mut hinges);

    while let Some((a, b, source, normal)) = hinges.pop() {
        if edge_faces
            .get(&SortedPair::new(a, b))
            .is_some_and(|count| *count >= 2)
        {
            continue;
        }

        let pa = points[a as usize];
        let Some(axis) = (points[b as usize] - pa).try_normalize(0.0) else {
            continue;
        };
        face_points.clear();
        face_points.extend(faces.face(source).iter().map(|id| points[*id as usize]));
        let face_center = utils::center(&face_points);
        let mut inward = normal.cross(&axis).normalize();
        if inward.dot(&(face_center - pa)) < 0.0 {
            inward = -inward;
        }

        let Some(next_normal) = rotate_around_hinge(points, &pa, &normal, &inward, tolerance)
        else {
            continue;
        };

        if !gather_face(points, &pa, &next_normal, tolerance, scratch, &mut face_points) {
            faces.clear();
            return false;
        }

        if faces
            .iter()
            .any(|f| scratch.iter().all(|id| f.contains(id)))
        {
            continue;
        }

        push_wrapped_face(faces, scratch, next_normal, &mut edge_faces, &mut hinges);
    }

    !faces.is_empty()
}

/// A plane supporting the hull along one of its faces.
///
/// The plane `x = min x` is first rotated around a vertical line through the point of smallest
/// `(x, y)`. If it then only touches the hull along an edge, it is rotated a second time
/// around that edge.
fn first_face_plane(
    points: &[Point<Real>],
    tolerance: Real,
    scratch: &mut Vec<u32>,
    face_points: &mut Vec<Point<Real>>,
) -> Option<(Point<Real>, Vector<Real>)> {
    let p0 = *points.iter().min_by(|a, b| {
        (OrderedFloat(a.x), OrderedFloat(a.y)).cmp(&(OrderedFloat(b.x), OrderedFloat(b.y)))
    })?;

    // Every point has `x >= p0.x`, and those with `x == p0.x` have `y >= p0.y`.
    let normal = rotate_around_hinge(points, &p0, &-Vector::x(), &Vector::y(), 0.0)?;

    if !gather_face(points, &p0, &normal, tolerance, scratch, face_points) {
        return None;
    }

    let far = face_points
        .iter()
        .max_by_key(|pt| OrderedFloat((**pt - p0).norm_squared()))
        .copied()?;
    let axis = (far - p0).try_normalize(0.0)?;

    if face_points
        .iter()
        .any(|pt| (*pt - p0).cross(&axis).norm() > tolerance)
    {
        return Some((p0, normal));
    }

    // The plane only touches the hull along the edge `p0 -> far`.
    let inward = normal.cross(&axis).normalize();
    let normal = rotate_around_hinge(points, &p0, &normal, &inward, tolerance)?;
    Some((p0, normal))
}

/// Rotates the supporting plane through `anchor` with outward `normal` around the hinge line
/// orthogonal to both `normal` and `inward`, until it hits another point.
///
/// `inward` points from the hinge toward the side of the plane already bounded by the hull.
/// Only points farther than `tolerance` below the plane are candidates. Returns the outward
/// normal of the rotated plane.
fn rotate_around_hinge(
    points: &[Point<Real>],
    anchor: &Point<Real>,
    normal: &Vector<Real>,
    inward: &Vector<Real>,
    tolerance: Real,
) -> Option<Vector<Real>> {
    let mut best: Option<(Real, Real, Real)> = None;

    for pt in points {
        let d = pt - anchor;
        let below = -d.dot(normal);
        if below <= tolerance {
            continue;
        }

        let outward = -d.dot(inward);
        let angle = below.atan2(outward);

        if best.map_or(true, |(best_angle, _, _)| angle < best_angle) {
            best = Some((angle, outward, below));
        }
    }

    let (_, outward, below) = best?;
    let len = outward.hypot(below);
    Some((*normal * outward - *inward * below) / len)
}

/// Collects into `face` the points lying on the plane, in boundary order, without the points
/// strictly inside of the face polygon.
///
/// Returns `false` if every point lies on the plane.
fn gather_face(
    points: &[Point<Real>],
    anchor: &Point<Real>,
    normal: &Vector<Real>,
    tolerance: Real,
    face: &mut Vec<u32>,
    face_points: &mut Vec<Point<Real>>,
) -> bool {
    face.clear();
    face_points.clear();

    for (id, pt) in points.iter().enumerate() {
        if normal.dot(&(pt - anchor)).abs() <= tolerance {
            face.push(id as u32);
            face_points.push(*pt);
        }
    }

    if face.len() == points.len() {
        face.clear();
        return false;
    }

    utils::sort_by_polar_angle(face, face_points, normal);
    remove_reflex_points(points, face, normal);
    true
}

/// Removes the points of a star-shaped loop that are not on its convex boundary.
///
/// Points aligned with their two neighbors are kept.
fn remove_reflex_points(points: &[Point<Real>], face: &mut Vec<u32>, normal: &Vector<Real>) {
    if face.len() < 4 {
        return;
    }

    let turn = |face: &[u32], i: usize| -> Real {
        let k = face.len();
        let prev = points[face[(i + k - 1) % k] as usize];
        let curr = points[face[i] as usize];
        let next = points[face[(i + 1) % k] as usize];
        let (e1, e2) = (curr - prev, next - curr);
        e1.cross(&e2).dot(normal) / (e1.norm() * e2.norm()).max(Real::MIN_POSITIVE)
    };

    let winding: Real = (0..face.len()).map(|i| turn(&face[..], i)).sum();
    let sign = if winding < 0.0 { -1.0 } else { 1.0 };

    loop {
        let reflex = (0..face.len()).find(|i| sign * turn(&face[..], *i) < -1.0e-9);

        match reflex {
            Some(i) if face.len() > 3 => {
                let _ = face.remove(i);
            }
            _ => break,
        }
    }
}

fn push_wrapped_face(
    faces: &mut ConvexFaces,
    face: &[u32],
    normal: Vector<Real>,
    edge_faces: &mut HashMap<SortedPair<u32>, u32>,
    hinges: &mut Vec<(u32, u32, usize, Vector<Real>)>,
) {
    let id = faces.len();

    for (k, a) in face.iter().enumerate() {
        let b = face[(k + 1) % face.len()];
        *edge_faces.entry(SortedPair::new(*a, b)).or_insert(0) += 1;
        hinges.push((*a, b, id, normal));
    }

    faces.push(face);
}

fn extent(points: &[Point<Real>]) -> Real {
    let mut mins = points[0];
    let mut maxs = points[0];

    for pt in &points[1..] {
        mins = mins.inf(pt);
        maxs = maxs.sup(pt);
    }

    (maxs - mins).max()
}
