use na::{Point3, Vector3};
use oorandom::Rand64;
use std::f64::consts::PI;
use youngs::interface::{CellInfo, CellScratch, PointRef};
use youngs::transformation::Decomposition;

/// A convex polygon in the `z = 0` plane with its vertices on a circle.
pub fn random_polygon(rng: &mut Rand64) -> Vec<Point3<f64>> {
    let n = rng.rand_range(3..12) as usize;
    let center = Point3::new(rng.rand_float() * 10.0 - 5.0, rng.rand_float() * 10.0 - 5.0, 0.0);
    let radius = 0.1 + rng.rand_float() * 3.0;

    let mut angles: Vec<f64> = (0..n).map(|_| rng.rand_float() * 2.0 * PI).collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());

    angles
        .iter()
        .map(|a| center + Vector3::new(a.cos(), a.sin(), 0.0) * radius)
        .collect()
}

/// The convex hull of points drawn on a sphere, decomposed into tetrahedra.
pub fn random_polyhedron(rng: &mut Rand64) -> CellInfo {
    let n = rng.rand_range(4..14) as usize;
    let center = Point3::new(
        rng.rand_float() * 4.0 - 2.0,
        rng.rand_float() * 4.0 - 2.0,
        rng.rand_float() * 4.0 - 2.0,
    );
    let radius = 0.1 + rng.rand_float() * 3.0;
    let points: Vec<_> = (0..n)
        .map(|_| center + random_unit_vector(rng) * radius)
        .collect();

    let mut cell = CellInfo::convex_point_set(points, mesh_refs(n));
    assert!(cell.ensure_decomposition(&mut CellScratch::new()));
    cell
}

pub fn random_unit_vector(rng: &mut Rand64) -> Vector3<f64> {
    let z = rng.rand_float() * 2.0 - 1.0;
    let phi = rng.rand_float() * 2.0 * PI;
    let r = (1.0 - z * z).sqrt();
    Vector3::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn random_planar_unit_vector(rng: &mut Rand64) -> Vector3<f64> {
    let phi = rng.rand_float() * 2.0 * PI;
    Vector3::new(phi.cos(), phi.sin(), 0.0)
}

pub fn mesh_refs(n: usize) -> Vec<PointRef> {
    (0..n as u32).map(PointRef::MeshPoint).collect()
}

pub fn fan(n: usize) -> Vec<[u32; 3]> {
    (1..n as u32 - 1).map(|i| [0, i, i + 1]).collect()
}

pub fn tetrahedra(cell: &CellInfo) -> &[[u32; 4]] {
    match cell.decomposition() {
        Decomposition::Tetrahedra(tets) => tets,
        other => panic!("Expected tetrahedra, found {:?}.", other),
    }
}

/// The area of a polygon of the `z = 0` plane.
pub fn polygon_area(points: &[Point3<f64>]) -> f64 {
    let mut area = 0.0;

    for i in 0..points.len() {
        let (a, b) = (points[i], points[(i + 1) % points.len()]);
        area += a.x * b.y - b.x * a.y;
    }

    area.abs() / 2.0
}

/// The volume of the convex hull of `points`.
pub fn hull_volume(points: Vec<Point3<f64>>) -> f64 {
    let n = points.len();
    CellInfo::convex_point_set(points, mesh_refs(n)).measure(&mut CellScratch::new())
}
