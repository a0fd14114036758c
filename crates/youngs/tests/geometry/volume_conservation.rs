use super::random_cells::*;
use na::Point3;
use oorandom::Rand64;
use youngs::query::{
    cutting_plane_tetrahedra, cutting_plane_triangles, split_polygon, split_polyhedron,
    PolygonVertex,
};
use youngs::shape::Triangle;

fn polygon_points(
    points: &[Point3<f64>],
    interface: &[Point3<f64>],
    vertices: &[PolygonVertex],
) -> Vec<Point3<f64>> {
    vertices
        .iter()
        .map(|v| match v {
            PolygonVertex::Vertex(i) => points[*i as usize],
            PolygonVertex::Interface(k) => interface[*k as usize],
        })
        .collect()
}

#[test]
fn polygon_cuts_conserve_area() {
    let mut rng = Rand64::new(42);

    for _ in 0..500 {
        let points = random_polygon(&mut rng);
        let triangles = fan(points.len());
        let total: f64 = triangles
            .iter()
            .map(|[a, b, c]| {
                Triangle::new(points[*a as usize], points[*b as usize], points[*c as usize]).area()
            })
            .sum();
        let normal = random_planar_unit_vector(&mut rng);
        let fraction = 0.05 + rng.rand_float() * 0.9;

        let offset = cutting_plane_triangles(&normal, fraction, &points, &triangles);
        let split = split_polygon(&points, &normal, offset).expect("The line must cross the polygon.");
        let interface: Vec<_> = split.interface.iter().map(|ip| ip.point).collect();

        let inside = polygon_area(&polygon_points(&points, &interface, &split.inside));
        let outside = polygon_area(&polygon_points(&points, &interface, &split.outside));

        assert_relative_eq!(inside, fraction * total, max_relative = 1.0e-6);
        assert_relative_eq!(inside + outside, total, max_relative = 1.0e-9);
        assert_eq!(split.inside.len() + split.outside.len(), points.len() + 4);
    }
}

#[test]
fn polyhedron_cuts_conserve_volume() {
    let mut rng = Rand64::new(1234);

    for _ in 0..200 {
        let mut cell = random_polyhedron(&mut rng);
        let total = cell.measure(&mut youngs::interface::CellScratch::new());
        let normal = random_unit_vector(&mut rng);
        let fraction = 0.05 + rng.rand_float() * 0.9;

        let offset = cutting_plane_tetrahedra(&normal, fraction, cell.points(), tetrahedra(&cell));
        let split = split_polyhedron(cell.points(), cell.edges(), cell.num_faces(), &normal, offset)
            .expect("The plane must cross the polyhedron.");

        // Every vertex lands on exactly one side.
        assert_eq!(split.inside.len() + split.outside.len(), cell.num_points());

        let side = |ids: &[u32]| -> Vec<Point3<f64>> {
            split
                .interface_points()
                .chain(ids.iter().map(|i| cell.points()[*i as usize]))
                .collect()
        };
        let inside = hull_volume(side(&split.inside));
        let outside = hull_volume(side(&split.outside));

        assert_relative_eq!(inside, fraction * total, max_relative = 1.0e-6);
        assert_relative_eq!(inside + outside, total, max_relative = 1.0e-6);
    }
}

#[test]
fn plane_position_grows_with_the_fraction() {
    let mut rng = Rand64::new(7);

    for _ in 0..50 {
        let cell = random_polyhedron(&mut rng);
        let normal = random_unit_vector(&mut rng);
        let mut last = f64::NEG_INFINITY;

        for i in 0..=20 {
            let fraction = i as f64 / 20.0;
            let position =
                -cutting_plane_tetrahedra(&normal, fraction, cell.points(), tetrahedra(&cell));
            assert!(position >= last - 1.0e-12);
            last = position;
        }
    }
}

#[test]
fn boundary_fractions_bound_the_cell() {
    let mut rng = Rand64::new(99);

    for _ in 0..50 {
        let points = random_polygon(&mut rng);
        let triangles = fan(points.len());
        let normal = random_planar_unit_vector(&mut rng);
        let levels: Vec<f64> = points.iter().map(|p| normal.dot(&p.coords)).collect();
        let min = levels.iter().copied().fold(f64::INFINITY, f64::min);
        let max = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let empty = cutting_plane_triangles(&normal, 0.0, &points, &triangles);
        let full = cutting_plane_triangles(&normal, 1.0, &points, &triangles);
        assert_relative_eq!(-empty, min, epsilon = 1.0e-9);
        assert_relative_eq!(-full, max, epsilon = 1.0e-9);
    }
}
