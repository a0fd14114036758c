use super::random_cells::*;
use na::{Point3, Vector3};
use oorandom::Rand64;
use youngs::interface::{
    CellCutter, InterfaceFlags, InterfaceOptions, MaterialOutcome, MaterialSample,
};
use youngs::mesh::PointAttributes;
use youngs::query::{cutting_plane_tetrahedra, cutting_plane_triangles, split_polygon, PolygonVertex};
use youngs::shape::CellType;

fn unit_square() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]
}

fn unit_tetrahedron() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ]
}

fn unit_cube() -> Vec<Point3<f64>> {
    let mut points = unit_square();
    points.extend(unit_square().iter().map(|p| p + Vector3::z()));
    points
}

#[test]
fn half_unit_square() {
    let points = unit_square();
    let offset = cutting_plane_triangles(&Vector3::x(), 0.5, &points, &fan(4));
    assert_relative_eq!(offset, -0.5, epsilon = 1.0e-9);

    let split = split_polygon(&points, &Vector3::x(), offset).unwrap();
    assert_eq!(
        split.inside,
        vec![
            PolygonVertex::Vertex(0),
            PolygonVertex::Interface(0),
            PolygonVertex::Interface(1),
            PolygonVertex::Vertex(3),
        ]
    );
    assert_relative_eq!(split.interface[0].point, Point3::new(0.5, 0.0, 0.0), epsilon = 1.0e-9);
    assert_relative_eq!(split.interface[1].point, Point3::new(0.5, 1.0, 0.0), epsilon = 1.0e-9);
}

#[test]
fn full_unit_tetrahedron() {
    let points = unit_tetrahedron();
    let normal = Vector3::new(1.0, 1.0, 1.0).normalize();
    let offset = cutting_plane_tetrahedra(&normal, 1.0, &points, &[[0, 1, 2, 3]]);

    // The plane passes through the farthest vertices: the whole cell is inside.
    assert_relative_eq!(offset, -normal.x, epsilon = 1.0e-9);
    for pt in &points {
        assert!(normal.dot(&pt.coords) + offset <= 1.0e-9);
    }

    let mut cutter = CellCutter::new(InterfaceOptions::with_flags(InterfaceFlags::FILL_MATERIAL));
    let cell = cutter.cell_info(CellType::Tetra, &[0, 1, 2, 3], &points);
    let result = cutter.process(
        cell,
        &[MaterialSample::new(1.0, normal)],
        &PointAttributes::empty(),
    );

    assert_eq!(result.outcomes, vec![MaterialOutcome::Filled]);
    let output = result.outputs[0].as_ref().unwrap();
    assert_eq!(output.cell_type, CellType::Tetra);
    assert_relative_eq!(hull_volume(output.point_coordinates(&points)), 1.0 / 6.0, epsilon = 1.0e-12);
}

#[test]
fn two_materials_in_a_square() {
    let points = unit_square();
    let mut cutter = CellCutter::new(InterfaceOptions::with_flags(InterfaceFlags::FILL_MATERIAL));
    let cell = cutter.cell_info(CellType::Quad, &[0, 1, 2, 3], &points);

    // The second fraction is relative to the whole cell: 0.7 of the remaining 0.7.
    let samples = [
        MaterialSample::new(0.3, Vector3::new(1.0, 1.0, 0.0)),
        MaterialSample::new(0.49, Vector3::new(1.0, 0.0, 0.0)),
    ];
    let result = cutter.process(cell, &samples, &PointAttributes::empty());

    let areas: Vec<f64> = result
        .outputs
        .iter()
        .map(|o| polygon_area(&o.as_ref().unwrap().point_coordinates(&points)))
        .collect();
    assert_relative_eq!(areas[0], 0.3, epsilon = 1.0e-9);
    assert_relative_eq!(areas[1], 0.49, epsilon = 1.0e-9);
    assert_relative_eq!(polygon_area(result.remaining.points()), 0.21, epsilon = 1.0e-9);
}

#[test]
fn onion_peeling_conserves_volume() {
    let mut rng = Rand64::new(2024);
    let points = unit_cube();
    let options =
        InterfaceOptions::with_flags(InterfaceFlags::FILL_MATERIAL | InterfaceFlags::ONION_PEEL);

    for _ in 0..50 {
        let mut cutter = CellCutter::new(options);
        let cell = cutter.cell_info(CellType::Hexahedron, &[0, 1, 2, 3, 4, 5, 6, 7], &points);

        // Four fractions summing to 1, none of them below the acceptance band.
        let mut fractions: Vec<f64> = (0..4).map(|_| 0.1 + rng.rand_float()).collect();
        let sum: f64 = fractions.iter().sum();
        fractions.iter_mut().for_each(|f| *f /= sum);

        let normal = random_unit_vector(&mut rng);
        let samples: Vec<_> = fractions
            .iter()
            .enumerate()
            .map(|(i, f)| {
                // Only the first normal is used.
                let n = if i == 0 { normal } else { random_unit_vector(&mut rng) };
                MaterialSample::new(*f, n)
            })
            .collect();

        let result = cutter.process(cell, &samples, &PointAttributes::empty());
        assert_eq!(result.outcomes[..3], [MaterialOutcome::Cut; 3]);
        assert_eq!(result.outcomes[3], MaterialOutcome::Filled);

        let mut total = 0.0;
        for (output, fraction) in result.outputs.iter().zip(&fractions) {
            let output = output.as_ref().unwrap();
            let volume = hull_volume(output.point_coordinates(&points));
            assert_relative_eq!(volume, *fraction, max_relative = 1.0e-6);
            total += volume;
        }
        assert_relative_eq!(total, 1.0, epsilon = 1.0e-6);

        // Parallel interfaces: the new points of a material lie either on its own interface
        // or on the interface of the previous material.
        let mut previous: Option<f64> = None;
        for output in &result.outputs[..3] {
            let output = output.as_ref().unwrap();
            let level = normal.dot(&output.new_points[0].coords);

            for pt in &output.new_points {
                let l = normal.dot(&pt.coords);
                assert!(
                    (l - level).abs() < 1.0e-9 || previous.is_some_and(|p| (l - p).abs() < 1.0e-9)
                );
            }

            assert!(previous.map_or(true, |p| level > p));
            previous = Some(level);
        }
    }
}

#[test]
fn interfaces_only_without_fill() {
    let points = unit_cube();
    let mut cutter = CellCutter::new(InterfaceOptions::default());
    let cell = cutter.cell_info(CellType::Hexahedron, &[0, 1, 2, 3, 4, 5, 6, 7], &points);
    let samples = [
        MaterialSample::new(0.5, Vector3::new(1.0, 1.0, 1.0)),
        MaterialSample::new(0.5, Vector3::new(1.0, 1.0, 1.0)),
    ];
    let result = cutter.process(cell, &samples, &PointAttributes::empty());

    // The diagonal plane through the cube center crosses six edges.
    let polygon = result.outputs[0].as_ref().unwrap();
    assert_eq!(polygon.cell_type, CellType::Polygon);
    assert_eq!(polygon.points.len(), 6);
    for pt in &polygon.new_points {
        assert_relative_eq!(pt.x + pt.y + pt.z, 1.5, epsilon = 1.0e-9);
    }

    // The second material fills the rest, which is never emitted without fill.
    assert_eq!(result.outcomes[1], MaterialOutcome::Skipped);
    assert!(result.outputs[1].is_none());
}

#[test]
fn axisymmetric_radial_cut() {
    // A rectangle along the axis, cut by a plane orthogonal to the radius: the outer layers
    // weigh more than the inner ones.
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let mut cutter = CellCutter::new(InterfaceOptions::with_flags(InterfaceFlags::AXIS_SYMMETRIC));
    let cell = cutter.cell_info(CellType::Quad, &[0, 1, 2, 3], &points);
    let result = cutter.process(
        cell,
        &[MaterialSample::new(0.5, Vector3::y())],
        &PointAttributes::empty(),
    );

    let line = result.outputs[0].as_ref().unwrap();
    assert_eq!(line.cell_type, CellType::Line);
    for pt in &line.new_points {
        assert_relative_eq!(pt.y, 0.5f64.cbrt(), epsilon = 1.0e-6);
    }
}

#[test]
fn inverse_normals_swap_sides() {
    let points = unit_square();
    let mut cutter = CellCutter::new(InterfaceOptions::with_flags(
        InterfaceFlags::FILL_MATERIAL | InterfaceFlags::INVERSE_NORMAL,
    ));
    let cell = cutter.cell_info(CellType::Quad, &[0, 1, 2, 3], &points);
    let result = cutter.process(
        cell,
        &[MaterialSample::new(0.25, Vector3::x())],
        &PointAttributes::empty(),
    );

    let filled = result.outputs[0].as_ref().unwrap();
    let coords = filled.point_coordinates(&points);
    assert_relative_eq!(polygon_area(&coords), 0.25, epsilon = 1.0e-9);
    assert!(coords.iter().all(|p| p.x >= 0.75 - 1.0e-9));
}
