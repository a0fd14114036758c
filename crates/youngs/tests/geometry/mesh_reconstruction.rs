use na::Point3;
use youngs::interface::{InterfaceError, InterfaceFlags, InterfaceOptions, MaterialInterface};
use youngs::mesh::{DataArray, UnstructuredMesh};
use youngs::shape::CellType;

/// A row of `n` unit hexahedra along `x`, with a `temperature = x + 2z` point array.
fn hexahedra_row(n: u32) -> UnstructuredMesh {
    let mut points = Vec::new();
    for k in 0..2 {
        for j in 0..2 {
            for i in 0..=n {
                points.push(Point3::new(i as f64, j as f64, k as f64));
            }
        }
    }

    let id = |i: u32, j: u32, k: u32| i + (n + 1) * (j + 2 * k);
    let temperature = points.iter().map(|p| p.x + 2.0 * p.z).collect();
    let mut mesh = UnstructuredMesh::new(points);

    for i in 0..n {
        mesh.push_cell(
            CellType::Hexahedron,
            &[
                id(i, 0, 0),
                id(i + 1, 0, 0),
                id(i + 1, 1, 0),
                id(i, 1, 0),
                id(i, 0, 1),
                id(i + 1, 0, 1),
                id(i + 1, 1, 1),
                id(i, 1, 1),
            ],
        );
    }

    mesh.point_data
        .push(DataArray::scalars("temperature", temperature));
    mesh
}

fn with_materials(mut mesh: UnstructuredMesh, steel: Vec<f64>) -> UnstructuredMesh {
    let n = steel.len();
    let air = steel.iter().map(|f| 1.0 - f).collect();
    mesh.cell_data.push(DataArray::scalars("steel", steel));
    mesh.cell_data.push(DataArray::scalars("air", air));
    mesh.cell_data.push(DataArray::scalars("nx", vec![0.0; n]));
    mesh.cell_data.push(DataArray::scalars("nz", vec![2.0; n]));
    mesh
}

fn filter(flags: InterfaceFlags) -> MaterialInterface {
    let mut filter = MaterialInterface::new(InterfaceOptions::with_flags(flags));
    filter.set_material_arrays(0, "steel", "nx ny nz", "");
    filter.set_material_arrays(1, "air", "", "");
    filter
}

fn check_temperature(mesh: &UnstructuredMesh) {
    let temperature = mesh.point_data_array("temperature").unwrap();
    assert_eq!(temperature.len(), mesh.num_points());

    for (pt, t) in mesh.points.iter().zip(&temperature.values) {
        assert_relative_eq!(*t, pt.x + 2.0 * pt.z, epsilon = 1.0e-9);
    }
}

#[test]
fn filled_materials_over_blocks() {
    let blocks = [
        with_materials(hexahedra_row(2), vec![0.5, 0.25]),
        UnstructuredMesh::default(),
        with_materials(hexahedra_row(1), vec![0.0]),
    ];
    let output = filter(InterfaceFlags::FILL_MATERIAL)
        .reconstruct(&blocks)
        .unwrap();

    assert_eq!(output.stats.processed_cells, 3);
    assert_eq!(output.stats.emitted_cells, 5);
    // The air has no normal array.
    assert_eq!(output.stats.null_normal, 3);

    // Steel only appears in the first block, air in both.
    assert_eq!(output.num_domains(0), 2);
    assert!(output.materials[0][1].is_none());
    assert_eq!(output.domains(1).count(), 2);

    let steel = output.materials[0][0].as_ref().unwrap();
    assert_eq!(steel.num_cells(), 2);
    assert!(steel.cell_types.iter().all(|t| *t == CellType::ConvexPointSet));
    // Six bottom points, shared between the two cells, and four interface points per cell.
    assert_eq!(steel.num_points(), 14);
    assert_eq!(steel.cell_data_array("steel").unwrap().values, vec![0.5, 0.25]);
    assert!(steel.points.iter().all(|p| p.z <= 0.5 + 1.0e-9));
    assert!(steel
        .cell_points(1)
        .iter()
        .any(|i| (steel.points[*i as usize].z - 0.25).abs() < 1.0e-9));
    check_temperature(steel);

    let air = output.materials[1][0].as_ref().unwrap();
    assert_eq!(air.num_cells(), 2);
    assert!(air.points.iter().all(|p| p.z >= 0.25 - 1.0e-9));
    check_temperature(air);

    // The whole cell of the last block is air.
    let air = output.materials[1][1].as_ref().unwrap();
    assert_eq!(air.cell_types, vec![CellType::Hexahedron]);
    assert_eq!(air.num_points(), 8);
    check_temperature(air);
}

#[test]
fn interface_polygons() {
    let mesh = with_materials(hexahedra_row(3), vec![0.5, 0.005, 0.75]);
    let result = filter(InterfaceFlags::empty())
        .reconstruct_block(&mesh, 0)
        .unwrap();

    assert_eq!(result.stats.emitted_cells, 2);
    let steel = &result.materials[0];
    assert_eq!(steel.cell_types, vec![CellType::Polygon; 2]);
    assert_eq!(steel.num_points(), 8);
    check_temperature(steel);

    // Cell 1 is skipped: its cell data is not copied.
    assert_eq!(steel.cell_data_array("steel").unwrap().values, vec![0.5, 0.75]);
    let heights: Vec<f64> = steel.cell_points(1).iter().map(|i| steel.points[*i as usize].z).collect();
    for z in heights {
        assert_relative_eq!(z, 0.75, epsilon = 1.0e-9);
    }

    // The air fills the rest of the cells, which is never emitted without fill.
    assert!(result.materials[1].is_empty());
}

#[test]
fn material_restricted_to_blocks() {
    let blocks = [
        with_materials(hexahedra_row(1), vec![0.5]),
        with_materials(hexahedra_row(1), vec![0.5]),
    ];
    let mut filter = filter(InterfaceFlags::empty());
    filter.set_use_all_blocks(false);
    filter.set_material_blocks(0, vec![1]);

    let output = filter.reconstruct(&blocks).unwrap();
    // The air appears in both blocks.
    assert_eq!(output.num_domains(0), 2);
    assert_eq!(output.domains(0).count(), 1);
    assert!(output.materials[0][1].is_none());
    assert_eq!(output.stats.emitted_cells, 1);
}

#[test]
fn invalid_input() {
    let blocks = [with_materials(hexahedra_row(1), vec![0.5])];
    assert_eq!(
        MaterialInterface::default().reconstruct(&blocks),
        Err(InterfaceError::NoMaterials)
    );

    let mut broken = blocks[0].clone();
    broken.connectivity[3] = 100;
    assert_eq!(
        filter(InterfaceFlags::empty()).reconstruct(&[broken]),
        Err(InterfaceError::MalformedCell {
            cell: 0,
            point: 100,
            num_points: 8
        })
    );
}

#[test]
fn later_invalid_block_fails_the_whole_reconstruction() {
    let good = with_materials(hexahedra_row(2), vec![0.5, 0.25]);
    let mut broken = with_materials(hexahedra_row(1), vec![0.5]);
    broken.cell_data[0].values.clear();

    let filter = filter(InterfaceFlags::FILL_MATERIAL);
    assert!(filter.reconstruct_block(&good, 0).is_ok());
    assert_eq!(
        filter.reconstruct(&[good.clone(), good, broken]),
        Err(InterfaceError::ArrayLength {
            name: "steel".to_string(),
            expected: 1,
            found: 0
        })
    );
}
