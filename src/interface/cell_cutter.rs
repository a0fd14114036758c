use super::{
    CellInfo, CellScratch, InterfaceFlags, InterfaceOptions, InterfaceStats, MaterialSample,
    PointRef,
};
use crate::math::{Point, Real, Vector};
use crate::mesh::PointAttributes;
use crate::query::{
    cutting_cone_triangles, cutting_plane_tetrahedra, cutting_plane_triangles, split_polygon,
    split_polyhedron, InterfacePoint, PolygonVertex,
};
use crate::shape::CellType;
use crate::transformation::Decomposition;
use arrayvec::ArrayVec;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// A point of a cell emitted for a material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmittedPoint {
    /// A point of the input mesh, shared by every cell referencing it.
    MeshPoint(u32),
    /// The `i`-th new point of the [`MaterialCellOutput`].
    NewPoint(u32),
}

/// The cell emitted for one material in one mesh cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialCellOutput {
    /// The type of the emitted cell.
    pub cell_type: CellType,
    /// The points of the emitted cell.
    pub points: Vec<EmittedPoint>,
    /// The coordinates of the new points.
    pub new_points: Vec<Point<Real>>,
    /// The point attributes of the new points, one flat tuple per point.
    pub new_attributes: Vec<Real>,
}

impl MaterialCellOutput {
    fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            points: Vec::new(),
            new_points: Vec::new(),
            new_attributes: Vec::new(),
        }
    }

    fn push_new_point(&mut self, point: Point<Real>) -> u32 {
        self.new_points.push(point);
        (self.new_points.len() - 1) as u32
    }

    /// The coordinates of the points of the emitted cell.
    pub fn point_coordinates(&self, mesh_points: &[Point<Real>]) -> Vec<Point<Real>> {
        self.points
            .iter()
            .map(|p| match p {
                EmittedPoint::MeshPoint(id) => mesh_points[*id as usize],
                EmittedPoint::NewPoint(id) => self.new_points[*id as usize],
            })
            .collect()
    }
}

/// What happened to a material in a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaterialOutcome {
    /// The material cannot produce anything in this cell: the cell is too small, or the
    /// fraction lies outside of the acceptance band.
    Skipped,
    /// The material was rejected: nothing was emitted and the cell was left unchanged.
    Retained,
    /// The cell was cut: the material's interface (or filled region) was emitted and the
    /// other side of the cut remains for the next materials.
    Cut,
    /// The material took the whole remaining cell.
    Filled,
}

/// The result of processing all the materials of a mesh cell.
#[derive(Clone, Debug)]
pub struct CellReconstruction {
    /// The cell emitted for each material, indexed like the material samples.
    pub outputs: Vec<Option<MaterialCellOutput>>,
    /// What happened to each material, indexed like the material samples.
    pub outcomes: Vec<MaterialOutcome>,
    /// The region left once every material was processed.
    pub remaining: CellInfo,
    /// Counters of the recoverable conditions met.
    pub stats: InterfaceStats,
}

/// Carves successive materials out of mesh cells.
///
/// Materials are processed by increasing ordering key (decreasing with
/// [`InterfaceFlags::REVERSE_MATERIAL_ORDER`]). Each one is given the requested fraction of
/// what remains of the cell: the remaining region is cut by a plane orthogonal to the
/// material normal, the part behind the plane goes to the material and the part in front of
/// the plane is handed over to the next material.
#[derive(Clone, Debug)]
pub struct CellCutter {
    options: InterfaceOptions,
    scratch: CellScratch,
    order: Vec<usize>,
    gather_a: Vec<Real>,
    gather_b: Vec<Real>,
}

impl CellCutter {
    /// Creates a cutter with the given options.
    pub fn new(options: InterfaceOptions) -> Self {
        Self {
            options,
            scratch: CellScratch::new(),
            order: Vec::new(),
            gather_a: Vec::new(),
            gather_b: Vec::new(),
        }
    }

    /// The options of this cutter.
    pub fn options(&self) -> &InterfaceOptions {
        &self.options
    }

    /// Snapshots a mesh cell, reusing the buffers of this cutter.
    pub fn cell_info(
        &mut self,
        cell_type: CellType,
        point_ids: &[u32],
        mesh_points: &[Point<Real>],
    ) -> CellInfo {
        CellInfo::from_mesh_cell(cell_type, point_ids, mesh_points, &mut self.scratch)
    }

    /// Processes every material of a cell.
    ///
    /// `samples` gives the fraction, normal, and ordering key of each material in this cell.
    /// `attributes` gives access to the attributes of the mesh points referenced by `cell`,
    /// which are interpolated on the interface points.
    pub fn process(
        &mut self,
        mut cell: CellInfo,
        samples: &[MaterialSample],
        attributes: &PointAttributes,
    ) -> CellReconstruction {
        let num_materials = samples.len();
        let mut stats = InterfaceStats {
            processed_cells: 1,
            ..InterfaceStats::default()
        };
        let mut outputs: Vec<Option<MaterialCellOutput>> =
            (0..num_materials).map(|_| None).collect();
        let mut outcomes = vec![MaterialOutcome::Skipped; num_materials];

        if matches!(cell.dimension(), 2 | 3)
            && !cell.is_empty()
            && *cell.decomposition() == Decomposition::Failed
        {
            stats.primary_triangulation_failed += 1;
            log::warn!(
                "Triangulation failed on a {:?} cell with {} points.",
                cell.cell_type(),
                cell.num_points()
            );
        }

        let options = self.options;
        let distance_mode = options.has(InterfaceFlags::USE_FRACTION_AS_DISTANCE);
        let fill = options.has(InterfaceFlags::FILL_MATERIAL);
        let onion_peel = options.has(InterfaceFlags::ONION_PEEL);
        let (min_fraction, max_fraction) = (options.min_fraction(), options.max_fraction());

        self.order.clear();
        self.order.extend(0..num_materials);
        self.order
            .sort_by_key(|m| OrderedFloat(samples[*m].ordering));
        if options.has(InterfaceFlags::REVERSE_MATERIAL_ORDER) {
            self.order.reverse();
        }

        let effective_materials = samples
            .iter()
            .filter(|s| distance_mode || s.fraction > min_fraction)
            .count();
        let mut processed_effective = 0;
        let mut reference_volume = 1.0;
        let mut normal = Vector::x();
        let mut null_normal = false;
        let mut normal_read = false;

        for mi in 0..num_materials {
            let m = self.order[mi];
            let raw_fraction = samples[m].fraction;

            let fraction = if distance_mode {
                raw_fraction
            } else {
                let normalized = if reference_volume > 0.0 {
                    raw_fraction / reference_volume
                } else {
                    0.0
                };
                reference_volume -= raw_fraction;
                normalized
            };

            if !options.produces_interface(cell.dimension(), cell.num_points(), fraction) {
                continue;
            }

            if !normal_read || !onion_peel {
                let n = samples[m].normal;
                let norm = n.norm();

                if norm == 0.0 {
                    stats.null_normal += 1;
                    null_normal = true;
                    normal = Vector::x();
                    log::debug!("Null normal for the material {}.", m);
                } else {
                    null_normal = false;
                    normal = n / norm;
                }

                if options.has(InterfaceFlags::INVERSE_NORMAL) {
                    normal = -normal;
                }

                normal_read = true;
            }

            if fraction > min_fraction {
                processed_effective += 1;
            }

            if (!distance_mode && fraction > max_fraction && fill) || (distance_mode && null_normal)
            {
                let output = self.emit_whole_cell(&cell, &outputs, attributes);
                outputs[m] = Some(output);
                outcomes[m] = MaterialOutcome::Filled;
                cell = CellInfo::empty();
                continue;
            }

            let was_pending = *cell.decomposition() == Decomposition::Pending;
            let decomposed = cell.ensure_decomposition(&mut self.scratch);

            if was_pending && !decomposed {
                stats.triangulation_failed += 1;
                log::warn!(
                    "Triangulation failed on the remaining region ({} points) before the material {}.",
                    cell.num_points(),
                    m
                );
            }

            if !distance_mode
                && (fraction < min_fraction || (fraction > max_fraction && !fill) || !decomposed)
            {
                outcomes[m] = MaterialOutcome::Retained;
                continue;
            }

            let offset = if distance_mode {
                Some(fraction)
            } else {
                self.solve(&cell, &normal, fraction)
            };

            let cut = offset.and_then(|offset| {
                if cell.dimension() == 2 {
                    self.cut_polygon(m, &cell, &normal, offset, fill, &outputs, attributes)
                } else {
                    self.cut_polyhedron(m, &cell, &normal, offset, fill, &outputs, attributes)
                }
            });

            match cut {
                Some((output, next)) => {
                    outputs[m] = Some(output);
                    outcomes[m] = MaterialOutcome::Cut;
                    cell = next;
                }
                None => {
                    stats.no_interface_found += 1;
                    outcomes[m] = MaterialOutcome::Retained;

                    if cell.dimension() == 2 {
                        log::warn!(
                            "No interface found for the material {} (fraction {}, {} of {} effective materials processed).",
                            m,
                            fraction,
                            processed_effective,
                            effective_materials
                        );
                    }
                }
            }
        }

        stats.emitted_cells = outputs.iter().filter(|o| o.is_some()).count();

        CellReconstruction {
            outputs,
            outcomes,
            remaining: cell,
            stats,
        }
    }

    fn solve(&self, cell: &CellInfo, normal: &Vector<Real>, fraction: Real) -> Option<Real> {
        match cell.decomposition() {
            Decomposition::Triangles(triangles) => {
                if self.options.has(InterfaceFlags::AXIS_SYMMETRIC) {
                    Some(cutting_cone_triangles(
                        normal,
                        fraction,
                        cell.points(),
                        triangles,
                    ))
                } else {
                    Some(cutting_plane_triangles(
                        normal,
                        fraction,
                        cell.points(),
                        triangles,
                    ))
                }
            }
            Decomposition::Tetrahedra(tetrahedra) => Some(cutting_plane_tetrahedra(
                normal,
                fraction,
                cell.points(),
                tetrahedra,
            )),
            Decomposition::Pending | Decomposition::Failed => None,
        }
    }

    fn cut_polygon(
        &mut self,
        material: usize,
        cell: &CellInfo,
        normal: &Vector<Real>,
        offset: Real,
        fill: bool,
        outputs: &[Option<MaterialCellOutput>],
        attributes: &PointAttributes,
    ) -> Option<(MaterialCellOutput, CellInfo)> {
        let split = split_polygon(cell.points(), normal, offset)?;
        let cell_type = if fill {
            CellType::Polygon
        } else {
            CellType::Line
        };
        let mut output = MaterialCellOutput::new(cell_type);

        let mut interface_ids = ArrayVec::<u32, 2>::new();
        for ip in &split.interface {
            interface_ids.push(self.push_interpolated(&mut output, cell, ip, outputs, attributes));
        }

        if fill {
            for vertex in &split.inside {
                let emitted = match vertex {
                    PolygonVertex::Vertex(i) => {
                        self.emit_cell_point(&mut output, cell, *i, outputs, attributes)
                    }
                    PolygonVertex::Interface(k) => EmittedPoint::NewPoint(interface_ids[*k as usize]),
                };
                output.points.push(emitted);
            }
        } else {
            output
                .points
                .extend(interface_ids.iter().map(|id| EmittedPoint::NewPoint(*id)));
        }

        let mut points = Vec::with_capacity(split.outside.len());
        let mut point_refs = Vec::with_capacity(split.outside.len());

        for vertex in &split.outside {
            match vertex {
                PolygonVertex::Vertex(i) => {
                    points.push(cell.points()[*i as usize]);
                    point_refs.push(cell.point_refs()[*i as usize]);
                }
                PolygonVertex::Interface(k) => {
                    points.push(split.interface[*k as usize].point);
                    point_refs.push(PointRef::InterpolatedPoint {
                        material: material as u32,
                        index: interface_ids[*k as usize],
                    });
                }
            }
        }

        Some((output, CellInfo::polygon(points, point_refs)))
    }

    fn cut_polyhedron(
        &mut self,
        material: usize,
        cell: &CellInfo,
        normal: &Vector<Real>,
        offset: Real,
        fill: bool,
        outputs: &[Option<MaterialCellOutput>],
        attributes: &PointAttributes,
    ) -> Option<(MaterialCellOutput, CellInfo)> {
        let split = split_polyhedron(
            cell.points(),
            cell.edges(),
            cell.num_faces(),
            normal,
            offset,
        )?;
        let cell_type = if fill {
            CellType::ConvexPointSet
        } else {
            CellType::Polygon
        };
        let mut output = MaterialCellOutput::new(cell_type);

        let mut interface_ids = SmallVec::<[u32; 8]>::new();
        for ip in &split.interface {
            let id = self.push_interpolated(&mut output, cell, ip, outputs, attributes);
            interface_ids.push(id);
            output.points.push(EmittedPoint::NewPoint(id));
        }

        if fill {
            for i in &split.inside {
                let emitted = self.emit_cell_point(&mut output, cell, *i, outputs, attributes);
                output.points.push(emitted);
            }
        }

        let capacity = split.interface.len() + split.outside.len();
        let mut points = Vec::with_capacity(capacity);
        let mut point_refs = Vec::with_capacity(capacity);

        for (ip, id) in split.interface.iter().zip(interface_ids.iter()) {
            points.push(ip.point);
            point_refs.push(PointRef::InterpolatedPoint {
                material: material as u32,
                index: *id,
            });
        }

        for i in &split.outside {
            points.push(cell.points()[*i as usize]);
            point_refs.push(cell.point_refs()[*i as usize]);
        }

        Some((output, CellInfo::convex_point_set(points, point_refs)))
    }

    fn emit_whole_cell(
        &mut self,
        cell: &CellInfo,
        outputs: &[Option<MaterialCellOutput>],
        attributes: &PointAttributes,
    ) -> MaterialCellOutput {
        let mut output = MaterialCellOutput::new(cell.cell_type());

        for i in 0..cell.num_points() as u32 {
            let emitted = self.emit_cell_point(&mut output, cell, i, outputs, attributes);
            output.points.push(emitted);
        }

        output
    }

    /// Emits the `i`-th point of `cell`. Points created for previous materials are copied
    /// into `output`.
    fn emit_cell_point(
        &mut self,
        output: &mut MaterialCellOutput,
        cell: &CellInfo,
        i: u32,
        outputs: &[Option<MaterialCellOutput>],
        attributes: &PointAttributes,
    ) -> EmittedPoint {
        match cell.point_refs()[i as usize] {
            PointRef::MeshPoint(id) => EmittedPoint::MeshPoint(id),
            point_ref @ PointRef::InterpolatedPoint { .. } => {
                self.gather_a.clear();
                resolve_attributes(point_ref, outputs, attributes, &mut self.gather_a);
                output.new_attributes.extend_from_slice(&self.gather_a);
                EmittedPoint::NewPoint(output.push_new_point(cell.points()[i as usize]))
            }
        }
    }

    /// Emits a new point at an interface, with attributes interpolated along the cut edge.
    fn push_interpolated(
        &mut self,
        output: &mut MaterialCellOutput,
        cell: &CellInfo,
        ip: &InterfacePoint,
        outputs: &[Option<MaterialCellOutput>],
        attributes: &PointAttributes,
    ) -> u32 {
        let [a, b] = ip.edge;

        self.gather_a.clear();
        self.gather_b.clear();
        resolve_attributes(
            cell.point_refs()[a as usize],
            outputs,
            attributes,
            &mut self.gather_a,
        );
        resolve_attributes(
            cell.point_refs()[b as usize],
            outputs,
            attributes,
            &mut self.gather_b,
        );

        output.new_attributes.extend(
            self.gather_a
                .iter()
                .zip(self.gather_b.iter())
                .map(|(va, vb)| va + ip.weight * (vb - va)),
        );

        output.push_new_point(ip.point)
    }
}

fn resolve_attributes(
    point_ref: PointRef,
    outputs: &[Option<MaterialCellOutput>],
    attributes: &PointAttributes,
    out: &mut Vec<Real>,
) {
    match point_ref {
        PointRef::MeshPoint(id) => attributes.gather(id, out),
        PointRef::InterpolatedPoint { material, index } => {
            let stride = attributes.stride();
            let start = index as usize * stride;

            match outputs.get(material as usize).and_then(|o| o.as_ref()) {
                Some(source) => {
                    out.extend_from_slice(&source.new_attributes[start..start + stride])
                }
                None => out.resize(out.len() + stride, 0.0),
            }
        }
    }
}
